use crate::error::{Error, Result};
use crate::models::SimConfig;
use crate::state::{ChannelBank, RunResult, WaitQueue};
use crate::variates::VariateSource;

/// Simulates one independent realization of the facility over `[0, T)`.
///
/// The loop is arrival-driven: time advances only on arrival events, and
/// service completions are recognized lazily when the next arrival compares
/// timestamps. The arrival drawn past the horizon is still processed, since
/// the horizon is only checked at the top of the loop.
pub fn run_once(config: &SimConfig, variates: &mut VariateSource) -> Result<RunResult> {
    validate_config(config)?;

    let mut channels = ChannelBank::new(config.channels);
    let mut queue = WaitQueue::bounded(config.queue_capacity);
    let mut state_counts = vec![0u64; config.state_count()];

    let mut served = 0u64;
    let mut refusals = 0u64;
    let mut busy_channel_time = 0.0;
    let mut queue_length_time = 0.0;
    let mut wait_time_total = 0.0;
    let mut wait_observations = 0u64;
    let mut waiting_times = Vec::new();

    let mut now = 0.0;
    while now < config.horizon_hours {
        now += variates.sample_exponential(config.arrival_rate)?;

        channels.release_elapsed(now);

        let busy = channels.busy_count();
        let waiting = queue.len();
        let state = (busy + waiting).min(state_counts.len() - 1);
        state_counts[state] += 1;

        // Admission: free channel first, then queue, otherwise refuse.
        if let Some(idx) = channels.first_free() {
            let service = variates.sample_exponential(config.service_rate)?;
            channels.occupy(idx, now + service);
            served += 1;
        } else if !queue.push(now) {
            refusals += 1;
        }

        // Reneging pass, tail to head: drop entries past their patience,
        // record the wait of everyone still in line.
        let mut idx = queue.len();
        while idx > 0 {
            idx -= 1;
            let wait = now - queue.arrived_at(idx);
            if wait > config.patience_hours {
                queue.remove(idx);
                refusals += 1;
            } else {
                wait_time_total += wait;
                wait_observations += 1;
                waiting_times.push(wait);
            }
        }

        // One unit of occupancy-time per arrival event, the per-step proxy
        // for time-weighted integration.
        busy_channel_time += busy as f64;
        queue_length_time += waiting as f64;
    }

    Ok(RunResult {
        served,
        refusals,
        state_counts,
        busy_channel_time,
        queue_length_time,
        wait_time_total,
        wait_observations,
        waiting_times,
    })
}

pub(crate) fn validate_config(config: &SimConfig) -> Result<()> {
    if !config.arrival_rate.is_finite() || config.arrival_rate <= 0.0 {
        return Err(Error::InvalidArrivalRate(config.arrival_rate));
    }
    if !config.service_rate.is_finite() || config.service_rate <= 0.0 {
        return Err(Error::InvalidServiceRate(config.service_rate));
    }
    if config.channels == 0 {
        return Err(Error::NoChannels);
    }
    if !config.horizon_hours.is_finite() || config.horizon_hours <= 0.0 {
        return Err(Error::InvalidHorizon(config.horizon_hours));
    }
    if config.runs == 0 {
        return Err(Error::NoRuns);
    }
    if !config.patience_hours.is_finite() || config.patience_hours < 0.0 {
        return Err(Error::InvalidPatience(config.patience_hours));
    }
    Ok(())
}
