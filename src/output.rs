use crate::state::AggregateResult;

const HISTOGRAM_BIN_HOURS: f64 = 0.15;
const HISTOGRAM_BAR_CAP: usize = 50;

pub trait Formatter {
    fn write(&self, result: &AggregateResult) -> String;
}

pub struct SummaryFormatter;

impl Formatter for SummaryFormatter {
    fn write(&self, result: &AggregateResult) -> String {
        let mut out = String::new();
        out.push_str("Summary:\n");
        out.push_str(&format!(
            "requests: {} (served {}, refused {})\n",
            result.total_requests, result.total_served, result.total_refusals
        ));
        out.push_str(&format!(
            "refusal probability: {:.4}\n",
            result.refusal_probability
        ));
        out.push_str(&format!(
            "avg refusals per run: {:.4}\n",
            result.avg_refusals_per_run
        ));
        out.push_str(&format!(
            "avg busy channels: {:.4}\n",
            result.average_busy_channels
        ));
        out.push_str(&format!(
            "avg queue length: {:.4}\n",
            result.average_queue_length
        ));
        out.push_str(&format!(
            "avg wait in queue: {:.4} hours\n",
            result.average_wait_in_queue
        ));
        out.push_str(&format!(
            "avg wait of served: {:.4} hours\n",
            result.average_waiting_time_served
        ));
        out.push_str(&format!("system load: {:.4}\n", result.system_load));
        out
    }
}

pub struct HumanFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, result: &AggregateResult) -> String {
        let mut out = String::new();
        out.push_str("State probabilities:\n");
        for (state, probability) in result.state_probabilities.iter().enumerate() {
            out.push_str(&format!("state {}: {:.4}\n", state, probability));
        }
        out.push_str(&SummaryFormatter.write(result));
        out.push_str(&waiting_time_histogram(&result.waiting_times));
        out
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn write(&self, result: &AggregateResult) -> String {
        let mut out = serde_json::to_string_pretty(result).unwrap_or_default();
        out.push('\n');
        out
    }
}

/// Text histogram of the pooled positive waits, 0.15-hour bins. Mirrors the
/// bin layout of the plotting collaborator without depending on it.
fn waiting_time_histogram(waits: &[f64]) -> String {
    let positive: Vec<f64> = waits.iter().copied().filter(|&wait| wait > 0.0).collect();
    let mut out = format!("Waiting-time histogram ({}h bins):\n", HISTOGRAM_BIN_HOURS);
    if positive.is_empty() {
        out.push_str("no positive waits observed\n");
        return out;
    }

    let max = positive.iter().fold(0.0f64, |acc, &wait| acc.max(wait));
    let bins = (max / HISTOGRAM_BIN_HOURS).floor() as usize + 1;
    let mut counts = vec![0usize; bins];
    for wait in positive {
        let idx = ((wait / HISTOGRAM_BIN_HOURS).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    for (idx, count) in counts.iter().enumerate() {
        let lower = idx as f64 * HISTOGRAM_BIN_HOURS;
        let upper = lower + HISTOGRAM_BIN_HOURS;
        out.push_str(&format!(
            "{:5.2}-{:5.2} | {} {}\n",
            lower,
            upper,
            "#".repeat((*count).min(HISTOGRAM_BAR_CAP)),
            count
        ));
    }
    out
}
