use serde::Serialize;

/// One service channel: free, or busy until the given simulated timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChannelSlot {
    Free,
    BusyUntil(f64),
}

/// Fixed bank of C channels, owned by the run engine for the duration of one
/// run. Assignment always takes the lowest free index.
#[derive(Clone, Debug)]
pub struct ChannelBank {
    slots: Vec<ChannelSlot>,
}

impl ChannelBank {
    pub fn new(channels: usize) -> Self {
        Self {
            slots: vec![ChannelSlot::Free; channels],
        }
    }

    /// Frees every channel whose busy-until timestamp has elapsed.
    pub fn release_elapsed(&mut self, now: f64) {
        for slot in &mut self.slots {
            if let ChannelSlot::BusyUntil(until) = *slot {
                if until <= now {
                    *slot = ChannelSlot::Free;
                }
            }
        }
    }

    pub fn busy_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, ChannelSlot::BusyUntil(_)))
            .count()
    }

    pub fn first_free(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, ChannelSlot::Free))
    }

    pub fn occupy(&mut self, idx: usize, until: f64) {
        self.slots[idx] = ChannelSlot::BusyUntil(until);
    }
}

/// FIFO queue of arrival timestamps, bounded by the configured capacity.
#[derive(Clone, Debug)]
pub struct WaitQueue {
    entries: Vec<f64>,
    capacity: usize,
}

impl WaitQueue {
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an arrival timestamp; returns false when the queue is full.
    pub fn push(&mut self, arrived_at: f64) -> bool {
        if self.entries.len() >= self.capacity {
            return false;
        }
        self.entries.push(arrived_at);
        true
    }

    pub fn arrived_at(&self, idx: usize) -> f64 {
        self.entries[idx]
    }

    pub fn remove(&mut self, idx: usize) -> f64 {
        self.entries.remove(idx)
    }
}

/// Counters accumulated over one independent run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    pub served: u64,
    /// Queue-full rejections plus reneged entries.
    pub refusals: u64,
    /// Occupancy tally per system state (busy + queued, clamped to C+K),
    /// incremented once per arrival event.
    pub state_counts: Vec<u64>,
    pub busy_channel_time: f64,
    pub queue_length_time: f64,
    pub wait_time_total: f64,
    pub wait_observations: u64,
    pub waiting_times: Vec<f64>,
}

/// Final estimates derived from N pooled runs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregateResult {
    pub total_requests: u64,
    pub total_served: u64,
    pub total_refusals: u64,
    pub refusal_probability: f64,
    pub avg_refusals_per_run: f64,
    pub state_probabilities: Vec<f64>,
    pub average_busy_channels: f64,
    pub average_queue_length: f64,
    pub average_wait_in_queue: f64,
    pub average_waiting_time_served: f64,
    pub system_load: f64,
    /// Pooled individual waits, for downstream histogramming.
    pub waiting_times: Vec<f64>,
}
