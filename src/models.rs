use serde::Deserialize;

/// Parameters of one simulated M/M/c/K facility. Rates are per hour,
/// durations in hours.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SimConfig {
    /// Arrival rate λ (requests per hour).
    pub arrival_rate: f64,
    /// Service rate μ (requests per hour per channel).
    pub service_rate: f64,
    /// Number of service channels C.
    pub channels: usize,
    /// Maximum queue length K.
    pub queue_capacity: usize,
    /// Simulated time horizon T per run.
    pub horizon_hours: f64,
    /// Number of independent runs N.
    pub runs: usize,
    /// Maximum tolerated wait W before a queued request reneges.
    pub patience_hours: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Number of distinguishable system states: 0..=C+K busy-plus-queued.
    pub fn state_count(&self) -> usize {
        self.channels + self.queue_capacity + 1
    }
}
