use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp};

use crate::error::{Error, Result};

/// Owned, seedable stream of exponential variates. One source feeds an entire
/// aggregation; the stream advances across runs and is never reset mid-way.
pub struct VariateSource {
    rng: StdRng,
}

impl VariateSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws one exponential duration with the given rate (mean 1/rate).
    ///
    /// The rate must be finite and positive; `Exp::new` alone admits 0 and
    /// infinity, which would yield degenerate durations.
    pub fn sample_exponential(&mut self, rate: f64) -> Result<f64> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::InvalidRate(rate));
        }
        let dist = Exp::new(rate).map_err(|_| Error::InvalidRate(rate))?;
        Ok(dist.sample(&mut self.rng))
    }
}
