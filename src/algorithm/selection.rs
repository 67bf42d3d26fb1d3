use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
///
/// Every draw an engine makes goes through one of these, so identical seeds replay
/// identical choices.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Cumulative weighted selection
    ///
    /// Draws a value in `[0, total)` and returns the first index whose running total
    /// exceeds it, so zero weights are never chosen. Returns `None` for an empty slice
    /// or when the weights do not sum to a positive, finite total.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().sum();
        if weights.is_empty() || !total.is_finite() || total <= 0.0 {
            return None;
        }

        let draw = self.rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        for (i, &weight) in weights.iter().enumerate() {
            cumulative += weight;
            if cumulative > draw {
                return Some(i);
            }
        }
        // Rounding can leave the last running total just short of the draw
        weights.iter().rposition(|&weight| weight > 0.0)
    }

    /// Uniform index below `len`, `None` when `len` is zero
    pub fn uniform_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }
}
