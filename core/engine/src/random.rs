//! FILENAME: core/engine/src/random.rs
//! PURPOSE: Injectable source of uniform values for the Rand key.
//! CONTEXT: The state transition stays deterministic given its inputs; the
//! only nondeterminism in the calculator enters through this trait.

/// Produces values uniformly distributed in [0, 1).
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// Default source backed by `fastrand`.
#[derive(Debug, Clone)]
pub struct FastRandom {
    rng: fastrand::Rng,
}

impl FastRandom {
    pub fn new() -> Self {
        FastRandom {
            rng: fastrand::Rng::new(),
        }
    }

    /// Seeded variant, reproducible across runs.
    pub fn with_seed(seed: u64) -> Self {
        FastRandom {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for FastRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for FastRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.f64()
    }
}

/// Replays a fixed sequence, wrapping around at the end.
/// An empty sequence always yields 0.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        SequenceRandom {
            values,
            position: 0,
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
