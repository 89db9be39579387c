//! Runner configuration

/// Options applied to every class a [`MatrixRunner`](crate::MatrixRunner) runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Seed for the shuffled execution order
    pub seed: u64,
    /// Run cells in a seeded random order instead of producer-major order
    pub shuffle: bool,
    /// Worker count overriding the class's runner selector
    pub workers: Option<usize>,
    /// Log every combination, not only failures
    pub verbose: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            shuffle: false,
            workers: None,
            verbose: false,
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}
