//! Run configuration: which engines to run, on what size, with how many workers.

use std::fmt;

use crate::error::{config_error, Result};

/// Which engines a run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Sequential engine only.
    Sequential,
    /// Sequential and parallel engines, followed by verification.
    Parallel,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sequential => write!(f, "sequential"),
            Mode::Parallel => write!(f, "parallel"),
        }
    }
}

/// Benchmark configuration.
///
/// Construct with [`Config::sequential`] or [`Config::parallel`] and call
/// [`Config::validate`] before allocating anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    /// Matrix dimension N; every matrix is N×N.
    pub size: usize,
    /// Worker count T. Always 1 in sequential mode.
    pub num_threads: usize,
    /// Seed for the input generator. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Config {
    pub fn sequential(size: usize) -> Self {
        Config {
            mode: Mode::Sequential,
            size,
            num_threads: 1,
            seed: None,
        }
    }

    pub fn parallel(num_threads: usize, size: usize) -> Self {
        Config {
            mode: Mode::Parallel,
            size,
            num_threads,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.mode == Mode::Parallel
    }

    /// Checks that the configuration can be run.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the size or the worker count is zero,
    /// or if there are more workers than columns.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(config_error("size must be a positive integer"));
        }
        if self.num_threads == 0 {
            return Err(config_error("number of threads must be a positive integer"));
        }
        if self.num_threads > self.size {
            return Err(config_error(format!(
                "number of threads ({}) must be less than or equal to size ({})",
                self.num_threads, self.size
            )));
        }
        Ok(())
    }
}
