//! Benchmark Harness: warm-up, measured trials, aggregation.
//!
//! A run goes `Idle → Warmup → Measuring(1..=3) → Reporting → Done`. Each
//! iteration resets the store, times the sequential engine and, in parallel
//! mode, times the parallel engine and verifies its output against the
//! sequential result. Warm-up timings are thrown away.

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::{
    config::{Config, Mode},
    error::Result,
    matmul::{par_matmul, seq_matmul},
    report::Reporter,
    store::MatrixStore,
    timer::Clock,
    verify::max_abs_diff,
};

/// Iterations run before measuring starts.
pub const WARMUP_TRIALS: usize = 1;
/// Iterations whose timings are kept and averaged.
pub const MEASURED_TRIALS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Warmup,
    /// 1-based index of the measured trial in progress.
    Measuring(usize),
    Reporting,
    Done,
}

/// Durations of one trial, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrialTimings {
    pub seq: f64,
    /// Present in parallel mode only.
    pub par: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParallelSummary {
    /// Mean parallel duration over the measured trials.
    pub mean_time: f64,
    /// Mean sequential duration divided by mean parallel duration.
    pub speedup: f64,
    /// Worst verification error seen over every iteration of the run.
    pub max_error: f64,
}

/// Everything a run produces, handed to a [`Reporter`].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mode: Mode,
    pub num_threads: usize,
    pub size: usize,
    pub started_at: DateTime<Local>,
    pub trials: [TrialTimings; MEASURED_TRIALS],
    pub mean_seq_time: f64,
    pub parallel: Option<ParallelSummary>,
    /// Every phase the run went through, starting at [`Phase::Idle`].
    pub phases: Vec<Phase>,
}

/// A validated configuration together with the matrices it runs on.
#[derive(Debug)]
pub struct Benchmark {
    config: Config,
    store: MatrixStore,
    phase: Phase,
    phases: Vec<Phase>,
}

impl Benchmark {
    /// Validates `config` and allocates the matrix store.
    ///
    /// Validation happens first, so a rejected configuration never
    /// allocates a matrix or starts a worker.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let store = MatrixStore::init(config.size, config.seed)?;
        Ok(Benchmark {
            config,
            store,
            phase: Phase::Idle,
            phases: vec![Phase::Idle],
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the warm-up and measured trials, reports, and tears down.
    pub fn run<C, R>(mut self, clock: &C, reporter: &mut R) -> Result<Summary>
    where
        C: Clock,
        R: Reporter + ?Sized,
    {
        info!(
            mode = %self.config.mode,
            size = self.config.size,
            threads = self.config.num_threads,
            "starting benchmark"
        );
        let started_at = Local::now();
        let mut trials = [TrialTimings::default(); MEASURED_TRIALS];
        let mut max_error: Option<f64> = None;

        for iteration in 0..WARMUP_TRIALS + MEASURED_TRIALS {
            let phase = if iteration < WARMUP_TRIALS {
                Phase::Warmup
            } else {
                Phase::Measuring(iteration - WARMUP_TRIALS + 1)
            };
            self.advance(phase);

            let (timings, error) = self.trial(clock)?;
            if let Some(error) = error {
                max_error = Some(match max_error {
                    Some(worst) if worst.is_nan() || worst >= error => worst,
                    _ => error,
                });
            }

            match phase {
                Phase::Measuring(n) => trials[n - 1] = timings,
                _ => debug!(seq = timings.seq, par = ?timings.par, "discarding warm-up timings"),
            }
        }

        self.advance(Phase::Reporting);
        let mut summary = self.summarize(started_at, trials, max_error);
        reporter.report(&summary)?;

        self.advance(Phase::Done);
        summary.phases = std::mem::take(&mut self.phases);
        info!(mean_seq = summary.mean_seq_time, "benchmark finished");
        self.store.teardown();
        Ok(summary)
    }

    fn advance(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, "phase transition");
        self.phase = next;
        self.phases.push(next);
    }

    /// One reset-compute-measure cycle. Returns the timings and, in parallel
    /// mode, the verification error of this iteration.
    fn trial<C: Clock>(&mut self, clock: &C) -> Result<(TrialTimings, Option<f64>)> {
        let num_threads = self.config.num_threads;
        let parallel = self.config.is_parallel();
        let store = &mut self.store;
        store.reset_for_trial();

        let a = store.a.view();
        let b = store.b.view();

        let seq_out = store.result_seq.view_mut();
        let ((), seq) = clock.time(|| seq_matmul(a, b, seq_out));

        if !parallel {
            debug!(seq, "trial complete");
            return Ok((TrialTimings { seq, par: None }, None));
        }

        let par_out = store.result_par.view_mut();
        let (outcome, par) = clock.time(|| par_matmul(a, b, par_out, num_threads));
        outcome?;

        let error = max_abs_diff(store.result_seq.view(), store.result_par.view());
        debug!(seq, par, error, "trial complete");
        Ok((
            TrialTimings {
                seq,
                par: Some(par),
            },
            Some(error),
        ))
    }

    fn summarize(
        &self,
        started_at: DateTime<Local>,
        trials: [TrialTimings; MEASURED_TRIALS],
        max_error: Option<f64>,
    ) -> Summary {
        let mean_seq_time = mean(trials.iter().map(|t| t.seq));

        let parallel = if self.config.is_parallel() {
            let mean_time = mean(trials.iter().filter_map(|t| t.par));
            Some(ParallelSummary {
                mean_time,
                speedup: mean_seq_time / mean_time,
                max_error: max_error.unwrap_or(0.0),
            })
        } else {
            None
        };

        Summary {
            mode: self.config.mode,
            num_threads: self.config.num_threads,
            size: self.config.size,
            started_at,
            trials,
            mean_seq_time,
            parallel,
            phases: self.phases.clone(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Builds a [`Benchmark`] from `config`, runs it and reports through `reporter`.
pub fn run_and_report<C, R>(config: Config, clock: &C, reporter: &mut R) -> Result<Summary>
where
    C: Clock,
    R: Reporter + ?Sized,
{
    Benchmark::new(config)?.run(clock, reporter)
}
