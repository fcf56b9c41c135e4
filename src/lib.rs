//! Sequential vs column-parallel dense matrix multiplication benchmark.
//!
//! Multiplies two random N×N matrices with the textbook triple loop, once
//! on the calling thread and once split by output columns across a fixed
//! number of worker threads, times both, and reports the largest
//! element-wise difference between the two results.
//!
//! ```
//! use mmm::{report::ConsoleReporter, run_and_report, timer::MonotonicClock, Config};
//!
//! let mut out = ConsoleReporter::new(Vec::new());
//! let summary = run_and_report(Config::parallel(4, 64).with_seed(7), &MonotonicClock, &mut out)
//!     .unwrap();
//!
//! assert_eq!(summary.parallel.unwrap().max_error, 0.0);
//! ```

pub mod config;
pub mod error;
pub mod harness;
pub mod logging;
pub mod matmul;
pub mod partition;
pub mod report;
pub mod store;
pub mod timer;
pub mod verify;

pub use config::{Config, Mode};
pub use error::{MmmError, Result};
pub use harness::{run_and_report, Benchmark, Summary, MEASURED_TRIALS, WARMUP_TRIALS};
pub use matmul::{par_matmul, seq_matmul};
pub use verify::max_abs_diff;
