//! Human-readable output of a finished run.

use std::io::{self, Write};

use crate::{error::Result, harness::Summary, harness::MEASURED_TRIALS};

/// Receives the summary of a finished run.
pub trait Reporter {
    fn report(&mut self, summary: &Summary) -> Result<()>;
}

/// Writes the summary as plain text.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleReporter::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        ConsoleReporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, summary: &Summary) -> Result<()> {
        let out = &mut self.out;
        writeln!(out, "========")?;
        writeln!(out, "mode: {}", summary.mode)?;
        writeln!(out, "thread count: {}", summary.num_threads)?;
        writeln!(out, "size: {}", summary.size)?;
        writeln!(
            out,
            "started: {}",
            summary.started_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out, "========")?;
        writeln!(
            out,
            "Sequential Time (avg of {MEASURED_TRIALS} runs): {:.6} sec",
            summary.mean_seq_time
        )?;

        if let Some(parallel) = &summary.parallel {
            writeln!(
                out,
                "Parallel Time (avg of {MEASURED_TRIALS} runs): {:.6} sec",
                parallel.mean_time
            )?;
            writeln!(out, "Speedup: {:.6}", parallel.speedup)?;
            writeln!(
                out,
                "Verifying...largest error between parallel and sequential matrix: {:.6}",
                parallel.max_error
            )?;
        }

        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Mode,
        harness::{ParallelSummary, TrialTimings},
    };
    use chrono::Local;

    fn summary(parallel: Option<ParallelSummary>) -> Summary {
        Summary {
            mode: if parallel.is_some() {
                Mode::Parallel
            } else {
                Mode::Sequential
            },
            num_threads: if parallel.is_some() { 4 } else { 1 },
            size: 256,
            started_at: Local::now(),
            trials: [TrialTimings::default(); MEASURED_TRIALS],
            mean_seq_time: 1.5,
            parallel,
            phases: Vec::new(),
        }
    }

    fn render(summary: &Summary) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.report(summary).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_sequential_report() {
        let text = render(&summary(None));
        assert!(text.contains("mode: sequential\n"));
        assert!(text.contains("thread count: 1\n"));
        assert!(text.contains("size: 256\n"));
        assert!(text.contains("Sequential Time (avg of 3 runs): 1.500000 sec"));
        assert!(!text.contains("Parallel Time"));
        assert!(!text.contains("Speedup"));
    }

    #[test]
    fn test_parallel_report() {
        let text = render(&summary(Some(ParallelSummary {
            mean_time: 0.5,
            speedup: 3.0,
            max_error: 0.0,
        })));
        assert!(text.contains("mode: parallel\n"));
        assert!(text.contains("thread count: 4\n"));
        assert!(text.contains("Parallel Time (avg of 3 runs): 0.500000 sec"));
        assert!(text.contains("Speedup: 3.000000"));
        assert!(text.contains("largest error between parallel and sequential matrix: 0.000000"));
    }
}
