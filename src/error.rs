//! Error types for mmm operations.
//!
//! Every failure the benchmark can hit is detected at a boundary (argument
//! validation, matrix allocation, worker creation, report output) and is
//! fatal for the run. Nothing here is retried.

use std::io;

use thiserror::Error;

/// Errors that can occur while configuring or running the benchmark.
#[derive(Debug, Error)]
pub enum MmmError {
    /// The requested configuration cannot be run.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
    },
    /// Memory for the matrices could not be obtained.
    #[error("Memory allocation failed: {message} (requested {requested_bytes} bytes)")]
    Allocation {
        /// The number of bytes that was requested.
        requested_bytes: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Worker threads could not be created.
    #[error("Worker error: {message}")]
    Worker {
        /// Human-readable error message.
        message: String,
    },
    /// The summary could not be written out.
    #[error("Failed to write report: {source}")]
    Report {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for mmm operations.
pub type Result<T> = std::result::Result<T, MmmError>;

/// Creates a configuration error.
pub fn config_error(message: impl Into<String>) -> MmmError {
    MmmError::Config {
        message: message.into(),
    }
}

/// Creates an allocation error.
pub fn allocation_error(requested_bytes: usize, message: impl Into<String>) -> MmmError {
    MmmError::Allocation {
        requested_bytes,
        message: message.into(),
    }
}

/// Creates a worker error.
pub fn worker_error(message: impl Into<String>) -> MmmError {
    MmmError::Worker {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = config_error("number of threads must be less than or equal to size");
        let display = format!("{}", error);
        assert!(display.contains("Configuration error"));
        assert!(display.contains("less than or equal to size"));
    }

    #[test]
    fn test_allocation_error_display() {
        let error = allocation_error(8192, "out of memory");
        let display = format!("{}", error);
        assert!(display.contains("Memory allocation failed"));
        assert!(display.contains("8192 bytes"));
        assert!(display.contains("out of memory"));
    }

    #[test]
    fn test_worker_error_display() {
        let error = worker_error("could not spawn thread");
        assert_eq!(error.to_string(), "Worker error: could not spawn thread");
    }

    #[test]
    fn test_report_error_from_io() {
        let error: MmmError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(matches!(error, MmmError::Report { .. }));
        assert!(error.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = config_error("test error");

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
        let io_backed: MmmError = io::Error::other("boom").into();
        assert!(std::error::Error::source(&io_backed).is_some());
    }
}
