//! Error module for the benchmark harness and its engines.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum BenchError {
    /// Error for invalid parameters, e.g., a malformed range or a network too small for its inputs and outputs.
    InvalidParameter(String),
    /// Error for out of bounds access, e.g., input or output not found.
    OutOfBounds(String),
    /// The engine was used before a network was configured.
    NotConfigured,
    /// The engine does not expose the requested metric.
    UnknownMetric(String),
    /// No trial durations to compute statistics from.
    NoTrials,
    /// The trials took no measurable time, so no rate can be derived from them.
    ZeroDuration,
    /// Failure raised by an engine implementation.
    Engine(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BenchError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            BenchError::OutOfBounds(e) => write!(f, "Index out of bounds: {}", e),
            BenchError::NotConfigured => write!(f, "No network is configured on the engine"),
            BenchError::UnknownMetric(e) => write!(f, "Unknown metric: {}", e),
            BenchError::NoTrials => write!(f, "No trials to aggregate"),
            BenchError::ZeroDuration => write!(f, "Average simulation time is zero"),
            BenchError::Engine(e) => write!(f, "Engine error: {}", e),
            BenchError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for BenchError {}

impl From<std::io::Error> for BenchError {
    fn from(e: std::io::Error) -> Self {
        BenchError::IOError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(BenchError::NoTrials.to_string(), "No trials to aggregate");
        assert_eq!(BenchError::ZeroDuration.to_string(), "Average simulation time is zero");
        assert_eq!(
            BenchError::UnknownMetric("spike_count".into()).to_string(),
            "Unknown metric: spike_count"
        );
    }

    #[test]
    fn test_from_io_error() {
        let e = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(BenchError::from(e), BenchError::IOError("closed".into()));
    }
}
