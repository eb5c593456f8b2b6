//! Aggregation of the trial durations into throughput and latency figures.
use itertools::Itertools;
use serde::Serialize;
use std::time::Duration;

use crate::error::BenchError;

/// The outcome of a single simulation trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunRecord {
    /// The (zero-based) ordinal of the trial.
    pub index: usize,
    /// The wall-clock duration of the simulation advance.
    pub duration: Duration,
    /// The cumulative accumulation count read right after the advance.
    pub accumulate_count: u64,
}

impl RunRecord {
    pub fn new(index: usize, duration: Duration, accumulate_count: u64) -> Self {
        RunRecord {
            index,
            duration,
            accumulate_count,
        }
    }

    /// The duration in seconds.
    pub fn seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// Summary statistics of a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Mean trial duration, in seconds.
    pub average: f64,
    /// Median trial duration, in seconds.
    pub median: f64,
    /// Final cumulative accumulation count.
    pub accumulations: u64,
    /// Accumulations per second of (average) simulation.
    pub accumulations_per_second: f64,
    /// Simulated time steps per wall-clock second, in KHz.
    pub clock_khz: f64,
}

impl Statistics {
    /// Compute the statistics from the trial durations (in seconds), the final accumulation count and
    /// the number of time steps simulated per trial.
    ///
    /// Returns [`BenchError::NoTrials`] if there is no duration to aggregate and
    /// [`BenchError::ZeroDuration`] if the average duration is zero.
    pub fn compute(durations: &[f64], accumulations: u64, runtime: u64) -> Result<Self, BenchError> {
        let average = average(durations)?;
        let median = median(durations)?;
        if average <= 0.0 {
            return Err(BenchError::ZeroDuration);
        }
        Ok(Statistics {
            average,
            median,
            accumulations,
            accumulations_per_second: accumulations as f64 / average,
            clock_khz: (runtime as f64 / average) / 1000.0,
        })
    }
}

/// The mean of the durations.
pub fn average(durations: &[f64]) -> Result<f64, BenchError> {
    if durations.is_empty() {
        return Err(BenchError::NoTrials);
    }
    Ok(durations.iter().sum::<f64>() / durations.len() as f64)
}

/// The median of the durations; the mean of the two middle values for an even count.
pub fn median(durations: &[f64]) -> Result<f64, BenchError> {
    let sorted = durations
        .iter()
        .copied()
        .sorted_by(|a, b| a.total_cmp(b))
        .collect::<Vec<f64>>();
    let n = sorted.len();
    match n {
        0 => Err(BenchError::NoTrials),
        _ if n % 2 == 0 => Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
        _ => Ok(sorted[n / 2]),
    }
}
