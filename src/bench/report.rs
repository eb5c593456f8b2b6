//! Human-readable report of a benchmark.
use std::io::Write;

use crate::bench::orchestrator::{Header, SetupTimings};
use crate::bench::stats::{RunRecord, Statistics};
use crate::bench::timing::as_micros;
use crate::error::BenchError;

/// Writes the report lines of a benchmark to any writer (usually stdout).
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter { out }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn header(&mut self, header: &Header) -> Result<(), BenchError> {
        writeln!(
            self.out,
            "Seed: {} | Inputs: {} Outputs: {} | Neurons: {} Synapses: {} | Cycles: {}",
            header.seed,
            header.num_inputs,
            header.num_outputs,
            header.num_neurons,
            header.num_synapses,
            header.runtime
        )?;
        Ok(())
    }

    pub fn setup(&mut self, timings: &SetupTimings) -> Result<(), BenchError> {
        writeln!(self.out, "Random Net: {:.1} us", as_micros(timings.topology))?;
        writeln!(self.out, "Configure: {:.1} us", as_micros(timings.configure))?;
        Ok(())
    }

    pub fn trial(&mut self, record: &RunRecord) -> Result<(), BenchError> {
        writeln!(self.out, "Simulate {:3}: {:.9} s", record.index, record.seconds())?;
        Ok(())
    }

    pub fn statistics(&mut self, stats: &Statistics) -> Result<(), BenchError> {
        writeln!(self.out, "Average Simulate (s)     : {}", stats.average)?;
        writeln!(self.out, "Median Simulate (s)      : {}", stats.median)?;
        writeln!(self.out, "Accumulations            : {}", stats.accumulations)?;
        writeln!(
            self.out,
            "Accumulations per second : {:.1}",
            stats.accumulations_per_second
        )?;
        writeln!(self.out, "Effective Clock Speed    : {:.4} KHz", stats.clock_khz)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn lines(reporter: Reporter<Vec<u8>>) -> Vec<String> {
        String::from_utf8(reporter.into_inner())
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_header() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .header(&Header {
                seed: 42,
                num_inputs: 2,
                num_outputs: 3,
                num_neurons: 15,
                num_synapses: 77,
                runtime: 100,
            })
            .unwrap();
        assert_eq!(
            lines(reporter),
            vec!["Seed: 42 | Inputs: 2 Outputs: 3 | Neurons: 15 Synapses: 77 | Cycles: 100"]
        );
    }

    #[test]
    fn test_setup_in_microseconds() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .setup(&SetupTimings {
                topology: Duration::from_nanos(12_345_678),
                configure: Duration::from_micros(250),
            })
            .unwrap();
        assert_eq!(
            lines(reporter),
            vec!["Random Net: 12345.7 us", "Configure: 250.0 us"]
        );
    }

    #[test]
    fn test_trial() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .trial(&RunRecord::new(7, Duration::from_nanos(1_500_000_001), 0))
            .unwrap();
        assert_eq!(lines(reporter), vec!["Simulate   7: 1.500000001 s"]);
    }

    #[test]
    fn test_statistics() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .statistics(&Statistics {
                average: 0.5,
                median: 0.25,
                accumulations: 1000,
                accumulations_per_second: 2000.0,
                clock_khz: 100.0,
            })
            .unwrap();
        assert_eq!(
            lines(reporter),
            vec![
                "Average Simulate (s)     : 0.5",
                "Median Simulate (s)      : 0.25",
                "Accumulations            : 1000",
                "Accumulations per second : 2000.0",
                "Effective Clock Speed    : 100.0000 KHz",
            ]
        );
    }
}
