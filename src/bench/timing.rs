//! Wall-clock instrumentation of the benchmark phases.
use std::fmt;
use std::time::{Duration, Instant};

/// A timed phase of the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Network construction and random topology generation.
    Topology,
    /// Engine construction, configuration and monitor registration.
    Configure,
    /// One simulation advance of the given trial.
    Simulate(usize),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Phase::Topology => write!(f, "topology generation"),
            Phase::Configure => write!(f, "configuration"),
            Phase::Simulate(run) => write!(f, "simulation run {}", run),
        }
    }
}

/// A scoped probe timing a phase on a monotonic clock.
///
/// The elapsed time is written to the borrowed slot when the probe is dropped,
/// including when the phase is left early through `?`.
pub struct Probe<'a> {
    phase: Phase,
    start: Instant,
    elapsed: &'a mut Duration,
}

/// Start timing `phase`; the duration lands in `elapsed` once the returned probe goes out of scope.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use snn_bench::bench::timing::{measure, Phase};
///
/// let mut elapsed = Duration::ZERO;
/// {
///     let _probe = measure(Phase::Configure, &mut elapsed);
///     std::thread::sleep(Duration::from_millis(1));
/// }
/// assert!(elapsed >= Duration::from_millis(1));
/// ```
pub fn measure(phase: Phase, elapsed: &mut Duration) -> Probe<'_> {
    Probe {
        phase,
        start: Instant::now(),
        elapsed,
    }
}

impl Probe<'_> {
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        *self.elapsed = self.start.elapsed();
        log::debug!("{} took {:?}", self.phase, self.elapsed);
    }
}

/// Convert a duration to (fractional) microseconds.
pub fn as_micros(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_phase(elapsed: &mut Duration) -> Result<(), String> {
        let _probe = measure(Phase::Topology, elapsed);
        std::thread::sleep(Duration::from_millis(2));
        Err("generation failed".to_string())
    }

    #[test]
    fn test_measure() {
        let mut elapsed = Duration::ZERO;
        {
            let probe = measure(Phase::Simulate(3), &mut elapsed);
            assert_eq!(probe.phase(), Phase::Simulate(3));
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(elapsed >= Duration::from_millis(2));
    }

    #[test]
    fn test_measure_on_early_exit() {
        let mut elapsed = Duration::ZERO;
        assert!(failing_phase(&mut elapsed).is_err());
        assert!(elapsed >= Duration::from_millis(2));
    }

    #[test]
    fn test_as_micros() {
        assert!((as_micros(Duration::from_micros(1500)) - 1500.0).abs() < 1e-9);
        assert!((as_micros(Duration::from_nanos(100)) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Simulate(7).to_string(), "simulation run 7");
        assert_eq!(Phase::Topology.to_string(), "topology generation");
    }
}
