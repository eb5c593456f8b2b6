//! Interface between the benchmark harness and a simulation engine.
//!
//! The harness never looks inside the engine: it builds a network through [`Network`],
//! hands it over to an [`Engine`] and only observes what the engine reports back
//! (neuron and synapse counts, named metrics).
use serde::{Deserialize, Serialize};

use crate::bench::topology::TopologyRequest;
use crate::error::BenchError;

/// Cumulative number of charge accumulations performed by the engine.
pub const ACCUMULATE_COUNT: &str = "accumulate_count";
/// Cumulative number of neuron fires.
pub const FIRE_COUNT: &str = "fire_count";
/// Cumulative number of simulated time steps.
pub const TOTAL_TIMESTEPS: &str = "total_timesteps";

/// The window, relative to the start of a simulation call, during which a monitor records output fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureWindow {
    /// First recorded time step.
    pub after: u64,
    /// Last recorded time step, if any.
    pub until: Option<u64>,
}

impl CaptureWindow {
    /// A window capturing every fire.
    pub const UNBOUNDED: CaptureWindow = CaptureWindow {
        after: 0,
        until: None,
    };

    pub fn new(after: u64, until: Option<u64>) -> Self {
        CaptureWindow { after, until }
    }

    /// Returns true if a fire at the given (relative) time is recorded.
    pub fn contains(&self, time: u64) -> bool {
        time >= self.after && self.until.map_or(true, |until| time <= until)
    }
}

impl Default for CaptureWindow {
    fn default() -> Self {
        CaptureWindow::UNBOUNDED
    }
}

/// A network container owned by an engine.
pub trait Network: Sized {
    /// Create an empty network sized for the given total number of neurons.
    fn new(num_neurons: usize) -> Result<Self, BenchError>;

    /// Replace the content of the network by a random topology.
    fn make_random(&mut self, request: &TopologyRequest) -> Result<(), BenchError>;

    /// The number of neurons in the network.
    fn num_neurons(&self) -> usize;

    /// The number of synapses in the network.
    fn num_synapses(&self) -> usize;
}

/// An execution engine running a [`Network`].
pub trait Engine: Sized {
    type Network: Network;

    /// Create an engine with no network.
    fn new() -> Result<Self, BenchError>;

    /// Bind the engine to a network, taking ownership of it.
    fn configure(&mut self, network: Self::Network) -> Result<(), BenchError>;

    /// The number of neurons in the configured network.
    fn num_neurons(&self) -> usize;

    /// The number of synapses in the configured network.
    fn num_synapses(&self) -> usize;

    /// Record the fires of an output neuron during the given window.
    fn monitor_output(&mut self, output_id: usize, window: CaptureWindow) -> Result<(), BenchError>;

    /// Schedule a stimulus of the given strength on an input, `offset` steps after the current time.
    fn apply_input(&mut self, input_id: usize, strength: i16, offset: u64) -> Result<(), BenchError>;

    /// Advance the simulation by `steps` discrete time steps.
    fn simulate(&mut self, steps: u64) -> Result<(), BenchError>;

    /// Read a named cumulative metric.
    fn metric(&mut self, name: &str) -> Result<u64, BenchError>;

    /// Clear the transient activity (pending events, charges, output tallies).
    /// Cumulative metrics are kept.
    fn clear_activity(&mut self) -> Result<(), BenchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_window() {
        let window = CaptureWindow::UNBOUNDED;
        assert!(window.contains(0));
        assert!(window.contains(u64::MAX));
        assert_eq!(CaptureWindow::default(), window);
    }

    #[test]
    fn test_bounded_window() {
        let window = CaptureWindow::new(10, Some(20));
        assert!(!window.contains(9));
        assert!(window.contains(10));
        assert!(window.contains(20));
        assert!(!window.contains(21));
    }
}
