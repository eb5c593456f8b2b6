//! Reference event-driven engine.
//!
//! A single-threaded, integer spiking network engine implementing the [`crate::engine`] traits.
//! It consists of the following components:
//!
//! - [`synapse`]: Weighted, delayed connections between neurons
//! - [`neuron`]: Leaky integrate-and-fire neurons
//! - [`network`]: The network container and its random generator
//! - [`simulator`]: The event-driven execution engine
//!
//! # Example
//! ```rust
//! use snn_bench::bench::topology::TopologyRequest;
//! use snn_bench::engine::{CaptureWindow, Engine, Network, ACCUMULATE_COUNT};
//! use snn_bench::reference::network::EventNetwork;
//! use snn_bench::reference::simulator::EventSimulator;
//!
//! let mut network = EventNetwork::new(20).unwrap();
//! network.make_random(&TopologyRequest::new(4, 2, 14, 42)).unwrap();
//!
//! let mut sim = EventSimulator::new().unwrap();
//! sim.configure(network).unwrap();
//! sim.monitor_output(0, CaptureWindow::UNBOUNDED).unwrap();
//! sim.apply_input(0, 500, 0).unwrap();
//! sim.simulate(100).unwrap();
//!
//! assert!(sim.metric(ACCUMULATE_COUNT).unwrap() >= 1);
//! ```
pub mod network;
pub mod neuron;
pub mod simulator;
pub mod synapse;

/// Lowest charge a neuron can hold.
pub const MIN_CHARGE: i32 = -32768;
/// Highest charge a neuron can hold.
pub const MAX_CHARGE: i32 = 32767;
/// Largest synaptic delay, in time steps.
pub const MAX_DELAY: i32 = 15;
/// Largest leak exponent; a neuron with leak `l` loses half of its charge every `2^l` steps.
pub const MAX_LEAK: i32 = 4;
/// Fixed-point precision of the leak compensation table.
pub const COMP_BITS: u32 = 10;
/// `2^(9 + k/16)` for `k` in `[0, 16)`, compensating the leak within a period.
pub const LEAK_COMP: [i64; 16] = [
    512, 535, 558, 583, 609, 636, 664, 693, 724, 756, 790, 825, 861, 899, 939, 981,
];
