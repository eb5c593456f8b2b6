//! Benchmark harness for spiking neural network engines.
//!
//! This module provides the components of a random network benchmark:
//! - [`topology`]: Derives the parameters of the random topology
//! - [`timing`]: Times the benchmark phases
//! - [`orchestrator`]: Sequences topology generation, configuration and trials
//! - [`stats`]: Aggregates the trial durations
//! - [`report`]: Formats the results
//!
//! # Example
//! ```rust
//! use snn_bench::bench::orchestrator::{run_benchmark, BenchConfig};
//! use snn_bench::reference::simulator::EventSimulator;
//!
//! let config = BenchConfig { num_inputs: 2, num_outputs: 2, num_hidden: 10, num_runs: 3, runtime: 100, seed: 42 };
//! let mut report = Vec::new();
//! let result = run_benchmark::<EventSimulator, _>(config, &mut report).unwrap();
//!
//! assert_eq!(result.runs.len(), 3);
//! ```
pub mod orchestrator;
pub mod report;
pub mod stats;
pub mod timing;
pub mod topology;
