//! This crate provides a benchmark harness for spiking neural network simulators.
//!
//! A benchmark generates a random network, configures an engine to run it, stimulates its inputs
//! and measures the wall-clock cost of every phase. The harness talks to the engine through the
//! [`engine::Engine`] and [`engine::Network`] traits; [`reference`] provides an event-driven engine
//! implementing them.
//!
//! # Running a Benchmark
//!
//! ```rust
//! use snn_bench::bench::orchestrator::{Benchmark, BenchConfig};
//! use snn_bench::bench::report::Reporter;
//! use snn_bench::reference::simulator::EventSimulator;
//!
//! let config = BenchConfig { num_inputs: 4, num_outputs: 2, num_hidden: 32, num_runs: 5, runtime: 200, seed: 7 };
//! let mut benchmark = Benchmark::<EventSimulator>::setup(config).unwrap();
//! let mut reporter = Reporter::new(std::io::sink());
//! let result = benchmark.run(&mut reporter).unwrap();
//!
//! let stats = result.statistics(config.runtime).unwrap();
//! assert!(stats.average >= 0.0);
//! assert_eq!(stats.accumulations, result.runs.last().unwrap().accumulate_count);
//! ```
//!
//! # Command Line
//!
//! The `rand_bench` binary takes six positional arguments:
//! `rand_bench <inputs> <outputs> <hidden> <runs> <runtime> <seed>`.

pub mod bench;
pub mod engine;
pub mod error;
pub mod logging;
pub mod reference;
