//! Sequencing of a random network benchmark.
//!
//! A benchmark generates a random topology, configures an engine with it and then
//! runs a number of timed trials, each one stimulating every input once.
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;

use crate::bench::report::Reporter;
use crate::bench::stats::{RunRecord, Statistics};
use crate::bench::timing::{measure, Phase};
use crate::bench::topology::{neuron_count, FanLimits, TopologyRequest};
use crate::engine::{CaptureWindow, Engine, Network, ACCUMULATE_COUNT};
use crate::error::BenchError;

/// The strength of the stimulus applied to every input at each trial.
pub const INPUT_STRENGTH: i16 = 500;

/// The parameters of a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub num_hidden: usize,
    /// The number of trials.
    pub num_runs: usize,
    /// The number of time steps simulated per trial.
    pub runtime: u64,
    pub seed: u64,
}

impl BenchConfig {
    /// The total number of neurons.
    /// Returns an error if the count does not fit in a `usize`.
    pub fn num_neurons(&self) -> Result<usize, BenchError> {
        neuron_count(self.num_inputs, self.num_outputs, self.num_hidden)
    }

    pub fn fan_limits(&self) -> FanLimits {
        FanLimits::derive(self.num_hidden)
    }

    pub fn topology_request(&self) -> TopologyRequest {
        TopologyRequest::new(self.num_inputs, self.num_outputs, self.num_hidden, self.seed)
    }
}

/// Durations of the phases preceding the trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SetupTimings {
    /// Network construction and random topology generation.
    pub topology: Duration,
    /// Engine construction, configuration and monitor registration.
    pub configure: Duration,
}

/// Summary of the benchmark configuration, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    pub seed: u64,
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub num_neurons: usize,
    pub num_synapses: usize,
    pub runtime: u64,
}

/// Raw measurements of a complete benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    /// One record per trial, in order.
    pub runs: Vec<RunRecord>,
    /// The accumulation count read after the last trial.
    pub accumulations: u64,
    pub setup: SetupTimings,
}

impl BenchmarkResult {
    /// The trial durations in seconds.
    pub fn durations(&self) -> Vec<f64> {
        self.runs.iter().map(|run| run.seconds()).collect()
    }

    pub fn statistics(&self, runtime: u64) -> Result<Statistics, BenchError> {
        Statistics::compute(&self.durations(), self.accumulations, runtime)
    }
}

/// A benchmark owning a configured engine.
pub struct Benchmark<E: Engine> {
    config: BenchConfig,
    engine: E,
    setup: SetupTimings,
}

impl<E: Engine> Benchmark<E> {
    /// Generate the random network and configure the engine with it, timing both phases.
    pub fn setup(config: BenchConfig) -> Result<Self, BenchError> {
        let num_neurons = config.num_neurons()?;
        let request = config.topology_request();
        log::info!("Generating network: {:?}", request);

        let mut setup = SetupTimings::default();

        let network = {
            let _probe = measure(Phase::Topology, &mut setup.topology);
            let mut network = E::Network::new(num_neurons)?;
            network.make_random(&request)?;
            network
        };

        let engine = {
            let _probe = measure(Phase::Configure, &mut setup.configure);
            let mut engine = E::new()?;
            engine.configure(network)?;
            for output_id in 0..config.num_outputs {
                engine.monitor_output(output_id, CaptureWindow::UNBOUNDED)?;
            }
            engine
        };

        log::info!(
            "Engine configured with {} neurons and {} synapses",
            engine.num_neurons(),
            engine.num_synapses()
        );

        Ok(Benchmark {
            config,
            engine,
            setup,
        })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn setup_timings(&self) -> &SetupTimings {
        &self.setup
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn header(&self) -> Header {
        Header {
            seed: self.config.seed,
            num_inputs: self.config.num_inputs,
            num_outputs: self.config.num_outputs,
            num_neurons: self.engine.num_neurons(),
            num_synapses: self.engine.num_synapses(),
            runtime: self.config.runtime,
        }
    }

    /// Stimulate every input, run one timed simulation advance and read the accumulation count.
    /// Activity is not cleared.
    pub fn run_trial(&mut self, index: usize) -> Result<RunRecord, BenchError> {
        for input_id in 0..self.config.num_inputs {
            self.engine
                .apply_input(input_id, INPUT_STRENGTH, input_id as u64)?;
        }

        let mut duration = Duration::ZERO;
        {
            let _probe = measure(Phase::Simulate(index), &mut duration);
            self.engine.simulate(self.config.runtime)?;
        }

        let accumulate_count = self.engine.metric(ACCUMULATE_COUNT)?;
        Ok(RunRecord::new(index, duration, accumulate_count))
    }

    /// Run all trials, reporting as they complete, and report the statistics.
    pub fn run<W: Write>(&mut self, reporter: &mut Reporter<W>) -> Result<BenchmarkResult, BenchError> {
        reporter.header(&self.header())?;
        reporter.setup(&self.setup)?;

        let mut runs = Vec::new();
        for index in 0..self.config.num_runs {
            let record = self.run_trial(index)?;
            reporter.trial(&record)?;
            runs.push(record);
            self.engine.clear_activity()?;
        }

        let result = BenchmarkResult {
            runs,
            accumulations: self.engine.metric(ACCUMULATE_COUNT)?,
            setup: self.setup,
        };
        let stats = result.statistics(self.config.runtime)?;
        log::info!("Benchmark done: {:?}", stats);
        reporter.statistics(&stats)?;

        Ok(result)
    }
}

/// Run a complete benchmark on a fresh engine of type `E`, writing the report to `out`.
pub fn run_benchmark<E: Engine, W: Write>(config: BenchConfig, out: W) -> Result<BenchmarkResult, BenchError> {
    let mut benchmark = Benchmark::<E>::setup(config)?;
    let mut reporter = Reporter::new(out);
    benchmark.run(&mut reporter)
}
