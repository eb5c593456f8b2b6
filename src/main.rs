use clap::Parser;
use std::io;
use std::process;

use snn_bench::bench::orchestrator::{run_benchmark, BenchConfig};
use snn_bench::error::BenchError;
use snn_bench::logging::{init_logging, level_from_env};
use snn_bench::reference::simulator::EventSimulator;

/// Benchmark the simulation of a random spiking neural network.
#[derive(Parser, Debug)]
struct Args {
    /// The number of input neurons
    inputs: usize,
    /// The number of output neurons
    outputs: usize,
    /// The number of hidden neurons
    hidden: usize,
    /// The number of timed simulation runs
    runs: usize,
    /// The number of time steps simulated per run
    runtime: u64,
    /// The seed used for network generation
    seed: u64,
}

fn run(args: Args) -> Result<(), BenchError> {
    init_logging(level_from_env())?;
    log::info!("{:?}", args);

    let config = BenchConfig {
        num_inputs: args.inputs,
        num_outputs: args.outputs,
        num_hidden: args.hidden,
        num_runs: args.runs,
        runtime: args.runtime,
        seed: args.seed,
    };

    run_benchmark::<EventSimulator, _>(config, io::stdout().lock())?;
    Ok(())
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
