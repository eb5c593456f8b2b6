//! Parameters of the random topologies generated for benchmarking.
use serde::{Deserialize, Serialize};

use crate::error::BenchError;

/// Maximum number of synapses per input neuron and per output neuron.
pub const MAX_IO_SYNAPSES: usize = 64;
/// Maximum number of outgoing synapses per hidden neuron.
pub const MAX_HIDDEN_SYNAPSES: usize = 16;

pub const THRESHOLD_RANGE: ParamRange = ParamRange { min: 0, max: 255 };
pub const WEIGHT_RANGE: ParamRange = ParamRange { min: 0, max: 255 };
pub const DELAY_RANGE: ParamRange = ParamRange { min: 0, max: 15 };
pub const LEAK_RANGE: ParamRange = ParamRange { min: 0, max: 3 };

/// An inclusive integer range forwarded to the topology generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: i32,
    pub max: i32,
}

impl ParamRange {
    pub fn new(min: i32, max: i32) -> Result<Self, BenchError> {
        if min > max {
            return Err(BenchError::InvalidParameter(format!(
                "range lower bound {} is greater than upper bound {}",
                min, max
            )));
        }
        Ok(ParamRange { min, max })
    }

    /// Returns true if both bounds lie within `[lo, hi]`.
    pub fn within(&self, lo: i32, hi: i32) -> bool {
        self.min <= self.max && self.min >= lo && self.max <= hi
    }
}

/// The total number of neurons of a network.
/// Returns an error if the count does not fit in a `usize`.
pub fn neuron_count(num_inputs: usize, num_outputs: usize, num_hidden: usize) -> Result<usize, BenchError> {
    num_inputs
        .checked_add(num_outputs)
        .and_then(|num_io| num_io.checked_add(num_hidden))
        .ok_or_else(|| {
            BenchError::InvalidParameter(format!(
                "{} inputs, {} outputs and {} hidden neurons overflow the neuron count",
                num_inputs, num_outputs, num_hidden
            ))
        })
}

/// Synapse fan limits of a random topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanLimits {
    /// Number of synapses from each input neuron into the hidden layer.
    pub input_synapses: usize,
    /// Number of synapses from the hidden layer into each output neuron.
    pub output_synapses: usize,
    /// Number of outgoing synapses of each hidden neuron within the hidden layer.
    pub hidden_synapses: usize,
    /// Maximum number of incoming synapses of a hidden neuron.
    pub hidden_synapses_max: usize,
}

impl FanLimits {
    /// Derive the fan limits from the number of hidden neurons.
    pub fn derive(num_hidden: usize) -> Self {
        let hidden_synapses = num_hidden.min(MAX_HIDDEN_SYNAPSES);
        FanLimits {
            input_synapses: num_hidden.min(MAX_IO_SYNAPSES),
            output_synapses: num_hidden.min(MAX_IO_SYNAPSES),
            hidden_synapses,
            hidden_synapses_max: 2 * hidden_synapses,
        }
    }
}

/// Everything a topology generator needs to produce a random network.
/// A request is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyRequest {
    num_inputs: usize,
    num_outputs: usize,
    num_hidden: usize,
    seed: u64,
    fan: FanLimits,
    threshold_range: ParamRange,
    weight_range: ParamRange,
    delay_range: ParamRange,
    leak_range: ParamRange,
}

impl TopologyRequest {
    /// A request with derived fan limits and the default parameter ranges.
    pub fn new(num_inputs: usize, num_outputs: usize, num_hidden: usize, seed: u64) -> Self {
        TopologyRequest {
            num_inputs,
            num_outputs,
            num_hidden,
            seed,
            fan: FanLimits::derive(num_hidden),
            threshold_range: THRESHOLD_RANGE,
            weight_range: WEIGHT_RANGE,
            delay_range: DELAY_RANGE,
            leak_range: LEAK_RANGE,
        }
    }

    /// Returns the same request with other parameter ranges.
    pub fn with_ranges(
        self,
        threshold_range: ParamRange,
        weight_range: ParamRange,
        delay_range: ParamRange,
        leak_range: ParamRange,
    ) -> Self {
        TopologyRequest {
            threshold_range,
            weight_range,
            delay_range,
            leak_range,
            ..self
        }
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn num_hidden(&self) -> usize {
        self.num_hidden
    }

    /// The total number of neurons.
    pub fn num_neurons(&self) -> Result<usize, BenchError> {
        neuron_count(self.num_inputs, self.num_outputs, self.num_hidden)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn fan(&self) -> &FanLimits {
        &self.fan
    }

    pub fn threshold_range(&self) -> ParamRange {
        self.threshold_range
    }

    pub fn weight_range(&self) -> ParamRange {
        self.weight_range
    }

    pub fn delay_range(&self) -> ParamRange {
        self.delay_range
    }

    pub fn leak_range(&self) -> ParamRange {
        self.leak_range
    }
}
