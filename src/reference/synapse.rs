//! Module implementing the synapses of the reference network.
use serde::{Deserialize, Serialize};

use crate::error::BenchError;
use crate::reference::MAX_DELAY;

/// A synapse transmitting the fires of a neuron to another one.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Synapse {
    /// ID of the sending neuron
    source_id: usize,
    /// Charge added to the receiving neuron on each fire
    weight: i16,
    /// Number of time steps a fire is delayed by
    delay: u8,
}

impl Synapse {
    /// Create a new synapse.
    /// Returns an error if the delay exceeds [`MAX_DELAY`].
    pub fn build(source_id: usize, weight: i16, delay: u8) -> Result<Self, BenchError> {
        if delay as i32 > MAX_DELAY {
            return Err(BenchError::InvalidParameter(format!(
                "Synapse delay {} exceeds the maximum of {}",
                delay, MAX_DELAY
            )));
        }

        Ok(Synapse {
            source_id,
            weight,
            delay,
        })
    }

    /// Returns the ID of the sending neuron.
    pub fn source_id(&self) -> usize {
        self.source_id
    }

    pub fn weight(&self) -> i16 {
        self.weight
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }
}
