//! Module implementing the leaky integrate-and-fire neurons of the reference network.
use derivative::Derivative;
use serde::{Deserialize, Serialize};

use super::synapse::Synapse;
use crate::error::BenchError;
use crate::reference::{COMP_BITS, LEAK_COMP, MAX_CHARGE, MAX_LEAK, MIN_CHARGE};

/// An integer leaky integrate-and-fire neuron.
///
/// The charge and the time of the last event are runtime state: they are neither saved nor compared.
#[derive(Derivative, Serialize, Deserialize, Clone)]
#[derivative(Debug, PartialEq)]
pub struct Neuron {
    /// Unique identifier for the neuron
    id: usize,
    /// The neuron fires when its charge exceeds the threshold
    threshold: i16,
    /// Leak exponent: the charge halves every `2^leak` steps; no leak if `None`
    leak: Option<u8>,
    /// Incoming synapses, at most one per sending neuron
    inputs: Vec<Synapse>,
    #[serde(skip)]
    #[derivative(PartialEq = "ignore")]
    charge: i32,
    #[serde(skip)]
    #[derivative(PartialEq = "ignore")]
    last_event: Option<u64>,
}

impl Neuron {
    /// Create a new neuron without inputs.
    /// Returns an error if the threshold is negative or the leak exceeds [`MAX_LEAK`].
    pub fn build(id: usize, threshold: i16, leak: Option<u8>) -> Result<Self, BenchError> {
        if threshold < 0 {
            return Err(BenchError::InvalidParameter(format!(
                "Neuron {} has a negative threshold",
                id
            )));
        }
        if leak.map_or(false, |leak| leak as i32 > MAX_LEAK) {
            return Err(BenchError::InvalidParameter(format!(
                "Neuron {} has a leak exponent above {}",
                id, MAX_LEAK
            )));
        }

        Ok(Neuron {
            id,
            threshold,
            leak,
            inputs: vec![],
            charge: 0,
            last_event: None,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn threshold(&self) -> i16 {
        self.threshold
    }

    pub fn leak(&self) -> Option<u8> {
        self.leak
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn inputs(&self) -> &[Synapse] {
        &self.inputs
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Add an incoming synapse, replacing any synapse coming from the same neuron.
    pub fn add_input(&mut self, synapse: Synapse) {
        match self
            .inputs
            .iter_mut()
            .find(|input| input.source_id() == synapse.source_id())
        {
            Some(input) => *input = synapse,
            None => self.inputs.push(synapse),
        }
    }

    /// Apply the leak accumulated since the last event and move the last event to `now`.
    pub fn refresh(&mut self, now: u64) {
        let mut charge = self.charge as i64;

        if let (Some(leak), Some(last_event)) = (self.leak, self.last_event) {
            if now > last_event {
                let leak = leak as u32;
                let elapsed = now - last_event;
                let periods = elapsed >> leak;
                let remainder = elapsed & ((1 << leak) - 1);

                let mut magnitude = charge.abs();
                if remainder != 0 {
                    let index = (((1 << leak) - remainder) << (MAX_LEAK as u32 - leak)) as usize;
                    magnitude = (magnitude * LEAK_COMP[index]) >> COMP_BITS;
                }
                magnitude = if periods >= 63 { 0 } else { magnitude >> periods };
                charge = if charge > 0 { magnitude } else { -magnitude };
            }
        }

        self.last_event = Some(now);
        self.charge = charge.clamp(MIN_CHARGE as i64, MAX_CHARGE as i64) as i32;
    }

    /// Accumulate a weighted fire at time `now`.
    /// Returns true if the charge exceeds the threshold afterwards.
    pub fn accumulate(&mut self, weight: i16, now: u64) -> bool {
        if self.last_event != Some(now) {
            self.refresh(now);
        }
        self.charge = (self.charge + weight as i32).clamp(MIN_CHARGE, MAX_CHARGE);
        self.charge > self.threshold as i32
    }

    /// Fire if the charge exceeds the threshold, resetting the charge.
    /// Returns true if the neuron fired.
    pub fn try_fire(&mut self) -> bool {
        if self.charge > self.threshold as i32 {
            self.charge = 0;
            true
        } else {
            false
        }
    }

    /// Reset the runtime state of the neuron.
    pub fn clear_activity(&mut self) {
        self.charge = 0;
        self.last_event = None;
    }
}
