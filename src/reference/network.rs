//! The reference network and its random topology generator.
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::neuron::Neuron;
use super::synapse::Synapse;
use crate::bench::topology::{ParamRange, TopologyRequest};
use crate::engine::Network;
use crate::error::BenchError;
use crate::reference::{MAX_DELAY, MAX_LEAK};

/// A network of integer neurons with a fixed capacity.
///
/// Neurons `0..num_inputs` receive the stimuli and neurons `num_inputs..num_inputs + num_outputs`
/// are the outputs; the remaining neurons are hidden.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct EventNetwork {
    capacity: usize,
    neurons: Vec<Neuron>,
    num_inputs: usize,
    num_outputs: usize,
}

impl EventNetwork {
    /// Create a network from existing neurons; the first `num_inputs` neurons are the inputs and the
    /// next `num_outputs` ones the outputs.
    pub fn from_neurons(neurons: Vec<Neuron>, num_inputs: usize, num_outputs: usize) -> Result<Self, BenchError> {
        check_io_fits(num_inputs, num_outputs, neurons.len())?;
        if neurons.iter().enumerate().any(|(id, neuron)| neuron.id() != id) {
            return Err(BenchError::InvalidParameter(
                "Neuron ids must match their position".to_string(),
            ));
        }

        Ok(EventNetwork {
            capacity: neurons.len(),
            neurons,
            num_inputs,
            num_outputs,
        })
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    pub fn neuron_ref(&self, neuron_id: usize) -> Option<&Neuron> {
        self.neurons.get(neuron_id)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// The neuron receiving the stimuli of an input.
    pub fn input_neuron(&self, input_id: usize) -> Option<usize> {
        (input_id < self.num_inputs).then_some(input_id)
    }

    /// The output monitored on a neuron, if any.
    pub fn output_id(&self, neuron_id: usize) -> Option<usize> {
        neuron_id
            .checked_sub(self.num_inputs)
            .filter(|&output_id| output_id < self.num_outputs)
    }

    /// The largest synaptic delay in the network.
    pub fn max_delay(&self) -> u8 {
        self.neurons
            .iter()
            .flat_map(|neuron| neuron.inputs())
            .map(|synapse| synapse.delay())
            .max()
            .unwrap_or(0)
    }

    /// Add a synapse, replacing any existing synapse between the same neurons.
    pub fn add_synapse(&mut self, source_id: usize, target_id: usize, weight: i16, delay: u8) -> Result<(), BenchError> {
        if source_id >= self.neurons.len() {
            return Err(BenchError::OutOfBounds(format!("source neuron {}", source_id)));
        }
        let synapse = Synapse::build(source_id, weight, delay)?;
        match self.neurons.get_mut(target_id) {
            Some(neuron) => {
                neuron.add_input(synapse);
                Ok(())
            }
            None => Err(BenchError::OutOfBounds(format!("target neuron {}", target_id))),
        }
    }

    /// Reset the runtime state of every neuron.
    pub fn clear_activity(&mut self) {
        self.neurons.iter_mut().for_each(|neuron| neuron.clear_activity());
    }

    /// Save the network to a file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), BenchError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| BenchError::IOError(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }

    /// Load a network from a file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, BenchError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| BenchError::IOError(e.to_string()))
    }
}

/// Returns the number of input and output neurons if they fit in `capacity` neurons.
fn check_io_fits(num_inputs: usize, num_outputs: usize, capacity: usize) -> Result<usize, BenchError> {
    match num_inputs.checked_add(num_outputs) {
        Some(num_io) if num_io <= capacity => Ok(num_io),
        _ => Err(BenchError::InvalidParameter(format!(
            "{} inputs and {} outputs do not fit in a network of {} neurons",
            num_inputs, num_outputs, capacity
        ))),
    }
}

fn check_range(name: &str, range: ParamRange, lo: i32, hi: i32) -> Result<Uniform<i32>, BenchError> {
    if !range.within(lo, hi) {
        return Err(BenchError::InvalidParameter(format!(
            "{} range [{}, {}] must lie within [{}, {}]",
            name, range.min, range.max, lo, hi
        )));
    }
    Ok(Uniform::new_inclusive(range.min, range.max))
}

impl Network for EventNetwork {
    fn new(num_neurons: usize) -> Result<Self, BenchError> {
        Ok(EventNetwork {
            capacity: num_neurons,
            neurons: Vec::new(),
            num_inputs: 0,
            num_outputs: 0,
        })
    }

    /// Fill the network with random neurons and synapses.
    ///
    /// Every input sends `input_synapses` synapses to random hidden neurons, every output receives
    /// `output_synapses` synapses from random hidden neurons and every hidden neuron sends
    /// `hidden_synapses` synapses to other hidden neurons, unless the target already has
    /// `hidden_synapses_max` inputs. The generation is deterministic given the seed.
    fn make_random(&mut self, request: &TopologyRequest) -> Result<(), BenchError> {
        let num_io = check_io_fits(request.num_inputs(), request.num_outputs(), self.capacity)?;

        let threshold_dist = check_range("threshold", request.threshold_range(), 0, i16::MAX as i32)?;
        let weight_dist = check_range("weight", request.weight_range(), i16::MIN as i32, i16::MAX as i32)?;
        let delay_dist = check_range("delay", request.delay_range(), 0, MAX_DELAY)?;
        let leak_dist = check_range("leak", request.leak_range(), -1, MAX_LEAK)?;

        let mut rng = ChaCha8Rng::seed_from_u64(request.seed());

        let mut neurons: Vec<Neuron> = Vec::new();
        neurons.try_reserve_exact(self.capacity).map_err(|e| {
            BenchError::InvalidParameter(format!("cannot allocate {} neurons: {}", self.capacity, e))
        })?;
        for id in 0..self.capacity {
            let threshold = threshold_dist.sample(&mut rng) as i16;
            let leak = u8::try_from(leak_dist.sample(&mut rng)).ok();
            neurons.push(Neuron::build(id, threshold, leak)?);
        }
        self.neurons = neurons;
        self.num_inputs = request.num_inputs();
        self.num_outputs = request.num_outputs();

        let hidden = num_io..self.capacity;
        if hidden.is_empty() {
            return Ok(());
        }
        let hidden_dist = Uniform::new(hidden.start, hidden.end);
        let fan = request.fan();

        let add_random_synapse = |network: &mut EventNetwork, rng: &mut ChaCha8Rng, source_id: usize, target_id: usize| {
            let weight = weight_dist.sample(rng) as i16;
            let delay = delay_dist.sample(rng) as u8;
            network.add_synapse(source_id, target_id, weight, delay)
        };

        for input_id in 0..self.num_inputs {
            for _ in 0..fan.input_synapses {
                let target_id = hidden_dist.sample(&mut rng);
                add_random_synapse(self, &mut rng, input_id, target_id)?;
            }
        }

        for target_id in self.num_inputs..num_io {
            for _ in 0..fan.output_synapses {
                let source_id = hidden_dist.sample(&mut rng);
                add_random_synapse(self, &mut rng, source_id, target_id)?;
            }
        }

        if hidden.len() < 2 {
            return Ok(());
        }
        for source_id in hidden.clone() {
            for _ in 0..fan.hidden_synapses {
                let target_id = loop {
                    let target_id = rng.gen_range(hidden.clone());
                    if target_id != source_id {
                        break target_id;
                    }
                };
                if self.neurons[target_id].num_inputs() < fan.hidden_synapses_max {
                    add_random_synapse(self, &mut rng, source_id, target_id)?;
                }
            }
        }

        log::debug!(
            "Random network: {} neurons, {} synapses",
            self.num_neurons(),
            self.num_synapses()
        );
        Ok(())
    }

    fn num_neurons(&self) -> usize {
        self.neurons.len()
    }

    fn num_synapses(&self) -> usize {
        self.neurons.iter().map(|neuron| neuron.num_inputs()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::topology::{DELAY_RANGE, LEAK_RANGE, THRESHOLD_RANGE, WEIGHT_RANGE};
    use tempfile::tempdir;

    fn random_network(num_inputs: usize, num_outputs: usize, num_hidden: usize, seed: u64) -> EventNetwork {
        let request = TopologyRequest::new(num_inputs, num_outputs, num_hidden, seed);
        let mut network = EventNetwork::new(request.num_neurons().unwrap()).unwrap();
        network.make_random(&request).unwrap();
        network
    }

    #[test]
    fn test_make_random_sizes() {
        let network = random_network(2, 2, 10, 42);
        assert_eq!(network.num_neurons(), 14);
        assert_eq!(network.num_inputs(), 2);
        assert_eq!(network.num_outputs(), 2);
        assert!(network.num_synapses() > 0);
        // at most one synapse per (source, target) pair
        assert!(network.num_synapses() <= 2 * 10 + 2 * 10 + 10 * 10);
    }

    #[test]
    fn test_make_random_deterministic() {
        assert_eq!(random_network(4, 3, 50, 7), random_network(4, 3, 50, 7));
        assert_ne!(random_network(4, 3, 50, 7), random_network(4, 3, 50, 8));
    }

    #[test]
    fn test_make_random_structure() {
        let network = random_network(3, 2, 40, 1);
        let hidden = 5..45;
        for neuron in network.neurons() {
            assert!(neuron.threshold() >= 0 && neuron.threshold() <= 255);
            assert!(neuron.leak().map_or(false, |leak| leak <= 3));
            for synapse in neuron.inputs() {
                assert!(synapse.weight() >= 0 && synapse.weight() <= 255);
                assert!(synapse.delay() <= 15);
                assert_ne!(synapse.source_id(), neuron.id());
                // outputs never send, inputs never receive
                assert!(!(3..5).contains(&synapse.source_id()));
            }
            if neuron.id() < 3 {
                assert_eq!(neuron.num_inputs(), 0);
            }
            if neuron.id() >= 3 && neuron.id() < 5 {
                assert!(neuron.inputs().iter().all(|s| hidden.contains(&s.source_id())));
            }
        }
    }

    #[test]
    fn test_make_random_hidden_fan_in() {
        let network = random_network(0, 0, 100, 3);
        let fan = *TopologyRequest::new(0, 0, 100, 3).fan();
        for neuron in network.neurons() {
            assert!(neuron.num_inputs() <= fan.hidden_synapses_max);
        }
    }

    #[test]
    fn test_make_random_no_hidden() {
        let network = random_network(2, 2, 0, 42);
        assert_eq!(network.num_neurons(), 4);
        assert_eq!(network.num_synapses(), 0);

        let network = random_network(1, 1, 1, 42);
        assert_eq!(network.num_neurons(), 3);
        assert_eq!(network.num_synapses(), 2);
    }

    #[test]
    fn test_make_random_too_small() {
        let request = TopologyRequest::new(3, 3, 0, 0);
        let mut network = EventNetwork::new(5).unwrap();
        assert!(matches!(
            network.make_random(&request),
            Err(BenchError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_make_random_io_overflow() {
        let request = TopologyRequest::new(usize::MAX, 1, 0, 0);
        let mut network = EventNetwork::new(4).unwrap();
        assert!(matches!(
            network.make_random(&request),
            Err(BenchError::InvalidParameter(_))
        ));
        assert_eq!(network.num_neurons(), 0);
    }

    #[test]
    fn test_make_random_too_large() {
        let mut network = EventNetwork::new(usize::MAX).unwrap();
        assert!(matches!(
            network.make_random(&TopologyRequest::new(1, 1, 0, 0)),
            Err(BenchError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_make_random_invalid_range() {
        let request = TopologyRequest::new(1, 1, 4, 0).with_ranges(
            THRESHOLD_RANGE,
            WEIGHT_RANGE,
            ParamRange { min: 0, max: 16 },
            LEAK_RANGE,
        );
        let mut network = EventNetwork::new(6).unwrap();
        assert!(matches!(
            network.make_random(&request),
            Err(BenchError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_make_random_without_leak() {
        let request = TopologyRequest::new(1, 1, 4, 0).with_ranges(
            THRESHOLD_RANGE,
            WEIGHT_RANGE,
            DELAY_RANGE,
            ParamRange { min: -1, max: -1 },
        );
        let mut network = EventNetwork::new(6).unwrap();
        network.make_random(&request).unwrap();
        assert!(network.neurons().iter().all(|neuron| neuron.leak().is_none()));
    }

    #[test]
    fn test_io_mapping() {
        let network = random_network(2, 3, 5, 0);
        assert_eq!(network.input_neuron(1), Some(1));
        assert_eq!(network.input_neuron(2), None);
        assert_eq!(network.output_id(1), None);
        assert_eq!(network.output_id(2), Some(0));
        assert_eq!(network.output_id(4), Some(2));
        assert_eq!(network.output_id(5), None);
        assert_eq!(network.output_id(usize::MAX), None);
    }

    #[test]
    fn test_add_synapse_out_of_bounds() {
        let mut network = random_network(1, 1, 2, 0);
        assert!(matches!(
            network.add_synapse(0, 10, 1, 1),
            Err(BenchError::OutOfBounds(_))
        ));
        assert!(matches!(
            network.add_synapse(10, 0, 1, 1),
            Err(BenchError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_from_neurons() {
        let neurons = (0..3).map(|id| Neuron::build(id, 1, None).unwrap()).collect::<Vec<_>>();
        assert!(EventNetwork::from_neurons(neurons.clone(), 2, 2).is_err());
        assert!(EventNetwork::from_neurons(neurons.clone(), usize::MAX, 1).is_err());
        let network = EventNetwork::from_neurons(neurons, 1, 1).unwrap();
        assert_eq!(network.num_neurons(), 3);
        assert_eq!(network.num_synapses(), 0);
        assert_eq!(network.output_id(1), Some(0));

        let shuffled = vec![Neuron::build(1, 1, None).unwrap(), Neuron::build(0, 1, None).unwrap()];
        assert!(EventNetwork::from_neurons(shuffled, 1, 1).is_err());
    }

    #[test]
    fn test_max_delay() {
        let neurons = (0..3).map(|id| Neuron::build(id, 1, None).unwrap()).collect::<Vec<_>>();
        let mut network = EventNetwork::from_neurons(neurons, 1, 1).unwrap();
        assert_eq!(network.max_delay(), 0);
        network.add_synapse(0, 2, 1, 4).unwrap();
        network.add_synapse(2, 1, 1, 9).unwrap();
        assert_eq!(network.max_delay(), 9);
        assert_eq!(network.neuron_ref(2).unwrap().num_inputs(), 1);
    }

    #[test]
    fn test_save_load() {
        let network = random_network(3, 2, 20, 11);
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        network.save_to(&path).unwrap();
        let loaded = EventNetwork::load_from(&path).unwrap();
        assert_eq!(loaded, network);
        assert_eq!(loaded.num_synapses(), network.num_synapses());
    }
}
