//! The event-driven execution engine of the reference network.
//!
//! The simulator steps through time one cycle at a time but only touches the neurons that receive
//! events. Synaptic events are kept in a circular buffer of buckets indexed by their arrival time,
//! with one bucket per possible delay (rounded up to a power of two).
use derivative::Derivative;
use std::ops::Range;

use super::network::EventNetwork;
use crate::engine::{CaptureWindow, Engine, Network, ACCUMULATE_COUNT, FIRE_COUNT, TOTAL_TIMESTEPS};
use crate::error::BenchError;

/// A fire travelling along a synapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FireEvent {
    target_id: usize,
    weight: i16,
}

/// A stimulus scheduled on an input neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InputFire {
    neuron_id: usize,
    weight: i16,
    time: u64,
}

/// An outgoing synapse, indexed by the sending neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Projection {
    target_id: usize,
    weight: i16,
    delay: u8,
}

/// Fire tally of a monitored output during the last simulation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    window: CaptureWindow,
    fire_count: u64,
    last_fire: Option<u64>,
}

impl Monitor {
    fn new(window: CaptureWindow) -> Self {
        Monitor {
            window,
            fire_count: 0,
            last_fire: None,
        }
    }

    fn record(&mut self, time: u64) {
        if self.window.contains(time) {
            self.fire_count += 1;
            self.last_fire = Some(time);
        }
    }

    fn clear(&mut self) {
        self.fire_count = 0;
        self.last_fire = None;
    }

    pub fn window(&self) -> CaptureWindow {
        self.window
    }
}

/// Single-threaded event-driven simulator.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct EventSimulator {
    network: Option<EventNetwork>,
    #[derivative(Debug = "ignore")]
    projections: Vec<Vec<Projection>>,
    #[derivative(Debug = "ignore")]
    fires: Vec<Vec<FireEvent>>,
    delay_mask: usize,
    #[derivative(Debug = "ignore")]
    input_fires: Vec<InputFire>,
    #[derivative(Debug = "ignore")]
    thresh_check: Vec<usize>,
    #[derivative(Debug = "ignore")]
    queued: Vec<bool>,
    outputs: Range<usize>,
    monitors: Vec<Option<Monitor>>,
    time: u64,
    run_start: u64,
    accumulates: u64,
    fire_count: u64,
    timesteps: u64,
}

impl EventSimulator {
    /// The configured network.
    pub fn network(&self) -> Option<&EventNetwork> {
        self.network.as_ref()
    }

    /// The current network time.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Number of (monitored) fires of an output during the last simulation call.
    pub fn output_count(&self, output_id: usize) -> Option<u64> {
        self.monitor(output_id).map(|monitor| monitor.fire_count)
    }

    /// Time of the last (monitored) fire of an output, relative to the start of the last simulation call.
    pub fn last_output_time(&self, output_id: usize) -> Option<u64> {
        self.monitor(output_id).and_then(|monitor| monitor.last_fire)
    }

    pub fn monitor(&self, output_id: usize) -> Option<&Monitor> {
        self.monitors.get(output_id).and_then(|monitor| monitor.as_ref())
    }

    fn schedule_check(queued: &mut [bool], thresh_check: &mut Vec<usize>, neuron_id: usize) {
        if !queued[neuron_id] {
            queued[neuron_id] = true;
            thresh_check.push(neuron_id);
        }
    }

    /// Execute a single time step: stimuli, then synaptic events, then threshold checks.
    fn cycle(&mut self, now: u64) {
        let neurons = match self.network.as_mut() {
            Some(network) => network.neurons_mut(),
            None => return,
        };

        while let Some(input) = self.input_fires.last().copied() {
            if input.time > now {
                break;
            }
            self.input_fires.pop();
            self.accumulates += 1;
            if neurons[input.neuron_id].accumulate(input.weight, now) {
                Self::schedule_check(&mut self.queued, &mut self.thresh_check, input.neuron_id);
            }
        }

        let bucket = now as usize & self.delay_mask;
        let mut events = std::mem::take(&mut self.fires[bucket]);
        for event in events.drain(..) {
            self.accumulates += 1;
            if neurons[event.target_id].accumulate(event.weight, now) {
                Self::schedule_check(&mut self.queued, &mut self.thresh_check, event.target_id);
            }
        }
        self.fires[bucket] = events;

        for neuron_id in self.thresh_check.drain(..) {
            self.queued[neuron_id] = false;
            if !neurons[neuron_id].try_fire() {
                continue;
            }
            self.fire_count += 1;

            for projection in &self.projections[neuron_id] {
                let slot = (now + projection.delay as u64 + 1) as usize & self.delay_mask;
                self.fires[slot].push(FireEvent {
                    target_id: projection.target_id,
                    weight: projection.weight,
                });
            }

            if self.outputs.contains(&neuron_id) {
                if let Some(monitor) = self.monitors[neuron_id - self.outputs.start].as_mut() {
                    monitor.record(now - self.run_start);
                }
            }
        }
    }
}

impl Engine for EventSimulator {
    type Network = EventNetwork;

    fn new() -> Result<Self, BenchError> {
        Ok(EventSimulator::default())
    }

    fn configure(&mut self, mut network: EventNetwork) -> Result<(), BenchError> {
        network.clear_activity();

        let num_neurons = network.num_neurons();
        // loaded networks are not validated on deserialization
        let outputs_end = network
            .num_inputs()
            .checked_add(network.num_outputs())
            .filter(|&end| end <= num_neurons)
            .ok_or_else(|| {
                BenchError::InvalidParameter(format!(
                    "{} inputs and {} outputs do not fit in a network of {} neurons",
                    network.num_inputs(),
                    network.num_outputs(),
                    num_neurons
                ))
            })?;

        let mut projections = vec![Vec::new(); num_neurons];
        for (target_id, neuron) in network.neurons().iter().enumerate() {
            for synapse in neuron.inputs() {
                let projection = projections.get_mut(synapse.source_id()).ok_or_else(|| {
                    BenchError::OutOfBounds(format!("source neuron {}", synapse.source_id()))
                })?;
                projection.push(Projection {
                    target_id,
                    weight: synapse.weight(),
                    delay: synapse.delay(),
                });
            }
        }

        let num_buckets = (network.max_delay() as usize + 1).next_power_of_two();
        log::debug!(
            "Configuring simulator: {} neurons, {} delay buckets",
            num_neurons,
            num_buckets
        );

        *self = EventSimulator {
            projections,
            fires: vec![Vec::new(); num_buckets],
            delay_mask: num_buckets - 1,
            queued: vec![false; num_neurons],
            outputs: network.num_inputs()..outputs_end,
            monitors: vec![None; network.num_outputs()],
            network: Some(network),
            ..EventSimulator::default()
        };
        Ok(())
    }

    fn num_neurons(&self) -> usize {
        self.network.as_ref().map_or(0, |network| network.num_neurons())
    }

    fn num_synapses(&self) -> usize {
        self.network.as_ref().map_or(0, |network| network.num_synapses())
    }

    fn monitor_output(&mut self, output_id: usize, window: CaptureWindow) -> Result<(), BenchError> {
        if self.network.is_none() {
            return Err(BenchError::NotConfigured);
        }
        match self.monitors.get_mut(output_id) {
            Some(monitor) => {
                *monitor = Some(Monitor::new(window));
                Ok(())
            }
            None => Err(BenchError::OutOfBounds(format!("output {}", output_id))),
        }
    }

    fn apply_input(&mut self, input_id: usize, strength: i16, offset: u64) -> Result<(), BenchError> {
        let network = self.network.as_ref().ok_or(BenchError::NotConfigured)?;
        let neuron_id = network
            .input_neuron(input_id)
            .ok_or_else(|| BenchError::OutOfBounds(format!("input {}", input_id)))?;
        self.input_fires.push(InputFire {
            neuron_id,
            weight: strength,
            time: self.time + offset,
        });
        Ok(())
    }

    fn simulate(&mut self, steps: u64) -> Result<(), BenchError> {
        if self.network.is_none() {
            return Err(BenchError::NotConfigured);
        }

        // latest first, so that due stimuli are popped from the back
        self.input_fires
            .sort_by(|a, b| b.time.cmp(&a.time));
        self.monitors.iter_mut().flatten().for_each(|monitor| monitor.clear());

        self.run_start = self.time;
        let end = self.run_start + steps;
        for now in self.run_start..end {
            self.cycle(now);
        }

        self.time = end;
        self.timesteps += steps;
        Ok(())
    }

    fn metric(&mut self, name: &str) -> Result<u64, BenchError> {
        match name {
            ACCUMULATE_COUNT => Ok(self.accumulates),
            FIRE_COUNT => Ok(self.fire_count),
            TOTAL_TIMESTEPS => Ok(self.timesteps),
            _ => Err(BenchError::UnknownMetric(name.to_string())),
        }
    }

    fn clear_activity(&mut self) -> Result<(), BenchError> {
        if let Some(network) = self.network.as_mut() {
            network.clear_activity();
        }
        self.time = 0;
        self.run_start = 0;
        self.input_fires.clear();
        self.thresh_check.clear();
        self.fires.iter_mut().for_each(|bucket| bucket.clear());
        self.queued.iter_mut().for_each(|queued| *queued = false);
        self.monitors.iter_mut().flatten().for_each(|monitor| monitor.clear());
        Ok(())
    }
}
