// src/simulation/mod.rs

//! Simulates the execution of `bioq::circuits::Circuit` on a state-vector
//! engine. This module contains the `Simulator` entry point and the internal
//! `SimulationEngine` responsible for evolving the amplitude vector.

// Make engine module crate visible for the noise channels and tests
pub(crate) mod engine;
mod results;

// Re-export the main public interface types
pub use results::RunCounts;

// Import necessary types for the Simulator struct and its methods
use crate::circuits::Circuit;
use crate::core::{BioqError, QubitId, StateVector};
use crate::noise::NoiseModel;
use crate::operations::Gate;
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// The simulator orchestrating circuit runs.
///
/// A `Simulator` is a small configuration holder: an optional noise model
/// and an optional RNG seed. Each run is stateless and independent; the
/// engine is rebuilt (or reset) per call, so repeated runs of the same
/// circuit with the same seed reproduce the same counts exactly.
#[derive(Default)]
pub struct Simulator {
    /// Per-gate error injection; `None` simulates ideal execution.
    noise: Option<NoiseModel>,
    /// Seed for the sampling RNG; `None` draws OS entropy per run.
    seed: Option<u64>,
}

impl Simulator {
    /// Creates a new ideal (noiseless, entropy-seeded) simulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a simulator that injects the given noise model during runs.
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Returns a simulator whose sampling RNG is seeded for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs a circuit for the given number of shots and collects outcome
    /// counts over its measured qubits.
    ///
    /// The circuit must end in exactly one `Measure` gate and contain no
    /// other measurement; `shots` must be positive. Ideal runs evolve the
    /// state once and sample the final distribution per shot. Noisy runs
    /// re-evolve the circuit per shot, injecting the configured channel
    /// after every gate on each qubit the gate touched, then flip each read
    /// bit with the model's readout-error probability.
    ///
    /// # Arguments
    /// * `circuit` - The `Circuit` to simulate.
    /// * `shots` - Number of independent evaluations to sample.
    ///
    /// # Returns
    /// * `Ok(RunCounts)` mapping outcome bit-strings (measured qubits in
    ///   ascending id order) to observed counts.
    /// * `Err(BioqError)` on a malformed circuit (fail-fast, no recovery).
    pub fn run(&self, circuit: &Circuit, shots: u64) -> Result<RunCounts, BioqError> {
        if shots == 0 {
            return Err(BioqError::InvalidOperation {
                message: "Shot count must be positive".to_string(),
            });
        }
        let measure_targets = terminal_measurement(circuit)?;

        let mut engine = SimulationEngine::init(circuit.qubits())?;
        let measured_idxs: Vec<usize> = measure_targets
            .iter()
            .map(|q| engine.qubit_index(q))
            .collect::<Result<_, _>>()?;

        let mut rng = self.make_rng();
        let mut counts = RunCounts::new();

        match &self.noise {
            None => {
                // Ideal path: all measurement is terminal, so one evolution
                // serves every shot.
                for gate in circuit.gates() {
                    if gate.is_measurement() {
                        break;
                    }
                    engine.apply_gate(gate)?;
                }
                for _ in 0..shots {
                    let basis = engine.sample_basis_state(&mut rng);
                    let bits: Vec<u8> =
                        measured_idxs.iter().map(|idx| engine.bit_value(basis, *idx)).collect();
                    counts.record(bitstring(&bits));
                }
            }
            Some(noise) => {
                // Trajectory path: every shot is its own noisy evolution.
                for _ in 0..shots {
                    engine.reset();
                    for gate in circuit.gates() {
                        if gate.is_measurement() {
                            break;
                        }
                        engine.apply_gate(gate)?;
                        if let Some(channel) = noise.channel_for(gate) {
                            for qubit in gate.involved_qubits() {
                                let idx = engine.qubit_index(&qubit)?;
                                let draw: f64 = rng.random();
                                channel.apply(&mut engine, idx, draw)?;
                            }
                        }
                    }
                    let basis = engine.sample_basis_state(&mut rng);
                    let mut bits: Vec<u8> =
                        measured_idxs.iter().map(|idx| engine.bit_value(basis, *idx)).collect();
                    for bit in bits.iter_mut() {
                        if rng.random::<f64>() < noise.readout_error {
                            *bit ^= 1;
                        }
                    }
                    counts.record(bitstring(&bits));
                }
            }
        }

        Ok(counts)
    }

    /// Evolves a measurement-free circuit and returns the final state
    /// vector. Always noiseless: the state vector of a single noisy
    /// trajectory is not a meaningful summary, so noise configuration is
    /// ignored here.
    ///
    /// # Errors
    /// Returns `BioqError::InvalidOperation` if the circuit contains a
    /// measurement.
    pub fn statevector(&self, circuit: &Circuit) -> Result<StateVector, BioqError> {
        if circuit.gates().iter().any(Gate::is_measurement) {
            return Err(BioqError::InvalidOperation {
                message: "State vector evolution cannot include a measurement".to_string(),
            });
        }
        let mut engine = SimulationEngine::init(circuit.qubits())?;
        for gate in circuit.gates() {
            engine.apply_gate(gate)?;
        }
        Ok(engine.into_state())
    }

    fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => rand::make_rng::<StdRng>(),
        }
    }
}

/// Validates the circuit's measurement contract and returns the measured
/// qubits sorted by id (bit-string order).
fn terminal_measurement(circuit: &Circuit) -> Result<Vec<QubitId>, BioqError> {
    let gates = circuit.gates();
    let Some(last) = gates.last() else {
        return Err(BioqError::InvalidOperation {
            message: "Empty circuit has nothing to measure".to_string(),
        });
    };
    let Gate::Measure { targets } = last else {
        return Err(BioqError::InvalidOperation {
            message: "Circuit must end in a Measure gate".to_string(),
        });
    };
    if targets.is_empty() {
        return Err(BioqError::InvalidOperation {
            message: "Measurement lists no qubits".to_string(),
        });
    }
    if gates[..gates.len() - 1].iter().any(Gate::is_measurement) {
        return Err(BioqError::InvalidOperation {
            message: "Only a single terminal measurement is supported".to_string(),
        });
    }

    let mut sorted = targets.clone();
    sorted.sort();
    sorted.dedup();
    if sorted.len() != targets.len() {
        return Err(BioqError::InvalidOperation {
            message: "Measurement lists a qubit more than once".to_string(),
        });
    }
    Ok(sorted)
}

/// Renders measured bits as an outcome key ("0"/"1" characters).
fn bitstring(bits: &[u8]) -> String {
    bits.iter().map(|b| if *b == 1 { '1' } else { '0' }).collect()
}
