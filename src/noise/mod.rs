// src/noise/mod.rs

//! Quantum noise channels and the per-gate error model.
//!
//! Noise is injected by the quantum-trajectory method: at each application
//! site a uniform random draw selects one of the channel's operators, which
//! is then applied to the pure state. All channels here are mixtures of
//! Paulis, so no renormalization is needed.
//!
//! Available channels
//! ------------------
//! | Channel           | Model                                |
//! |-------------------|--------------------------------------|
//! | BitFlip(p)        | X applied with probability p         |
//! | PhaseFlip(p)      | Z applied with probability p         |
//! | Depolarizing(p)   | X, Y, or Z each with probability p/3 |
//!
//! The model is an opaque collaborator of the simulator: after every gate,
//! the simulator asks the model for the channel matching that gate's width
//! and applies it to each qubit the gate touched. Readout error is applied
//! separately, as an independent classical flip of each measured bit.

use crate::core::BioqError;
use crate::operations::Gate;
use crate::simulation::engine::{SimulationEngine, pauli_x, pauli_y, pauli_z};

/// A single-qubit noise channel applied after a gate.
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseChannel {
    /// Bit-flip: Pauli X applied with probability `prob`.
    ///
    /// `prob` must be in [0, 1].
    BitFlip {
        /// Error probability per application site.
        prob: f64,
    },

    /// Phase-flip: Pauli Z applied with probability `prob`.
    ///
    /// `prob` must be in [0, 1].
    PhaseFlip {
        /// Error probability per application site.
        prob: f64,
    },

    /// Depolarizing: a random Pauli (X, Y, or Z), each with probability
    /// `prob / 3`. Total error probability is `prob`; must be in [0, 1].
    Depolarizing {
        /// Total error probability per application site.
        prob: f64,
    },
}

impl NoiseChannel {
    /// Applies this channel to one qubit of the engine's state.
    ///
    /// `draw` must be a uniform random value in [0, 1); the caller owns the
    /// RNG so channel application stays deterministic under test.
    pub(crate) fn apply(
        &self,
        engine: &mut SimulationEngine,
        target_idx: usize,
        draw: f64,
    ) -> Result<(), BioqError> {
        match self {
            NoiseChannel::BitFlip { prob } => {
                if draw < *prob {
                    engine.apply_single_qubit(target_idx, &pauli_x())?;
                }
            }
            NoiseChannel::PhaseFlip { prob } => {
                if draw < *prob {
                    engine.apply_single_qubit(target_idx, &pauli_z())?;
                }
            }
            NoiseChannel::Depolarizing { prob } => {
                let p3 = prob / 3.0;
                if draw < p3 {
                    engine.apply_single_qubit(target_idx, &pauli_x())?;
                } else if draw < 2.0 * p3 {
                    engine.apply_single_qubit(target_idx, &pauli_y())?;
                } else if draw < *prob {
                    engine.apply_single_qubit(target_idx, &pauli_z())?;
                }
                // draw >= prob: no error
            }
        }
        Ok(())
    }
}

/// Per-gate error model: one channel per gate width plus a readout error.
///
/// Wider gates are noisier, which the depolarizing constructor encodes as
/// p2 on two-qubit gates and 1.5·p2 on the Toffoli.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseModel {
    /// Channel applied after single-qubit gates (H, X).
    pub single_qubit: NoiseChannel,
    /// Channel applied to each qubit of a CNOT.
    pub two_qubit: NoiseChannel,
    /// Channel applied to each qubit of a Toffoli.
    pub three_qubit: NoiseChannel,
    /// Probability of each measured bit being reported flipped.
    pub readout_error: f64,
}

impl NoiseModel {
    /// A depolarizing model: probability `p1` on single-qubit gates, `p2`
    /// on CNOTs, `1.5 * p2` on Toffolis, and a symmetric readout error.
    pub fn depolarizing(p1: f64, p2: f64, readout_error: f64) -> Self {
        Self {
            single_qubit: NoiseChannel::Depolarizing { prob: p1 },
            two_qubit: NoiseChannel::Depolarizing { prob: p2 },
            three_qubit: NoiseChannel::Depolarizing { prob: p2 * 1.5 },
            readout_error,
        }
    }

    /// The channel matching a gate's width, or `None` for measurements
    /// (readout error is handled on the classical bits instead).
    pub(crate) fn channel_for(&self, gate: &Gate) -> Option<&NoiseChannel> {
        match gate {
            Gate::Hadamard { .. } | Gate::PauliX { .. } => Some(&self.single_qubit),
            Gate::ControlledNot { .. } => Some(&self.two_qubit),
            Gate::Toffoli { .. } => Some(&self.three_qubit),
            Gate::Measure { .. } => None,
        }
    }
}

impl Default for NoiseModel {
    /// A mildly noisy device: 0.2% error on single-qubit gates, 2% on
    /// CNOTs (3% on Toffolis), 3% readout error.
    fn default() -> Self {
        Self::depolarizing(0.002, 0.02, 0.03)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QubitId;
    use crate::simulation::engine::SimulationEngine;
    use std::collections::HashSet;

    fn one_qubit_engine() -> SimulationEngine {
        let ids: HashSet<QubitId> = [QubitId(0)].into_iter().collect();
        SimulationEngine::init(&ids).expect("engine init")
    }

    fn p1(engine: &SimulationEngine) -> f64 {
        engine.state().probability(1)
    }

    // ── BitFlip ───────────────────────────────────────────────────────

    #[test]
    fn test_bitflip_p0_no_error() {
        let mut engine = one_qubit_engine();
        NoiseChannel::BitFlip { prob: 0.0 }.apply(&mut engine, 0, 0.0).unwrap();
        assert!(p1(&engine).abs() < 1e-10, "P(|1>) should remain 0");
    }

    #[test]
    fn test_bitflip_p1_always_flips() {
        let mut engine = one_qubit_engine();
        NoiseChannel::BitFlip { prob: 1.0 }.apply(&mut engine, 0, 0.0).unwrap();
        assert!((p1(&engine) - 1.0).abs() < 1e-10, "P(|1>) should be 1");
    }

    // ── PhaseFlip ─────────────────────────────────────────────────────

    #[test]
    fn test_phaseflip_preserves_probabilities() {
        // Z only flips phase, not |amplitude|^2.
        let mut engine = one_qubit_engine();
        engine.apply_gate(&Gate::Hadamard { target: QubitId(0) }).unwrap();
        let before = p1(&engine);
        NoiseChannel::PhaseFlip { prob: 1.0 }.apply(&mut engine, 0, 0.0).unwrap();
        assert!((before - p1(&engine)).abs() < 1e-10);
    }

    // ── Depolarizing ──────────────────────────────────────────────────

    #[test]
    fn test_depolarizing_p0_no_error() {
        let mut engine = one_qubit_engine();
        NoiseChannel::Depolarizing { prob: 0.0 }.apply(&mut engine, 0, 0.5).unwrap();
        assert!(p1(&engine).abs() < 1e-10);
    }

    #[test]
    fn test_depolarizing_applies_x_in_first_third() {
        // draw = 0.0 < p/3 = 0.1 → applies X
        let mut engine = one_qubit_engine();
        NoiseChannel::Depolarizing { prob: 0.3 }.apply(&mut engine, 0, 0.0).unwrap();
        assert!((p1(&engine) - 1.0).abs() < 1e-10, "X should flip |0> to |1>");
    }

    #[test]
    fn test_depolarizing_applies_y_in_second_third() {
        // draw = 0.15, p/3 = 0.1 → second third, applies Y (also a bit flip)
        let mut engine = one_qubit_engine();
        NoiseChannel::Depolarizing { prob: 0.3 }.apply(&mut engine, 0, 0.15).unwrap();
        assert!((p1(&engine) - 1.0).abs() < 1e-10, "Y should flip |0> to |1>");
    }

    #[test]
    fn test_depolarizing_no_error_outside_range() {
        // draw = 0.99 >= prob = 0.3 → no error
        let mut engine = one_qubit_engine();
        NoiseChannel::Depolarizing { prob: 0.3 }.apply(&mut engine, 0, 0.99).unwrap();
        assert!(p1(&engine).abs() < 1e-10, "no error expected");
    }

    // ── NoiseModel ────────────────────────────────────────────────────

    #[test]
    fn test_channel_selection_by_gate_width() {
        let model = NoiseModel::default();
        let q = QubitId;
        assert_eq!(
            model.channel_for(&Gate::Hadamard { target: q(0) }),
            Some(&model.single_qubit)
        );
        assert_eq!(
            model.channel_for(&Gate::ControlledNot { control: q(0), target: q(1) }),
            Some(&model.two_qubit)
        );
        assert_eq!(
            model.channel_for(&Gate::Toffoli { control_a: q(0), control_b: q(1), target: q(2) }),
            Some(&model.three_qubit)
        );
        assert_eq!(model.channel_for(&Gate::Measure { targets: vec![q(0)] }), None);
    }

    #[test]
    fn test_depolarizing_model_scales_toffoli_error() {
        let model = NoiseModel::depolarizing(0.002, 0.02, 0.03);
        assert_eq!(model.three_qubit, NoiseChannel::Depolarizing { prob: 0.03 });
        assert_eq!(model.readout_error, 0.03);
    }
}
