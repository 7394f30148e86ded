// src/operations/mod.rs

//! Defines the gate set the kill-switch circuit is built from.
//!
//! The set is deliberately closed: a Hadamard for superposition
//! preparation, a Pauli X for basis-state preparation, CNOT and Toffoli for
//! the reversible OR itself, and a terminal measurement. The OR of three
//! triggers needs nothing else.

// Import necessary types from the core module
use crate::core::QubitId;

/// A single gate applied to named qubits.
///
/// Every unitary gate in this set is its own inverse, which is what makes
/// the kill circuit reversible by construction: running the gate list
/// backwards restores the inputs exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Hadamard: maps |0> to an equal superposition of |0> and |1>. Used to
    /// place the trigger inputs into superposition for exploratory runs.
    Hadamard {
        /// The qubit placed into superposition.
        target: QubitId,
    },

    /// Pauli X (bit flip). Used to prepare a trigger input as |1>.
    PauliX {
        /// The qubit to flip.
        target: QubitId,
    },

    /// Controlled NOT: flips `target` when `control` is |1>.
    /// Copy-propagates a trigger into the output bit of a reversible OR.
    ControlledNot {
        /// The qubit whose state gates the flip.
        control: QubitId,
        /// The qubit that is conditionally flipped.
        target: QubitId,
    },

    /// Toffoli (doubly-controlled NOT): flips `target` when both controls
    /// are |1>. Corrects the double-count a pair of CNOTs introduces when
    /// both OR inputs are set.
    Toffoli {
        /// The first control qubit.
        control_a: QubitId,
        /// The second control qubit.
        control_b: QubitId,
        /// The qubit that is conditionally flipped.
        target: QubitId,
    },

    /// Terminal measurement of the listed qubits in the computational
    /// basis. Must be the final gate of a circuit handed to
    /// [`Simulator::run`](crate::simulation::Simulator::run); outcomes are
    /// reported as bit-strings over `targets` in ascending id order.
    Measure {
        /// The qubits whose values are read out.
        targets: Vec<QubitId>,
    },
}

impl Gate {
    /// Returns every qubit this gate touches.
    /// Circuits use this to discover their register; the simulator uses it
    /// to decide which qubits a noise channel is applied to.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Hadamard { target } => vec![*target],
            Gate::PauliX { target } => vec![*target],
            Gate::ControlledNot { control, target } => vec![*control, *target],
            Gate::Toffoli { control_a, control_b, target } => {
                vec![*control_a, *control_b, *target]
            }
            Gate::Measure { targets } => targets.clone(),
        }
    }

    /// Whether this gate is a measurement rather than a unitary.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure { .. })
    }
}
