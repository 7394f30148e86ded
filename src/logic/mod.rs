// src/logic/mod.rs

//! The biosafety OR evaluator: classical kill rule, reversible OR gate
//! sequence, and the circuit constructors for the three evaluation modes.
//!
//! The kill rule is `K = M OR T OR G`. A bare boolean OR is irreversible
//! (it erases which input fired), so the circuit computes it into a fresh
//! zero output bit instead: copy-propagate each input with a CNOT, then
//! apply a Toffoli to subtract the double-count when both inputs are set.
//! Two such stages chained through an ancilla combine the three triggers.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{KillRegister, QubitId};
use crate::operations::Gate;

/// One immutable assignment of the three trigger signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerInput {
    /// M: a mutation was detected.
    pub mutation: bool,
    /// T: the lifetime timer expired.
    pub timer: bool,
    /// G: geosensing reports the organism out of range.
    pub geosense: bool,
}

impl TriggerInput {
    /// Creates a trigger assignment.
    pub fn new(mutation: bool, timer: bool, geosense: bool) -> Self {
        Self { mutation, timer, geosense }
    }

    /// The classical kill rule: `K = M OR T OR G`.
    pub fn kill(&self) -> bool {
        self.mutation || self.timer || self.geosense
    }

    /// All 8 trigger combinations in truth-table order (geosense varies
    /// fastest), matching the row order of the printed truth table.
    pub fn all() -> [TriggerInput; 8] {
        let mut rows = [TriggerInput::new(false, false, false); 8];
        for (k, row) in rows.iter_mut().enumerate() {
            row.mutation = (k >> 2) & 1 == 1;
            row.timer = (k >> 1) & 1 == 1;
            row.geosense = k & 1 == 1;
        }
        rows
    }

    /// The bits (M, T, G) as 0/1 values, in bit-string order.
    pub fn bits(&self) -> [u8; 3] {
        [self.mutation as u8, self.timer as u8, self.geosense as u8]
    }
}

/// The reversible two-input OR into a fresh output bit.
///
/// With `out` initialized to |0>:
/// - `CNOT(a → out)` and `CNOT(b → out)` leave `out = a XOR b`,
/// - `Toffoli(a, b → out)` flips `out` once more when both inputs are set,
///   turning the XOR into `a OR b` (the `a = b = 1` case is the only one
///   where XOR and OR disagree).
///
/// Both inputs pass through untouched, so the operation loses no
/// information and the whole sequence can be undone gate by gate.
pub fn reversible_or(a: QubitId, b: QubitId, out: QubitId) -> [Gate; 3] {
    [
        Gate::ControlledNot { control: a, target: out },
        Gate::ControlledNot { control: b, target: out },
        Gate::Toffoli { control_a: a, control_b: b, target: out },
    ]
}

/// The three-input kill logic: two chained reversible ORs.
///
/// Stage 1 combines M and T into the ancilla; stage 2 combines the ancilla
/// with G into the kill qubit. Both scratch bits start at |0>, so after the
/// six gates `ancilla = M OR T` and `kill = M OR T OR G`.
pub fn kill_circuit(reg: &KillRegister) -> Vec<Gate> {
    let mut gates = Vec::with_capacity(6);
    gates.extend(reversible_or(reg.mutation, reg.timer, reg.ancilla));
    gates.extend(reversible_or(reg.ancilla, reg.geosense, reg.kill));
    gates
}

/// Preparation gates setting the trigger qubits to a definite assignment:
/// an X gate for each trigger that is true.
pub fn prepare_input(reg: &KillRegister, input: TriggerInput) -> Vec<Gate> {
    let mut gates = Vec::new();
    if input.mutation {
        gates.push(Gate::PauliX { target: reg.mutation });
    }
    if input.timer {
        gates.push(Gate::PauliX { target: reg.timer });
    }
    if input.geosense {
        gates.push(Gate::PauliX { target: reg.geosense });
    }
    gates
}

/// Preparation gates placing every trigger qubit into an independent
/// 50/50 superposition: a Hadamard on each input.
pub fn prepare_superposition(reg: &KillRegister) -> Vec<Gate> {
    reg.inputs()
        .into_iter()
        .map(|q| Gate::Hadamard { target: q })
        .collect()
}

/// Deterministic-mode circuit for one trigger assignment: input
/// preparation, kill logic, and a measurement of the kill qubit only.
pub fn truth_table_circuit(reg: &KillRegister, input: TriggerInput) -> Circuit {
    CircuitBuilder::new()
        .add_gates(prepare_input(reg, input))
        .add_gates(kill_circuit(reg))
        .add_gate(Gate::Measure { targets: vec![reg.kill] })
        .build()
}

/// Exploratory-mode circuit: all three triggers in superposition, kill
/// logic, and a measurement of the full register. Outcome bit-strings read
/// `M T G ancilla K` left to right.
pub fn superposition_circuit(reg: &KillRegister) -> Circuit {
    CircuitBuilder::new()
        .add_gates(prepare_superposition(reg))
        .add_gates(kill_circuit(reg))
        .add_gate(Gate::Measure { targets: reg.all().to_vec() })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_rule() {
        assert!(!TriggerInput::new(false, false, false).kill());
        assert!(TriggerInput::new(true, false, false).kill());
        assert!(TriggerInput::new(false, true, false).kill());
        assert!(TriggerInput::new(false, false, true).kill());
        assert!(TriggerInput::new(true, true, true).kill());
    }

    #[test]
    fn test_enumeration_order() {
        let rows = TriggerInput::all();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], TriggerInput::new(false, false, false));
        assert_eq!(rows[1], TriggerInput::new(false, false, true)); // geosense fastest
        assert_eq!(rows[4], TriggerInput::new(true, false, false));
        assert_eq!(rows[7], TriggerInput::new(true, true, true));
    }

    #[test]
    fn test_kill_circuit_shape() {
        let reg = KillRegister::new();
        let gates = kill_circuit(&reg);
        assert_eq!(gates.len(), 6, "two reversible-OR stages of three gates each");
        // Stage boundaries: the correcting Toffoli closes each stage.
        assert!(matches!(gates[2], Gate::Toffoli { .. }));
        assert!(matches!(gates[5], Gate::Toffoli { .. }));
    }

    #[test]
    fn test_superposition_circuit_measures_full_register() {
        let reg = KillRegister::new();
        let circuit = superposition_circuit(&reg);
        assert_eq!(circuit.qubits().len(), 5);
        match circuit.gates().last() {
            Some(Gate::Measure { targets }) => assert_eq!(targets.len(), 5),
            other => panic!("expected terminal measurement, got {:?}", other),
        }
    }
}
