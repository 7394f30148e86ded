// src/circuits/mod.rs

//! Defines structures for representing and building ordered gate sequences
//! (`bioq::operations::Gate`).
//!
//! This module provides the `Circuit` structure: a precise, ordered list of
//! gate applications together with the set of qubits they involve. Order is
//! the whole point: the reversible OR works because its CNOTs land before
//! the correcting Toffoli.

// Import necessary types from other modules
use crate::core::{BioqError, QubitId};
use crate::operations::Gate;
use std::collections::{HashMap, HashSet}; // HashSet tracks unique qubits involved
use std::fmt;

/// An ordered sequence of gates applied to a set of qubits.
#[derive(Clone, PartialEq)] // PartialEq useful for testing circuits
pub struct Circuit {
    /// The unique set of qubits involved across all gates in this circuit.
    qubits: HashSet<QubitId>,

    /// The ordered gate sequence defining the circuit's logic.
    gates: Vec<Gate>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            gates: Vec::new(),
        }
    }

    /// Adds a single gate to the end of the circuit's sequence.
    ///
    /// This method automatically identifies the qubits involved in the gate
    /// and adds them to the circuit's set of known qubits.
    ///
    /// # Arguments
    /// * `gate` - The `Gate` to append to the sequence.
    pub fn add_gate(&mut self, gate: Gate) {
        // Register the qubits involved in this gate
        for qubit_id in gate.involved_qubits() {
            self.qubits.insert(qubit_id);
        }
        // Add the gate to the ordered list
        self.gates.push(gate);
    }

    /// Adds multiple gates from an iterator to the end of the circuit's sequence.
    ///
    /// # Arguments
    /// * `gates` - An iterator yielding `Gate` items to append.
    pub fn add_gates<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self.add_gate(gate);
        }
    }

    /// Returns a reference to the set of unique qubit ids involved in this circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// Returns a slice containing the ordered gate sequence of this circuit.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Returns the total number of gates in the circuit.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the circuit contains no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Returns the circuit that undoes this one: the gate sequence reversed,
    /// each gate replaced by its inverse. Every unitary gate in this crate's
    /// set is self-inverse, so inversion reduces to reversing the order.
    ///
    /// # Errors
    /// Returns `BioqError::InvalidOperation` if the circuit contains a
    /// measurement, which has no inverse.
    pub fn inverse(&self) -> Result<Circuit, BioqError> {
        let mut inverted = Circuit::new();
        for gate in self.gates.iter().rev() {
            match gate {
                Gate::Measure { .. } => {
                    return Err(BioqError::InvalidOperation {
                        message: "Cannot invert a circuit containing a measurement".to_string(),
                    });
                }
                // H, X, CNOT and Toffoli are involutions.
                unitary => inverted.add_gate(unitary.clone()),
            }
        }
        Ok(inverted)
    }
}

// Implement Default for convenient creation of empty circuits.
impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self {
            circuit: Circuit::new(),
        }
    }

    /// Adds a single gate to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_gate(mut self, gate: Gate) -> Self {
        self.circuit.add_gate(gate);
        self
    }

    /// Adds multiple gates from an iterator to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.circuit.add_gates(gates);
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

// Implement Default for convenient creation of builders.
impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gates.is_empty() {
            return writeln!(f, "bioq::Circuit[0 gates on 0 qubits]");
        }

        // --- Setup ---
        let gates = &self.gates;
        let num_gates = gates.len();

        // Get sorted list of unique qubits and create row map
        let mut sorted_qubits: Vec<QubitId> = self.qubits.iter().cloned().collect();
        sorted_qubits.sort(); // Sort numerically for consistent row order
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> =
            sorted_qubits.iter().enumerate().map(|(i, qid)| (*qid, i)).collect();

        // Determine label width
        let max_label_width = sorted_qubits.iter().map(|qid| format!("{}", qid).len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        // Grid dimensions and padding
        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────"; // GATE_WIDTH dashes
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // Initialize grids
        // gate_grid[row][time] stores the gate/wire segment string
        let mut gate_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_gates]; num_qubits];
        // v_connect[row][time] stores the vertical connector char below this row at this time
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_gates]; num_qubits];

        // Helper to format a gate symbol centered on its wire
        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        // Helper to mark the vertical span of a multi-qubit gate
        fn connect_rows(v_connect: &mut [Vec<char>], t: usize, r_min: usize, r_max: usize) {
            for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                row_vec[t] = V_WIRE;
            }
        }

        // --- Populate Grids ---
        for (t, gate) in gates.iter().enumerate() {
            match gate {
                Gate::Hadamard { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        gate_grid[*r][t] = format_gate("H");
                    }
                }
                Gate::PauliX { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        gate_grid[*r][t] = format_gate("X");
                    }
                }
                Gate::ControlledNot { control, target } => {
                    if let (Some(r_ctrl), Some(r_tgt)) =
                        (qubit_to_row.get(control), qubit_to_row.get(target))
                    {
                        gate_grid[*r_ctrl][t] = format_gate("@");
                        gate_grid[*r_tgt][t] = format_gate("X");
                        connect_rows(&mut v_connect, t, (*r_ctrl).min(*r_tgt), (*r_ctrl).max(*r_tgt));
                    }
                }
                Gate::Toffoli { control_a, control_b, target } => {
                    if let (Some(r_a), Some(r_b), Some(r_tgt)) = (
                        qubit_to_row.get(control_a),
                        qubit_to_row.get(control_b),
                        qubit_to_row.get(target),
                    ) {
                        gate_grid[*r_a][t] = format_gate("@");
                        gate_grid[*r_b][t] = format_gate("@");
                        gate_grid[*r_tgt][t] = format_gate("X");
                        let r_min = (*r_a).min(*r_b).min(*r_tgt);
                        let r_max = (*r_a).max(*r_b).max(*r_tgt);
                        connect_rows(&mut v_connect, t, r_min, r_max);
                    }
                }
                Gate::Measure { targets } => {
                    for target_qid in targets {
                        if let Some(r) = qubit_to_row.get(target_qid) {
                            gate_grid[*r][t] = format_gate("M");
                        }
                    }
                }
            }
        }

        // --- Format Output String ---
        writeln!(f, "bioq::Circuit[{} gates on {} qubits]", num_gates, num_qubits)?;
        for r in 0..num_qubits {
            // Print qubit label row
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", gate_grid[r].join(""))?;

            // Print vertical connector row (if not the last qubit)
            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?; // Padding for alignment
                for t in 0..num_gates {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?; // Newline after connector row
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
