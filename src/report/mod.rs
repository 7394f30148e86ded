// src/report/mod.rs

//! Tabular reporting over simulation runs: the classical-vs-simulated truth
//! table, and the disagreement analysis noisy runs are compared with.

use crate::core::{BioqError, KillRegister};
use crate::logic::{TriggerInput, truth_table_circuit};
use crate::simulation::{RunCounts, Simulator};
use std::fmt;

/// One row of the truth table: a trigger assignment, the classical kill
/// rule's verdict, and the simulated probability of the kill signal firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthTableRow {
    /// The evaluated trigger assignment.
    pub input: TriggerInput,
    /// `M OR T OR G`, computed classically.
    pub classical_kill: bool,
    /// Empirical P(K = 1) from the sampled circuit run.
    pub quantum_prob_kill: f64,
}

/// The full 8-row truth table comparing classical and simulated evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct TruthTable {
    rows: Vec<TruthTableRow>,
    shots: u64,
}

impl TruthTable {
    /// Evaluates all 8 trigger combinations on the given simulator,
    /// `shots` samples each.
    ///
    /// For an ideal simulator every row's `quantum_prob_kill` is exactly
    /// 0.0 or 1.0 and matches the classical column; a noisy simulator
    /// produces probabilities in between.
    pub fn evaluate(
        simulator: &Simulator,
        reg: &KillRegister,
        shots: u64,
    ) -> Result<Self, BioqError> {
        let mut rows = Vec::with_capacity(8);
        for input in TriggerInput::all() {
            let circuit = truth_table_circuit(reg, input);
            let counts = simulator.run(&circuit, shots)?;
            rows.push(TruthTableRow {
                input,
                classical_kill: input.kill(),
                quantum_prob_kill: counts.probability("1"),
            });
        }
        Ok(Self { rows, shots })
    }

    /// The table rows, in enumeration order.
    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }

    /// Shots sampled per row.
    pub fn shots(&self) -> u64 {
        self.shots
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            " Mutation  Timer  Geosensing  Classical_Kill  Quantum_Prob_Kill"
        )?;
        for row in &self.rows {
            let [m, t, g] = row.input.bits();
            writeln!(
                f,
                " {:>8}  {:>5}  {:>10}  {:>14}  {:>17.4}",
                m, t, g, row.classical_kill as u8, row.quantum_prob_kill
            )?;
        }
        Ok(())
    }
}

/// The fraction of shots whose kill bit disagrees with the OR of the
/// sampled trigger bits.
///
/// Expects the outcome strings of a full-register run
/// ([`superposition_circuit`](crate::logic::superposition_circuit)): the
/// first three characters are the trigger bits M, T, G and the last is the
/// kill bit. Ideal runs yield exactly 0.0; under per-gate error injection
/// the fraction is non-decreasing in the error probability (in
/// expectation).
pub fn kill_disagreement_fraction(counts: &RunCounts) -> f64 {
    if counts.shots() == 0 {
        return 0.0;
    }
    let mut disagreements = 0u64;
    for (bitstring, count) in counts.all_counts() {
        let bits = bitstring.as_bytes();
        debug_assert!(bits.len() >= 4, "expected full-register outcome strings");
        if bits.len() < 4 {
            continue;
        }
        let or_of_inputs = bits[..3].iter().any(|b| *b == b'1');
        let kill = bits[bits.len() - 1] == b'1';
        if kill != or_of_inputs {
            disagreements += *count;
        }
    }
    disagreements as f64 / counts.shots() as f64
}
