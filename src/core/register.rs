// src/core/register.rs

use super::error::QubitId;
use std::fmt;

/// The fixed five-qubit wiring of the kill-switch circuit.
///
/// Qubit mapping:
/// - `mutation`  = q0 (M, mutation detected)
/// - `timer`     = q1 (T, lifetime timer expired)
/// - `geosense`  = q2 (G, geosensing out of permitted range)
/// - `ancilla`   = q3 (intermediate `M OR T`)
/// - `kill`      = q4 (K, the kill output)
///
/// The numeric assignment is cosmetic; nothing downstream depends on it
/// beyond this constructor. What is load-bearing is the *order*: the
/// simulator sorts qubit ids, so measured bit-strings read `M T G A K`
/// left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillRegister {
    /// M, the mutation trigger input.
    pub mutation: QubitId,
    /// T, the timer trigger input.
    pub timer: QubitId,
    /// G, the geosensing trigger input.
    pub geosense: QubitId,
    /// Scratch qubit holding the intermediate two-input OR.
    pub ancilla: QubitId,
    /// K, the kill output.
    pub kill: QubitId,
}

impl KillRegister {
    /// Creates the standard register layout (q0..q4).
    pub fn new() -> Self {
        Self {
            mutation: QubitId(0),
            timer: QubitId(1),
            geosense: QubitId(2),
            ancilla: QubitId(3),
            kill: QubitId(4),
        }
    }

    /// The three trigger inputs, in bit-string order.
    pub fn inputs(&self) -> [QubitId; 3] {
        [self.mutation, self.timer, self.geosense]
    }

    /// Every qubit of the register, in bit-string order.
    pub fn all(&self) -> [QubitId; 5] {
        [self.mutation, self.timer, self.geosense, self.ancilla, self.kill]
    }
}

impl Default for KillRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for KillRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KillRegister[M={}, T={}, G={}, ancilla={}, K={}]",
            self.mutation, self.timer, self.geosense, self.ancilla, self.kill
        )
    }
}
