// src/core/state.rs

use num_complex::Complex;
use std::fmt;

/// The amplitude vector of an n-qubit register.
///
/// The vector has dimension 2^n; entry `k` is the complex amplitude of the
/// computational basis state whose bits spell `k` (first qubit in sort order
/// is the most significant bit, so `q0 q1 q2 ...` reads left to right).
///
/// `Complex<f64>` is the natural representation: Hadamard preparation puts
/// the register into genuine superposition, and the bit-flip corrections of
/// the reversible OR must interfere correctly through it.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    /// The amplitudes, indexed by basis state.
    state_vector: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates a new state vector from a given amplitude list.
    /// The engine is responsible for only ever constructing normalized
    /// states; validation happens via `crate::validation` where a caller
    /// wants it checked.
    pub(crate) fn new(initial_vector: Vec<Complex<f64>>) -> Self {
        Self { state_vector: initial_vector }
    }

    /// Provides read-only access to the internal amplitude vector.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.state_vector
    }

    /// Provides mutable access for the simulation engine to modify the state.
    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.state_vector
    }

    /// Gets the dimension (2^n) of the register this state describes.
    pub fn dim(&self) -> usize {
        self.state_vector.len()
    }

    /// The probability assigned to basis state `k` (|c_k|^2).
    pub fn probability(&self, k: usize) -> f64 {
        self.state_vector.get(k).map(|c| c.norm_sqr()).unwrap_or(0.0)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.state_vector.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
