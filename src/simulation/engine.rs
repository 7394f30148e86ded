// src/simulation/engine.rs
use crate::core::{BioqError, QubitId, StateVector};
use crate::operations::Gate;
// NOTE: Does not directly use Circuit, operates on gates passed from Simulator
use num_complex::Complex;
use num_traits::Zero; // For Complex::zero()
use rand::RngExt;
use rand::rngs::StdRng;
use std::collections::{HashMap, HashSet};

/// The core state-vector engine: owns the amplitude vector of every qubit a
/// circuit involves and evolves it gate by gate.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Maps qubit ids to their index (0..N-1) in the ordered list used for
    /// the global state vector. Index 0 is the most significant bit of a
    /// basis-state index, so bit-strings read in ascending id order.
    qubit_indices: HashMap<QubitId, usize>,
    /// The global state vector of all simulated qubits (dimension 2^N).
    state: StateVector,
    /// Number of qubits being simulated (N).
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine for a given set of qubits in the |0...0> state.
    pub(crate) fn init(qubit_ids: &HashSet<QubitId>) -> Result<Self, BioqError> {
        if qubit_ids.is_empty() {
            return Err(BioqError::InvalidOperation {
                message: "Cannot initialize simulation engine with zero qubits".to_string(),
            });
        }

        let num_qubits = qubit_ids.len();
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| BioqError::SimulationError {
            message: "Number of qubits too large, resulting state vector dimension overflows usize".to_string(),
        })?;

        // Sort ids to ensure deterministic index assignment regardless of
        // HashSet iteration order.
        let mut sorted_ids: Vec<QubitId> = qubit_ids.iter().cloned().collect();
        sorted_ids.sort();
        let mut qubit_indices = HashMap::with_capacity(num_qubits);
        for (index, qubit_id) in sorted_ids.into_iter().enumerate() {
            qubit_indices.insert(qubit_id, index);
        }

        let mut initial_vec = vec![Complex::zero(); dim];
        initial_vec[0] = Complex::new(1.0, 0.0);
        let state = StateVector::new(initial_vec);

        Ok(Self {
            qubit_indices,
            state,
            num_qubits,
        })
    }

    /// Resets the state to |0...0> without rebuilding the index map.
    /// Noisy runs re-evolve the circuit once per shot through this.
    pub(crate) fn reset(&mut self) {
        let dim = self.state.dim();
        let vec = self.state.vector_mut();
        vec.fill(Complex::zero());
        if dim > 0 {
            vec[0] = Complex::new(1.0, 0.0);
        }
    }

    // Crate-visible read access for unit tests.
    #[cfg(test)]
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Consumes the engine, yielding the final state vector.
    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    // Crate-visible method to set the state directly for testing.
    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), BioqError> {
        if state.dim() != self.state.dim() {
            Err(BioqError::SimulationError {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    /// Looks up a qubit's engine index, failing on qubits the engine was not
    /// initialized with.
    pub(crate) fn qubit_index(&self, qubit_id: &QubitId) -> Result<usize, BioqError> {
        self.qubit_indices
            .get(qubit_id)
            .copied()
            .ok_or(BioqError::QubitNotFound { qubit: *qubit_id })
    }

    /// Applies a single unitary gate to the global state.
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<(), BioqError> {
        match gate {
            Gate::Hadamard { target } => {
                let target_idx = self.qubit_index(target)?;
                self.apply_single_qubit(target_idx, &hadamard())
            }
            Gate::PauliX { target } => {
                let target_idx = self.qubit_index(target)?;
                self.apply_single_qubit(target_idx, &pauli_x())
            }
            Gate::ControlledNot { control, target } => {
                let control_idx = self.qubit_index(control)?;
                let target_idx = self.qubit_index(target)?;
                if control_idx == target_idx {
                    return Err(BioqError::InvalidOperation {
                        message: "Control and target qubits cannot be the same for a controlled gate".to_string(),
                    });
                }
                self.apply_controlled_flip(&[control_idx], target_idx)
            }
            Gate::Toffoli { control_a, control_b, target } => {
                let a_idx = self.qubit_index(control_a)?;
                let b_idx = self.qubit_index(control_b)?;
                let target_idx = self.qubit_index(target)?;
                if a_idx == b_idx || a_idx == target_idx || b_idx == target_idx {
                    return Err(BioqError::InvalidOperation {
                        message: "Toffoli controls and target must be three distinct qubits".to_string(),
                    });
                }
                self.apply_controlled_flip(&[a_idx, b_idx], target_idx)
            }
            Gate::Measure { .. } => Err(BioqError::InvalidOperation {
                message: "Measure gates are handled by the simulator, not applied as unitaries".to_string(),
            }),
        }
    }

    /// Applies a 2x2 matrix to one qubit within the global state vector.
    ///
    /// Iterates over the 2^(N-1) index pairs that differ only in the target
    /// qubit's bit position and applies the matrix to each amplitude pair.
    pub(crate) fn apply_single_qubit(
        &mut self,
        target_idx: usize,
        matrix: &[[Complex<f64>; 2]; 2],
    ) -> Result<(), BioqError> {
        let k = self.num_qubits - 1 - target_idx; // Bit position (from right, 0-based)
        let k_mask = 1usize << k;
        let dim = self.state.dim();
        let mut new_vec = vec![Complex::zero(); dim];

        for i in 0..dim / 2 {
            // Split i into the bits below and at-or-above the target
            // position, then re-insert a zero at position k.
            let lower = i & (k_mask - 1);
            let upper = (i & !(k_mask - 1)) << 1;
            let i0 = upper | lower;
            let i1 = i0 | k_mask;

            if i1 >= dim {
                return Err(BioqError::SimulationError {
                    message: format!(
                        "Calculated index out of bounds during gate application. i0={}, i1={}, dim={}",
                        i0, i1, dim
                    ),
                });
            }

            let psi_0 = self.state.vector()[i0]; // Amplitude for |...target=0...>
            let psi_1 = self.state.vector()[i1]; // Amplitude for |...target=1...>

            new_vec[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            new_vec[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }

        self.state = StateVector::new(new_vec);
        Ok(())
    }

    /// Applies a multiply-controlled X as a basis-state permutation: for
    /// every basis index with all control bits set and the target bit clear,
    /// swap the amplitude with its target-flipped partner. Covers CNOT
    /// (one control) and Toffoli (two) without building dense matrices.
    fn apply_controlled_flip(&mut self, control_idxs: &[usize], target_idx: usize) -> Result<(), BioqError> {
        let n = self.num_qubits;
        let target_mask = 1usize << (n - 1 - target_idx);
        let mut controls_mask = 0usize;
        for idx in control_idxs {
            controls_mask |= 1usize << (n - 1 - *idx);
        }

        let dim = self.state.dim();
        let vec = self.state.vector_mut();
        for k in 0..dim {
            // Visit each swap pair exactly once via the target-bit-clear guard.
            if k & controls_mask == controls_mask && k & target_mask == 0 {
                vec.swap(k, k | target_mask);
            }
        }
        Ok(())
    }

    /// Samples one basis-state index from the current distribution.
    ///
    /// Cumulative scan over |c_k|^2; if floating-point rounding leaves the
    /// sample beyond the accumulated total, fall back to the last basis
    /// state with non-negligible amplitude.
    pub(crate) fn sample_basis_state(&self, rng: &mut StdRng) -> usize {
        let p_sample: f64 = rng.random();
        let mut cumulative = 0.0;
        let mut last_significant = 0usize;

        for (k, amp) in self.state.vector().iter().enumerate() {
            let p = amp.norm_sqr();
            if p > 1e-12 {
                last_significant = k;
            }
            cumulative += p;
            if p_sample < cumulative {
                return k;
            }
        }
        last_significant
    }

    /// Extracts one qubit's bit value from a basis-state index.
    pub(crate) fn bit_value(&self, basis_index: usize, qubit_idx: usize) -> u8 {
        let bit_pos = self.num_qubits - 1 - qubit_idx;
        ((basis_index >> bit_pos) & 1) as u8
    }
}

// --- Gate matrices ---
// 2x2 matrices in the computational basis, shared with the noise channels.

/// Hadamard matrix: (1/sqrt(2)) [[1, 1], [1, -1]].
pub(crate) fn hadamard() -> [[Complex<f64>; 2]; 2] {
    let h = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

/// Pauli X (bit flip).
pub(crate) fn pauli_x() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}

/// Pauli Y (combined bit and phase flip).
pub(crate) fn pauli_y() -> [[Complex<f64>; 2]; 2] {
    let i = Complex::i();
    [[Complex::zero(), -i], [i, Complex::zero()]]
}

/// Pauli Z (phase flip).
pub(crate) fn pauli_z() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::new(1.0, 0.0), Complex::zero()],
        [Complex::zero(), Complex::new(-1.0, 0.0)],
    ]
}
