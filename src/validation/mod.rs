// src/validation/mod.rs

//! Provides functions to validate a `StateVector` against the properties an
//! honest simulation must maintain.

use crate::core::{BioqError, StateVector};

// Default tolerance (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the state vector is normalized (sum of squared amplitudes ≈ 1.0).
/// Every gate in this crate's set is unitary, so a failure here means an
/// engine bug, not a physics outcome.
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0 (defaults to 1e-9).
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(BioqError::NormalizationFailure)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), BioqError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(BioqError::NormalizationFailure {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that all probability mass sits on a single basis state. This is
/// the deterministic-mode invariant: a prepared basis-state input through
/// the kill circuit must land on exactly one outcome, with certainty.
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `basis_index` - The basis state expected to carry probability 1.
/// * `tolerance` - Allowed deviation (defaults to 1e-9).
///
/// # Returns
/// * `Ok(())` if P(basis_index) ≈ 1.
/// * `Err(BioqError::NormalizationFailure)` otherwise.
pub fn check_unit_probability(
    state: &StateVector,
    basis_index: usize,
    tolerance: Option<f64>,
) -> Result<(), BioqError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    check_normalization(state, Some(effective_tolerance))?;
    let p = state.probability(basis_index);
    if (p - 1.0).abs() > effective_tolerance {
        Err(BioqError::NormalizationFailure {
            message: format!(
                "Expected probability 1 on basis state {}, found {}",
                basis_index, p
            ),
        })
    } else {
        Ok(())
    }
}
