//! Error handling logic

use std::fmt;

/// Unique identifier for a qubit within a circuit.
/// Uniqueness is context-dependent: the simulation engine assigns state
/// vector positions by sorting the ids involved in a circuit, so the id
/// doubles as the qubit's display name and its ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Error types for circuit construction and simulation failures.
///
/// There is exactly one class of meaningful failure in this crate: a
/// malformed circuit (wrong terminal measurement, unknown qubit, zero-width
/// register). These are construction bugs, surfaced fail-fast to the caller
/// with no recovery path.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum BioqError {
    /// An applied gate or run request is inconsistent with the circuit or
    /// the simulator's contract (e.g. a mid-circuit measurement, zero shots).
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// A gate referenced a qubit the engine was not initialized with.
    QubitNotFound {
        /// The unknown qubit
        qubit: QubitId,
    },

    /// The state vector drifted away from unit norm, or probability mass
    /// ended up somewhere a check said it must not be.
    NormalizationFailure {
        /// NormalizationFailure failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

impl fmt::Display for BioqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BioqError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            BioqError::QubitNotFound { qubit } => write!(f, "Qubit Not Found: {}", qubit),
            BioqError::NormalizationFailure { message } => write!(f, "Normalization Failure: {}", message),
            BioqError::SimulationError { message } => write!(f, "Simulation Process Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for BioqError {}
