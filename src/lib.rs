// src/lib.rs

//! `bioq` - reversible biosafety kill-switch logic on a qubit state-vector
//! simulator
//!
//! This library models a three-trigger biosafety kill switch (Mutation,
//! Timer-expired, Geosensing-out-of-range) whose kill output is the logical
//! OR of the triggers, computed by a reversible CNOT/Toffoli gate sequence
//! and evaluated on a small state-vector simulator, ideally or under an
//! injected per-gate error model.

pub mod circuits;
pub mod core;
pub mod logic;
pub mod noise;
pub mod operations;
pub mod report;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{BioqError, KillRegister, QubitId, StateVector};
pub use circuits::{Circuit, CircuitBuilder};
pub use logic::TriggerInput;
pub use noise::{NoiseChannel, NoiseModel};
pub use operations::Gate;
pub use report::{TruthTable, kill_disagreement_fraction};
pub use simulation::{RunCounts, Simulator};
pub use validation::{check_normalization, check_unit_probability};

// Example 1: Deterministic evaluation of a single trigger assignment
// Prepares "timer expired, other triggers quiet" as a basis state, runs the
// reversible kill circuit, and observes the kill signal fire with certainty.
/// ```
/// use bioq::{KillRegister, Simulator, TriggerInput};
/// use bioq::logic::truth_table_circuit;
///
/// let reg = KillRegister::new();
/// let input = TriggerInput::new(false, true, false); // M=0, T=1, G=0
/// let circuit = truth_table_circuit(&reg, input);
///
/// let simulator = Simulator::new().with_seed(7);
/// match simulator.run(&circuit, 1024) {
///     Ok(counts) => {
///         println!("\n--- Example 1: Deterministic kill evaluation ---");
///         println!("Circuit:\n{}", circuit); // Display draws the gate grid
///         println!("{}", counts);
///
///         // One trigger fired, so K = M OR T OR G = 1 on every shot:
///         // the ideal circuit leaves zero probability mass on K = 0.
///         assert_eq!(counts.get("1"), 1024);
///         assert_eq!(counts.get("0"), 0);
///     }
///     Err(e) => {
///         eprintln!("Example 1 failed: {}", e);
///         assert!(false, "Example 1 failed"); // Force test failure
///     }
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Exploratory evaluation in superposition
// Places all three triggers into an equal superposition, samples the full
// register, and confirms that every observed outcome obeys the kill rule.
/// ```
/// use bioq::{KillRegister, Simulator, kill_disagreement_fraction};
/// use bioq::logic::superposition_circuit;
///
/// let reg = KillRegister::new();
/// let circuit = superposition_circuit(&reg);
///
/// let simulator = Simulator::new().with_seed(42);
/// match simulator.run(&circuit, 4096) {
///     Ok(counts) => {
///         println!("\n--- Example 2: Superposition run ---");
///         println!("{}", counts);
///
///         // All 8 trigger combinations appear (each with frequency ~1/8),
///         // and the kill bit of every sampled outcome matches the OR of
///         // that outcome's trigger bits.
///         assert_eq!(counts.all_counts().len(), 8);
///         assert_eq!(kill_disagreement_fraction(&counts), 0.0);
///     }
///     Err(e) => {
///         eprintln!("Example 2 failed: {}", e);
///         assert!(false, "Example 2 failed"); // Force test failure
///     }
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
