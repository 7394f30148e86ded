// tests/killswitch_tests.rs

// Exhaustive correctness, reversibility and superposition symmetry of the
// reversible kill circuit, plus the simulator's measurement contract.

use bioq::{
    BioqError, CircuitBuilder, Gate, KillRegister, Simulator, TriggerInput, TruthTable,
    check_unit_probability, kill_disagreement_fraction,
};
use bioq::circuits::Circuit;
use bioq::logic::{kill_circuit, prepare_input, superposition_circuit, truth_table_circuit};

/// The basis-state index the ideal circuit must land on for a given input:
/// bits read `M T G ancilla K`, with ancilla = M OR T and K = M OR T OR G.
fn expected_basis_index(input: TriggerInput) -> usize {
    let [m, t, g] = input.bits();
    let a = m | t;
    let k = a | g;
    ((m as usize) << 4)
        | ((t as usize) << 3)
        | ((g as usize) << 2)
        | ((a as usize) << 1)
        | (k as usize)
}

fn expected_bitstring(input: TriggerInput) -> String {
    format!("{:05b}", expected_basis_index(input))
}

/// Input preparation plus kill logic, without the terminal measurement
/// (the unitary part of the deterministic-mode circuit).
fn evaluation_circuit(reg: &KillRegister, input: TriggerInput) -> Circuit {
    CircuitBuilder::new()
        .add_gates(prepare_input(reg, input))
        .add_gates(kill_circuit(reg))
        .build()
}

#[test]
fn test_exhaustive_truth_table_counts() -> Result<(), BioqError> {
    // All 8 trigger combinations: every shot reports K = M OR T OR G.
    let reg = KillRegister::new();
    let simulator = Simulator::new().with_seed(11);

    for input in TriggerInput::all() {
        let circuit = truth_table_circuit(&reg, input);
        let counts = simulator.run(&circuit, 256)?;
        let expected = if input.kill() { "1" } else { "0" };
        assert_eq!(
            counts.get(expected),
            256,
            "input {:?} must yield K={} with certainty",
            input,
            expected
        );
    }
    Ok(())
}

#[test]
fn test_exhaustive_statevector_unit_probability() -> Result<(), BioqError> {
    // Stronger than sampling: the final state vector carries all its
    // probability mass on the single correct basis state.
    let reg = KillRegister::new();
    let simulator = Simulator::new();

    for input in TriggerInput::all() {
        let state = simulator.statevector(&evaluation_circuit(&reg, input))?;
        check_unit_probability(&state, expected_basis_index(input), None)?;
    }
    Ok(())
}

#[test]
fn test_no_trigger_means_no_kill() -> Result<(), BioqError> {
    let reg = KillRegister::new();
    let circuit = truth_table_circuit(&reg, TriggerInput::new(false, false, false));
    let counts = Simulator::new().with_seed(3).run(&circuit, 512)?;
    assert_eq!(counts.get("0"), 512, "quiet triggers must never fire the kill signal");
    Ok(())
}

#[test]
fn test_any_single_trigger_fires_kill() -> Result<(), BioqError> {
    let reg = KillRegister::new();
    let simulator = Simulator::new().with_seed(3);
    let single_triggers = [
        TriggerInput::new(true, false, false),
        TriggerInput::new(false, true, false),
        TriggerInput::new(false, false, true),
    ];

    for input in single_triggers {
        let counts = simulator.run(&truth_table_circuit(&reg, input), 512)?;
        assert_eq!(counts.get("1"), 512, "input {:?} must fire the kill signal", input);
    }
    Ok(())
}

#[test]
fn test_kill_logic_is_reversible() -> Result<(), BioqError> {
    // Running the kill logic forward and then inverted restores the
    // prepared input state exactly, for every input combination.
    let reg = KillRegister::new();
    let simulator = Simulator::new();

    let logic = CircuitBuilder::new().add_gates(kill_circuit(&reg)).build();
    let undo = logic.inverse()?;

    for input in TriggerInput::all() {
        let mut round_trip = CircuitBuilder::new()
            .add_gates(prepare_input(&reg, input))
            .add_gates(kill_circuit(&reg))
            .build();
        round_trip.add_gates(undo.gates().iter().cloned());

        let state = simulator.statevector(&round_trip)?;
        // Prepared state only: ancilla and kill bits back to 0.
        let [m, t, g] = input.bits();
        let prepared_index =
            ((m as usize) << 4) | ((t as usize) << 3) | ((g as usize) << 2);
        check_unit_probability(&state, prepared_index, None)?;
    }
    Ok(())
}

#[test]
fn test_full_circuit_inverse_returns_to_ground_state() -> Result<(), BioqError> {
    // Preparation included, the inverse of the whole circuit walks the
    // register all the way back to |00000>.
    let reg = KillRegister::new();
    let forward = evaluation_circuit(&reg, TriggerInput::new(true, false, true));
    let mut round_trip = forward.clone();
    round_trip.add_gates(forward.inverse()?.gates().iter().cloned());

    let state = Simulator::new().statevector(&round_trip)?;
    check_unit_probability(&state, 0, None)?;
    Ok(())
}

#[test]
fn test_inverse_rejects_measurement() {
    let reg = KillRegister::new();
    let circuit = truth_table_circuit(&reg, TriggerInput::new(false, false, false));
    let result = circuit.inverse();
    assert!(matches!(result, Err(BioqError::InvalidOperation { .. })));
}

#[test]
fn test_superposition_symmetry() -> Result<(), BioqError> {
    // Equal superposition over the triggers: each of the 8 combinations
    // appears with frequency ~1/8, and every observed outcome obeys the
    // kill rule.
    let reg = KillRegister::new();
    let circuit = superposition_circuit(&reg);
    let shots = 4096;
    let counts = Simulator::new().with_seed(1234).run(&circuit, shots)?;

    assert_eq!(counts.all_counts().len(), 8, "exactly the 8 consistent outcomes appear");
    for input in TriggerInput::all() {
        let frequency = counts.probability(&expected_bitstring(input));
        assert!(
            (frequency - 0.125).abs() < 0.03,
            "input {:?} observed with frequency {} (expected ~1/8)",
            input,
            frequency
        );
    }
    assert_eq!(kill_disagreement_fraction(&counts), 0.0);
    Ok(())
}

#[test]
fn test_truth_table_report_matches_classical_rule() -> Result<(), BioqError> {
    let reg = KillRegister::new();
    let simulator = Simulator::new().with_seed(21);
    let table = TruthTable::evaluate(&simulator, &reg, 512)?;

    assert_eq!(table.rows().len(), 8);
    assert_eq!(table.shots(), 512);
    for row in table.rows() {
        let expected = if row.classical_kill { 1.0 } else { 0.0 };
        assert_eq!(
            row.quantum_prob_kill, expected,
            "ideal simulation must match the classical rule for {:?}",
            row.input
        );
    }
    // Enumeration order: geosense varies fastest.
    assert_eq!(table.rows()[0].input, TriggerInput::new(false, false, false));
    assert_eq!(table.rows()[1].input, TriggerInput::new(false, false, true));
    Ok(())
}

#[test]
fn test_run_requires_terminal_measurement() {
    let reg = KillRegister::new();
    let simulator = Simulator::new();

    // No measurement at all.
    let unmeasured = CircuitBuilder::new().add_gates(kill_circuit(&reg)).build();
    assert!(matches!(
        simulator.run(&unmeasured, 16),
        Err(BioqError::InvalidOperation { .. })
    ));

    // Measurement followed by further gates.
    let mut mid_measure = CircuitBuilder::new()
        .add_gate(Gate::Measure { targets: vec![reg.kill] })
        .build();
    mid_measure.add_gates(kill_circuit(&reg));
    mid_measure.add_gate(Gate::Measure { targets: vec![reg.kill] });
    assert!(matches!(
        simulator.run(&mid_measure, 16),
        Err(BioqError::InvalidOperation { .. })
    ));
}

#[test]
fn test_run_rejects_zero_shots() {
    let reg = KillRegister::new();
    let circuit = truth_table_circuit(&reg, TriggerInput::new(false, false, false));
    let result = Simulator::new().run(&circuit, 0);
    assert!(matches!(result, Err(BioqError::InvalidOperation { .. })));
}

#[test]
fn test_statevector_rejects_measurement() {
    let reg = KillRegister::new();
    let circuit = truth_table_circuit(&reg, TriggerInput::new(false, false, false));
    let result = Simulator::new().statevector(&circuit);
    assert!(matches!(result, Err(BioqError::InvalidOperation { .. })));
}
