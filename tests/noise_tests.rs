// tests/noise_tests.rs

// Behavior of the kill circuit under injected gate and readout errors.

use bioq::{
    BioqError, KillRegister, NoiseChannel, NoiseModel, Simulator, TriggerInput, TruthTable,
    kill_disagreement_fraction,
};
use bioq::logic::{superposition_circuit, truth_table_circuit};

#[test]
fn test_zero_noise_matches_ideal() -> Result<(), BioqError> {
    // A noise model with all probabilities at zero is the ideal simulator.
    let reg = KillRegister::new();
    let circuit = superposition_circuit(&reg);
    let simulator = Simulator::new()
        .with_seed(5)
        .with_noise(NoiseModel::depolarizing(0.0, 0.0, 0.0));

    let counts = simulator.run(&circuit, 1024)?;
    assert_eq!(kill_disagreement_fraction(&counts), 0.0);
    Ok(())
}

#[test]
fn test_disagreement_grows_with_gate_error() -> Result<(), BioqError> {
    // As the per-gate depolarizing probability increases from 0, the
    // fraction of shots whose kill bit disagrees with the OR of the sampled
    // triggers is non-decreasing.
    let reg = KillRegister::new();
    let circuit = superposition_circuit(&reg);
    let shots = 4096;

    let mut disagreements = Vec::new();
    for p in [0.0, 0.02, 0.3] {
        let simulator = Simulator::new()
            .with_seed(99)
            .with_noise(NoiseModel::depolarizing(p, p, 0.0));
        let counts = simulator.run(&circuit, shots)?;
        disagreements.push(kill_disagreement_fraction(&counts));
    }

    assert_eq!(disagreements[0], 0.0, "no gate error, no disagreement");
    for pair in disagreements.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "disagreement must not shrink as error probability grows: {:?}",
            disagreements
        );
    }
    assert!(
        disagreements[2] > disagreements[0],
        "heavy gate error must produce visible disagreement: {:?}",
        disagreements
    );
    Ok(())
}

#[test]
fn test_certain_readout_error_inverts_the_kill_bit() -> Result<(), BioqError> {
    // Gate channels silenced, readout error forced to 1: every reported
    // kill bit is the logical complement of the ideal one.
    let reg = KillRegister::new();
    let circuit = truth_table_circuit(&reg, TriggerInput::new(false, false, false));
    let noise = NoiseModel {
        single_qubit: NoiseChannel::Depolarizing { prob: 0.0 },
        two_qubit: NoiseChannel::Depolarizing { prob: 0.0 },
        three_qubit: NoiseChannel::Depolarizing { prob: 0.0 },
        readout_error: 1.0,
    };

    let counts = Simulator::new().with_seed(8).with_noise(noise).run(&circuit, 128)?;
    assert_eq!(counts.get("1"), 128, "ideal K=0 must be reported as 1 on every shot");
    Ok(())
}

#[test]
fn test_noisy_truth_table_stays_close_to_classical() -> Result<(), BioqError> {
    // Under the default mild noise model the truth table is perturbed but
    // still clearly separates the kill and no-kill rows.
    let reg = KillRegister::new();
    let simulator = Simulator::new().with_seed(17).with_noise(NoiseModel::default());
    let table = TruthTable::evaluate(&simulator, &reg, 512)?;

    for row in table.rows() {
        assert!((0.0..=1.0).contains(&row.quantum_prob_kill));
        if row.classical_kill {
            assert!(
                row.quantum_prob_kill > 0.5,
                "row {:?}: P(kill) = {} despite a fired trigger",
                row.input,
                row.quantum_prob_kill
            );
        } else {
            assert!(
                row.quantum_prob_kill < 0.5,
                "row {:?}: P(kill) = {} with quiet triggers",
                row.input,
                row.quantum_prob_kill
            );
        }
    }
    Ok(())
}

#[test]
fn test_bitflip_channel_model() -> Result<(), BioqError> {
    // A pure bit-flip model with certainty on single-qubit gates: the
    // all-zero input flows through untouched (its circuit applies no
    // single-qubit gates), so the kill bit still reads 0.
    let reg = KillRegister::new();
    let circuit = truth_table_circuit(&reg, TriggerInput::new(false, false, false));
    let noise = NoiseModel {
        single_qubit: NoiseChannel::BitFlip { prob: 1.0 },
        two_qubit: NoiseChannel::BitFlip { prob: 0.0 },
        three_qubit: NoiseChannel::BitFlip { prob: 0.0 },
        readout_error: 0.0,
    };

    let counts = Simulator::new().with_seed(2).with_noise(noise).run(&circuit, 64)?;
    assert_eq!(counts.get("0"), 64);
    Ok(())
}

#[test]
fn test_default_model_constants() {
    let model = NoiseModel::default();
    assert_eq!(model.single_qubit, NoiseChannel::Depolarizing { prob: 0.002 });
    assert_eq!(model.two_qubit, NoiseChannel::Depolarizing { prob: 0.02 });
    assert_eq!(model.three_qubit, NoiseChannel::Depolarizing { prob: 0.03 });
    assert_eq!(model.readout_error, 0.03);
}
