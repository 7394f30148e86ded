//! Demo: the full biosafety kill-switch report.
//! Prints the classical-vs-simulated truth table, the ideal superposition
//! histogram, and the same run under a mildly noisy device model.

use bioq::logic::superposition_circuit;
use bioq::{KillRegister, NoiseModel, Simulator, TruthTable, kill_disagreement_fraction};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let reg = KillRegister::new();
    println!("--- Biosafety kill-switch report ---");
    println!("Register: {}", reg);

    let circuit = superposition_circuit(&reg);
    println!("\nKill circuit (superposition preparation included):");
    println!("{}", circuit);

    // 1. Classical vs simulated truth table on the ideal simulator.
    println!("1. Classical vs quantum truth table (ideal simulator):");
    let ideal = Simulator::new();
    let table = TruthTable::evaluate(&ideal, &reg, 1024)?;
    println!("{}", table);
    for row in table.rows() {
        let expected = if row.classical_kill { 1.0 } else { 0.0 };
        assert_eq!(
            row.quantum_prob_kill, expected,
            "ideal simulation disagrees with the classical kill rule"
        );
    }
    println!("Every row matches the classical rule K = M OR T OR G.\n");

    // 2. All triggers in superposition, ideal sampling.
    println!("2. Superposition counts (ideal):");
    let ideal_counts = ideal.run(&circuit, 4096)?;
    println!("{}", ideal_counts);
    println!(
        "Kill-bit disagreement fraction: {:.4}\n",
        kill_disagreement_fraction(&ideal_counts)
    );

    // 3. The same run under the default noisy device model.
    println!("3. Superposition counts (noisy):");
    let noisy = Simulator::new().with_noise(NoiseModel::default());
    let noisy_counts = noisy.run(&circuit, 4096)?;
    println!("{}", noisy_counts);
    println!(
        "Kill-bit disagreement fraction: {:.4}",
        kill_disagreement_fraction(&noisy_counts)
    );

    println!("\nAll simulations completed successfully.");
    Ok(())
}
