// src/simulation/results.rs
use std::collections::HashMap;
use std::fmt;

/// Holds the outcome counts of a sampled circuit run.
///
/// Keys are bit-strings over the measured qubits in ascending id order
/// (for the full kill register: `M T G ancilla K`, left to right).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCounts {
    /// Maps outcome bit-strings to the number of shots that produced them.
    counts: HashMap<String, u64>,
    /// Total number of shots recorded.
    shots: u64,
}

impl RunCounts {
    /// Creates a new, empty count set. (Internal visibility)
    pub(crate) fn new() -> Self {
        Self {
            counts: HashMap::new(),
            shots: 0,
        }
    }

    /// Records one observed outcome. (Internal visibility)
    pub(crate) fn record(&mut self, bitstring: String) {
        *self.counts.entry(bitstring).or_insert(0) += 1;
        self.shots += 1;
    }

    /// The number of shots that produced the given outcome bit-string.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// The total number of shots recorded.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// The empirical probability of the given outcome bit-string.
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / self.shots as f64
        }
    }

    /// Returns a reference to the map containing all recorded counts.
    pub fn all_counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    /// The recorded outcomes sorted by bit-string, for stable iteration.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by_key(|(bitstring, _)| *bitstring);
        entries
    }
}

impl fmt::Display for RunCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement counts ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            return writeln!(f, "  (no shots recorded)");
        }
        const BAR_WIDTH: f64 = 40.0;
        let max_count = self.counts.values().copied().max().unwrap_or(1).max(1);
        for (bitstring, count) in self.sorted() {
            let bar_len = ((*count as f64 / max_count as f64) * BAR_WIDTH).round() as usize;
            writeln!(f, "  {} : {:>6}  {}", bitstring, count, "█".repeat(bar_len))?;
        }
        Ok(())
    }
}
