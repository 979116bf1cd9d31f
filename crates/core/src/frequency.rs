//! Byte frequency model.
//!
//! A [`FrequencyTable`] is a dense 256-slot count table. On the encode path it
//! is built once from the whole input; on the decode path it is filled from the
//! container header and never recomputed.

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count for every byte value.
///
/// # Invariants
/// - Iteration visits symbols in ascending order and skips zero counts, so
///   anything derived from it is independent of how the table was filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Create a table with every count at zero.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count every byte of `data` in a single pass.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Count recorded for `symbol`.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Overwrite the count for `symbol`.
    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts (the length of the data they describe).
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// True when no symbol has a non-zero count.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate `(symbol, count)` pairs with `count > 0`, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
