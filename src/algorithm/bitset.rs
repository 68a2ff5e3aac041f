use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset recording which patterns remain possible at a cell
///
/// Indices are 0-based pattern slots of the catalog. Bits are only ever
/// cleared during a run, so a wave cell narrows monotonically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternBitset {
    bits: BitVec,
}

impl PatternBitset {
    /// Create a bitset with no patterns present
    pub fn new(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![0; pattern_count],
        }
    }

    /// Create a bitset in full superposition
    pub fn all(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![1; pattern_count],
        }
    }

    /// Number of pattern slots, set or not
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a pattern index, ignoring indices past the capacity
    pub fn insert(&mut self, pattern: usize) {
        if pattern < self.bits.len() {
            self.bits.set(pattern, true);
        }
    }

    /// Remove a pattern index, returning whether it was present
    pub fn remove(&mut self, pattern: usize) -> bool {
        let present = self.contains(pattern);
        if present {
            self.bits.set(pattern, false);
        }
        present
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: usize) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Reset to every pattern possible
    pub fn fill(&mut self) {
        self.bits.fill(true);
    }

    /// Reduce to exactly one pattern
    pub fn collapse_to(&mut self, pattern: usize) {
        self.bits.fill(false);
        self.insert(pattern);
    }

    /// Test whether any index of `candidates` is present
    pub fn contains_any(&self, candidates: &[usize]) -> bool {
        candidates.iter().any(|&pattern| self.contains(pattern))
    }

    /// Test if this set only holds patterns also held by `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|pattern| other.contains(pattern))
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate present pattern indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all present pattern indices
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// The only pattern present, if exactly one is
    pub fn single(&self) -> Option<usize> {
        let mut ones = self.iter();
        match (ones.next(), ones.next()) {
            (Some(pattern), None) => Some(pattern),
            _ => None,
        }
    }
}

impl fmt::Display for PatternBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PatternBitset({} of {} patterns: {:?})",
            self.count(),
            self.capacity(),
            self.to_vec()
        )
    }
}
