//! Precomputed bit-parallel pattern masks.
//!
//! A [`PatternBlock`] stores, for every distinct symbol of one fixed sequence,
//! a bitmask with bit `i` set when the sequence holds that symbol at position
//! `i`. Masks are split into 64-bit words so sequences of any length are
//! supported. Building the block is O(m); the bit-parallel Levenshtein and LCS
//! kernels then process each symbol of the other sequence in O(⌈m/64⌉).
//!
//! The block is owned by the caller. Scoring one query against many choices
//! should build it once for the query and pass it back on every call.

use ahash::AHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

/// Number of pattern positions packed into one machine word.
pub const WORD_BITS: usize = 64;

/// Per-symbol match masks for one fixed sequence.
#[derive(Debug, Clone)]
pub struct PatternBlock<T: Eq + Hash> {
    len: usize,
    words: usize,
    /// Symbol -> offset of its mask row in `bits`
    rows: AHashMap<T, usize>,
    bits: Vec<u64>,
}

impl<T: Eq + Hash + Clone> PatternBlock<T> {
    /// Build the masks for `pattern`.
    #[must_use]
    pub fn new(pattern: &[T]) -> Self {
        let len = pattern.len();
        let words = len.div_ceil(WORD_BITS).max(1);
        let mut rows: AHashMap<T, usize> = AHashMap::with_capacity(len.min(64));
        let mut bits: Vec<u64> = Vec::new();

        for (i, symbol) in pattern.iter().enumerate() {
            let next_row = bits.len();
            let offset = *rows.entry(symbol.clone()).or_insert(next_row);
            if offset == next_row {
                bits.resize(next_row + words, 0);
            }
            bits[offset + i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
        }

        Self {
            len,
            words,
            rows,
            bits,
        }
    }
}

impl<T: Eq + Hash> PatternBlock<T> {
    /// Length of the sequence the block was built from.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of 64-bit words per mask.
    #[inline]
    #[must_use]
    pub fn words(&self) -> usize {
        self.words
    }

    /// Mask row for `symbol`, or `None` when the symbol does not occur.
    #[inline]
    pub(crate) fn row(&self, symbol: &T) -> Option<&[u64]> {
        self.rows
            .get(symbol)
            .map(|&offset| &self.bits[offset..offset + self.words])
    }

    /// Mask of `symbol` in the first word. Only meaningful for blocks of at
    /// most [`WORD_BITS`] positions.
    #[inline]
    pub(crate) fn first_word(&self, symbol: &T) -> u64 {
        self.rows
            .get(symbol)
            .map_or(0, |&offset| self.bits[offset])
    }
}

/// Collect a string into a stack-allocated char buffer.
#[inline]
pub(crate) fn chars_of(s: &str) -> SmallVec<[char; 64]> {
    s.chars().collect()
}

/// Length of the common prefix of two slices.
#[inline]
pub(crate) fn common_prefix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Length of the common suffix of two slices.
#[inline]
pub(crate) fn common_suffix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Remove the common prefix and suffix; neither changes an edit distance.
#[inline]
pub(crate) fn strip_affix<'a, T: PartialEq>(a: &'a [T], b: &'a [T]) -> (&'a [T], &'a [T]) {
    let prefix = common_prefix(a, b);
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = common_suffix(a, b);
    (&a[..a.len() - suffix], &b[..b.len() - suffix])
}
