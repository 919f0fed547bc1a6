//! Indel distance (insertions and deletions only)
//!
//! Indel distance equals `len(a) + len(b) - 2 * LCS(a, b)`: every element
//! outside the longest common subsequence is deleted from one side or inserted
//! from the other. The LCS length is computed with Hyyrö's bit-parallel
//! algorithm, 64 pattern positions per machine word.
//!
//! # Complexity
//! - Time: O(⌈m/64⌉n)
//! - Space: O(σ⌈m/64⌉) for the pattern masks

use super::pattern::{chars_of, strip_affix, PatternBlock, WORD_BITS};
use super::CostModel;
use smallvec::SmallVec;
use std::hash::Hash;

/// LCS length between the sequence `block` was built from and `text`.
///
/// Bit `i` of the state vector is cleared once pattern position `i` is part of
/// the running common subsequence; the answer is the number of cleared bits.
#[must_use]
pub fn lcs_with_block<T: Eq + Hash>(block: &PatternBlock<T>, text: &[T]) -> usize {
    let m = block.len();
    if m == 0 || text.is_empty() {
        return 0;
    }

    if m <= WORD_BITS {
        let mut s: u64 = !0u64;
        for tc in text {
            let matches = block.first_word(tc);
            let u = s & matches;
            s = s.wrapping_add(u) | (s - u);
        }
        let valid = if m == WORD_BITS { !0u64 } else { (1u64 << m) - 1 };
        return (!s & valid).count_ones() as usize;
    }

    let words = block.words();
    let mut s: SmallVec<[u64; 8]> = smallvec::smallvec![!0u64; words];
    for tc in text {
        let Some(row) = block.row(tc) else {
            continue;
        };
        let mut carry = 0u64;
        for w in 0..words {
            let u = s[w] & row[w];
            let (sum, c1) = s[w].overflowing_add(u);
            let (sum, c2) = sum.overflowing_add(carry);
            carry = u64::from(c1 || c2);
            s[w] = sum | (s[w] - u);
        }
    }

    let tail = m % WORD_BITS;
    s.iter()
        .enumerate()
        .map(|(w, &word)| {
            let valid = if w == words - 1 && tail != 0 {
                (1u64 << tail) - 1
            } else {
                !0u64
            };
            (!word & valid).count_ones() as usize
        })
        .sum()
}

/// Length of the longest common subsequence of two sequences.
#[must_use]
pub fn lcs_length_slices<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> usize {
    let (a_mid, b_mid) = strip_affix(a, b);
    // Stripped prefix and suffix are part of every LCS
    let affix = a.len() - a_mid.len();

    let (pattern, text) = if a_mid.len() <= b_mid.len() {
        (a_mid, b_mid)
    } else {
        (b_mid, a_mid)
    };
    let block = PatternBlock::new(pattern);
    affix + lcs_with_block(&block, text)
}

/// Weighted Indel distance.
///
/// Keeping the LCS is optimal for every insertion/deletion weighting: each
/// alignment that keeps `k` matched pairs costs
/// `(len_a - k) * deletion + (len_b - k) * insertion`. Substitution cost is
/// ignored. Totals too large for a `usize` saturate.
#[must_use]
pub fn indel_weighted_slices<T: Eq + Hash + Clone>(
    a: &[T],
    b: &[T],
    costs: &CostModel,
    max_distance: Option<usize>,
) -> Option<usize> {
    if let Some(max_d) = max_distance {
        // Length difference alone is a lower bound
        let floor = if a.len() >= b.len() {
            (a.len() - b.len()).saturating_mul(costs.deletion)
        } else {
            (b.len() - a.len()).saturating_mul(costs.insertion)
        };
        if floor > max_d {
            return None;
        }
    }

    let lcs = lcs_length_slices(a, b);
    let dist = (a.len() - lcs)
        .saturating_mul(costs.deletion)
        .saturating_add((b.len() - lcs).saturating_mul(costs.insertion));
    match max_distance {
        Some(max_d) if dist > max_d => None,
        _ => Some(dist),
    }
}

/// Uniform Indel distance with optional early termination.
#[must_use]
pub fn indel_slices_bounded<T: Eq + Hash + Clone>(
    a: &[T],
    b: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    indel_weighted_slices(a, b, &CostModel::default(), max_distance)
}

/// Indel distance between the block's sequence and `text`, reusing the masks.
#[must_use]
pub fn indel_with_block<T: Eq + Hash>(
    block: &PatternBlock<T>,
    text: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    let m = block.len();
    let n = text.len();
    if let Some(max_d) = max_distance {
        if m.abs_diff(n) > max_d {
            return None;
        }
    }
    let dist = m + n - 2 * lcs_with_block(block, text);
    match max_distance {
        Some(max_d) if dist > max_d => None,
        _ => Some(dist),
    }
}

/// Indel distance between two strings.
///
/// # Example
/// ```
/// use rapidfuzz::string_metric::indel::indel_distance;
///
/// // kitten -> sitting: delete k, e; insert s, i, g
/// assert_eq!(indel_distance("kitten", "sitting"), 5);
/// ```
#[must_use]
pub fn indel_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a_chars = chars_of(a);
    let b_chars = chars_of(b);
    indel_slices_bounded(&a_chars, &b_chars, None).unwrap_or(a_chars.len() + b_chars.len())
}

/// Largest Indel distance two sequences of the given lengths can have, or
/// `None` when it does not fit in a `usize`.
#[must_use]
pub fn max_distance(len_a: usize, len_b: usize, costs: &CostModel) -> Option<usize> {
    len_a
        .checked_mul(costs.deletion)?
        .checked_add(len_b.checked_mul(costs.insertion)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain DP LCS used to cross-check the bit-parallel kernel.
    fn lcs_dp<T: PartialEq>(a: &[T], b: &[T]) -> usize {
        let mut prev = vec![0usize; b.len() + 1];
        let mut curr = vec![0usize; b.len() + 1];
        for x in a {
            for (j, y) in b.iter().enumerate() {
                curr[j + 1] = if x == y {
                    prev[j] + 1
                } else {
                    prev[j + 1].max(curr[j])
                };
            }
            std::mem::swap(&mut prev, &mut curr);
        }
        prev[b.len()]
    }

    #[test]
    fn test_indel_basic() {
        assert_eq!(indel_distance("", ""), 0);
        assert_eq!(indel_distance("abc", ""), 3);
        assert_eq!(indel_distance("kitten", "sitting"), 5);
        assert_eq!(indel_distance("ab", "ba"), 2);
    }

    #[test]
    fn test_lcs_bit_parallel_matches_dp() {
        let cases = [
            ("ABCDGH", "AEDFHR"),
            ("AGGTAB", "GXTXAYB"),
            ("", "abc"),
            ("aaaa", "aa"),
        ];
        for (a, b) in cases {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            assert_eq!(lcs_length_slices(&a, &b), lcs_dp(&a, &b));
        }
    }

    #[test]
    fn test_lcs_multiword() {
        let a: Vec<char> = "abcdefghij".repeat(20).chars().collect();
        let b: Vec<char> = "acegikmoqs".repeat(21).chars().collect();
        let block = PatternBlock::new(&a);
        assert_eq!(lcs_with_block(&block, &b), lcs_dp(&a, &b));

        let exact: Vec<char> = "z".repeat(64).chars().collect();
        let block = PatternBlock::new(&exact);
        assert_eq!(lcs_with_block(&block, &exact), 64);
    }

    #[test]
    fn test_weighted_indel() {
        let a: Vec<char> = "abc".chars().collect();
        let b: Vec<char> = "abxyz".chars().collect();
        // delete c (3), insert x, y, z (3 * 2)
        let costs = CostModel::new(2, 3, 1);
        assert_eq!(indel_weighted_slices(&a, &b, &costs, None), Some(9));
        assert_eq!(indel_weighted_slices(&a, &b, &costs, Some(8)), None);
        assert_eq!(max_distance(3, 5, &costs), Some(19));
    }

    #[test]
    fn test_weighted_indel_large_costs() {
        let a: Vec<char> = "ab".chars().collect();
        let b: Vec<char> = "abcd".chars().collect();
        let huge_insert = CostModel::new(usize::MAX / 2, 1, 1);
        assert_eq!(max_distance(2, 4, &huge_insert), None);
        assert_eq!(indel_weighted_slices(&a, &b, &huge_insert, None), Some(usize::MAX - 1));
        assert_eq!(indel_weighted_slices(&b, &a, &huge_insert, None), Some(2));
        assert_eq!(
            indel_weighted_slices(&a, &b, &huge_insert, Some(usize::MAX - 2)),
            None
        );

        let saturated = CostModel::new(usize::MAX, usize::MAX, usize::MAX);
        assert_eq!(indel_weighted_slices(&a, &b, &saturated, None), Some(usize::MAX));
        assert_eq!(indel_weighted_slices(&a, &a, &saturated, Some(0)), Some(0));
    }

    #[test]
    fn test_indel_with_block_bound() {
        let a: Vec<char> = "kitten".chars().collect();
        let b: Vec<char> = "sitting".chars().collect();
        let block = PatternBlock::new(&a);
        assert_eq!(indel_with_block(&block, &b, None), Some(5));
        assert_eq!(indel_with_block(&block, &b, Some(5)), Some(5));
        assert_eq!(indel_with_block(&block, &b, Some(4)), None);
    }
}
