//! Levenshtein (edit) distance implementation
//!
//! Optimized with:
//! - Myers/Hyyrö bit-parallel algorithm, O(⌈m/64⌉n) time for any length
//! - Common prefix/suffix stripping before the main loop
//! - Early termination with max distance threshold
//! - Weighted Wagner-Fischer for arbitrary insertion/deletion/substitution costs
//! - Unicode-aware character handling

use super::indel;
use super::pattern::{chars_of, strip_affix, PatternBlock, WORD_BITS};
use super::CostModel;
use crate::error::{FuzzError, Result};
use smallvec::SmallVec;
use std::hash::Hash;

/// Maximum string length for O(m*n) space algorithms (edit operation recovery).
const MAX_QUADRATIC_STRING_LENGTH: usize = 10_000;

// ============================================================================
// Myers Bit-Parallel Algorithm
// ============================================================================

/// Myers bit-parallel Levenshtein distance for patterns up to 64 elements.
///
/// `max_distance` enables early termination: once the score minus the columns
/// still to process exceeds it, the distance cannot come back under the bound.
///
/// Based on: Myers, G. (1999). "A fast bit-vector algorithm for approximate string matching"
#[inline]
fn myers_64<T: Eq + Hash>(
    block: &PatternBlock<T>,
    text: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    let m = block.len();
    let n = text.len();

    // Vp = all 1s (vertical positive: all increases by 1)
    // Vn = all 0s (vertical negative: no decreases)
    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;

    // Mask for the m-th bit (0-indexed, so bit m-1)
    let mask = 1u64 << (m - 1);

    for (j, tc) in text.iter().enumerate() {
        let eq = block.first_word(tc);

        let xv = eq | vn;
        let eq_and_vp = eq & vp;
        let xh = ((eq_and_vp.wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if (hp & mask) != 0 {
            score += 1;
        } else if (hn & mask) != 0 {
            score -= 1;
        }

        if let Some(max_d) = max_distance {
            let remaining = n - j - 1;
            if score > max_d.saturating_add(remaining) {
                return None;
            }
        }

        // First row is 0,1,2,3... so the shifted-in horizontal delta is always +1
        let hp_shifted = (hp << 1) | 1;
        let hn_shifted = hn << 1;

        vp = hn_shifted | !(xv | hp_shifted);
        vn = hp_shifted & xv;
    }

    match max_distance {
        Some(max_d) if score > max_d => None,
        _ => Some(score),
    }
}

/// Block-based Myers/Hyyrö algorithm for patterns longer than 64 elements.
///
/// The pattern is split into 64-bit words; the addition carry and the
/// horizontal deltas propagate from the low word to the high word. Bits above
/// position m-1 in the last word hold garbage but never flow downwards.
fn myers_block<T: Eq + Hash>(
    block: &PatternBlock<T>,
    text: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    let m = block.len();
    let n = text.len();
    let words = block.words();

    let mut vp: SmallVec<[u64; 8]> = smallvec::smallvec![!0u64; words];
    let mut vn: SmallVec<[u64; 8]> = smallvec::smallvec![0u64; words];
    let mut score = m;

    let last = words - 1;
    let mask = 1u64 << ((m - 1) % WORD_BITS);

    for (j, tc) in text.iter().enumerate() {
        let row = block.row(tc);
        let mut add_carry = 0u64;
        let mut hp_carry = 1u64;
        let mut hn_carry = 0u64;

        for w in 0..words {
            let eq = row.map_or(0, |r| r[w]);
            let pv = vp[w];
            let mv = vn[w];

            let xv = eq | mv;
            let (sum, c1) = (eq & pv).overflowing_add(pv);
            let (sum, c2) = sum.overflowing_add(add_carry);
            add_carry = u64::from(c1 || c2);
            let xh = (sum ^ pv) | eq;

            let hp = mv | !(xh | pv);
            let hn = pv & xh;

            if w == last {
                if (hp & mask) != 0 {
                    score += 1;
                } else if (hn & mask) != 0 {
                    score -= 1;
                }
            }

            let hp_shifted = (hp << 1) | hp_carry;
            let hn_shifted = (hn << 1) | hn_carry;
            hp_carry = hp >> 63;
            hn_carry = hn >> 63;

            vp[w] = hn_shifted | !(xv | hp_shifted);
            vn[w] = hp_shifted & xv;
        }

        if let Some(max_d) = max_distance {
            let remaining = n - j - 1;
            if score > max_d.saturating_add(remaining) {
                return None;
            }
        }
    }

    match max_distance {
        Some(max_d) if score > max_d => None,
        _ => Some(score),
    }
}

/// Uniform-cost distance between the sequence a block was built from and `text`.
///
/// This is the reuse path: build the [`PatternBlock`] of a fixed query once,
/// then call this for every choice. The result is identical to
/// [`levenshtein_slices_bounded`] on the same pair.
#[must_use]
pub fn distance_with_block<T: Eq + Hash>(
    block: &PatternBlock<T>,
    text: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    let m = block.len();
    let n = text.len();

    if m == 0 || n == 0 {
        let dist = m.max(n);
        return match max_distance {
            Some(max_d) if dist > max_d => None,
            _ => Some(dist),
        };
    }
    if let Some(max_d) = max_distance {
        if m.abs_diff(n) > max_d {
            return None;
        }
    }

    if m <= WORD_BITS {
        myers_64(block, text, max_distance)
    } else {
        myers_block(block, text, max_distance)
    }
}

// ============================================================================
// Wagner-Fischer (weighted dynamic programming)
// ============================================================================

/// Textbook weighted Levenshtein recurrence with two rolling rows.
///
/// Cell (i, j) is the minimum cost of turning `a[..i]` into `b[..j]`. The row
/// dimension is always the shorter sequence; swapping the inputs swaps the
/// insertion and deletion costs. Returns `None` as soon as a full row exceeds
/// `max_distance`: costs are non-negative, so no later cell can be cheaper.
/// Cell arithmetic saturates, so oversized costs never wrap.
///
/// This is the reference every accelerated path is checked against.
#[must_use]
pub fn wagner_fischer<T: PartialEq>(
    a: &[T],
    b: &[T],
    costs: &CostModel,
    max_distance: Option<usize>,
) -> Option<usize> {
    let (source, target, ins, del) = if b.len() <= a.len() {
        (a, b, costs.insertion, costs.deletion)
    } else {
        (b, a, costs.deletion, costs.insertion)
    };
    let sub = costs.substitution;

    let mut prev: SmallVec<[usize; 64]> =
        (0..=target.len()).map(|j| j.saturating_mul(ins)).collect();
    let mut curr: SmallVec<[usize; 64]> = smallvec::smallvec![0; target.len() + 1];

    for (i, sc) in source.iter().enumerate() {
        curr[0] = (i + 1).saturating_mul(del);
        let mut row_min = curr[0];

        for (j, tc) in target.iter().enumerate() {
            let cost = if sc == tc { 0 } else { sub };
            let cell = prev[j + 1]
                .saturating_add(del) // deletion
                .min(curr[j].saturating_add(ins)) // insertion
                .min(prev[j].saturating_add(cost)); // substitution
            curr[j + 1] = cell;
            row_min = row_min.min(cell);
        }

        if let Some(max_d) = max_distance {
            if row_min > max_d {
                return None;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let result = prev[target.len()];
    match max_distance {
        Some(max_d) if result > max_d => None,
        _ => Some(result),
    }
}

// ============================================================================
// Slice API
// ============================================================================

/// Uniform-cost Levenshtein distance between two sequences.
#[must_use]
pub fn levenshtein_slices<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> usize {
    // Without a bound the distance is always produced
    levenshtein_slices_bounded(a, b, None).unwrap_or(a.len().max(b.len()))
}

/// Uniform-cost Levenshtein distance with optional early termination.
///
/// Returns `None` if the distance exceeds `max_distance`.
#[must_use]
pub fn levenshtein_slices_bounded<T: Eq + Hash + Clone>(
    a: &[T],
    b: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    let (a, b) = strip_affix(a, b);
    // Shorter side becomes the pattern
    let (pattern, text) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let block = PatternBlock::new(pattern);
    distance_with_block(&block, text, max_distance)
}

/// Weighted Levenshtein distance.
///
/// Dispatches to the fastest kernel that is exact for the cost model:
/// - all costs equal to `c`: uniform distance scaled by `c`
/// - `insertion == deletion` and `substitution >= insertion + deletion`:
///   substitutions never pay off, so Indel distance scaled by the cost
/// - anything else: [`wagner_fischer`]
#[must_use]
pub fn levenshtein_weighted_slices<T: Eq + Hash + Clone>(
    a: &[T],
    b: &[T],
    costs: &CostModel,
    max_distance: Option<usize>,
) -> Option<usize> {
    let CostModel {
        insertion: ins,
        deletion: del,
        substitution: sub,
    } = *costs;

    if ins == del && ins > 0 {
        if sub == ins {
            let bound = max_distance.map(|d| d / ins);
            return levenshtein_slices_bounded(a, b, bound).map(|d| d.saturating_mul(ins));
        }
        if ins.checked_add(del).is_some_and(|indel_cost| sub >= indel_cost) {
            let bound = max_distance.map(|d| d / ins);
            return indel::indel_slices_bounded(a, b, bound).map(|d| d.saturating_mul(ins));
        }
    }

    let (a, b) = strip_affix(a, b);
    wagner_fischer(a, b, costs, max_distance)
}

// ============================================================================
// String API
// ============================================================================

/// Compute Levenshtein distance with optional max threshold.
///
/// Returns `None` if distance exceeds `max_distance` (early termination).
/// Returns `Some(distance)` if distance is within threshold or no threshold set.
///
/// # Example
/// ```
/// use rapidfuzz::string_metric::levenshtein::levenshtein_distance_bounded;
///
/// assert_eq!(levenshtein_distance_bounded("kitten", "sitting", None), Some(3));
/// assert_eq!(levenshtein_distance_bounded("abc", "abd", Some(2)), Some(1));
/// assert_eq!(levenshtein_distance_bounded("abcdef", "ghijkl", Some(3)), None);
/// ```
#[inline]
#[must_use]
pub fn levenshtein_distance_bounded(a: &str, b: &str, max_distance: Option<usize>) -> Option<usize> {
    if a == b {
        return Some(0);
    }
    levenshtein_slices_bounded(&chars_of(a), &chars_of(b), max_distance)
}

/// Convenience function for simple distance calculation
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    levenshtein_slices(&chars_of(a), &chars_of(b))
}

/// Weighted Levenshtein distance on strings.
#[must_use]
pub fn levenshtein_weighted(
    a: &str,
    b: &str,
    costs: &CostModel,
    max_distance: Option<usize>,
) -> Option<usize> {
    if a == b {
        return Some(0);
    }
    levenshtein_weighted_slices(&chars_of(a), &chars_of(b), costs, max_distance)
}

/// Largest weighted distance two sequences of the given lengths can have.
///
/// Either delete everything and insert everything, or substitute the
/// overlapping part and insert/delete the rest, whichever is cheaper.
/// `None` when neither total fits in a `usize`.
#[must_use]
pub fn max_distance(len_a: usize, len_b: usize, costs: &CostModel) -> Option<usize> {
    let delete_insert = len_a
        .checked_mul(costs.deletion)
        .and_then(|d| d.checked_add(len_b.checked_mul(costs.insertion)?));
    let substitute = if len_a >= len_b {
        len_b
            .checked_mul(costs.substitution)
            .and_then(|s| s.checked_add((len_a - len_b).checked_mul(costs.deletion)?))
    } else {
        len_a
            .checked_mul(costs.substitution)
            .and_then(|s| s.checked_add((len_b - len_a).checked_mul(costs.insertion)?))
    };
    match (delete_insert, substitute) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, y) => x.or(y),
    }
}

// ============================================================================
// Edit Operations
// ============================================================================

/// Kind of a single edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
}

/// One step of a minimal edit script turning the source into the destination.
///
/// Positions are char indices: `src_pos` in the source and `dest_pos` in the
/// destination, as seen before the operation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditOp {
    pub kind: EditKind,
    pub src_pos: usize,
    pub dest_pos: usize,
}

/// Recover a minimal uniform-cost edit script from `a` to `b`.
///
/// The number of returned operations equals [`levenshtein`]`(a, b)`. Requires
/// an O(m*n) table after the common prefix and suffix are removed.
///
/// # Errors
///
/// Returns [`FuzzError::InvalidInput`] if the differing middle part of either
/// string exceeds 10,000 characters.
pub fn editops(a: &str, b: &str) -> Result<Vec<EditOp>> {
    let a_chars = chars_of(a);
    let b_chars = chars_of(b);
    let prefix = super::pattern::common_prefix(&a_chars, &b_chars);
    let (s1, s2) = strip_affix(&a_chars, &b_chars);
    let m = s1.len();
    let n = s2.len();

    if m > MAX_QUADRATIC_STRING_LENGTH || n > MAX_QUADRATIC_STRING_LENGTH {
        return Err(FuzzError::InvalidInput(format!(
            "editops requires an O(m*n) table: len_a={}, len_b={}, max={}",
            m, n, MAX_QUADRATIC_STRING_LENGTH
        )));
    }

    let width = n + 1;
    let mut dp: Vec<usize> = vec![0; (m + 1) * width];
    for j in 0..=n {
        dp[j] = j;
    }
    for i in 1..=m {
        dp[i * width] = i;
        for j in 1..=n {
            let cost = usize::from(s1[i - 1] != s2[j - 1]);
            dp[i * width + j] = (dp[(i - 1) * width + j] + 1)
                .min(dp[i * width + j - 1] + 1)
                .min(dp[(i - 1) * width + j - 1] + cost);
        }
    }

    let mut ops = Vec::with_capacity(dp[m * width + n]);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        let here = dp[i * width + j];
        if i > 0 && j > 0 {
            let diag = dp[(i - 1) * width + j - 1];
            if s1[i - 1] == s2[j - 1] && here == diag {
                i -= 1;
                j -= 1;
                continue;
            }
            if here == diag + 1 {
                i -= 1;
                j -= 1;
                ops.push(EditOp {
                    kind: EditKind::Replace,
                    src_pos: prefix + i,
                    dest_pos: prefix + j,
                });
                continue;
            }
        }
        if i > 0 && here == dp[(i - 1) * width + j] + 1 {
            i -= 1;
            ops.push(EditOp {
                kind: EditKind::Delete,
                src_pos: prefix + i,
                dest_pos: prefix + j,
            });
        } else {
            j -= 1;
            ops.push(EditOp {
                kind: EditKind::Insert,
                src_pos: prefix + i,
                dest_pos: prefix + j,
            });
        }
    }

    ops.reverse();
    Ok(ops)
}
