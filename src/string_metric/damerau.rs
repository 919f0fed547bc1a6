//! Damerau-Levenshtein distance implementation
//!
//! Extends Levenshtein with adjacent transpositions. Particularly useful for
//! typo detection where letter swaps are common.
//!
//! Two variants are provided:
//! - restricted ("optimal string alignment"), the kernel used by
//!   [`Kernel::DamerauLevenshtein`](super::Kernel): three rolling rows, early
//!   termination, no substring is edited more than once
//! - unrestricted (Lowrance-Wagner), a true metric that allows edits between
//!   transposed characters, with an O(m*n) table
//!
//! # String Length Limits
//!
//! The unrestricted variant refuses inputs longer than 10,000 elements
//! instead of allocating the full table.

use super::pattern::{chars_of, strip_affix};
use crate::error::{FuzzError, Result};
use ahash::AHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

/// Maximum sequence length for the O(m*n) space variant.
const MAX_QUADRATIC_STRING_LENGTH: usize = 10_000;

/// Optimal string alignment distance with optional early termination.
///
/// Returns `None` if the distance exceeds `max_distance`. A transposition from
/// two rows back costs at least as much as a deletion from the row in between,
/// so the row minimum stays a lower bound.
#[must_use]
pub fn damerau_levenshtein_slices_bounded<T: PartialEq>(
    a: &[T],
    b: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    let (a, b) = strip_affix(a, b);
    // Shorter side is the row dimension
    let (a, b) = if b.len() <= a.len() { (a, b) } else { (b, a) };
    let m = a.len();
    let n = b.len();

    if n == 0 {
        return match max_distance {
            Some(max_d) if m > max_d => None,
            _ => Some(m),
        };
    }
    if let Some(max_d) = max_distance {
        if m - n > max_d {
            return None;
        }
    }

    // Three rows for transposition detection
    let mut prev2_row: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];
    let mut prev_row: SmallVec<[usize; 64]> = (0..=n).collect();
    let mut curr_row: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;
        let mut row_min = i;

        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution

            // Transposition check
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                curr_row[j] = curr_row[j].min(prev2_row[j - 2] + 1);
            }

            row_min = row_min.min(curr_row[j]);
        }

        if let Some(max_d) = max_distance {
            if row_min > max_d {
                return None;
            }
        }

        // Rotate rows
        std::mem::swap(&mut prev2_row, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let result = prev_row[n];
    match max_distance {
        Some(max_d) if result > max_d => None,
        _ => Some(result),
    }
}

/// Optimal string alignment distance between two strings.
///
/// # Example
/// ```
/// use rapidfuzz::string_metric::damerau::damerau_levenshtein;
///
/// assert_eq!(damerau_levenshtein("ab", "ba"), 1);
/// assert_eq!(damerau_levenshtein("ca", "abc"), 3);
/// ```
#[must_use]
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a_chars = chars_of(a);
    let b_chars = chars_of(b);
    damerau_levenshtein_slices_bounded(&a_chars, &b_chars, None)
        .unwrap_or(a_chars.len().max(b_chars.len()))
}

/// Optimal string alignment distance with a max threshold.
#[must_use]
pub fn damerau_levenshtein_bounded(a: &str, b: &str, max_distance: Option<usize>) -> Option<usize> {
    if a == b {
        return Some(0);
    }
    damerau_levenshtein_slices_bounded(&chars_of(a), &chars_of(b), max_distance)
}

/// True (unrestricted) Damerau-Levenshtein distance on sequences.
///
/// # Errors
///
/// Returns [`FuzzError::InvalidInput`] if either sequence exceeds 10,000 elements.
pub fn damerau_levenshtein_unrestricted_slices<T: Eq + Hash + Clone>(
    a: &[T],
    b: &[T],
) -> Result<usize> {
    let m = a.len();
    let n = b.len();

    if m > MAX_QUADRATIC_STRING_LENGTH || n > MAX_QUADRATIC_STRING_LENGTH {
        return Err(FuzzError::InvalidInput(format!(
            "String length exceeds safe limit for O(m*n) algorithm: len_a={}, len_b={}, max={}",
            m, n, MAX_QUADRATIC_STRING_LENGTH
        )));
    }
    if m == 0 || n == 0 {
        return Ok(m.max(n));
    }

    let max_dist = m + n;
    let width = n + 2;
    // Last row where each symbol was seen in `a`
    let mut last_row: AHashMap<T, usize> = AHashMap::new();
    // DP matrix with an extra sentinel row and column
    let mut d: Vec<usize> = vec![0; (m + 2) * width];

    d[0] = max_dist;
    for i in 0..=m {
        d[(i + 1) * width] = max_dist;
        d[(i + 1) * width + 1] = i;
    }
    for j in 0..=n {
        d[j + 1] = max_dist;
        d[width + j + 1] = j;
    }

    for i in 1..=m {
        let mut last_match_col = 0usize;

        for j in 1..=n {
            let i1 = last_row.get(&b[j - 1]).copied().unwrap_or(0);
            let j1 = last_match_col;

            let cost = if a[i - 1] == b[j - 1] {
                last_match_col = j;
                0
            } else {
                1
            };

            d[(i + 1) * width + j + 1] = (d[i * width + j] + cost) // substitution
                .min(d[(i + 1) * width + j] + 1) // insertion
                .min(d[i * width + j + 1] + 1) // deletion
                .min(d[i1 * width + j1] + (i - i1 - 1) + 1 + (j - j1 - 1)); // transposition
        }

        last_row.insert(a[i - 1].clone(), i);
    }

    Ok(d[(m + 1) * width + n + 1])
}

/// True (unrestricted) Damerau-Levenshtein distance between two strings.
///
/// # Errors
///
/// Returns [`FuzzError::InvalidInput`] if either string exceeds 10,000 characters.
///
/// # Example
/// ```
/// use rapidfuzz::string_metric::damerau::damerau_levenshtein_unrestricted;
///
/// // Transpose "ca" -> "ac", then insert "b"
/// assert_eq!(damerau_levenshtein_unrestricted("ca", "abc"), Ok(2));
/// ```
pub fn damerau_levenshtein_unrestricted(a: &str, b: &str) -> Result<usize> {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    damerau_levenshtein_unrestricted_slices(&a_chars, &b_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osa_basic() {
        assert_eq!(damerau_levenshtein("", ""), 0);
        assert_eq!(damerau_levenshtein("abc", ""), 3);
        assert_eq!(damerau_levenshtein("ab", "ba"), 1);
        assert_eq!(damerau_levenshtein("abcd", "acbd"), 1);
        assert_eq!(damerau_levenshtein("kitten", "sitting"), 3);
        assert_eq!(damerau_levenshtein("ca", "abc"), 3);
    }

    #[test]
    fn test_osa_bounded() {
        assert_eq!(damerau_levenshtein_bounded("ab", "ba", Some(1)), Some(1));
        assert_eq!(damerau_levenshtein_bounded("ab", "ba", Some(0)), None);
        assert_eq!(damerau_levenshtein_bounded("abcdef", "badcfe", Some(3)), Some(3));
        assert_eq!(damerau_levenshtein_bounded("abcdef", "badcfe", Some(2)), None);
        assert_eq!(damerau_levenshtein_bounded("a", "abcdef", Some(4)), None);
    }

    #[test]
    fn test_osa_bound_after_affix_strip() {
        let a: Vec<char> = "xaby".chars().collect();
        let b: Vec<char> = "xbay".chars().collect();
        assert_eq!(damerau_levenshtein_slices_bounded(&a, &b, Some(1)), Some(1));
    }

    #[test]
    fn test_unrestricted() {
        assert_eq!(damerau_levenshtein_unrestricted("ca", "abc"), Ok(2));
        assert_eq!(damerau_levenshtein_unrestricted("ab", "ba"), Ok(1));
        assert_eq!(damerau_levenshtein_unrestricted("", "abc"), Ok(3));
        assert_eq!(damerau_levenshtein_unrestricted("kitten", "sitting"), Ok(3));
    }

    #[test]
    fn test_unrestricted_too_long() {
        let long = "a".repeat(10_001);
        assert!(matches!(
            damerau_levenshtein_unrestricted(&long, "a"),
            Err(FuzzError::InvalidInput(_))
        ));
    }
}
