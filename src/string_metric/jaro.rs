//! Jaro and Jaro-Winkler similarity
//!
//! Good for names and short strings. Jaro-Winkler gives extra weight to a
//! common prefix once the plain Jaro similarity is already high. Both are
//! reported on the 0-100 scale used by every other score in the crate.
//!
//! # Performance
//!
//! ASCII inputs take a byte fast path and skip the `char` conversion.

use crate::error::{FuzzError, Result};
use smallvec::SmallVec;

/// Jaro-Winkler only boosts pairs whose Jaro similarity exceeds this.
const WINKLER_THRESHOLD: f64 = 0.7;

/// Longest common prefix that contributes to the Winkler boost.
const MAX_PREFIX_LENGTH: usize = 4;

/// Default Jaro-Winkler prefix weight.
pub const DEFAULT_PREFIX_WEIGHT: f64 = 0.1;

/// Jaro similarity in [0, 1] for any comparable slice type.
#[must_use]
pub fn jaro_slices<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 && b_len == 0 {
        return 1.0;
    }
    if a_len == 0 || b_len == 0 {
        return 0.0;
    }

    // Match window
    let match_distance = (a_len.max(b_len) / 2).saturating_sub(1);

    let mut a_matches: SmallVec<[bool; 64]> = smallvec::smallvec![false; a_len];
    let mut b_matches: SmallVec<[bool; 64]> = smallvec::smallvec![false; b_len];

    let mut matches = 0usize;
    for i in 0..a_len {
        let start = i.saturating_sub(match_distance);
        let end = (i + match_distance + 1).min(b_len);

        for j in start..end {
            if b_matches[j] || a[i] != b[j] {
                continue;
            }
            a_matches[i] = true;
            b_matches[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Count transpositions
    let mut transpositions = 0usize;
    let mut k = 0usize;
    for i in (0..a_len).filter(|&i| a_matches[i]) {
        while k < b_len && !b_matches[k] {
            k += 1;
        }
        if k >= b_len {
            break;
        }
        if a[i] != b[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = (transpositions / 2) as f64;
    (m / a_len as f64 + m / b_len as f64 + (m - t) / m) / 3.0
}

fn jaro_raw(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_ascii() && b.is_ascii() {
        return jaro_slices(a.as_bytes(), b.as_bytes());
    }
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    jaro_slices(&a_chars, &b_chars)
}

/// Jaro-Winkler similarity in [0, 1] for any comparable slice type.
///
/// `prefix_weight` must already be validated to lie in `[0, 0.25]`.
#[must_use]
pub fn jaro_winkler_slices<T: PartialEq>(a: &[T], b: &[T], prefix_weight: f64) -> f64 {
    let sim = jaro_slices(a, b);
    if sim <= WINKLER_THRESHOLD {
        return sim;
    }
    let prefix = a
        .iter()
        .zip(b.iter())
        .take(MAX_PREFIX_LENGTH)
        .take_while(|(x, y)| x == y)
        .count();
    sim + prefix as f64 * prefix_weight * (1.0 - sim)
}

pub(crate) fn check_prefix_weight(prefix_weight: f64) -> Result<()> {
    if (0.0..=0.25).contains(&prefix_weight) {
        Ok(())
    } else {
        Err(FuzzError::InvalidInput(format!(
            "prefix_weight must be in [0, 0.25], got {}",
            prefix_weight
        )))
    }
}

/// Jaro similarity between two strings, scaled to [0, 100].
///
/// # Example
/// ```
/// use rapidfuzz::string_metric::jaro::jaro_similarity;
///
/// let sim = jaro_similarity("martha", "marhta");
/// assert!((sim - 94.444).abs() < 0.01);
/// ```
#[must_use]
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    jaro_raw(a, b) * 100.0
}

/// Jaro-Winkler similarity between two strings, scaled to [0, 100].
///
/// # Errors
///
/// Returns [`FuzzError::InvalidInput`] when `prefix_weight` lies outside
/// `[0, 0.25]`, where the result could leave the score range.
pub fn jaro_winkler_similarity(a: &str, b: &str, prefix_weight: f64) -> Result<f64> {
    check_prefix_weight(prefix_weight)?;
    if a == b {
        return Ok(100.0);
    }
    let sim = if a.is_ascii() && b.is_ascii() {
        jaro_winkler_slices(a.as_bytes(), b.as_bytes(), prefix_weight)
    } else {
        let a_chars: SmallVec<[char; 64]> = a.chars().collect();
        let b_chars: SmallVec<[char; 64]> = b.chars().collect();
        jaro_winkler_slices(&a_chars, &b_chars, prefix_weight)
    };
    Ok(sim * 100.0)
}
