//! Hamming distance implementation
//!
//! Counts positions where elements differ.
//!
//! # Length Mismatch Behavior
//!
//! Hamming distance is undefined for sequences of different lengths. Every
//! function here fails with [`FuzzError::InvalidInput`] in that case; nothing
//! is padded or truncated silently. Callers who want Hamming-like behavior on
//! unequal strings can opt into [`hamming_padded`].
//!
//! # Complexity
//! - Time: O(n) where n is the sequence length
//! - Space: O(n) for character buffers

use super::pattern::chars_of;
use crate::error::{FuzzError, Result};

fn length_mismatch(len_a: usize, len_b: usize) -> FuzzError {
    FuzzError::InvalidInput(format!(
        "hamming distance requires sequences of equal length, got {} and {}",
        len_a, len_b
    ))
}

/// Hamming distance between two sequences with optional early termination.
///
/// Returns `Ok(None)` once more than `max_distance` mismatches were counted.
///
/// # Errors
///
/// Returns [`FuzzError::InvalidInput`] when the lengths differ.
pub fn hamming_slices_bounded<T: PartialEq>(
    a: &[T],
    b: &[T],
    max_distance: Option<usize>,
) -> Result<Option<usize>> {
    if a.len() != b.len() {
        return Err(length_mismatch(a.len(), b.len()));
    }

    let limit = max_distance.unwrap_or(usize::MAX);
    let mut distance = 0usize;
    for (x, y) in a.iter().zip(b.iter()) {
        if x != y {
            distance += 1;
            if distance > limit {
                return Ok(None);
            }
        }
    }
    Ok(Some(distance))
}

/// Calculate Hamming distance between two strings.
///
/// # Errors
///
/// Returns [`FuzzError::InvalidInput`] if the strings have different lengths.
///
/// # Example
/// ```
/// use rapidfuzz::string_metric::hamming::hamming;
///
/// assert_eq!(hamming("karolin", "kathrin").unwrap(), 3);
/// assert!(hamming("abc", "ab").is_err());
/// ```
pub fn hamming(a: &str, b: &str) -> Result<usize> {
    let a_chars = chars_of(a);
    let b_chars = chars_of(b);
    // Never bounded, so always Some
    Ok(hamming_slices_bounded(&a_chars, &b_chars, None)?.unwrap_or(a_chars.len()))
}

/// Hamming distance that pads the shorter string.
///
/// Every position past the end of the shorter string counts as a mismatch.
#[must_use]
pub fn hamming_padded(a: &str, b: &str) -> usize {
    let a_chars = chars_of(a);
    let b_chars = chars_of(b);
    let max_len = a_chars.len().max(b_chars.len());
    (0..max_len)
        .filter(|&i| a_chars.get(i) != b_chars.get(i))
        .count()
}

/// Check that two strings can be compared with Hamming distance.
pub(crate) fn check_lengths(a: &str, b: &str) -> Result<()> {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == len_b {
        Ok(())
    } else {
        Err(length_mismatch(len_a, len_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_basic() {
        assert_eq!(hamming("", ""), Ok(0));
        assert_eq!(hamming("abc", "abc"), Ok(0));
        assert_eq!(hamming("abc", "axc"), Ok(1));
        assert_eq!(hamming("karolin", "kathrin"), Ok(3));
    }

    #[test]
    fn test_hamming_different_lengths() {
        assert!(matches!(hamming("abc", "ab"), Err(FuzzError::InvalidInput(_))));
        assert_eq!(hamming_padded("abc", "ab"), 1);
        assert!(check_lengths("abc", "ab").is_err());
        assert!(check_lengths("äbc", "abc").is_ok());
    }

    #[test]
    fn test_hamming_bounded() {
        let a: Vec<char> = "karolin".chars().collect();
        let b: Vec<char> = "kathrin".chars().collect();
        assert_eq!(hamming_slices_bounded(&a, &b, Some(3)), Ok(Some(3)));
        assert_eq!(hamming_slices_bounded(&a, &b, Some(2)), Ok(None));
    }
}
