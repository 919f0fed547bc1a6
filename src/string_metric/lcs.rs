//! Longest Common Subsequence (LCS) distance and similarity
//!
//! The length comes from the bit-parallel kernel in [`indel`](super::indel);
//! this module turns it into a distance and a normalized similarity.

use super::indel::lcs_length_slices;
use super::pattern::chars_of;

/// Calculate the length of the Longest Common Subsequence.
#[must_use]
pub fn lcs_length(a: &str, b: &str) -> usize {
    if a == b {
        return a.chars().count();
    }
    lcs_length_slices(&chars_of(a), &chars_of(b))
}

/// LCS distance: elements of the longer sequence outside the LCS.
#[must_use]
pub fn lcs_distance_slices<T: Eq + std::hash::Hash + Clone>(a: &[T], b: &[T]) -> usize {
    a.len().max(b.len()) - lcs_length_slices(a, b)
}

/// LCS similarity in [0, 100]: `100 * lcs / max(len_a, len_b)`.
#[must_use]
pub fn lcs_similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 100.0;
    }
    let distance = max_len - lcs_length(a, b);
    super::score_from_distance(distance, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcs_length() {
        assert_eq!(lcs_length("", ""), 0);
        assert_eq!(lcs_length("abc", "abc"), 3);
        assert_eq!(lcs_length("abc", "def"), 0);
        assert_eq!(lcs_length("ABCDGH", "AEDFHR"), 3); // ADH
        assert_eq!(lcs_length("AGGTAB", "GXTXAYB"), 4); // GTAB
    }

    #[test]
    fn test_lcs_similarity() {
        assert_eq!(lcs_similarity("", ""), 100.0);
        assert_eq!(lcs_similarity("abc", ""), 0.0);
        assert_eq!(lcs_similarity("abcd", "abxd"), 75.0);
    }

    #[test]
    fn test_lcs_distance() {
        let a: Vec<char> = "AGGTAB".chars().collect();
        let b: Vec<char> = "GXTXAYB".chars().collect();
        assert_eq!(lcs_distance_slices(&a, &b), 3);
    }
}
