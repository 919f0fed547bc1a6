//! Edit-distance kernels and the normalization layer on top of them.
//!
//! Each kernel lives in its own module with a generic slice entry point
//! (`&[T]` for any `T: Eq + Hash`) and a `&str` convenience wrapper working on
//! Unicode scalar values. [`Kernel`] selects one of them at runtime; the free
//! functions [`distance`], [`normalized_distance`] and [`similarity`] dispatch
//! through it.

pub mod damerau;
pub mod hamming;
pub mod indel;
pub mod jaro;
pub mod lcs;
pub mod levenshtein;
pub mod pattern;

pub use damerau::{damerau_levenshtein, damerau_levenshtein_unrestricted};
pub use hamming::{hamming, hamming_padded};
pub use indel::indel_distance;
pub use jaro::{jaro_similarity, jaro_winkler_similarity};
pub use lcs::{lcs_length, lcs_similarity};
pub use levenshtein::{editops, levenshtein, EditKind, EditOp};
pub use pattern::PatternBlock;

use crate::error::{FuzzError, Result};
use pattern::chars_of;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Per-operation costs of an edit distance.
///
/// Costs are unsigned, so every model is non-negative by construction. The
/// default is the uniform model `(1, 1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostModel {
    pub insertion: usize,
    pub deletion: usize,
    pub substitution: usize,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

impl CostModel {
    #[must_use]
    pub const fn new(insertion: usize, deletion: usize, substitution: usize) -> Self {
        Self {
            insertion,
            deletion,
            substitution,
        }
    }

    /// Build a cost model from signed values.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzError::InvalidCostModel`] if any cost is negative.
    pub fn try_new(insertion: i64, deletion: i64, substitution: i64) -> Result<Self> {
        let convert = |name: &str, value: i64| {
            usize::try_from(value).map_err(|_| {
                FuzzError::InvalidCostModel(format!(
                    "{} cost must be non-negative, got {}",
                    name, value
                ))
            })
        };
        Ok(Self::new(
            convert("insertion", insertion)?,
            convert("deletion", deletion)?,
            convert("substitution", substitution)?,
        ))
    }

    /// True when all three operations cost the same.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.insertion == self.deletion && self.deletion == self.substitution
    }
}

/// Distance kernels selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    /// Insertions, deletions and substitutions.
    Levenshtein,
    /// Levenshtein plus adjacent transpositions (optimal string alignment).
    DamerauLevenshtein,
    /// Positional mismatches of equal-length sequences.
    Hamming,
    /// Insertions and deletions only.
    Indel,
    /// Elements of the longer sequence outside the longest common subsequence.
    Lcs,
}

impl Kernel {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::Levenshtein => "levenshtein",
            Kernel::DamerauLevenshtein => "damerau_levenshtein",
            Kernel::Hamming => "hamming",
            Kernel::Indel => "indel",
            Kernel::Lcs => "lcs",
        }
    }

    /// Kernels without their own weighting accept only uniform models.
    fn unit_scale(&self, costs: &CostModel) -> Result<usize> {
        if costs.is_uniform() {
            Ok(costs.insertion)
        } else {
            Err(FuzzError::InvalidCostModel(format!(
                "{} supports only uniform costs, got {:?}",
                self.name(),
                costs
            )))
        }
    }

    /// Check that the kernel can compare sequences of these lengths under
    /// this cost model.
    ///
    /// # Errors
    ///
    /// [`FuzzError::InvalidCostModel`] for non-uniform costs on a kernel
    /// without weighting or when the largest possible distance does not fit
    /// in a `usize`, [`FuzzError::InvalidInput`] for Hamming on unequal
    /// lengths.
    pub fn validate(&self, len_a: usize, len_b: usize, costs: &CostModel) -> Result<()> {
        match self {
            Kernel::Levenshtein | Kernel::Indel => {}
            Kernel::DamerauLevenshtein | Kernel::Lcs => {
                self.unit_scale(costs)?;
            }
            Kernel::Hamming => {
                self.unit_scale(costs)?;
                if len_a != len_b {
                    return Err(FuzzError::InvalidInput(format!(
                        "hamming distance requires sequences of equal length, got {} and {}",
                        len_a, len_b
                    )));
                }
            }
        }
        self.max_possible_distance(len_a, len_b, costs).map(|_| ())
    }

    /// Distance between two sequences, `Ok(None)` when it exceeds `max_distance`.
    ///
    /// # Errors
    ///
    /// See [`Kernel::validate`].
    pub fn distance_slices<T: Eq + Hash + Clone>(
        &self,
        a: &[T],
        b: &[T],
        costs: &CostModel,
        max_distance: Option<usize>,
    ) -> Result<Option<usize>> {
        self.validate(a.len(), b.len(), costs)?;
        match self {
            Kernel::Levenshtein => Ok(levenshtein::levenshtein_weighted_slices(
                a,
                b,
                costs,
                max_distance,
            )),
            Kernel::Indel => Ok(indel::indel_weighted_slices(a, b, costs, max_distance)),
            Kernel::DamerauLevenshtein => scaled(costs.insertion, max_distance, |bound| {
                Ok(damerau::damerau_levenshtein_slices_bounded(a, b, bound))
            }),
            Kernel::Hamming => scaled(costs.insertion, max_distance, |bound| {
                hamming::hamming_slices_bounded(a, b, bound)
            }),
            Kernel::Lcs => scaled(costs.insertion, max_distance, |bound| {
                let dist = lcs::lcs_distance_slices(a, b);
                Ok(match bound {
                    Some(max_d) if dist > max_d => None,
                    _ => Some(dist),
                })
            }),
        }
    }

    /// Largest distance two sequences of these lengths can have.
    ///
    /// # Errors
    ///
    /// [`FuzzError::InvalidCostModel`] when that distance does not fit in a
    /// `usize`.
    pub fn max_possible_distance(
        &self,
        len_a: usize,
        len_b: usize,
        costs: &CostModel,
    ) -> Result<usize> {
        let max = match self {
            Kernel::Levenshtein => levenshtein::max_distance(len_a, len_b, costs),
            Kernel::Indel => indel::max_distance(len_a, len_b, costs),
            Kernel::DamerauLevenshtein | Kernel::Hamming | Kernel::Lcs => {
                len_a.max(len_b).checked_mul(costs.insertion)
            }
        };
        max.ok_or_else(|| {
            FuzzError::InvalidCostModel(format!(
                "{} distance overflows for lengths {} and {} under {:?}",
                self.name(),
                len_a,
                len_b,
                costs
            ))
        })
    }
}

/// Run a unit-cost kernel under a uniform scale `c`.
///
/// With `c == 0` every edit is free; the kernel still runs unbounded so that
/// its own checks apply.
fn scaled(
    scale: usize,
    max_distance: Option<usize>,
    kernel: impl FnOnce(Option<usize>) -> Result<Option<usize>>,
) -> Result<Option<usize>> {
    if scale == 0 {
        return Ok(kernel(None)?.map(|_| 0));
    }
    Ok(kernel(max_distance.map(|d| d / scale))?.map(|d| d.saturating_mul(scale)))
}

/// Distance between two strings under `kernel`.
///
/// Returns `Ok(None)` when the distance exceeds `max_distance`.
///
/// # Example
/// ```
/// use rapidfuzz::string_metric::{distance, CostModel, Kernel};
///
/// let d = distance("kitten", "sitting", Kernel::Levenshtein, &CostModel::default(), None);
/// assert_eq!(d, Ok(Some(3)));
/// ```
pub fn distance(
    a: &str,
    b: &str,
    kernel: Kernel,
    costs: &CostModel,
    max_distance: Option<usize>,
) -> Result<Option<usize>> {
    kernel.distance_slices(&chars_of(a), &chars_of(b), costs, max_distance)
}

/// `distance / max_possible_distance`, in [0, 1]. Zero when the maximum is zero.
pub fn normalized_distance(a: &str, b: &str, kernel: Kernel, costs: &CostModel) -> Result<f64> {
    let a_chars = chars_of(a);
    let b_chars = chars_of(b);
    let max = kernel.max_possible_distance(a_chars.len(), b_chars.len(), costs)?;
    // Unbounded, so always Some
    let dist = kernel
        .distance_slices(&a_chars, &b_chars, costs, None)?
        .unwrap_or(max);
    Ok(normalize(dist, max))
}

/// `(1 - normalized_distance) * 100`, in [0, 100].
pub fn similarity(a: &str, b: &str, kernel: Kernel, costs: &CostModel) -> Result<f64> {
    Ok((1.0 - normalized_distance(a, b, kernel, costs)?) * 100.0)
}

#[inline]
pub(crate) fn normalize(dist: usize, max: usize) -> f64 {
    if max == 0 {
        0.0
    } else {
        dist as f64 / max as f64
    }
}

/// Similarity score in [0, 100] for a distance out of `max`.
#[inline]
pub(crate) fn score_from_distance(dist: usize, max: usize) -> f64 {
    (1.0 - normalize(dist, max)) * 100.0
}

/// Largest distance out of `max` that can still reach `score_cutoff`.
///
/// Rounded up, so float error never prunes a candidate that would pass; the
/// exact score is compared against the cutoff afterwards. `None` means no
/// distance can reach the cutoff.
#[inline]
pub(crate) fn cutoff_to_distance(score_cutoff: Option<f64>, max: usize) -> Option<usize> {
    match score_cutoff {
        None => Some(max),
        Some(cutoff) if cutoff > 100.0 => None,
        Some(cutoff) if cutoff <= 0.0 => Some(max),
        Some(cutoff) => {
            let bound = (max as f64 * (1.0 - cutoff / 100.0)).ceil() as usize;
            Some(bound.min(max))
        }
    }
}

/// Keep `score` only if it reaches the inclusive `score_cutoff`.
#[inline]
pub(crate) fn apply_cutoff(score: f64, score_cutoff: Option<f64>) -> Option<f64> {
    match score_cutoff {
        Some(cutoff) if score < cutoff => None,
        _ => Some(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_model() {
        assert_eq!(CostModel::default(), CostModel::new(1, 1, 1));
        assert!(CostModel::default().is_uniform());
        assert!(!CostModel::new(1, 1, 2).is_uniform());
        assert_eq!(CostModel::try_new(1, 2, 3), Ok(CostModel::new(1, 2, 3)));
        assert!(matches!(
            CostModel::try_new(1, -1, 1),
            Err(FuzzError::InvalidCostModel(_))
        ));
    }

    #[test]
    fn test_distance_dispatch() {
        let unit = CostModel::default();
        assert_eq!(distance("kitten", "sitting", Kernel::Levenshtein, &unit, None), Ok(Some(3)));
        assert_eq!(distance("kitten", "sitting", Kernel::Levenshtein, &unit, Some(2)), Ok(None));
        assert_eq!(distance("kitten", "sitting", Kernel::Indel, &unit, None), Ok(Some(5)));
        assert_eq!(distance("ab", "ba", Kernel::DamerauLevenshtein, &unit, None), Ok(Some(1)));
        assert_eq!(distance("karolin", "kathrin", Kernel::Hamming, &unit, None), Ok(Some(3)));
        assert_eq!(distance("AGGTAB", "GXTXAYB", Kernel::Lcs, &unit, None), Ok(Some(3)));
    }

    #[test]
    fn test_unsupported_costs_rejected() {
        let weighted = CostModel::new(1, 1, 2);
        for kernel in [Kernel::DamerauLevenshtein, Kernel::Hamming, Kernel::Lcs] {
            assert!(matches!(
                distance("abc", "abd", kernel, &weighted, None),
                Err(FuzzError::InvalidCostModel(_))
            ));
        }
        assert!(distance("abc", "abd", Kernel::Indel, &weighted, None).is_ok());
    }

    #[test]
    fn test_uniform_scaling() {
        let double = CostModel::new(2, 2, 2);
        assert_eq!(distance("ab", "ba", Kernel::DamerauLevenshtein, &double, None), Ok(Some(2)));
        assert_eq!(distance("ab", "ba", Kernel::DamerauLevenshtein, &double, Some(1)), Ok(None));
        assert_eq!(distance("abc", "abd", Kernel::Hamming, &double, Some(2)), Ok(Some(2)));
        let free = CostModel::new(0, 0, 0);
        assert_eq!(distance("abc", "xyz", Kernel::Hamming, &free, None), Ok(Some(0)));
        assert!(distance("abc", "xy", Kernel::Hamming, &free, None).is_err());
    }

    #[test]
    fn test_hamming_length_mismatch() {
        assert!(matches!(
            distance("abc", "ab", Kernel::Hamming, &CostModel::default(), None),
            Err(FuzzError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_normalization() {
        let unit = CostModel::default();
        let nd = normalized_distance("kitten", "sitting", Kernel::Levenshtein, &unit).unwrap();
        assert_eq!(nd, 3.0 / 7.0);
        let sim = similarity("kitten", "sitting", Kernel::Levenshtein, &unit).unwrap();
        assert!((sim - 57.142857).abs() < 1e-4);
        assert_eq!(normalized_distance("", "", Kernel::Indel, &unit), Ok(0.0));
        assert_eq!(similarity("", "", Kernel::Levenshtein, &unit), Ok(100.0));
        assert_eq!(similarity("abc", "xyz", Kernel::Hamming, &unit), Ok(0.0));
    }

    #[test]
    fn test_max_possible_distance() {
        let unit = CostModel::default();
        assert_eq!(Kernel::Levenshtein.max_possible_distance(3, 5, &unit), Ok(5));
        assert_eq!(Kernel::Indel.max_possible_distance(3, 5, &unit), Ok(8));
        assert_eq!(Kernel::Lcs.max_possible_distance(3, 5, &unit), Ok(5));
        assert_eq!(Kernel::Hamming.max_possible_distance(4, 4, &unit), Ok(4));
    }

    #[test]
    fn test_oversized_costs_rejected() {
        let huge_insert = CostModel::new(usize::MAX / 2, 1, 1);
        assert!(matches!(
            normalized_distance("ab", "abcd", Kernel::Levenshtein, &huge_insert),
            Err(FuzzError::InvalidCostModel(_))
        ));
        assert!(matches!(
            distance("ab", "abcd", Kernel::Indel, &huge_insert, None),
            Err(FuzzError::InvalidCostModel(_))
        ));
        // Fits when the longer side only needs cheap deletions
        assert_eq!(
            distance("abcd", "ab", Kernel::Levenshtein, &huge_insert, None),
            Ok(Some(2))
        );
        assert_eq!(
            normalized_distance("abcd", "ab", Kernel::Levenshtein, &huge_insert),
            Ok(0.5)
        );

        let saturated = CostModel::new(usize::MAX, usize::MAX, usize::MAX);
        for kernel in [Kernel::Hamming, Kernel::DamerauLevenshtein, Kernel::Lcs] {
            assert!(matches!(
                distance("abc", "xyz", kernel, &saturated, None),
                Err(FuzzError::InvalidCostModel(_))
            ));
        }
        assert_eq!(distance("a", "x", Kernel::Hamming, &saturated, None), Ok(Some(usize::MAX)));
        assert_eq!(similarity("a", "x", Kernel::Levenshtein, &saturated), Ok(0.0));
    }

    #[test]
    fn test_cutoff_to_distance() {
        assert_eq!(cutoff_to_distance(None, 7), Some(7));
        assert_eq!(cutoff_to_distance(Some(0.0), 7), Some(7));
        assert_eq!(cutoff_to_distance(Some(100.0), 7), Some(0));
        assert_eq!(cutoff_to_distance(Some(100.1), 7), None);
        // 3 edits out of 7 scores 57.14, so a 57 cutoff allows 3
        assert!(cutoff_to_distance(Some(57.0), 7).unwrap() >= 3);
        let exact = score_from_distance(3, 7);
        assert!(cutoff_to_distance(Some(exact), 7).unwrap() >= 3);
    }

    #[test]
    fn test_kernel_serde_names() {
        let json = serde_json::to_string(&Kernel::DamerauLevenshtein).unwrap();
        assert_eq!(json, "\"damerau_levenshtein\"");
        let kernel: Kernel = serde_json::from_str("\"indel\"").unwrap();
        assert_eq!(kernel, Kernel::Indel);
    }
}
