//! Uniform scoring contract used by the batch engine.
//!
//! A [`Scorer`] binds a kernel, its normalization and (optionally) a cost model
//! or preprocessing step behind one call, `score(a, b, score_cutoff)`. The batch
//! engine only sees this trait, so every ratio and every normalized kernel can
//! rank choices the same way.
//!
//! Scores are in [0, 100]. `None` means "below the cutoff": scorers turn the
//! cutoff into a distance bound and stop computing as soon as the bound is
//! exceeded, so a `None` carries no exact score.

use crate::error::{FuzzError, Result};
use crate::fuzz;
use crate::string_metric::indel::indel_with_block;
use crate::string_metric::jaro::{self, DEFAULT_PREFIX_WEIGHT};
use crate::string_metric::pattern::{chars_of, PatternBlock};
use crate::string_metric::{
    apply_cutoff, cutoff_to_distance, score_from_distance, CostModel, Kernel,
};
use crate::utils::Processor;

/// A scorer with one side fixed, reused across many choices.
pub trait PreparedQuery: Send + Sync {
    /// Score the fixed query against `choice`.
    fn score(&self, choice: &str, score_cutoff: Option<f64>) -> Option<f64>;
}

/// Similarity scorer in [0, 100].
pub trait Scorer: Send + Sync {
    /// Similarity of `a` and `b`, or `None` when it is below `score_cutoff`.
    ///
    /// Inputs the scorer cannot compare (see [`Scorer::validate`]) also
    /// produce `None`.
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64>;

    /// Check that `a` and `b` can be compared at all.
    fn validate(&self, _a: &str, _b: &str) -> Result<()> {
        Ok(())
    }

    /// Fix `query` as the first argument of every later comparison.
    ///
    /// The default just remembers the query. Scorers with a bit-parallel
    /// kernel precompute the query's [`PatternBlock`] here.
    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn PreparedQuery + 'a> {
        Box::new(Unprepared {
            scorer: self,
            query,
        })
    }

    /// Configuration name, as accepted by [`by_name`].
    fn name(&self) -> &'static str;

    fn is_symmetric(&self) -> bool {
        true
    }
}

struct Unprepared<'a, S: ?Sized> {
    scorer: &'a S,
    query: &'a str,
}

impl<S: Scorer + ?Sized> PreparedQuery for Unprepared<'_, S> {
    fn score(&self, choice: &str, score_cutoff: Option<f64>) -> Option<f64> {
        self.scorer.score(self.query, choice, score_cutoff)
    }
}

// ============================================================================
// Ratio scorers
// ============================================================================

/// Query chars plus their pattern block, shared by [`Ratio`] and uniform
/// [`NormalizedLevenshtein`].
struct PreparedLevenshtein {
    block: PatternBlock<char>,
}

impl PreparedLevenshtein {
    fn new(query: &str) -> Self {
        Self {
            block: PatternBlock::new(&chars_of(query)),
        }
    }
}

impl PreparedQuery for PreparedLevenshtein {
    fn score(&self, choice: &str, score_cutoff: Option<f64>) -> Option<f64> {
        let score = fuzz::ratio_with_block(&self.block, &chars_of(choice), score_cutoff);
        apply_cutoff(score, score_cutoff)
    }
}

macro_rules! ratio_scorer {
    ($(#[$doc:meta])* $name:ident, $func:path, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Scorer for $name {
            fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
                apply_cutoff($func(a, b, score_cutoff), score_cutoff)
            }

            fn name(&self) -> &'static str {
                $label
            }
        }
    };
}

/// [`fuzz::ratio`] as a scorer; prepares the query's pattern block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ratio;

impl Scorer for Ratio {
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        apply_cutoff(fuzz::ratio(a, b, score_cutoff), score_cutoff)
    }

    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn PreparedQuery + 'a> {
        Box::new(PreparedLevenshtein::new(query))
    }

    fn name(&self) -> &'static str {
        "ratio"
    }
}

ratio_scorer!(
    /// [`fuzz::partial_ratio`] as a scorer.
    PartialRatio, fuzz::partial_ratio, "partial_ratio"
);
ratio_scorer!(
    /// [`fuzz::token_sort_ratio`] as a scorer.
    TokenSortRatio, fuzz::token_sort_ratio, "token_sort_ratio"
);
ratio_scorer!(
    /// [`fuzz::token_set_ratio`] as a scorer.
    TokenSetRatio, fuzz::token_set_ratio, "token_set_ratio"
);
ratio_scorer!(
    /// [`fuzz::token_ratio`] as a scorer.
    TokenRatio, fuzz::token_ratio, "token_ratio"
);
ratio_scorer!(
    /// [`fuzz::partial_token_sort_ratio`] as a scorer.
    PartialTokenSortRatio, fuzz::partial_token_sort_ratio, "partial_token_sort_ratio"
);
ratio_scorer!(
    /// [`fuzz::partial_token_set_ratio`] as a scorer.
    PartialTokenSetRatio, fuzz::partial_token_set_ratio, "partial_token_set_ratio"
);
ratio_scorer!(
    /// [`fuzz::partial_token_ratio`] as a scorer.
    PartialTokenRatio, fuzz::partial_token_ratio, "partial_token_ratio"
);
ratio_scorer!(
    /// [`fuzz::wratio`] as a scorer.
    WRatio, fuzz::wratio, "wratio"
);
ratio_scorer!(
    /// [`fuzz::qratio`] as a scorer.
    QRatio, fuzz::qratio, "qratio"
);

// ============================================================================
// Normalized kernel scorers
// ============================================================================

/// Normalized similarity of a distance kernel, with the cutoff as a bound.
fn kernel_score(
    kernel: Kernel,
    costs: &CostModel,
    a: &str,
    b: &str,
    score_cutoff: Option<f64>,
) -> Option<f64> {
    let a_chars = chars_of(a);
    let b_chars = chars_of(b);
    let max = kernel
        .max_possible_distance(a_chars.len(), b_chars.len(), costs)
        .ok()?;
    let bound = cutoff_to_distance(score_cutoff, max)?;
    let dist = kernel
        .distance_slices(&a_chars, &b_chars, costs, Some(bound))
        .ok()??;
    apply_cutoff(score_from_distance(dist, max), score_cutoff)
}

/// Normalized Levenshtein similarity under a cost model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedLevenshtein {
    costs: CostModel,
}

impl NormalizedLevenshtein {
    #[must_use]
    pub fn new(costs: CostModel) -> Self {
        Self { costs }
    }
}

impl Scorer for NormalizedLevenshtein {
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        kernel_score(Kernel::Levenshtein, &self.costs, a, b, score_cutoff)
    }

    fn validate(&self, a: &str, b: &str) -> Result<()> {
        Kernel::Levenshtein.validate(a.chars().count(), b.chars().count(), &self.costs)
    }

    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn PreparedQuery + 'a> {
        if self.costs == CostModel::default() {
            Box::new(PreparedLevenshtein::new(query))
        } else {
            Box::new(Unprepared {
                scorer: self,
                query,
            })
        }
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Normalized Indel similarity under a cost model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedIndel {
    costs: CostModel,
}

impl NormalizedIndel {
    #[must_use]
    pub fn new(costs: CostModel) -> Self {
        Self { costs }
    }
}

struct PreparedIndel {
    block: PatternBlock<char>,
}

impl PreparedQuery for PreparedIndel {
    fn score(&self, choice: &str, score_cutoff: Option<f64>) -> Option<f64> {
        let choice = chars_of(choice);
        let max = self.block.len() + choice.len();
        let bound = cutoff_to_distance(score_cutoff, max)?;
        let dist = indel_with_block(&self.block, &choice, Some(bound))?;
        apply_cutoff(score_from_distance(dist, max), score_cutoff)
    }
}

impl Scorer for NormalizedIndel {
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        kernel_score(Kernel::Indel, &self.costs, a, b, score_cutoff)
    }

    fn validate(&self, a: &str, b: &str) -> Result<()> {
        Kernel::Indel.validate(a.chars().count(), b.chars().count(), &self.costs)
    }

    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn PreparedQuery + 'a> {
        if self.costs == CostModel::default() {
            Box::new(PreparedIndel {
                block: PatternBlock::new(&chars_of(query)),
            })
        } else {
            Box::new(Unprepared {
                scorer: self,
                query,
            })
        }
    }

    fn name(&self) -> &'static str {
        "indel"
    }
}

/// Normalized Hamming similarity; strings must have equal length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedHamming;

impl Scorer for NormalizedHamming {
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        kernel_score(Kernel::Hamming, &CostModel::default(), a, b, score_cutoff)
    }

    fn validate(&self, a: &str, b: &str) -> Result<()> {
        crate::string_metric::hamming::check_lengths(a, b)
    }

    fn name(&self) -> &'static str {
        "hamming"
    }
}

/// Normalized optimal string alignment similarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedDamerauLevenshtein;

impl Scorer for NormalizedDamerauLevenshtein {
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        kernel_score(Kernel::DamerauLevenshtein, &CostModel::default(), a, b, score_cutoff)
    }

    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }
}

/// LCS length over the longer length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedLcs;

impl Scorer for NormalizedLcs {
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        kernel_score(Kernel::Lcs, &CostModel::default(), a, b, score_cutoff)
    }

    fn name(&self) -> &'static str {
        "lcs"
    }
}

// ============================================================================
// Jaro scorers
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JaroSimilarity;

impl Scorer for JaroSimilarity {
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        apply_cutoff(jaro::jaro_similarity(a, b), score_cutoff)
    }

    fn name(&self) -> &'static str {
        "jaro"
    }
}

/// Jaro-Winkler similarity with a validated prefix weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaroWinklerSimilarity {
    prefix_weight: f64,
}

impl Default for JaroWinklerSimilarity {
    fn default() -> Self {
        Self {
            prefix_weight: DEFAULT_PREFIX_WEIGHT,
        }
    }
}

impl JaroWinklerSimilarity {
    /// # Errors
    ///
    /// Returns [`FuzzError::InvalidInput`] unless `prefix_weight` is in `[0, 0.25]`.
    pub fn new(prefix_weight: f64) -> Result<Self> {
        jaro::check_prefix_weight(prefix_weight)?;
        Ok(Self { prefix_weight })
    }

    #[must_use]
    pub fn prefix_weight(&self) -> f64 {
        self.prefix_weight
    }
}

impl Scorer for JaroWinklerSimilarity {
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        let score = jaro::jaro_winkler_similarity(a, b, self.prefix_weight).ok()?;
        apply_cutoff(score, score_cutoff)
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

// ============================================================================
// Adapters
// ============================================================================

/// Wraps a plain function returning a score in [0, 100].
///
/// The function cannot stop early, so the cutoff is applied to its result.
pub struct FnScorer<F> {
    func: F,
    name: &'static str,
}

impl<F> FnScorer<F>
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    pub fn new(name: &'static str, func: F) -> Self {
        Self { func, name }
    }
}

impl<F> Scorer for FnScorer<F>
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        apply_cutoff((self.func)(a, b), score_cutoff)
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn is_symmetric(&self) -> bool {
        false
    }
}

/// Runs a [`Processor`] on both inputs before delegating to `scorer`.
///
/// The batch engine applies its own processor once per item; this adapter is
/// for direct pairwise use, where the scorer carries its preprocessing.
pub struct Processed<S> {
    scorer: S,
    processor: Processor,
}

impl<S: Scorer> Processed<S> {
    pub fn new(scorer: S, processor: Processor) -> Self {
        Self { scorer, processor }
    }
}

struct PreparedProcessed<'a, S> {
    scorer: &'a S,
    processor: Processor,
    query: String,
}

impl<S: Scorer> PreparedQuery for PreparedProcessed<'_, S> {
    fn score(&self, choice: &str, score_cutoff: Option<f64>) -> Option<f64> {
        self.scorer
            .score(&self.query, &self.processor.apply(choice), score_cutoff)
    }
}

impl<S: Scorer> Scorer for Processed<S> {
    fn score(&self, a: &str, b: &str, score_cutoff: Option<f64>) -> Option<f64> {
        self.scorer.score(
            &self.processor.apply(a),
            &self.processor.apply(b),
            score_cutoff,
        )
    }

    fn validate(&self, a: &str, b: &str) -> Result<()> {
        self.scorer
            .validate(&self.processor.apply(a), &self.processor.apply(b))
    }

    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn PreparedQuery + 'a> {
        Box::new(PreparedProcessed {
            scorer: &self.scorer,
            processor: self.processor,
            query: self.processor.apply(query),
        })
    }

    fn name(&self) -> &'static str {
        self.scorer.name()
    }

    fn is_symmetric(&self) -> bool {
        self.scorer.is_symmetric()
    }
}

/// Resolve a scorer from its configuration name.
///
/// # Errors
///
/// Returns [`FuzzError::UnknownScorer`] for names no scorer answers to.
///
/// # Example
/// ```
/// use rapidfuzz::scorer::by_name;
///
/// let scorer = by_name("token_sort_ratio").unwrap();
/// assert_eq!(scorer.score("new york mets", "mets new york", None), Some(100.0));
/// assert!(by_name("soundex").is_err());
/// ```
pub fn by_name(name: &str) -> Result<Box<dyn Scorer>> {
    let scorer: Box<dyn Scorer> = match name {
        "ratio" => Box::new(Ratio),
        "partial_ratio" => Box::new(PartialRatio),
        "token_sort_ratio" => Box::new(TokenSortRatio),
        "token_set_ratio" => Box::new(TokenSetRatio),
        "token_ratio" => Box::new(TokenRatio),
        "partial_token_sort_ratio" => Box::new(PartialTokenSortRatio),
        "partial_token_set_ratio" => Box::new(PartialTokenSetRatio),
        "partial_token_ratio" => Box::new(PartialTokenRatio),
        "wratio" => Box::new(WRatio),
        "qratio" => Box::new(QRatio),
        "levenshtein" => Box::new(NormalizedLevenshtein::default()),
        "indel" => Box::new(NormalizedIndel::default()),
        "hamming" => Box::new(NormalizedHamming),
        "damerau_levenshtein" => Box::new(NormalizedDamerauLevenshtein),
        "lcs" => Box::new(NormalizedLcs),
        "jaro" => Box::new(JaroSimilarity),
        "jaro_winkler" => Box::new(JaroWinklerSimilarity::default()),
        other => return Err(FuzzError::UnknownScorer(other.to_string())),
    };
    Ok(scorer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::NormalizationMode;

    const NAMES: [&str; 17] = [
        "ratio",
        "partial_ratio",
        "token_sort_ratio",
        "token_set_ratio",
        "token_ratio",
        "partial_token_sort_ratio",
        "partial_token_set_ratio",
        "partial_token_ratio",
        "wratio",
        "qratio",
        "levenshtein",
        "indel",
        "hamming",
        "damerau_levenshtein",
        "lcs",
        "jaro",
        "jaro_winkler",
    ];

    #[test]
    fn test_by_name_round_trips() {
        for name in NAMES {
            let scorer = by_name(name).unwrap();
            assert_eq!(scorer.name(), name);
            assert_eq!(scorer.score("abc", "abc", None), Some(100.0), "{}", name);
        }
        assert_eq!(
            by_name("nope").err(),
            Some(FuzzError::UnknownScorer("nope".into()))
        );
    }

    #[test]
    fn test_prepared_matches_pairwise() {
        let choices = ["sitting", "", "kitten", "kitchen sink", "mitten"];
        for name in NAMES {
            let scorer = by_name(name).unwrap();
            let prepared = scorer.prepare("kitten");
            for choice in choices {
                for cutoff in [None, Some(50.0), Some(90.0)] {
                    assert_eq!(
                        prepared.score(choice, cutoff),
                        scorer.score("kitten", choice, cutoff),
                        "{} vs {:?} at {:?}",
                        name,
                        choice,
                        cutoff
                    );
                }
            }
        }
    }

    #[test]
    fn test_cutoff_returns_none() {
        assert!(Ratio.score("kitten", "sitting", Some(58.0)).is_none());
        let exact = Ratio.score("kitten", "sitting", None).unwrap();
        assert_eq!(Ratio.score("kitten", "sitting", Some(exact)), Some(exact));
        assert!(NormalizedIndel::default()
            .score("kitten", "sitting", Some(70.0))
            .is_none());
    }

    #[test]
    fn test_kernel_scorers() {
        let lev = NormalizedLevenshtein::default();
        assert_eq!(
            lev.score("kitten", "sitting", None),
            Ratio.score("kitten", "sitting", None)
        );
        let weighted = NormalizedLevenshtein::new(CostModel::new(1, 1, 2));
        let indel = NormalizedIndel::default();
        assert_eq!(
            weighted.score("kitten", "sitting", None),
            indel.score("kitten", "sitting", None)
        );
        assert_eq!(NormalizedLcs.score("abcd", "abxd", None), Some(75.0));
        assert_eq!(NormalizedDamerauLevenshtein.score("ab", "ba", None), Some(50.0));
    }

    #[test]
    fn test_hamming_validation() {
        assert!(NormalizedHamming.validate("abc", "abd").is_ok());
        assert!(matches!(
            NormalizedHamming.validate("abc", "ab"),
            Err(FuzzError::InvalidInput(_))
        ));
        assert_eq!(NormalizedHamming.score("abc", "ab", None), None);
        assert!(Ratio.validate("abc", "ab").is_ok());
    }

    #[test]
    fn test_oversized_costs_fail_validation() {
        let scorer = NormalizedLevenshtein::new(CostModel::new(usize::MAX / 2, 1, 1));
        assert!(matches!(
            scorer.validate("ab", "abcd"),
            Err(FuzzError::InvalidCostModel(_))
        ));
        assert_eq!(scorer.score("ab", "abcd", None), None);
        assert!(scorer.validate("abcd", "ab").is_ok());
        assert_eq!(scorer.score("abcd", "ab", None), Some(50.0));

        let indel = NormalizedIndel::new(CostModel::new(usize::MAX, usize::MAX, usize::MAX));
        assert!(matches!(
            indel.validate("a", "b"),
            Err(FuzzError::InvalidCostModel(_))
        ));
        assert!(indel.validate("", "").is_ok());
    }

    #[test]
    fn test_jaro_winkler_scorer() {
        assert!(JaroWinklerSimilarity::new(0.3).is_err());
        let jw = JaroWinklerSimilarity::new(0.1).unwrap();
        let plain = JaroSimilarity.score("martha", "marhta", None).unwrap();
        assert!(jw.score("martha", "marhta", None).unwrap() > plain);
    }

    #[test]
    fn test_fn_scorer() {
        let first_char = FnScorer::new("first_char", |a: &str, b: &str| {
            if a.chars().next() == b.chars().next() {
                100.0
            } else {
                0.0
            }
        });
        assert_eq!(first_char.score("apple", "avocado", None), Some(100.0));
        assert_eq!(first_char.score("apple", "pear", Some(10.0)), None);
        assert_eq!(first_char.name(), "first_char");
        assert!(!first_char.is_symmetric());
    }

    #[test]
    fn test_processed() {
        let scorer = Processed::new(Ratio, Processor::Default);
        assert_eq!(scorer.score("New York!", "new york", None), Some(100.0));
        let prepared = scorer.prepare("New York!");
        assert_eq!(prepared.score("NEW-YORK", None), Some(100.0));

        let hamming = Processed::new(
            NormalizedHamming,
            Processor::Normalize(NormalizationMode::RemoveWhitespace),
        );
        assert!(hamming.validate("a b", "ab").is_ok());
    }
}
