//! Ratio-style similarity scores in [0, 100].
//!
//! This module provides the familiar fuzzy matching ratios:
//! - `ratio`: normalized Levenshtein similarity
//! - `partial_ratio`: best window of the longer string against the shorter
//! - `token_sort_ratio`, `token_set_ratio`: word-order-insensitive comparison
//! - `wratio`: weighted pick of the best method for the input
//!
//! Every function takes an inclusive `score_cutoff`. A score below it is
//! reported as `0.0`, and the cutoff is turned into a distance bound so
//! hopeless comparisons stop early. A cutoff above 100 matches nothing.
//!
//! Tokens are maximal runs of non-whitespace characters. No case folding
//! happens here; see [`crate::utils`] for preprocessing.

use crate::string_metric::levenshtein::{distance_with_block, levenshtein_slices_bounded};
use crate::string_metric::pattern::{chars_of, PatternBlock};
use crate::string_metric::{apply_cutoff, cutoff_to_distance, score_from_distance};
use std::hash::Hash;

/// Weight for token ratios in [`wratio`].
const UNBASE_SCALE: f64 = 0.95;

/// Weight for partial ratios in [`wratio`] when lengths are comparable.
const PARTIAL_SCALE: f64 = 0.9;

/// Weight for partial ratios in [`wratio`] when one string is 8x longer.
const PARTIAL_SCALE_LONG: f64 = 0.6;

#[inline]
fn finalize(score: f64, score_cutoff: Option<f64>) -> f64 {
    apply_cutoff(score, score_cutoff).unwrap_or(0.0)
}

/// Cutoff for a sub-score that is multiplied by `scale` afterwards.
///
/// Stepped down until `cutoff * scale` falls below `threshold`, so a sub-score
/// whose scaled value reaches `threshold` is never pruned by float rounding.
fn unscaled_cutoff(threshold: f64, scale: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    let mut cutoff = threshold / scale;
    while cutoff > 0.0 && cutoff * scale >= threshold {
        cutoff = f64::from_bits(cutoff.to_bits() - 1);
    }
    cutoff
}

/// Normalized Levenshtein similarity of two sequences.
pub(crate) fn ratio_slices<T: Eq + Hash + Clone>(
    a: &[T],
    b: &[T],
    score_cutoff: Option<f64>,
) -> f64 {
    let max = a.len().max(b.len());
    if max == 0 {
        return finalize(100.0, score_cutoff);
    }
    let Some(bound) = cutoff_to_distance(score_cutoff, max) else {
        return 0.0;
    };
    match levenshtein_slices_bounded(a, b, Some(bound)) {
        Some(dist) => finalize(score_from_distance(dist, max), score_cutoff),
        None => 0.0,
    }
}

/// [`ratio`] against a query whose pattern block was built up front.
pub(crate) fn ratio_with_block(
    block: &PatternBlock<char>,
    choice: &[char],
    score_cutoff: Option<f64>,
) -> f64 {
    let max = block.len().max(choice.len());
    if max == 0 {
        return finalize(100.0, score_cutoff);
    }
    let Some(bound) = cutoff_to_distance(score_cutoff, max) else {
        return 0.0;
    };
    match distance_with_block(block, choice, Some(bound)) {
        Some(dist) => finalize(score_from_distance(dist, max), score_cutoff),
        None => 0.0,
    }
}

/// Normalized Levenshtein similarity, `100 * (1 - distance / max_len)`.
///
/// # Examples
/// ```
/// use rapidfuzz::fuzz::ratio;
///
/// let score = ratio("kitten", "sitting", None);
/// assert!((score - 57.14).abs() < 0.01);
/// assert_eq!(ratio("kitten", "sitting", Some(60.0)), 0.0);
/// ```
#[must_use]
pub fn ratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    if s1 == s2 {
        return finalize(100.0, score_cutoff);
    }
    ratio_slices(&chars_of(s1), &chars_of(s2), score_cutoff)
}

/// Location of the best [`partial_ratio`] window.
///
/// `src_*` are char offsets into the first argument, `dest_*` into the second.
/// The shorter string is always matched as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAlignment {
    pub score: f64,
    pub src_start: usize,
    pub src_end: usize,
    pub dest_start: usize,
    pub dest_end: usize,
}

/// Best window of `longer` against `shorter`: (score, window start).
///
/// Windows are scanned left to right and only a strictly better score
/// replaces the current best, so the first maximal window wins.
fn best_window(shorter: &[char], longer: &[char], score_cutoff: Option<f64>) -> Option<(f64, usize)> {
    let m = shorter.len();
    let block = PatternBlock::new(shorter);
    let mut best: Option<(f64, usize)> = None;

    for start in 0..=(longer.len() - m) {
        let cutoff = match (score_cutoff, best) {
            (_, Some((score, _))) => Some(score),
            (cutoff, None) => cutoff,
        };
        let Some(bound) = cutoff_to_distance(cutoff, m) else {
            break;
        };
        let Some(dist) = distance_with_block(&block, &longer[start..start + m], Some(bound)) else {
            continue;
        };
        let score = score_from_distance(dist, m);
        let improves = match best {
            Some((best_score, _)) => score > best_score,
            None => apply_cutoff(score, score_cutoff).is_some(),
        };
        if improves {
            best = Some((score, start));
            if dist == 0 {
                break;
            }
        }
    }
    best
}

/// Best partial match with its location, or `None` below the cutoff.
///
/// # Examples
/// ```
/// use rapidfuzz::fuzz::partial_ratio_alignment;
///
/// let al = partial_ratio_alignment("this is a test", "test", None).unwrap();
/// assert_eq!(al.score, 100.0);
/// assert_eq!((al.src_start, al.src_end), (10, 14));
/// assert_eq!((al.dest_start, al.dest_end), (0, 4));
/// ```
#[must_use]
pub fn partial_ratio_alignment(
    s1: &str,
    s2: &str,
    score_cutoff: Option<f64>,
) -> Option<ScoreAlignment> {
    let a = chars_of(s1);
    let b = chars_of(s2);
    let (len1, len2) = (a.len(), b.len());

    if len1 == 0 || len2 == 0 {
        let score = if len1 == len2 { 100.0 } else { 0.0 };
        return apply_cutoff(score, score_cutoff).map(|score| ScoreAlignment {
            score,
            src_start: 0,
            src_end: len1,
            dest_start: 0,
            dest_end: len2,
        });
    }

    if len1 <= len2 {
        let (score, start) = best_window(&a, &b, score_cutoff)?;
        Some(ScoreAlignment {
            score,
            src_start: 0,
            src_end: len1,
            dest_start: start,
            dest_end: start + len1,
        })
    } else {
        let (score, start) = best_window(&b, &a, score_cutoff)?;
        Some(ScoreAlignment {
            score,
            src_start: start,
            src_end: start + len2,
            dest_start: 0,
            dest_end: len2,
        })
    }
}

/// Best [`ratio`] of the shorter string against every equally long window of
/// the longer one.
///
/// # Examples
/// ```
/// use rapidfuzz::fuzz::partial_ratio;
///
/// assert_eq!(partial_ratio("test", "this is a test!", None), 100.0);
/// ```
#[must_use]
pub fn partial_ratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    partial_ratio_alignment(s1, s2, score_cutoff).map_or(0.0, |al| al.score)
}

// =============================================================================
// Token ratios
// =============================================================================

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// Sorted, deduplicated tokens of both strings split into
/// (intersection, only in a, only in b).
struct TokenSets<'a> {
    intersection: Vec<&'a str>,
    diff_ab: Vec<&'a str>,
    diff_ba: Vec<&'a str>,
}

impl<'a> TokenSets<'a> {
    fn new(tokens_a: &[&'a str], tokens_b: &[&'a str]) -> Self {
        let mut set_a = tokens_a.to_vec();
        let mut set_b = tokens_b.to_vec();
        set_a.dedup();
        set_b.dedup();

        let mut sets = Self {
            intersection: Vec::new(),
            diff_ab: Vec::new(),
            diff_ba: Vec::new(),
        };
        // Merge of two sorted lists
        let (mut i, mut j) = (0, 0);
        while i < set_a.len() && j < set_b.len() {
            match set_a[i].cmp(set_b[j]) {
                std::cmp::Ordering::Equal => {
                    sets.intersection.push(set_a[i]);
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => {
                    sets.diff_ab.push(set_a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    sets.diff_ba.push(set_b[j]);
                    j += 1;
                }
            }
        }
        sets.diff_ab.extend_from_slice(&set_a[i..]);
        sets.diff_ba.extend_from_slice(&set_b[j..]);
        sets
    }
}

fn join_parts(head: &str, tail: &[&str]) -> String {
    let tail = tail.join(" ");
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail,
        (_, true) => head.to_string(),
        _ => format!("{} {}", head, tail),
    }
}

/// [`ratio`] after sorting the whitespace-separated tokens of both strings.
///
/// # Examples
/// ```
/// use rapidfuzz::fuzz::token_sort_ratio;
///
/// assert_eq!(token_sort_ratio("new york mets", "mets new york", None), 100.0);
/// ```
#[must_use]
pub fn token_sort_ratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    let sorted1 = sorted_tokens(s1).join(" ");
    let sorted2 = sorted_tokens(s2).join(" ");
    ratio(&sorted1, &sorted2, score_cutoff)
}

fn token_set_from(sets: &TokenSets<'_>, score_cutoff: Option<f64>) -> f64 {
    let sect = sets.intersection.join(" ");
    let combined_a = join_parts(&sect, &sets.diff_ab);
    let combined_b = join_parts(&sect, &sets.diff_ba);

    let mut best = ratio(&combined_a, &combined_b, score_cutoff);
    if !sect.is_empty() {
        let cutoff = Some(score_cutoff.unwrap_or(0.0).max(best));
        best = best.max(ratio(&sect, &combined_a, cutoff));
        let cutoff = Some(score_cutoff.unwrap_or(0.0).max(best));
        best = best.max(ratio(&sect, &combined_b, cutoff));
    }
    finalize(best, score_cutoff)
}

/// Set-based token similarity.
///
/// Builds the sorted intersection of both token sets and appends each side's
/// remaining tokens to it, then returns the best [`ratio`] among the three
/// resulting strings. Returns 0 when either string has no tokens.
///
/// # Examples
/// ```
/// use rapidfuzz::fuzz::token_set_ratio;
///
/// assert_eq!(token_set_ratio("fuzzy was a bear", "fuzzy fuzzy was a bear", None), 100.0);
/// ```
#[must_use]
pub fn token_set_ratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    let tokens_a = sorted_tokens(s1);
    let tokens_b = sorted_tokens(s2);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    token_set_from(&TokenSets::new(&tokens_a, &tokens_b), score_cutoff)
}

/// Maximum of [`token_sort_ratio`] and [`token_set_ratio`].
#[must_use]
pub fn token_ratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    let tokens_a = sorted_tokens(s1);
    let tokens_b = sorted_tokens(s2);

    let sort_score = ratio(&tokens_a.join(" "), &tokens_b.join(" "), score_cutoff);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return sort_score;
    }
    let cutoff = Some(score_cutoff.unwrap_or(0.0).max(sort_score));
    let set_score = token_set_from(&TokenSets::new(&tokens_a, &tokens_b), cutoff);
    finalize(sort_score.max(set_score), score_cutoff)
}

/// [`partial_ratio`] after sorting the tokens of both strings.
#[must_use]
pub fn partial_token_sort_ratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    let sorted1 = sorted_tokens(s1).join(" ");
    let sorted2 = sorted_tokens(s2).join(" ");
    partial_ratio(&sorted1, &sorted2, score_cutoff)
}

/// [`partial_ratio`] of the token set differences.
///
/// Any shared token makes one string's tokens a partial match of the other's,
/// so the result is 100 whenever the token sets intersect.
#[must_use]
pub fn partial_token_set_ratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    let tokens_a = sorted_tokens(s1);
    let tokens_b = sorted_tokens(s2);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let sets = TokenSets::new(&tokens_a, &tokens_b);
    if !sets.intersection.is_empty() {
        return finalize(100.0, score_cutoff);
    }
    partial_ratio(&sets.diff_ab.join(" "), &sets.diff_ba.join(" "), score_cutoff)
}

/// Maximum of [`partial_token_sort_ratio`] and [`partial_token_set_ratio`].
#[must_use]
pub fn partial_token_ratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    let tokens_a = sorted_tokens(s1);
    let tokens_b = sorted_tokens(s2);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let sets = TokenSets::new(&tokens_a, &tokens_b);
    if !sets.intersection.is_empty() {
        return finalize(100.0, score_cutoff);
    }

    let sort_score = partial_ratio(&tokens_a.join(" "), &tokens_b.join(" "), score_cutoff);
    // Without duplicates the set differences are the sorted tokens again
    if sets.diff_ab.len() == tokens_a.len() && sets.diff_ba.len() == tokens_b.len() {
        return sort_score;
    }
    let cutoff = Some(score_cutoff.unwrap_or(0.0).max(sort_score));
    let set_score = partial_ratio(&sets.diff_ab.join(" "), &sets.diff_ba.join(" "), cutoff);
    finalize(sort_score.max(set_score), score_cutoff)
}

// =============================================================================
// Combined ratios
// =============================================================================

/// Weighted ratio: picks the best method for the input.
///
/// - similar lengths (ratio below 1.5): max of [`ratio`] and
///   [`token_ratio`] scaled by 0.95
/// - otherwise partial methods take over, scaled by 0.9 (or 0.6 once one
///   string is at least 8 times longer)
///
/// Returns 0 when either string is empty.
///
/// # Examples
/// ```
/// use rapidfuzz::fuzz::wratio;
///
/// assert!(wratio("this is a test", "this is a test!", None) > 90.0);
/// assert_eq!(wratio("", "abc", None), 0.0);
/// ```
#[must_use]
pub fn wratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    if len1 == 0 || len2 == 0 {
        return 0.0;
    }

    let floor = score_cutoff.unwrap_or(0.0);
    let len_ratio = len1.max(len2) as f64 / len1.min(len2) as f64;
    let mut end_ratio = ratio(s1, s2, score_cutoff);

    if len_ratio < 1.5 {
        let cutoff = unscaled_cutoff(floor.max(end_ratio), UNBASE_SCALE);
        let token = token_ratio(s1, s2, Some(cutoff)) * UNBASE_SCALE;
        return finalize(end_ratio.max(token), score_cutoff);
    }

    let partial_scale = if len_ratio < 8.0 {
        PARTIAL_SCALE
    } else {
        PARTIAL_SCALE_LONG
    };

    let cutoff = unscaled_cutoff(floor.max(end_ratio), partial_scale);
    end_ratio = end_ratio.max(partial_ratio(s1, s2, Some(cutoff)) * partial_scale);

    let cutoff = unscaled_cutoff(floor.max(end_ratio), UNBASE_SCALE);
    let token = partial_token_ratio(s1, s2, Some(cutoff)) * UNBASE_SCALE * partial_scale;
    finalize(end_ratio.max(token), score_cutoff)
}

/// Quick ratio: [`ratio`], but 0 when either string is empty.
#[must_use]
pub fn qratio(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }
    ratio(s1, s2, score_cutoff)
}
