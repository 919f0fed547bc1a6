//! Batch matching: one query against many choices, or many against many.
//!
//! - [`extract`]: top `limit` choices, best first
//! - [`extract_one`]: the single best choice
//! - [`extract_iter`]: every choice reaching the cutoff, lazily, in input order
//! - [`cdist`]: the full score matrix
//!
//! # Guarantees
//!
//! - Results are ordered by score descending, then by choice index ascending.
//! - The score cutoff is inclusive and every returned score reaches it.
//! - Preprocessing runs once for the query and once per choice.
//! - Inputs are validated before any scoring: a single pair the scorer cannot
//!   compare fails the whole call with no partial result.
//! - An empty choice list yields an empty result, never an error.
//!
//! # Parallelism
//!
//! From [`PARALLEL_THRESHOLD`] choices on, work is split across rayon workers.
//! `extract` gives each worker a contiguous chunk with its own top-k heap and
//! merges the heaps afterwards; `cdist` hands out disjoint rows of the output.
//! Both produce exactly the sequential result.

use crate::config::{CdistOptions, ExtractOptions};
use crate::error::{FuzzError, Result};
use crate::scorer::Scorer;
use crate::utils::Processor;
use rayon::prelude::*;
use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use tracing::{debug, trace};

/// Minimum input size for parallel processing.
///
/// Below this, sequential processing is faster than coordinating the thread
/// pool.
pub const PARALLEL_THRESHOLD: usize = 100;

/// A choice that reached the score cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtractedMatch<'a> {
    /// The choice as passed in, before preprocessing.
    pub choice: &'a str,
    pub score: f64,
    /// Position of the choice in the input.
    pub index: usize,
}

// ============================================================================
// Top-k selection
// ============================================================================

/// A scored choice in the heap.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    /// Worse candidates compare greater, so a max-heap keeps the worst on top
    /// and an ascending sort puts the best first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Bounded collection of the best candidates seen so far.
#[derive(Debug)]
struct TopK {
    limit: Option<usize>,
    heap: BinaryHeap<Candidate>,
}

impl TopK {
    fn new(limit: Option<usize>) -> Self {
        let capacity = limit.unwrap_or(0).min(1024);
        Self {
            limit,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.heap.len() >= limit)
    }

    /// Lowest score that can still enter: the caller's cutoff, raised to the
    /// worst kept score once the heap is full.
    fn threshold(&self, score_cutoff: Option<f64>) -> Option<f64> {
        if !self.is_full() {
            return score_cutoff;
        }
        match (self.heap.peek(), score_cutoff) {
            (Some(worst), Some(cutoff)) => Some(worst.score.max(cutoff)),
            (Some(worst), None) => Some(worst.score),
            (None, cutoff) => cutoff,
        }
    }

    fn push(&mut self, candidate: Candidate) {
        match self.limit {
            Some(0) => {}
            Some(limit) if self.heap.len() >= limit => {
                if let Some(mut worst) = self.heap.peek_mut() {
                    if candidate < *worst {
                        *worst = candidate;
                    }
                }
            }
            _ => self.heap.push(candidate),
        }
    }

    fn merge(&mut self, other: TopK) {
        for candidate in other.heap {
            self.push(candidate);
        }
    }

    /// Best first.
    fn into_sorted(self) -> Vec<Candidate> {
        self.heap.into_sorted_vec()
    }
}

// ============================================================================
// Shared plumbing
// ============================================================================

#[inline]
fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(AtomicOrdering::Relaxed))
}

fn check_cancelled(cancel: Option<&AtomicBool>) -> Result<()> {
    if is_cancelled(cancel) {
        trace!(target: "rapidfuzz::process", "Cancellation observed");
        return Err(FuzzError::Cancelled);
    }
    Ok(())
}

fn process_one<'a>(s: &'a str, processor: Option<&Processor>) -> Cow<'a, str> {
    match processor {
        Some(p) => Cow::Owned(p.apply(s)),
        None => Cow::Borrowed(s),
    }
}

fn process_all<'a, C: AsRef<str> + Sync>(
    items: &'a [C],
    processor: Option<&Processor>,
    parallel: bool,
) -> Vec<Cow<'a, str>> {
    if parallel && processor.is_some() {
        items
            .par_iter()
            .map(|item| process_one(item.as_ref(), processor))
            .collect()
    } else {
        items
            .iter()
            .map(|item| process_one(item.as_ref(), processor))
            .collect()
    }
}

/// Run `op` on a dedicated pool of `workers` threads, or on the global pool.
fn with_pool<T, F>(workers: Option<usize>, op: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> Result<T> + Send,
{
    match workers {
        Some(num_threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| FuzzError::ThreadPool(e.to_string()))?;
            pool.install(op)
        }
        None => op(),
    }
}

fn validate_pairs<S: Scorer + ?Sized>(
    scorer: &S,
    queries: &[Cow<'_, str>],
    choices: &[Cow<'_, str>],
) -> Result<()> {
    for query in queries {
        for choice in choices {
            scorer.validate(query, choice)?;
        }
    }
    Ok(())
}

// ============================================================================
// extract
// ============================================================================

/// Best `limit` choices for `query`.
///
/// # Errors
///
/// Invalid options, a pair the scorer cannot compare, or a failed worker pool.
///
/// # Example
/// ```
/// use rapidfuzz::config::ExtractOptions;
/// use rapidfuzz::process::extract;
/// use rapidfuzz::scorer::Ratio;
///
/// let choices = ["apples", "orange", "appel"];
/// let opts = ExtractOptions::new().with_limit(Some(2));
/// let best = extract("apple", &choices, &Ratio, &opts).unwrap();
/// let names: Vec<&str> = best.iter().map(|m| m.choice).collect();
/// assert_eq!(names, ["apples", "appel"]);
/// ```
pub fn extract<'a, C, S>(
    query: &str,
    choices: &'a [C],
    scorer: &S,
    options: &ExtractOptions,
) -> Result<Vec<ExtractedMatch<'a>>>
where
    C: AsRef<str> + Sync,
    S: Scorer + ?Sized,
{
    extract_with_cancel(query, choices, scorer, options, None)
}

/// [`extract`] that stops with [`FuzzError::Cancelled`] once `cancel` is set.
///
/// The flag is checked between choices.
pub fn extract_with_cancel<'a, C, S>(
    query: &str,
    choices: &'a [C],
    scorer: &S,
    options: &ExtractOptions,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<ExtractedMatch<'a>>>
where
    C: AsRef<str> + Sync,
    S: Scorer + ?Sized,
{
    options.validate()?;
    let parallel = choices.len() >= PARALLEL_THRESHOLD;
    debug!(
        target: "rapidfuzz::process",
        scorer = scorer.name(),
        choices = choices.len(),
        limit = ?options.limit,
        score_cutoff = ?options.score_cutoff,
        parallel,
        "extract"
    );

    if choices.is_empty() || options.limit == Some(0) {
        return Ok(Vec::new());
    }

    let processor = options.processor.as_ref();
    let run = || -> Result<TopK> {
        let query = process_one(query, processor);
        let processed = process_all(choices, processor, parallel);
        validate_pairs(scorer, std::slice::from_ref(&query), &processed)?;

        let prepared = scorer.prepare(&query);
        let collect_chunk = |offset: usize, chunk: &[Cow<'a, str>]| -> Result<TopK> {
            let mut top = TopK::new(options.limit);
            for (i, choice) in chunk.iter().enumerate() {
                check_cancelled(cancel)?;
                let cutoff = top.threshold(options.score_cutoff);
                match prepared.score(choice, cutoff) {
                    Some(score) if !score.is_nan() => top.push(Candidate {
                        score,
                        index: offset + i,
                    }),
                    _ => {}
                }
            }
            trace!(
                target: "rapidfuzz::process",
                offset,
                scored = chunk.len(),
                kept = top.heap.len(),
                threshold = ?top.threshold(options.score_cutoff),
                "chunk scored"
            );
            Ok(top)
        };

        if !parallel {
            return collect_chunk(0, &processed);
        }

        let chunk_size = processed
            .len()
            .div_ceil(rayon::current_num_threads())
            .max(1);
        let partials: Vec<TopK> = processed
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(n, chunk)| collect_chunk(n * chunk_size, chunk))
            .collect::<Result<_>>()?;

        let mut merged = TopK::new(options.limit);
        for partial in partials {
            merged.merge(partial);
        }
        Ok(merged)
    };

    let top = if parallel {
        with_pool(options.workers, run)?
    } else {
        run()?
    };

    let matches: Vec<ExtractedMatch<'a>> = top
        .into_sorted()
        .into_iter()
        .map(|c| ExtractedMatch {
            choice: choices[c.index].as_ref(),
            score: c.score,
            index: c.index,
        })
        .collect();
    trace!(
        target: "rapidfuzz::process",
        matched = matches.len(),
        "extract finished"
    );
    Ok(matches)
}

/// Best single choice, or `None` when nothing reaches the cutoff.
///
/// `options.limit` is ignored.
pub fn extract_one<'a, C, S>(
    query: &str,
    choices: &'a [C],
    scorer: &S,
    options: &ExtractOptions,
) -> Result<Option<ExtractedMatch<'a>>>
where
    C: AsRef<str> + Sync,
    S: Scorer + ?Sized,
{
    let options = options.with_limit(Some(1));
    Ok(extract(query, choices, scorer, &options)?.into_iter().next())
}

/// Lazy iterator over every choice that reaches the cutoff, in input order.
///
/// Created by [`extract_iter`]. Choices are preprocessed and validated when the
/// iterator is built; scoring happens on demand.
pub struct ExtractIter<'a, 's, S: ?Sized> {
    scorer: &'s S,
    query: String,
    originals: Vec<&'a str>,
    processed: Vec<Cow<'a, str>>,
    score_cutoff: Option<f64>,
    position: usize,
}

impl<'a, S: Scorer + ?Sized> Iterator for ExtractIter<'a, '_, S> {
    type Item = ExtractedMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.processed.len() {
            let index = self.position;
            self.position += 1;
            if let Some(score) =
                self.scorer
                    .score(&self.query, &self.processed[index], self.score_cutoff)
            {
                return Some(ExtractedMatch {
                    choice: self.originals[index],
                    score,
                    index,
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.processed.len() - self.position))
    }
}

/// Every choice reaching the cutoff, scored lazily in input order.
///
/// `options.limit` and `options.workers` are ignored.
///
/// # Errors
///
/// Invalid options, or a pair the scorer cannot compare.
pub fn extract_iter<'a, 's, C, S>(
    query: &str,
    choices: &'a [C],
    scorer: &'s S,
    options: &ExtractOptions,
) -> Result<ExtractIter<'a, 's, S>>
where
    C: AsRef<str> + Sync,
    S: Scorer + ?Sized,
{
    options.validate()?;
    debug!(
        target: "rapidfuzz::process",
        scorer = scorer.name(),
        choices = choices.len(),
        score_cutoff = ?options.score_cutoff,
        "extract_iter"
    );

    let processor = options.processor.as_ref();
    let query = process_one(query, processor).into_owned();
    let processed = process_all(choices, processor, false);
    for choice in &processed {
        scorer.validate(&query, choice)?;
    }

    Ok(ExtractIter {
        scorer,
        query,
        originals: choices.iter().map(AsRef::as_ref).collect(),
        processed,
        score_cutoff: options.score_cutoff,
        position: 0,
    })
}

// ============================================================================
// cdist
// ============================================================================

/// Row-major `rows x cols` score matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl ScoreMatrix {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Score of query `row` against choice `col`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[must_use]
    pub fn to_vecs(&self) -> Vec<Vec<f64>> {
        (0..self.rows)
            .map(|r| self.data[r * self.cols..(r + 1) * self.cols].to_vec())
            .collect()
    }
}

/// Score every query against every choice.
///
/// Cell `(i, j)` holds `scorer.score(queries[i], choices[j])`, or `0.0` when
/// that falls below the cutoff.
///
/// # Errors
///
/// Invalid options, a pair the scorer cannot compare, or a failed worker pool.
///
/// # Example
/// ```
/// use rapidfuzz::config::CdistOptions;
/// use rapidfuzz::process::cdist;
/// use rapidfuzz::scorer::Ratio;
///
/// let m = cdist(&["a", "b"], &["a", "c"], &Ratio, &CdistOptions::default()).unwrap();
/// assert_eq!(m.get(0, 0), Some(100.0));
/// assert_eq!(m.get(0, 1), m.get(1, 1));
/// ```
pub fn cdist<Q, C, S>(
    queries: &[Q],
    choices: &[C],
    scorer: &S,
    options: &CdistOptions,
) -> Result<ScoreMatrix>
where
    Q: AsRef<str> + Sync,
    C: AsRef<str> + Sync,
    S: Scorer + ?Sized,
{
    cdist_with_cancel(queries, choices, scorer, options, None)
}

/// [`cdist`] that stops with [`FuzzError::Cancelled`] once `cancel` is set.
pub fn cdist_with_cancel<Q, C, S>(
    queries: &[Q],
    choices: &[C],
    scorer: &S,
    options: &CdistOptions,
    cancel: Option<&AtomicBool>,
) -> Result<ScoreMatrix>
where
    Q: AsRef<str> + Sync,
    C: AsRef<str> + Sync,
    S: Scorer + ?Sized,
{
    options.validate()?;
    let rows = queries.len();
    let cols = choices.len();
    let parallel = rows.saturating_mul(cols) >= PARALLEL_THRESHOLD;
    debug!(
        target: "rapidfuzz::process",
        scorer = scorer.name(),
        rows,
        cols,
        score_cutoff = ?options.score_cutoff,
        parallel,
        "cdist"
    );

    if rows == 0 || cols == 0 {
        return Ok(ScoreMatrix {
            rows,
            cols,
            data: Vec::new(),
        });
    }

    let processor = options.processor.as_ref();
    let score_cutoff = options.score_cutoff;
    let run = || -> Result<Vec<f64>> {
        let processed_queries = process_all(queries, processor, parallel);
        let processed_choices = process_all(choices, processor, parallel);
        validate_pairs(scorer, &processed_queries, &processed_choices)?;

        let fill_row = |query: &str, out: &mut [f64]| -> Result<()> {
            let prepared = scorer.prepare(query);
            for (cell, choice) in out.iter_mut().zip(&processed_choices) {
                check_cancelled(cancel)?;
                *cell = prepared.score(choice, score_cutoff).unwrap_or(0.0);
            }
            Ok(())
        };

        let mut data = vec![0.0; rows * cols];
        if parallel {
            data.par_chunks_mut(cols)
                .zip(processed_queries.par_iter())
                .try_for_each(|(out, query)| fill_row(query, out))?;
        } else {
            for (out, query) in data.chunks_mut(cols).zip(&processed_queries) {
                fill_row(query, out)?;
            }
        }
        Ok(data)
    };

    let data = if parallel {
        with_pool(options.workers, run)?
    } else {
        run()?
    };
    Ok(ScoreMatrix { rows, cols, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::{FnScorer, NormalizedHamming, Ratio, WRatio};

    fn names<'a>(matches: &[ExtractedMatch<'a>]) -> Vec<&'a str> {
        matches.iter().map(|m| m.choice).collect()
    }

    #[test]
    fn test_candidate_ordering() {
        let better = Candidate { score: 90.0, index: 5 };
        let worse = Candidate { score: 80.0, index: 0 };
        let tie_later = Candidate { score: 90.0, index: 7 };
        assert!(better < worse);
        assert!(better < tie_later);
    }

    #[test]
    fn test_top_k_keeps_best() {
        let mut top = TopK::new(Some(2));
        for (index, score) in [(0, 10.0), (1, 50.0), (2, 30.0), (3, 50.0), (4, 70.0)] {
            top.push(Candidate { score, index });
        }
        let kept: Vec<usize> = top.into_sorted().iter().map(|c| c.index).collect();
        assert_eq!(kept, vec![4, 1]);
    }

    #[test]
    fn test_top_k_threshold() {
        let mut top = TopK::new(Some(1));
        assert_eq!(top.threshold(Some(20.0)), Some(20.0));
        top.push(Candidate { score: 60.0, index: 0 });
        assert_eq!(top.threshold(Some(20.0)), Some(60.0));
        assert_eq!(top.threshold(None), Some(60.0));
    }

    #[test]
    fn test_extract_basic() {
        let choices = ["apples", "orange", "appel"];
        let opts = ExtractOptions::new().with_limit(Some(2));
        let result = extract("apple", &choices, &Ratio, &opts).unwrap();
        assert_eq!(names(&result), vec!["apples", "appel"]);
        assert_eq!(result[0].index, 0);
        assert_eq!(result[1].index, 2);
        assert!(result[0].score >= result[1].score);
    }

    #[test]
    fn test_extract_ties_by_index() {
        let choices = ["abd", "abc", "abe", "abc"];
        let opts = ExtractOptions::new().with_limit(None);
        let result = extract("abx", &choices, &Ratio, &opts).unwrap();
        let indices: Vec<usize> = result.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_extract_cutoff_and_empty() {
        let choices = ["apple", "banana"];
        let opts = ExtractOptions::new().with_score_cutoff(90.0);
        let result = extract("apple", &choices, &Ratio, &opts).unwrap();
        assert_eq!(names(&result), vec!["apple"]);

        let empty: [&str; 0] = [];
        assert!(extract("apple", &empty, &Ratio, &opts).unwrap().is_empty());
        let zero = ExtractOptions::new().with_limit(Some(0));
        assert!(extract("apple", &choices, &Ratio, &zero).unwrap().is_empty());
    }

    #[test]
    fn test_extract_with_processor() {
        let choices = vec!["APPLE!".to_string(), "pear".to_string()];
        let opts = ExtractOptions::new().with_processor(Processor::Default);
        let best = extract_one("apple", &choices, &Ratio, &opts).unwrap().unwrap();
        assert_eq!(best.choice, "APPLE!");
        assert_eq!(best.score, 100.0);
    }

    #[test]
    fn test_extract_one() {
        let choices = ["orange", "apples", "appel"];
        let best = extract_one("apple", &choices, &Ratio, &ExtractOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(best.choice, "apples");
        assert_eq!(best.index, 1);

        let opts = ExtractOptions::new().with_score_cutoff(99.0);
        assert!(extract_one("apple", &choices, &Ratio, &opts).unwrap().is_none());
    }

    #[test]
    fn test_extract_parallel_matches_sequential() {
        let choices: Vec<String> = (0..500).map(|i| format!("item {}", i % 37)).collect();
        let opts = ExtractOptions::new().with_limit(Some(10));
        let parallel = extract("item 12", &choices, &WRatio, &opts).unwrap();

        let mut expected: Vec<(f64, usize)> = choices
            .iter()
            .enumerate()
            .map(|(i, c)| (crate::fuzz::wratio("item 12", c, None), i))
            .collect();
        expected.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        let expected: Vec<usize> = expected.iter().take(10).map(|e| e.1).collect();
        let got: Vec<usize> = parallel.iter().map(|m| m.index).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_extract_dedicated_pool() {
        let choices: Vec<String> = (0..200).map(|i| format!("choice{}", i)).collect();
        let opts = ExtractOptions::new().with_workers(2).with_limit(Some(1));
        let best = extract("choice42", &choices, &Ratio, &opts).unwrap();
        assert_eq!(best[0].index, 42);
    }

    #[test]
    fn test_extract_iter() {
        let choices = ["apple", "banana", "apply", "grape"];
        let opts = ExtractOptions::new().with_score_cutoff(50.0);
        let all: Vec<_> = extract_iter("apple", &choices, &Ratio, &opts)
            .unwrap()
            .collect();
        assert_eq!(names(&all), vec!["apple", "apply"]);
        assert_eq!(all[1].index, 2);
    }

    #[test]
    fn test_validation_is_atomic() {
        let choices = ["abc", "abcd", "abd"];
        let opts = ExtractOptions::default();
        assert!(matches!(
            extract("abc", &choices, &NormalizedHamming, &opts),
            Err(FuzzError::InvalidInput(_))
        ));
        assert!(extract_iter("abc", &choices, &NormalizedHamming, &opts).is_err());
        assert!(cdist(&["abc"], &choices, &NormalizedHamming, &CdistOptions::default()).is_err());
    }

    #[test]
    fn test_invalid_options() {
        let opts = ExtractOptions::new().with_score_cutoff(-5.0);
        assert!(matches!(
            extract("a", &["a"], &Ratio, &opts),
            Err(FuzzError::InvalidScoreCutoff(_))
        ));
    }

    #[test]
    fn test_cancellation() {
        let flag = AtomicBool::new(true);
        let choices = ["a", "b"];
        let result =
            extract_with_cancel("a", &choices, &Ratio, &ExtractOptions::default(), Some(&flag));
        assert_eq!(result, Err(FuzzError::Cancelled));

        let result = cdist_with_cancel(&["a"], &choices, &Ratio, &CdistOptions::default(), Some(&flag));
        assert_eq!(result, Err(FuzzError::Cancelled));

        let idle = AtomicBool::new(false);
        assert!(extract_with_cancel("a", &choices, &Ratio, &ExtractOptions::default(), Some(&idle)).is_ok());
    }

    #[test]
    fn test_cdist_basic() {
        let m = cdist(&["a", "b"], &["a", "c"], &Ratio, &CdistOptions::default()).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 2));
        assert_eq!(m.get(0, 0), Some(100.0));
        assert_eq!(m.get(0, 1), m.get(1, 1));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.to_vecs(), vec![vec![100.0, 0.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn test_cdist_cutoff_and_empty() {
        let opts = CdistOptions::new().with_score_cutoff(60.0);
        let m = cdist(&["kitten"], &["sitting", "kitten"], &Ratio, &opts).unwrap();
        assert_eq!(m.row(0), Some(&[0.0, 100.0][..]));

        let empty: [&str; 0] = [];
        let m = cdist(&empty, &["a"], &Ratio, &CdistOptions::default()).unwrap();
        assert_eq!((m.rows(), m.cols()), (0, 1));
        assert!(m.as_slice().is_empty());
        let m = cdist(&["a"], &empty, &Ratio, &CdistOptions::default()).unwrap();
        assert_eq!(m.row(0), Some(&[][..]));
    }

    #[test]
    fn test_cdist_parallel_matches_pairwise() {
        let words: Vec<String> = (0..20).map(|i| format!("word{}", i * 7)).collect();
        let scorer = FnScorer::new("len_diff", |a: &str, b: &str| {
            100.0 - (a.len() as f64 - b.len() as f64).abs()
        });
        let m = cdist(&words, &words, &scorer, &CdistOptions::default()).unwrap();
        for (i, q) in words.iter().enumerate() {
            for (j, c) in words.iter().enumerate() {
                assert_eq!(m.get(i, j), scorer.score(q, c, None));
            }
        }
    }
}
