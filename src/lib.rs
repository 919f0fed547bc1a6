//! rapidfuzz - fast fuzzy string matching
//!
//! Computes how similar two strings are and ranks a collection of choices
//! against a query.
//!
//! # Features
//! - Edit-distance kernels: Levenshtein (bit-parallel, weighted),
//!   Damerau-Levenshtein, Hamming, Indel, LCS, plus Jaro and Jaro-Winkler
//! - Normalized similarity in [0, 100] and the `fuzz` ratio family
//! - A [`Scorer`](scorer::Scorer) trait so batch operations work with any metric
//! - Parallel `extract` and `cdist` with score-cutoff pruning and top-k selection
//! - Unicode support: `&str` entry points compare Unicode scalar values, and
//!   every kernel also accepts generic slices
//!
//! # Example
//! ```
//! use rapidfuzz::{fuzz, process, scorer::Ratio, ExtractOptions};
//!
//! assert_eq!(fuzz::token_sort_ratio("new york mets", "mets new york", None), 100.0);
//!
//! let choices = ["apples", "orange", "appel"];
//! let best = process::extract_one("apple", &choices, &Ratio, &ExtractOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(best.choice, "apples");
//! ```

pub mod config;
pub mod error;
pub mod fuzz;
pub mod process;
pub mod scorer;
pub mod string_metric;
pub mod utils;

pub use config::{CdistOptions, ExtractOptions};
pub use error::{FuzzError, Result};
pub use process::{cdist, extract, extract_iter, extract_one, ExtractedMatch, ScoreMatrix};
pub use scorer::{PreparedQuery, Scorer};
pub use string_metric::{distance, normalized_distance, similarity, CostModel, Kernel};
pub use utils::{default_process, NormalizationMode, Processor};
