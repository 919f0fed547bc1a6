//! String preprocessing applied before scoring.
//!
//! Nothing here is applied implicitly. Callers either preprocess themselves
//! or hand a [`Processor`] to the batch engine, which runs it exactly once per
//! query and once per choice.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Lowercase, replace every non-alphanumeric character with a space, and trim.
///
/// # Example
/// ```
/// use rapidfuzz::utils::default_process;
///
/// assert_eq!(default_process("  New-York, NY! "), "new york  ny");
/// ```
#[must_use]
pub fn default_process(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else {
            out.push(' ');
        }
    }
    let trimmed = out.trim();
    if trimmed.len() == out.len() {
        out
    } else {
        trimmed.to_string()
    }
}

/// Normalization mode for string preprocessing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Convert to lowercase only
    Lowercase,
    /// Apply Unicode NFKD normalization
    #[serde(rename = "unicode_nfkd")]
    UnicodeNFKD,
    /// Remove ASCII punctuation characters
    RemovePunctuation,
    /// Remove all whitespace
    RemoveWhitespace,
    /// NFKD, lowercase, then drop punctuation and whitespace
    Strict,
}

/// Normalize a string according to the specified mode
#[must_use]
pub fn normalize_string(s: &str, mode: NormalizationMode) -> String {
    match mode {
        NormalizationMode::Lowercase => s.to_lowercase(),
        NormalizationMode::UnicodeNFKD => s.nfkd().collect(),
        NormalizationMode::RemovePunctuation => {
            s.chars().filter(|c| !c.is_ascii_punctuation()).collect()
        }
        NormalizationMode::RemoveWhitespace => s.chars().filter(|c| !c.is_whitespace()).collect(),
        NormalizationMode::Strict => s
            .nfkd()
            .flat_map(char::to_lowercase)
            .filter(|c| !c.is_ascii_punctuation() && !c.is_whitespace())
            .collect(),
    }
}

/// Preprocessing step the batch engine applies to the query and every choice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Processor {
    /// [`default_process`]
    Default,
    /// [`normalize_string`] with the given mode
    Normalize(NormalizationMode),
    /// Caller-supplied function; not representable in configuration files.
    #[serde(skip)]
    Custom(fn(&str) -> String),
}

impl Processor {
    #[must_use]
    pub fn apply(&self, s: &str) -> String {
        match self {
            Processor::Default => default_process(s),
            Processor::Normalize(mode) => normalize_string(s, *mode),
            Processor::Custom(f) => f(s),
        }
    }
}
