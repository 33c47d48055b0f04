//! Weighted multi-field fuzzy matcher.
//!
//! A query is matched against each configured field of a record with a
//! typo-tolerant substring search. Every field that matches contributes
//! `score ^ (weight * norm)` to the record score, so a hit in a heavily
//! weighted field pulls the record further towards 0 (perfect) than the same
//! hit in a lightly weighted one. Records are returned best first.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, SearchError};
use crate::fuzzy::{has_alphabet_run, substring_edit_costs};
use crate::model::Searchable;
use crate::SearchResult;

/// Longest query slice scored in one pass; longer queries are split.
pub const MAX_CHUNK_LEN: usize = 32;

/// Floor applied to approximate match scores so only whole-field equality scores 0.
const MIN_MATCH_SCORE: f64 = 0.001;

/// Matching options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Acceptance threshold, 0.0 (perfect only) to 1.0 (anything)
    pub threshold: f64,
    /// Character distance over which a location penalty grows to 1.0
    pub distance: u32,
    /// Shortest matched stretch that counts as a match
    pub min_match_char_length: usize,
    /// Score matches the same wherever they occur in the field
    pub ignore_location: bool,
    /// Expected match position when location matters
    pub location: usize,
    /// Compare without lowercasing
    pub case_sensitive: bool,
    /// Skip the field-length normalization
    pub ignore_field_norm: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            distance: 100,
            min_match_char_length: 2,
            ignore_location: true,
            location: 0,
            case_sensitive: false,
            ignore_field_norm: false,
        }
    }
}

/// A searchable field path with its relative importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedKey {
    /// Dotted field path, e.g. `store.name`
    pub path: String,
    /// Positive weight; weights are normalized by their sum
    pub weight: f64,
}

impl WeightedKey {
    /// Creates a new key.
    pub fn new(path: impl Into<String>, weight: f64) -> Self {
        Self {
            path: path.into(),
            weight,
        }
    }
}

/// Query prepared for scoring.
struct Pattern {
    chars: Vec<char>,
    chunks: Vec<Chunk>,
}

struct Chunk {
    chars: Vec<char>,
    start: usize,
}

impl Pattern {
    fn new(query: &str, case_sensitive: bool) -> Self {
        let chars: Vec<char> = if case_sensitive {
            query.chars().collect()
        } else {
            query.to_lowercase().chars().collect()
        };

        let len = chars.len();
        let mut chunks = Vec::new();

        if len <= MAX_CHUNK_LEN {
            chunks.push(Chunk {
                chars: chars.clone(),
                start: 0,
            });
        } else {
            let remainder = len % MAX_CHUNK_LEN;
            let end = len - remainder;
            let mut index = 0;
            while index < end {
                chunks.push(Chunk {
                    chars: chars[index..index + MAX_CHUNK_LEN].to_vec(),
                    start: index,
                });
                index += MAX_CHUNK_LEN;
            }
            // The tail chunk overlaps the previous one so it is full length.
            if remainder > 0 {
                let start = len - MAX_CHUNK_LEN;
                chunks.push(Chunk {
                    chars: chars[start..].to_vec(),
                    start,
                });
            }
        }

        Self { chars, chunks }
    }
}

/// Fuzzy matcher over records implementing [`Searchable`].
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    keys: Vec<WeightedKey>,
    options: MatchOptions,
}

impl FuzzyMatcher {
    /// Creates a matcher after validating its configuration.
    ///
    /// # Errors
    /// `InvalidConfiguration` when no keys are given, a key has an empty
    /// path or a weight that is not a positive finite number, or the
    /// threshold is outside `0.0..=1.0`.
    pub fn new(keys: Vec<WeightedKey>, options: MatchOptions) -> Result<Self> {
        if keys.is_empty() {
            return Err(SearchError::config("at least one search field is required"));
        }
        for key in &keys {
            if key.path.trim().is_empty() {
                return Err(SearchError::config("search field path must not be empty"));
            }
            if !(key.weight.is_finite() && key.weight > 0.0) {
                return Err(SearchError::config(format!(
                    "weight for field {:?} must be positive, got {}",
                    key.path, key.weight
                )));
            }
        }
        if !(0.0..=1.0).contains(&options.threshold) {
            return Err(SearchError::config(format!(
                "threshold must be between 0 and 1, got {}",
                options.threshold
            )));
        }

        Ok(Self::from_trusted(keys, options))
    }

    /// Builds a matcher from keys known to be valid.
    pub(crate) fn from_trusted(mut keys: Vec<WeightedKey>, options: MatchOptions) -> Self {
        let total: f64 = keys.iter().map(|k| k.weight).sum();
        for key in &mut keys {
            key.weight /= total;
        }
        Self { keys, options }
    }

    /// Configured keys with normalized weights.
    pub fn keys(&self) -> &[WeightedKey] {
        &self.keys
    }

    /// Matching options.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Scores `records` against `query`, best match first.
    ///
    /// A blank query short-circuits: every record is returned in input order
    /// with a score of 0. Ties keep input order.
    pub fn search<'a, T>(&self, records: &'a [T], query: &str) -> Vec<SearchResult<&'a T>>
    where
        T: Searchable + Sync,
    {
        if query.trim().is_empty() {
            trace!(candidates = records.len(), "blank query, returning input unchanged");
            return records
                .iter()
                .enumerate()
                .map(|(index, item)| SearchResult {
                    item,
                    index,
                    score: 0.0,
                })
                .collect();
        }

        let pattern = Pattern::new(query, self.options.case_sensitive);
        let mut results = self.score_all(records, &pattern);
        results.sort_by(|a, b| a.score.total_cmp(&b.score));

        debug!(
            query_chars = pattern.chars.len(),
            candidates = records.len(),
            matches = results.len(),
            "fuzzy search completed"
        );

        results
    }

    /// Like [`FuzzyMatcher::search`], returning owned records without scores.
    pub fn filter<T>(&self, records: &[T], query: &str) -> Vec<T>
    where
        T: Searchable + Clone + Sync,
    {
        self.search(records, query)
            .into_iter()
            .map(|result| result.item.clone())
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all<'a, T>(&self, records: &'a [T], pattern: &Pattern) -> Vec<SearchResult<&'a T>>
    where
        T: Searchable + Sync,
    {
        use rayon::prelude::*;
        records
            .par_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                self.score_record(item, pattern)
                    .map(|score| SearchResult { item, index, score })
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all<'a, T>(&self, records: &'a [T], pattern: &Pattern) -> Vec<SearchResult<&'a T>>
    where
        T: Searchable + Sync,
    {
        records
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                self.score_record(item, pattern)
                    .map(|score| SearchResult { item, index, score })
            })
            .collect()
    }

    /// Combined score of a record, or `None` when no field matched.
    fn score_record<T: Searchable>(&self, record: &T, pattern: &Pattern) -> Option<f64> {
        let mut total = 1.0;
        let mut matched = false;

        for key in &self.keys {
            let Some(text) = record.field_text(&key.path) else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            let Some(score) = self.score_field(text, pattern) else {
                continue;
            };

            let norm = if self.options.ignore_field_norm {
                1.0
            } else {
                field_norm(text)
            };
            let base = if score == 0.0 { f64::EPSILON } else { score };
            total *= base.powf(key.weight * norm);
            matched = true;
        }

        matched.then_some(total)
    }

    /// Score of one field, or `None` when no chunk of the query matched.
    fn score_field(&self, text: &str, pattern: &Pattern) -> Option<f64> {
        let text: Vec<char> = if self.options.case_sensitive {
            text.chars().collect()
        } else {
            text.to_lowercase().chars().collect()
        };

        if text == pattern.chars {
            return Some(0.0);
        }

        let mut matched = false;
        let mut total = 0.0;
        for chunk in &pattern.chunks {
            let (is_match, score) = self.score_chunk(&text, chunk);
            matched |= is_match;
            total += score;
        }

        matched.then(|| total / pattern.chunks.len() as f64)
    }

    fn score_chunk(&self, text: &[char], chunk: &Chunk) -> (bool, f64) {
        let expected = (self.options.location + chunk.start).min(text.len());
        let len = chunk.chars.len();

        let best = substring_edit_costs(text, &chunk.chars)
            .into_iter()
            .enumerate()
            .map(|(start, errors)| self.location_score(errors, len, start, expected))
            .filter(|score| *score <= self.options.threshold)
            .min_by(f64::total_cmp);

        match best {
            Some(score) => (
                has_alphabet_run(text, &chunk.chars, self.options.min_match_char_length),
                score.max(MIN_MATCH_SCORE),
            ),
            None => (false, 1.0),
        }
    }

    fn location_score(&self, errors: usize, len: usize, start: usize, expected: usize) -> f64 {
        let accuracy = errors as f64 / len as f64;
        if self.options.ignore_location {
            return accuracy;
        }

        let proximity = start.abs_diff(expected) as f64;
        if self.options.distance == 0 {
            return if proximity > 0.0 { 1.0 } else { accuracy };
        }
        accuracy + proximity / f64::from(self.options.distance)
    }
}

/// Field-length norm: `1 / sqrt(tokens)`, rounded to three decimals.
///
/// Hits in short fields weigh more than the same hit in a long description.
fn field_norm(text: &str) -> f64 {
    let tokens = text.split(' ').filter(|t| !t.is_empty()).count().max(1);
    let norm = 1.0 / (tokens as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}
