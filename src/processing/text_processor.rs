//! Text normalization, tokenization and term counting

use crate::processing::stopwords::StopwordSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Anything that is not a lower-case ASCII letter or whitespace
static NON_ALPHA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z\s]+").expect("Invalid non-alphabetic regex"));

/// A distinct term and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub word: String,
    pub count: usize,
}

/// Lower-case the text and turn digits, punctuation and non-ASCII letters into spaces
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ALPHA_REGEX.replace_all(&lowered, " ").into_owned()
}

/// Normalize and split on whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Drop tokens shorter than `min_length` and tokens in the stopword set
pub fn filter_tokens(tokens: Vec<String>, stopwords: &StopwordSet, min_length: usize) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|token| token.chars().count() >= min_length && !stopwords.contains(token))
        .collect()
}

/// Count tokens, ordered by descending count.
///
/// Terms with equal counts keep the order in which they first appeared.
pub fn count_terms(tokens: &[String]) -> Vec<TermCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<TermCount> = Vec::new();

    for token in tokens {
        match positions.get(token.as_str()) {
            Some(&index) => counts[index].count += 1,
            None => {
                positions.insert(token.as_str(), counts.len());
                counts.push(TermCount {
                    word: token.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
