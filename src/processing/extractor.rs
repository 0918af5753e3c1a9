//! Top-N word frequency extraction
//!
//! Extraction is a pure function of the text, the stopword set and the
//! options: it performs no IO and the same input always yields the same
//! ordered records.

use crate::processing::document::{Document, DocumentId};
use crate::processing::stopwords::StopwordSet;
use crate::processing::text_processor::{count_terms, filter_tokens, tokenize, TermCount};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_LENGTH: usize = 3;
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Shortest token that is kept
    pub min_length: usize,
    /// Maximum number of records per document
    pub top_n: usize,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// One ranked word of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub document_id: DocumentId,
    pub word: String,
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub title: Option<String>,
    pub source: Option<String>,
    /// Tokens left after stopword and length filtering
    pub token_count: usize,
    pub distinct_terms: usize,
}

/// Everything the renderers need for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub document: DocumentSummary,
    pub records: Vec<FrequencyRecord>,
    /// Every qualifying term, ranked; feeds the word cloud
    pub term_counts: Vec<TermCount>,
}

impl DocumentAnalysis {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (word, frequency) pairs for chart rendering
    pub fn chart_series(&self) -> Vec<(&str, usize)> {
        self.records
            .iter()
            .map(|r| (r.word.as_str(), r.frequency))
            .collect()
    }
}

/// Return the `top_n` most frequent qualifying words of `raw_text`.
///
/// Empty or whitespace-only text yields an empty vector. Pass
/// `StopwordSet::empty()` to disable stopword filtering.
pub fn extract_top_words(
    document_id: &DocumentId,
    raw_text: &str,
    stopwords: &StopwordSet,
    options: &ExtractionOptions,
) -> Vec<FrequencyRecord> {
    let tokens = filter_tokens(tokenize(raw_text), stopwords, options.min_length);
    to_records(document_id, &count_terms(&tokens), options.top_n)
}

pub fn analyze_document(
    document: &Document,
    stopwords: &StopwordSet,
    options: &ExtractionOptions,
) -> DocumentAnalysis {
    let tokens = filter_tokens(tokenize(&document.raw_text), stopwords, options.min_length);
    let term_counts = count_terms(&tokens);
    let records = to_records(&document.id, &term_counts, options.top_n);

    DocumentAnalysis {
        document: DocumentSummary {
            id: document.id.clone(),
            title: document.title.clone(),
            source: document.source.clone(),
            token_count: tokens.len(),
            distinct_terms: term_counts.len(),
        },
        records,
        term_counts,
    }
}

fn to_records(document_id: &DocumentId, counts: &[TermCount], top_n: usize) -> Vec<FrequencyRecord> {
    counts
        .iter()
        .take(top_n)
        .map(|term| FrequencyRecord {
            document_id: document_id.clone(),
            word: term.word.clone(),
            frequency: term.count,
        })
        .collect()
}
