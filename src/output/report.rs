//! Report structures shared by every output format

use crate::processing::extractor::{DocumentAnalysis, ExtractionOptions, FrequencyRecord};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Ranked word frequencies for a batch of documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub metadata: ReportMetadata,

    /// One entry per input document, in input order
    pub documents: Vec<DocumentAnalysis>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: SystemTime,

    /// Version of the tool that produced it
    pub tool_version: String,

    pub options: ExtractionOptions,

    /// Size of the stopword set in effect (0 means no filtering)
    pub stopword_count: usize,

    pub document_count: usize,

    pub processing_time_ms: u64,
}

/// One spreadsheet row: `Article #, Headline, URL, Word, Frequency`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub article: String,
    pub headline: String,
    pub url: String,
    pub word: String,
    pub frequency: usize,
}

impl ReportMetadata {
    pub fn new(
        options: ExtractionOptions,
        stopword_count: usize,
        document_count: usize,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            generated_at: SystemTime::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            options,
            stopword_count,
            document_count,
            processing_time_ms,
        }
    }

    pub fn generated_at_utc(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::<chrono::Utc>::from(self.generated_at)
    }
}

impl FrequencyReport {
    pub fn new(metadata: ReportMetadata, documents: Vec<DocumentAnalysis>) -> Self {
        Self { metadata, documents }
    }

    /// All records, flattened in document order
    pub fn records(&self) -> impl Iterator<Item = &FrequencyRecord> {
        self.documents.iter().flat_map(|d| d.records.iter())
    }

    pub fn record_count(&self) -> usize {
        self.records().count()
    }

    /// Flat rows for tabular export
    pub fn rows(&self) -> Vec<TableRow> {
        self.documents
            .iter()
            .flat_map(|analysis| {
                let summary = &analysis.document;
                analysis.records.iter().map(move |record| TableRow {
                    article: record.document_id.to_string(),
                    headline: summary.title.clone().unwrap_or_default(),
                    url: summary.source.clone().unwrap_or_default(),
                    word: record.word.clone(),
                    frequency: record.frequency,
                })
            })
            .collect()
    }

    /// Documents that produced no records; renderers skip their charts
    pub fn empty_documents(&self) -> impl Iterator<Item = &DocumentAnalysis> {
        self.documents.iter().filter(|d| d.is_empty())
    }
}
