//! Multi-document frequency pipeline

use crate::error::Result;
use crate::output::report::{FrequencyReport, ReportMetadata};
use crate::processing::document::Document;
use crate::processing::extractor::{analyze_document, DocumentAnalysis, ExtractionOptions};
use crate::processing::stopwords::StopwordSet;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

pub struct FrequencyPipeline {
    stopwords: Arc<StopwordSet>,
    options: ExtractionOptions,
}

impl FrequencyPipeline {
    pub fn new(stopwords: StopwordSet, options: ExtractionOptions) -> Self {
        Self {
            stopwords: Arc::new(stopwords),
            options,
        }
    }

    pub fn analyze(&self, document: &Document) -> DocumentAnalysis {
        let analysis = analyze_document(document, &self.stopwords, &self.options);
        debug!(
            "{}: {} qualifying tokens, {} distinct, {} records",
            document.display_name(),
            analysis.document.token_count,
            analysis.document.distinct_terms,
            analysis.records.len()
        );
        analysis
    }

    /// Process documents one after another, in order
    pub fn analyze_all(&self, documents: &[Document]) -> FrequencyReport {
        let started = Instant::now();
        let analyses = documents.iter().map(|doc| self.analyze(doc)).collect();
        self.finish(analyses, started)
    }

    /// Process every document on its own blocking task.
    ///
    /// Results come back in input order regardless of completion order.
    pub async fn analyze_parallel(&self, documents: Vec<Document>) -> Result<FrequencyReport> {
        let started = Instant::now();
        let total = documents.len();
        let mut tasks = JoinSet::new();

        for (index, document) in documents.into_iter().enumerate() {
            let stopwords = Arc::clone(&self.stopwords);
            let options = self.options;
            tasks.spawn_blocking(move || (index, analyze_document(&document, &stopwords, &options)));
        }

        let mut slots: Vec<Option<DocumentAnalysis>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, analysis) = joined?;
            slots[index] = Some(analysis);
        }

        let analyses = slots.into_iter().flatten().collect();
        Ok(self.finish(analyses, started))
    }

    fn finish(&self, documents: Vec<DocumentAnalysis>, started: Instant) -> FrequencyReport {
        let processing_time_ms = started.elapsed().as_millis() as u64;
        let empty = documents.iter().filter(|d| d.is_empty()).count();
        info!(
            "Analyzed {} document(s) in {}ms ({} without qualifying words)",
            documents.len(),
            processing_time_ms,
            empty
        );

        let metadata = ReportMetadata::new(
            self.options,
            self.stopwords.len(),
            documents.len(),
            processing_time_ms,
        );
        FrequencyReport::new(metadata, documents)
    }
}
