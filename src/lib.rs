//! Word-frequency extraction and reporting for scraped article text

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, WordFreqError};
pub use processing::document::{Document, DocumentId};
pub use processing::extractor::{extract_top_words, ExtractionOptions, FrequencyRecord};
pub use processing::stopwords::StopwordSet;
