//! Text processing and frequency extraction

pub mod document;
pub mod stopwords;
pub mod text_processor;
pub mod extractor;
pub mod pipeline;
