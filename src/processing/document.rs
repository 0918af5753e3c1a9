//! Document structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the document a frequency record came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    /// 1-based article number
    Ordinal(usize),
    Url(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Ordinal(n) => write!(f, "{}", n),
            DocumentId::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Raw text of one scraped document, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: Option<String>,
    pub source: Option<String>,
    pub raw_text: String,
}

impl Document {
    pub fn new(id: DocumentId, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            title: None,
            source: None,
            raw_text: raw_text.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Use the first plausible headline line when no title is set
    pub fn with_detected_title(mut self) -> Self {
        if self.title.is_none() {
            self.title = detect_title(&self.raw_text);
        }
        self
    }

    pub fn word_count(&self) -> usize {
        self.raw_text.split_whitespace().count()
    }

    /// Title, falling back to the source, falling back to the id
    pub fn display_name(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.source.clone())
            .unwrap_or_else(|| format!("Document {}", self.id))
    }
}

/// Extract a headline from the first few lines
pub fn detect_title(content: &str) -> Option<String> {
    content
        .lines()
        .take(5)
        .map(str::trim)
        .find(|line| {
            // Likely a title if it's not too short or too long
            line.len() > 5 && line.len() < 100 && !line.contains('@') && !line.starts_with('-')
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new(DocumentId::Ordinal(1), "Markets rallied on Friday.")
            .with_source("articles/one.txt");

        assert_eq!(doc.id, DocumentId::Ordinal(1));
        assert_eq!(doc.word_count(), 4);
        assert_eq!(doc.source.as_deref(), Some("articles/one.txt"));
        assert_eq!(doc.display_name(), "articles/one.txt");
    }

    #[test]
    fn test_title_detection() {
        let content = "\n- menu\nbyline@npr.org\nSenate passes spending bill\nBody text follows.";
        let doc = Document::new(DocumentId::Ordinal(2), content).with_detected_title();
        assert_eq!(doc.title.as_deref(), Some("Senate passes spending bill"));
    }

    #[test]
    fn test_explicit_title_wins() {
        let doc = Document::new(DocumentId::Ordinal(3), "A longer first line here")
            .with_title("Headline")
            .with_detected_title();
        assert_eq!(doc.title.as_deref(), Some("Headline"));
    }

    #[test]
    fn test_document_id_display() {
        assert_eq!(DocumentId::Ordinal(7).to_string(), "7");
        let url = DocumentId::Url("https://www.npr.org/story".to_string());
        assert_eq!(url.to_string(), "https://www.npr.org/story");
        assert_eq!(Document::new(DocumentId::Ordinal(7), "").display_name(), "Document 7");
    }

    #[test]
    fn test_document_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&DocumentId::Ordinal(2)).unwrap(), "2");
        let url = DocumentId::Url("https://example.org/a".to_string());
        assert_eq!(serde_json::to_string(&url).unwrap(), "\"https://example.org/a\"");
    }
}
