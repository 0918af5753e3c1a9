//! Input manager: turns files into documents

use crate::error::{Result, WordFreqError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    ExtractedText, HtmlExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::document::{Document, DocumentId};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, ExtractedText>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<ExtractedText> {
        // Check cache first
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(WordFreqError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let extracted = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Html => {
                info!("Extracting article text from HTML: {}", path.display());
                HtmlExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(WordFreqError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), extracted.clone());
        }

        Ok(extracted)
    }

    /// Load one document per path, numbered from 1 in input order.
    ///
    /// Repeated paths are skipped so each source is counted once.
    pub async fn load_documents(&mut self, paths: &[PathBuf]) -> Result<Vec<Document>> {
        let mut seen = HashSet::new();
        let mut documents = Vec::with_capacity(paths.len());

        for path in paths {
            if !seen.insert(path.clone()) {
                warn!("Skipping duplicate input: {}", path.display());
                continue;
            }
            let document = self.load_document(path, documents.len() + 1).await?;
            documents.push(document);
        }

        Ok(documents)
    }

    pub async fn load_document(&mut self, path: &Path, ordinal: usize) -> Result<Document> {
        let extracted = self.extract_text(path).await?;
        let source = extracted
            .url
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let mut document = Document::new(DocumentId::Ordinal(ordinal), extracted.text).with_source(source);
        if let Some(title) = extracted.title {
            document = document.with_title(title);
        }
        let document = document.with_detected_title();
        debug!("Loaded {} ({} words)", document.display_name(), document.word_count());
        Ok(document)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| WordFreqError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_non_utf8_is_invalid_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.txt");
        std::fs::write(&path, [0x66u8, 0x6f, 0xe9, 0xff]).unwrap();

        let result = InputManager::new().extract_text(&path).await;
        assert!(matches!(result, Err(WordFreqError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_missing_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("README");
        std::fs::write(&path, "text").unwrap();

        let result = InputManager::new().extract_text(&path).await;
        assert!(matches!(result, Err(WordFreqError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_cache_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        std::fs::write(&path, "first").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        manager.extract_text(&path).await.unwrap();
        std::fs::write(&path, "second").unwrap();

        let extracted = manager.extract_text(&path).await.unwrap();
        assert_eq!(extracted.text, "second");
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_load_documents_numbers_and_dedupes() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.txt");
        let b = temp_dir.path().join("b.txt");
        std::fs::write(&a, "Tariffs rise again\nbody").unwrap();
        std::fs::write(&b, "ok").unwrap();

        let mut manager = InputManager::new();
        let docs = manager
            .load_documents(&[a.clone(), a.clone(), b.clone()])
            .await
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, DocumentId::Ordinal(1));
        assert_eq!(docs[0].title.as_deref(), Some("Tariffs rise again"));
        assert_eq!(docs[1].id, DocumentId::Ordinal(2));
        assert_eq!(docs[1].title, None);
        assert_eq!(docs[1].source.as_deref(), Some(b.to_string_lossy().as_ref()));
    }
}
