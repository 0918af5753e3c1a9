//! Configuration management for article-wordfreq

use crate::error::{Result, WordFreqError};
use crate::processing::extractor::{ExtractionOptions, DEFAULT_MIN_LENGTH, DEFAULT_TOP_N};
use crate::processing::stopwords::{StopwordList, StopwordSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Missing sections and fields fall back to their defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub min_length: usize,
    pub top_n: usize,
    pub stopword_list: StopwordList,
    pub extra_stopwords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub enable_caching: bool,
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Csv,
    Html,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Console => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Csv => "csv",
            OutputFormat::Html => "html",
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            top_n: DEFAULT_TOP_N,
            stopword_list: StopwordList::English,
            extra_stopwords: Vec::new(),
            stopwords_file: None,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enable_caching: true,
            parallel: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
            output_dir: PathBuf::from("Data"),
        }
    }
}

impl Config {
    /// Load the user config, creating it with defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| WordFreqError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| WordFreqError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("article-wordfreq")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.extraction.min_length == 0 {
            return Err(WordFreqError::Configuration(
                "extraction.min_length must be at least 1".to_string(),
            ));
        }
        if self.extraction.top_n == 0 {
            return Err(WordFreqError::Configuration(
                "extraction.top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn extraction_options(&self) -> ExtractionOptions {
        ExtractionOptions {
            min_length: self.extraction.min_length,
            top_n: self.extraction.top_n,
        }
    }

    /// Build the stopword set once: built-in list, then the file, then extras
    pub fn build_stopwords(&self) -> Result<StopwordSet> {
        let mut stopwords = StopwordSet::from_list(self.extraction.stopword_list);

        if let Some(path) = &self.extraction.stopwords_file {
            let from_file = StopwordSet::from_file(path)?;
            stopwords.extend(from_file.sorted());
        }

        stopwords.extend(&self.extraction.extra_stopwords);
        Ok(stopwords)
    }
}
