//! Stopword sets
//!
//! A `StopwordSet` is loaded once and then shared read-only across every
//! extraction call. "No filtering" is an explicit empty set.

use crate::error::{Result, WordFreqError};
use crate::processing::text_processor::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// English stopwords (the NLTK `english` corpus list)
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t",
    "can", "will", "just", "don", "don't", "should", "should've", "now", "d", "ll",
    "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
    "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
    "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn",
    "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// Built-in stopword lists selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordList {
    English,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// An empty set: nothing is filtered
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().copied())
    }

    pub fn from_list(list: StopwordList) -> Self {
        match list {
            StopwordList::English => Self::english(),
            StopwordList::None => Self::empty(),
        }
    }

    /// Build a set from arbitrary words, normalized like article tokens
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    /// Load a stopword file: one word per line, `#` starts a comment
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WordFreqError::Configuration(format!(
                "Failed to read stopword file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let words = content
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .filter(|line| !line.trim().is_empty());

        Ok(Self::from_words(words))
    }

    /// Add entries after tokenizing them the way article text is tokenized.
    ///
    /// `covid-19` adds `covid`, `don't` adds `don` and `t`. An entry with no
    /// letters adds nothing.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.words.extend(tokenize(word.as_ref()));
        }
    }

    /// Membership test; callers pass already lower-cased tokens
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in alphabetical order
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::DocumentId;
    use crate::processing::extractor::{extract_top_words, ExtractionOptions};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_english_list() {
        let set = StopwordSet::english();
        assert_eq!(ENGLISH_STOPWORDS.len(), 179);
        // Contractions collapse onto pieces that are already listed
        assert_eq!(set.len(), 153);
        assert!(set.contains("the"));
        assert!(set.contains("wouldn"));
        assert!(!set.contains("wouldn't"));
        assert!(!set.contains("cat"));
    }

    #[test]
    fn test_from_words_normalizes_case() {
        let set = StopwordSet::from_words(["The", " ON ", "", "was"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("the"));
        assert!(set.contains("on"));
        assert_eq!(set.sorted(), vec!["on", "the", "was"]);
    }

    #[test]
    fn test_entries_are_tokenized() {
        let set = StopwordSet::from_words(["COVID-19", "U.S.", "2024", "state-of-the-art"]);
        assert_eq!(set.sorted(), vec!["art", "covid", "of", "s", "state", "the", "u"]);
    }

    #[test]
    fn test_punctuated_entry_filters_matching_tokens() {
        let set = StopwordSet::from_words(["covid-19"]);
        let records = extract_top_words(
            &DocumentId::Ordinal(1),
            "COVID-19 cases rose as covid spread",
            &set,
            &ExtractionOptions::default(),
        );
        assert!(records.iter().all(|r| r.word != "covid"));
        assert_eq!(records[0].word, "cases");
    }

    #[test]
    fn test_empty_set_filters_nothing() {
        let set = StopwordSet::from_list(StopwordList::None);
        assert!(set.is_empty());
        assert!(!set.contains("the"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# newsroom boilerplate").unwrap();
        writeln!(file, "said").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "NPR   # station name").unwrap();

        let set = StopwordSet::from_file(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("said"));
        assert!(set.contains("npr"));
    }

    #[test]
    fn test_from_missing_file() {
        let result = StopwordSet::from_file(Path::new("does/not/exist.txt"));
        assert!(matches!(result, Err(WordFreqError::Configuration(_))));
    }
}
