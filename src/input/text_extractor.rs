//! Text extraction from various file formats

use crate::error::{Result, WordFreqError};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

static SCRIPT_STYLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)\b[^>]*>.*?</(script|style|noscript)>")
        .expect("Invalid script regex")
});
static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("Invalid title regex"));
static CANONICAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<link\b[^>]*rel\s*=\s*["']canonical["'][^>]*>"#).expect("Invalid canonical regex")
});
static OG_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\b[^>]*property\s*=\s*["']og:url["'][^>]*>"#).expect("Invalid og:url regex")
});
static HREF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)\bhref\s*=\s*["']([^"']+)["']"#).expect("Invalid href regex"));
static CONTENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)\bcontent\s*=\s*["']([^"']+)["']"#).expect("Invalid content regex"));
static PARAGRAPH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("Invalid paragraph regex"));
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Text pulled out of a file, with whatever headline and URL the file carried
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl ExtractedText {
    pub fn plain(text: String) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<ExtractedText>> + Send;
}

/// Read a file that must be UTF-8 text
async fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path).await?;
    String::from_utf8(bytes).map_err(|_| {
        WordFreqError::InvalidInput(format!("File is not valid UTF-8 text: {}", path.display()))
    })
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            WordFreqError::TextExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(ExtractedText::plain(text))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        Ok(ExtractedText::plain(read_utf8(path).await?))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let markdown_content = read_utf8(path).await?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(ExtractedText::plain(html_to_lines(&html_output)))
    }
}

/// Saved article pages: paragraph text, `<title>` and the canonical URL
pub struct HtmlExtractor;

impl TextExtractor for HtmlExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let page = read_utf8(path).await?;
        Ok(parse_html_page(&page))
    }
}

pub fn parse_html_page(page: &str) -> ExtractedText {
    let page = SCRIPT_STYLE_REGEX.replace_all(page, " ");

    let title = TITLE_REGEX
        .captures(&page)
        .map(|caps| inline_text(&caps[1]))
        .filter(|title| !title.is_empty());

    let url = CANONICAL_REGEX
        .find(&page)
        .and_then(|tag| HREF_REGEX.captures(tag.as_str()))
        .or_else(|| {
            OG_URL_REGEX
                .find(&page)
                .and_then(|tag| CONTENT_REGEX.captures(tag.as_str()))
        })
        .map(|caps| decode_entities(&caps[1]));

    let paragraphs: Vec<String> = PARAGRAPH_REGEX
        .captures_iter(&page)
        .map(|caps| inline_text(&caps[1]))
        .filter(|p| !p.is_empty())
        .collect();

    // Pages without <p> markup fall back to all visible text
    let text = if paragraphs.is_empty() {
        let body = TITLE_REGEX.replace_all(&page, " ");
        inline_text(&body)
    } else {
        paragraphs.join(" ")
    };

    ExtractedText { text, title, url }
}

/// Strip tags and collapse whitespace onto one line
fn inline_text(html: &str) -> String {
    let stripped = TAG_REGEX.replace_all(html, " ");
    let decoded = decode_entities(&stripped);
    WHITESPACE_REGEX.replace_all(&decoded, " ").trim().to_string()
}

/// Strip tags, keeping one non-empty line per block
fn html_to_lines(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "\n\n");

    let clean_text = TAG_REGEX.replace_all(&text, "");
    let decoded = decode_entities(&clean_text);

    let lines: Vec<&str> = decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

/// Decode every named and numeric character reference in one pass
fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::DocumentId;
    use crate::processing::extractor::{extract_top_words, ExtractionOptions};
    use crate::processing::stopwords::StopwordSet;

    const PAGE: &str = r#"<html><head>
<title>Storm Floods Coast &amp; Towns : NPR</title>
<link rel="canonical" href="https://www.npr.org/2024/storm">
<script>var headline = "ignore me";</script>
</head><body>
<nav>Home News</nav>
<div class="storytext">
<p>Floodwaters <b>rose</b> overnight.</p>
<p class="caption">Crews &quot;worked&quot; until dawn.</p>
</div></body></html>"#;

    #[test]
    fn test_parse_html_page() {
        let extracted = parse_html_page(PAGE);
        assert_eq!(extracted.title.as_deref(), Some("Storm Floods Coast & Towns : NPR"));
        assert_eq!(extracted.url.as_deref(), Some("https://www.npr.org/2024/storm"));
        assert_eq!(extracted.text, "Floodwaters rose overnight. Crews \"worked\" until dawn.");
    }

    #[test]
    fn test_og_url_and_no_paragraphs() {
        let page = r#"<head><meta content="https://example.org/a" property="og:url"></head>
<body><div>Only <i>div</i> text</div><script>x()</script></body>"#;
        let extracted = parse_html_page(page);
        assert_eq!(extracted.url.as_deref(), Some("https://example.org/a"));
        assert_eq!(extracted.title, None);
        assert_eq!(extracted.text, "Only div text");
    }

    #[test]
    fn test_html_to_lines() {
        let html = "<h1>Title</h1>\n<p>First &amp; second</p><p>Third<br>line</p>";
        assert_eq!(html_to_lines(html), "Title\nFirst & second\nThird\nline");
    }

    #[test]
    fn test_decode_entities_does_not_double_decode() {
        assert_eq!(decode_entities("&amp;lt;b&amp;gt;"), "&lt;b&gt;");
    }

    #[test]
    fn test_decode_entities_named_and_numeric() {
        assert_eq!(
            decode_entities("a &mdash; b&hellip; It&#8217;s &#x2019; &eacute;t&eacute;"),
            "a \u{2014} b\u{2026} It\u{2019}s \u{2019} \u{e9}t\u{e9}"
        );
    }

    #[test]
    fn test_entity_names_never_become_words() {
        let extracted = parse_html_page(
            "<p>Officials said &mdash; again &mdash; that rates&hellip; would rise. It&#8217;s over &eacute;t&eacute;.</p>",
        );
        let records = extract_top_words(
            &DocumentId::Ordinal(1),
            &extracted.text,
            &StopwordSet::english(),
            &ExtractionOptions::default(),
        );
        let words: Vec<&str> = records.iter().map(|r| r.word.as_str()).collect();

        assert_eq!(words, vec!["officials", "said", "rates", "would", "rise"]);
        assert!(records.iter().all(|r| r.frequency == 1));
    }
}
