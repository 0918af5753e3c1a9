//! Output formatters: console, JSON, Markdown, CSV and HTML

use crate::config::OutputFormat;
use crate::error::{Result, WordFreqError};
use crate::output::report::FrequencyReport;
use crate::output::table;
use crate::processing::extractor::DocumentAnalysis;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

const CONSOLE_BAR_WIDTH: usize = 30;
const HTML_BAR_WIDTH_PCT: f64 = 100.0;
const WORD_CLOUD_TERMS: usize = 50;
const WORD_CLOUD_MIN_PX: f64 = 12.0;
const WORD_CLOUD_MAX_PX: f64 = 48.0;

/// Trait for rendering frequency reports
pub trait OutputFormatter {
    fn format_report(&self, report: &FrequencyReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors and text bar charts
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Spreadsheet-style export: one row per (document, word)
pub struct CsvFormatter {
    separator: char,
}

/// HTML page with a bar chart and a word cloud per document
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    csv_formatter: CsvFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Word Frequency Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.5;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .article {
            background: white;
            padding: 24px;
            margin: 20px 0;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .article h2 { color: #007acc; margin-top: 0; }
        .source { color: #6c757d; font-size: 0.9em; word-break: break-all; }
        .bar-row { display: flex; align-items: center; margin: 4px 0; }
        .bar-label { width: 140px; text-align: right; padding-right: 10px; }
        .bar { background: #2e8b57; color: white; padding: 2px 6px; border-radius: 3px; min-width: 1.5em; }
        .cloud { text-align: center; padding: 16px; line-height: 1.1; }
        .cloud span { display: inline-block; margin: 4px 8px; color: #2e8b57; }
        .empty { color: #dc3545; font-style: italic; }
        .footer { text-align: center; color: #6c757d; font-size: 0.85em; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Word Frequency Report</h1>
    <p>Generated {{ generated_at }} in {{ processing_time }}ms: {{ document_count }} article(s), top {{ top_n }} words of at least {{ min_length }} letters, {{ stopword_count }} stopwords.</p>
    {{ articles_html|safe }}
    <div class="footer">
        <p>article-wordfreq v{{ version }}</p>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    document_count: usize,
    top_n: usize,
    min_length: usize,
    stopword_count: usize,
    articles_html: String,
    version: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_document(&self, analysis: &DocumentAnalysis) -> String {
        let summary = &analysis.document;
        let mut output = String::new();

        let heading = match &summary.title {
            Some(title) => format!("Article {}: {}", summary.id, title),
            None => format!("Article {}", summary.id),
        };
        output.push_str(&self.format_header(&heading, 2));

        if let Some(source) = &summary.source {
            output.push_str(&format!("{}\n", self.colorize(source, Color::BrightBlack)));
        }

        if self.detailed {
            output.push_str(&format!(
                "Qualifying tokens: {} | Distinct terms: {}\n",
                summary.token_count, summary.distinct_terms
            ));
        }

        if analysis.is_empty() {
            output.push_str(&format!("{}\n", self.colorize("No qualifying words; chart skipped.", Color::Yellow)));
            return output;
        }

        let series = analysis.chart_series();
        let max = series.iter().map(|(_, frequency)| *frequency).max().unwrap_or(1);
        let word_width = series.iter().map(|(word, _)| word.len()).max().unwrap_or(0);

        for (rank, (word, frequency)) in series.into_iter().enumerate() {
            let bar = "█".repeat(scaled(frequency, max, CONSOLE_BAR_WIDTH));
            output.push_str(&format!(
                "{:>3}. {:<width$} {:>4} {}\n",
                rank + 1,
                word,
                frequency,
                self.colorize(&bar, Color::Green),
                width = word_width
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &FrequencyReport) -> Result<String> {
        let mut output = String::new();
        let meta = &report.metadata;

        output.push_str(&self.format_header("WORD FREQUENCY REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            meta.generated_at_utc().format("%Y-%m-%d %H:%M:%S UTC"),
            meta.processing_time_ms
        ));
        output.push_str(&format!(
            "Articles: {} | Top {} words | Min length {} | Stopwords: {}\n",
            meta.document_count, meta.options.top_n, meta.options.min_length, meta.stopword_count
        ));

        for analysis in &report.documents {
            output.push_str(&self.format_document(analysis));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &FrequencyReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &FrequencyReport) -> Result<String> {
        let meta = &report.metadata;
        let mut output = String::from("# Word Frequency Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n\n",
                meta.generated_at_utc().format("%Y-%m-%d %H:%M:%S UTC"),
                meta.processing_time_ms
            ));
            output.push_str(&format!(
                "**Articles:** {} | **Top N:** {} | **Min Length:** {} | **Stopwords:** {}\n\n",
                meta.document_count, meta.options.top_n, meta.options.min_length, meta.stopword_count
            ));
        }

        for analysis in &report.documents {
            let summary = &analysis.document;
            match &summary.title {
                Some(title) => output.push_str(&format!("## {}. {}\n\n", summary.id, title)),
                None => output.push_str(&format!("## Article {}\n\n", summary.id)),
            }
            if let Some(source) = &summary.source {
                output.push_str(&format!("<{}>\n\n", source));
            }

            if analysis.is_empty() {
                output.push_str("_No qualifying words._\n\n");
                continue;
            }

            output.push_str("| Rank | Word | Frequency |\n");
            output.push_str("|------|------|-----------|\n");
            for (rank, record) in analysis.records.iter().enumerate() {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    rank + 1,
                    Self::escape_cell(&record.word),
                    record.frequency
                ));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl CsvFormatter {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &FrequencyReport) -> Result<String> {
        let mut buffer = Vec::new();
        table::write_rows(&mut buffer, &report.rows(), self.separator)?;
        String::from_utf8(buffer).map_err(|e| WordFreqError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn format_article(analysis: &DocumentAnalysis) -> String {
        let summary = &analysis.document;
        let mut html = String::from("<div class=\"article\">\n");

        let heading = match &summary.title {
            Some(title) => format!("Article {}: {}", summary.id, title),
            None => format!("Article {}", summary.id),
        };
        html.push_str(&format!("<h2>{}</h2>\n", escape_html(&heading)));

        if let Some(source) = &summary.source {
            html.push_str(&format!("<p class=\"source\">{}</p>\n", escape_html(source)));
        }

        if analysis.is_empty() {
            html.push_str("<p class=\"empty\">No qualifying words.</p>\n</div>\n");
            return html;
        }

        let series = analysis.chart_series();
        html.push_str(&format!("<h3>Top {} Words</h3>\n", series.len()));
        let max = series.iter().map(|(_, frequency)| *frequency).max().unwrap_or(1);
        for (word, frequency) in series {
            let width = frequency as f64 / max as f64 * HTML_BAR_WIDTH_PCT;
            html.push_str(&format!(
                "<div class=\"bar-row\"><span class=\"bar-label\">{}</span><span class=\"bar\" style=\"width: {:.1}%\">{}</span></div>\n",
                escape_html(word),
                width,
                frequency
            ));
        }

        html.push_str("<h3>Word Cloud</h3>\n<div class=\"cloud\">\n");
        let cloud: Vec<_> = analysis.term_counts.iter().take(WORD_CLOUD_TERMS).collect();
        let max = cloud.iter().map(|t| t.count).max().unwrap_or(1);
        let min = cloud.iter().map(|t| t.count).min().unwrap_or(1);
        for term in cloud {
            html.push_str(&format!(
                "<span style=\"font-size: {:.0}px\" title=\"{}\">{}</span>\n",
                cloud_font_size(term.count, min, max),
                term.count,
                escape_html(&term.word)
            ));
        }
        html.push_str("</div>\n</div>\n");

        html
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &FrequencyReport) -> Result<String> {
        let meta = &report.metadata;
        let articles_html = report
            .documents
            .iter()
            .map(Self::format_article)
            .collect::<Vec<_>>()
            .join("\n");

        let template = HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: meta.generated_at_utc().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: meta.processing_time_ms,
            document_count: meta.document_count,
            top_n: meta.options.top_n,
            min_length: meta.options.min_length,
            stopword_count: meta.stopword_count,
            articles_html,
            version: meta.tool_version.clone(),
        };

        template
            .render()
            .map_err(|e| WordFreqError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            csv_formatter: CsvFormatter::new(','),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            csv_formatter: CsvFormatter::new(','),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &FrequencyReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of a bar for `value` when `max` fills `width`; never zero for a positive value
fn scaled(value: usize, max: usize, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    ((value * width + max - 1) / max).max(1)
}

fn cloud_font_size(count: usize, min: usize, max: usize) -> f64 {
    if max == min {
        return (WORD_CLOUD_MIN_PX + WORD_CLOUD_MAX_PX) / 2.0;
    }
    let t = (count - min) as f64 / (max - min) as f64;
    WORD_CLOUD_MIN_PX + t * (WORD_CLOUD_MAX_PX - WORD_CLOUD_MIN_PX)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, stem: &str, timestamp: bool) -> String {
    let base_name = Path::new(stem)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    format!("{}_top_words{}.{}", base_name, timestamp_suffix, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::processing::document::{Document, DocumentId};
    use crate::processing::extractor::{analyze_document, ExtractionOptions};
    use crate::processing::stopwords::StopwordSet;
    use tempfile::TempDir;

    fn sample_report() -> FrequencyReport {
        let options = ExtractionOptions { min_length: 3, top_n: 3 };
        let stopwords = StopwordSet::from_words(["the", "on", "was"]);
        let docs = [
            Document::new(DocumentId::Ordinal(1), "The Cat sat on the MAT. The cat was happy.")
                .with_title("Cats & <Mats>")
                .with_source("https://www.npr.org/cats"),
            Document::new(DocumentId::Ordinal(2), "42 !!"),
        ];
        let analyses = docs
            .iter()
            .map(|d| analyze_document(d, &stopwords, &options))
            .collect();
        FrequencyReport::new(ReportMetadata::new(options, stopwords.len(), 2, 5), analyses)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&sample_report()).unwrap();

        assert!(output.contains("WORD FREQUENCY REPORT"));
        assert!(output.contains("Article 1: Cats & <Mats>"));
        assert!(output.contains("  1. cat    2 ██████████████████████████████"));
        assert!(output.contains("  2. sat    1 ███████████████"));
        assert!(output.contains("Qualifying tokens: 5 | Distinct terms: 4"));
        assert!(output.contains("No qualifying words; chart skipped."));
    }

    #[test]
    fn test_json_roundtrips_records() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let records = &value["documents"][0]["records"];
        assert_eq!(records[0]["word"], "cat");
        assert_eq!(records[0]["frequency"], 2);
        assert_eq!(records[0]["document_id"], 1);
        assert_eq!(value["documents"][1]["records"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_markdown_tables() {
        let output = MarkdownFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# Word Frequency Report\n\n## 1. Cats & <Mats>"));
        assert!(output.contains("| 1 | cat | 2 |\n| 2 | sat | 1 |\n| 3 | mat | 1 |"));
        assert!(output.contains("## Article 2\n\n_No qualifying words._"));
        assert!(!output.contains("**Generated:**"));
    }

    #[test]
    fn test_csv_rows() {
        let output = CsvFormatter::new(',').format_report(&sample_report()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Article #,Headline,URL,Word,Frequency");
        assert_eq!(lines[1], "1,Cats & <Mats>,https://www.npr.org/cats,cat,2");
        assert_eq!(lines[3], "1,Cats & <Mats>,https://www.npr.org/cats,mat,1");
    }

    #[test]
    fn test_html_charts_and_escaping() {
        let output = HtmlFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.contains("Article 1: Cats &amp; &lt;Mats&gt;"));
        assert!(output.contains("style=\"width: 100.0%\">2</span>"));
        assert!(output.contains("style=\"width: 50.0%\">1</span>"));
        assert!(output.contains("<span style=\"font-size: 48px\" title=\"2\">cat</span>"));
        assert!(output.contains("<span style=\"font-size: 12px\" title=\"1\">happy</span>"));
        assert!(output.contains("No qualifying words."));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true, true);
        let report = sample_report();

        let csv = generator.generate_report(&report, &OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("Article #"));
        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.contains("\n  \"metadata\""));
    }

    #[test]
    fn test_scaling_helpers() {
        assert_eq!(scaled(2, 2, 30), 30);
        assert_eq!(scaled(1, 2, 30), 15);
        assert_eq!(scaled(1, 100, 30), 1);
        assert_eq!(cloud_font_size(3, 3, 3), 30.0);
        assert_eq!(cloud_font_size(1, 1, 3), 12.0);
    }

    #[test]
    fn test_save_and_suggest_filename() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Data").join("report.csv");

        save_report_to_file("Article #\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Article #\n");

        assert_eq!(suggest_filename(&OutputFormat::Csv, "npr_news.txt", false), "npr_news_top_words.csv");
        assert_eq!(suggest_filename(&OutputFormat::Markdown, "articles", false), "articles_top_words.md");
    }
}
