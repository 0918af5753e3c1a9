//! Flat tabular export (CSV/TSV)

use crate::output::report::TableRow;
use std::io::{self, Write};

pub const HEADER: [&str; 5] = ["Article #", "Headline", "URL", "Word", "Frequency"];

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single delimited row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header plus one line per row.
pub fn write_rows<W: Write>(w: &mut W, rows: &[TableRow], sep: char) -> io::Result<()> {
    write_row(w, &HEADER, sep)?;
    for row in rows {
        let cells = [
            row.article.clone(),
            row.headline.clone(),
            row.url.clone(),
            row.word.clone(),
            row.frequency.to_string(),
        ];
        write_row(w, &cells, sep)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(headline: &str, word: &str, frequency: usize) -> TableRow {
        TableRow {
            article: "1".to_string(),
            headline: headline.to_string(),
            url: "https://www.npr.org/a".to_string(),
            word: word.to_string(),
            frequency,
        }
    }

    #[test]
    fn test_write_rows_csv() {
        let mut out = Vec::new();
        write_rows(&mut out, &[row("Plain", "tariff", 4)], ',').unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Article #,Headline,URL,Word,Frequency\n1,Plain,https://www.npr.org/a,tariff,4\n"
        );
    }

    #[test]
    fn test_quoting() {
        let mut out = Vec::new();
        write_row(&mut out, &["Trade, \"tariffs\" and you", "ok"], ',').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"Trade, \"\"tariffs\"\" and you\",ok\n");
    }

    #[test]
    fn test_tsv_leaves_commas_alone() {
        let mut out = Vec::new();
        write_row(&mut out, &["a, b", "c"], '\t').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a, b\tc\n");
    }
}
