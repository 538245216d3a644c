// Unified corpus reader.
//
// Two on-disk layouts exist in the wild and they are reconciled here behind
// one entry point instead of two divergent parsers:
//
//   1. Header-driven: a header row names the columns (COMMENT_ID, AUTHOR,
//      DATE, CONTENT, CLASS) and content fields may be quoted. Parsed with
//      the csv crate, columns resolved by name.
//   2. Headerless legacy: five comma-split fields per line in the fixed
//      order id, author, date, content, class. Content may be a quoted
//      fragment containing embedded commas; it is reconstructed by joining
//      the middle fragments and stripping the wrapping quotes.
//
// The variant is detected from the first line: if it names the CONTENT and
// CLASS columns, the file is header-driven.
//
// Error contract: a missing or unreadable file is fatal. A malformed record
// (wrong field count, unparseable date) is silently dropped — partial corpus
// corruption must never abort a load. Non-ASCII bytes are discarded before
// parsing rather than failing the read.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::comment::Comment;

/// Read every well-formed comment from one corpus file.
pub fn read_comments(path: &Path) -> Result<Vec<Comment>> {
    let bytes = fs::read(path)
        .with_context(|| format!("cannot read corpus file {}", path.display()))?;

    // ASCII-with-ignore decoding: drop any non-ASCII byte instead of
    // failing on a stray encoding artifact.
    let text: String = bytes
        .into_iter()
        .filter(u8::is_ascii)
        .map(char::from)
        .collect();

    let comments = if has_header(&text) {
        parse_with_header(&text)?
    } else {
        parse_legacy(&text)
    };

    info!(
        file = %path.display(),
        records = comments.len(),
        "loaded corpus file"
    );
    Ok(comments)
}

/// A file is header-driven when its first line names the two columns every
/// schema variant agrees on.
fn has_header(text: &str) -> bool {
    let first = text.lines().next().unwrap_or("").to_ascii_uppercase();
    first.contains("CONTENT") && first.contains("CLASS")
}

/// Parse the header-driven layout with the csv crate, resolving the AUTHOR,
/// DATE, CONTENT, and CLASS columns by name. A file that carries a header
/// but lacks one of those columns is malformed as a whole and fails fast.
fn parse_with_header(text: &str) -> Result<Vec<Comment>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .context("corpus header row unreadable")?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .with_context(|| format!("corpus header row is missing the {name} column"))
    };
    let author_at = column("AUTHOR")?;
    let date_at = column("DATE")?;
    let content_at = column("CONTENT")?;
    let class_at = column("CLASS")?;

    let mut comments = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        // An unparseable row is a per-record failure, not a fatal one.
        let Ok(record) = record else {
            dropped += 1;
            continue;
        };
        let field = |i: usize| record.get(i).unwrap_or("");
        match Comment::from_fields(
            field(author_at),
            field(content_at),
            field(date_at),
            field(class_at),
        ) {
            Some(comment) => comments.push(comment),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "dropped malformed records");
    }
    Ok(comments)
}

/// Parse the headerless legacy layout: id, author, date, content, class.
///
/// Lines with fewer than five comma-split fields are dropped. Lines with
/// more carry embedded commas inside a quoted content field: the label is
/// the final fragment and the content is everything between the date and
/// the label, rejoined and unquoted.
fn parse_legacy(text: &str) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut dropped = 0usize;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 5 {
            dropped += 1;
            continue;
        }
        let content = fields[3..fields.len() - 1].join(",");
        let content = strip_wrapping_quotes(content.trim());
        match Comment::from_fields(fields[1], &content, fields[2], fields[fields.len() - 1]) {
            Some(comment) => comments.push(comment),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "dropped malformed records");
    }
    comments
}

fn strip_wrapping_quotes(field: &str) -> String {
    field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(field)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_header_variant() {
        let file = write_temp(
            "COMMENT_ID,AUTHOR,DATE,CONTENT,CLASS\n\
             z12,alice,2014-11-07T06:20:48,\"buy now, cheap\",1\n\
             z13,bob,2014-11-08T10:00:00,nice video,0\n",
        );
        let comments = read_comments(file.path()).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text(), "buy now, cheap");
        assert!(comments[0].is_spam);
        assert!(!comments[1].is_spam);
    }

    #[test]
    fn reads_legacy_variant_with_embedded_commas() {
        let file = write_temp(
            "z12,alice,2014-11-07T06:20:48,\"buy now, cheap\",1\n\
             z13,bob,2014-11-08T10:00:00,nice video,0\n",
        );
        let comments = read_comments(file.path()).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text(), "buy now, cheap");
        assert_eq!(comments[1].author, "bob");
    }

    #[test]
    fn drops_malformed_records_silently() {
        let file = write_temp(
            "z12,alice,2014-11-07T06:20:48,fine,1\n\
             not a record at all\n\
             z14,carol,not-a-date,also dropped,0\n\
             z15,dave,2014-11-09T09:30:00,kept,0\n",
        );
        let comments = read_comments(file.path()).unwrap();
        assert_eq!(comments.len(), 2);
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(read_comments(Path::new("/nonexistent/corpus.csv")).is_err());
    }

    #[test]
    fn empty_file_is_empty_corpus() {
        let file = write_temp("");
        assert!(read_comments(file.path()).unwrap().is_empty());
    }

    #[test]
    fn non_ascii_bytes_are_discarded() {
        let file = write_temp("z12,ali\u{00e9}ce,2014-11-07T06:20:48,caf\u{00e9} time,1\n");
        let comments = read_comments(file.path()).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author, "alice");
        assert_eq!(comments[0].text(), "caf time");
    }
}
