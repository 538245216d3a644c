// Comment — the atomic record of every corpus.
//
// A comment's identity (author, timestamp, label) is fixed once parsed.
// The `tokens` field is the live preprocessing target: the chain rewrites
// it in place during its single pass, and nothing else touches it.

use chrono::NaiveDateTime;

/// Timestamps are ISO 8601 without a timezone; a fractional-seconds tail
/// is tolerated because some corpus exports carry one.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A single labeled comment.
#[derive(Debug, Clone)]
pub struct Comment {
    pub author: String,
    /// Whitespace-tokenized content. Mutated in place by the preprocessing
    /// chain; everything else on a comment is read-only after parsing.
    pub tokens: Vec<String>,
    pub timestamp: NaiveDateTime,
    /// True for spam, false for ham.
    pub is_spam: bool,
}

impl Comment {
    /// Assemble a comment from extracted record fields.
    ///
    /// Returns `None` when the date does not parse — the caller drops the
    /// record and moves on, per the silent-drop parsing contract.
    pub fn from_fields(author: &str, content: &str, date: &str, class: &str) -> Option<Self> {
        let timestamp = NaiveDateTime::parse_from_str(date.trim(), TIMESTAMP_FORMAT).ok()?;
        Some(Self {
            author: author.trim().to_string(),
            tokens: crate::preprocess::tokenize(content),
            timestamp,
            is_spam: class.trim() == "1",
        })
    }

    /// Rejoin the token stream into a single string (display / debugging).
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}
