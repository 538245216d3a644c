// The stage library: tokenization plus the simple single-token transforms.
//
// Sentinel tokens use angle brackets, which whitespace tokenization never
// produces as a bare token; they are plain constants rather than config so
// every experiment encodes the same classes the same way.

use std::collections::HashSet;

use regex_lite::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use super::traits::Stage;

pub const URL_TOKEN: &str = "<url>";
pub const NUMBER_TOKEN: &str = "<number>";
pub const EMOTICON_TOKEN: &str = "<emoticon>";

/// Split a raw comment string into tokens on whitespace.
///
/// Deliberately not a word tokenizer: emoticons (":-D"), runs of repeated
/// punctuation ("!!!"), and @mentions survive as single tokens, which the
/// normalization stages below rely on.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Replace URL-looking tokens with a sentinel. The heuristic is a dot
/// followed by a 2–3 letter suffix; tokens carry no internal whitespace by
/// construction.
pub struct NormalizeUrls {
    pattern: Regex,
}

impl Default for NormalizeUrls {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"\.[a-zA-Z]{2,3}\b").unwrap(),
        }
    }
}

impl Stage for NormalizeUrls {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|t| {
                if self.pattern.is_match(&t) {
                    URL_TOKEN.to_string()
                } else {
                    t
                }
            })
            .collect()
    }
}

/// Replace standalone numeric tokens with a sentinel. Word-boundary only:
/// "2013" matches, "u2" does not.
pub struct NormalizeNumbers {
    pattern: Regex,
}

impl Default for NormalizeNumbers {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"^[0-9]+$").unwrap(),
        }
    }
}

impl Stage for NormalizeNumbers {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|t| {
                if self.pattern.is_match(&t) {
                    NUMBER_TOKEN.to_string()
                } else {
                    t
                }
            })
            .collect()
    }
}

/// Replace short colon-delimited glyph tokens ("o:-)", "=:3") with a
/// sentinel: a 1–3 character lead, a colon, and a 1–3 character tail.
pub struct NormalizeEmoticons {
    pattern: Regex,
}

impl Default for NormalizeEmoticons {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"^\S{1,3}:\S{1,3}$").unwrap(),
        }
    }
}

impl Stage for NormalizeEmoticons {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|t| {
                if self.pattern.is_match(&t) {
                    EMOTICON_TOKEN.to_string()
                } else {
                    t
                }
            })
            .collect()
    }
}

/// Drop tokens that are HTML entities (`&amp;`, `&#39;`).
pub struct StripHtmlEntities {
    pattern: Regex,
}

impl Default for StripHtmlEntities {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"^&#?[a-zA-Z0-9]+;$").unwrap(),
        }
    }
}

impl Stage for StripHtmlEntities {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.pattern.is_match(t))
            .collect()
    }
}

/// Collapse runs of three or more identical characters to two, per
/// character run: "HIIII!!!!" becomes "HII!!".
#[derive(Default)]
pub struct CollapseRepeats;

impl Stage for CollapseRepeats {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().map(|t| collapse_runs(&t)).collect()
    }
}

fn collapse_runs(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut run_char = None;
    let mut run_len = 0usize;
    for c in token.chars() {
        if Some(c) == run_char {
            run_len += 1;
        } else {
            run_char = Some(c);
            run_len = 1;
        }
        if run_len <= 2 {
            out.push(c);
        }
    }
    out
}

/// Fold every token to lowercase.
#[derive(Default)]
pub struct Lowercase;

impl Stage for Lowercase {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().map(|t| t.to_lowercase()).collect()
    }
}

/// Remove every non-letter character from each token; tokens that end up
/// empty are dropped.
#[derive(Default)]
pub struct StripPunctuation;

impl Stage for StripPunctuation {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|t| t.chars().filter(|c| c.is_alphabetic()).collect::<String>())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Drop tokens found in a stopword set. Membership is tested on the token
/// as-is and the shipped set is lowercase, so this stage is meant to run
/// after `Lowercase` — running it before leaves capitalized stopwords
/// untouched, and chains depend on that ordering behavior.
pub struct RemoveStopwords {
    words: HashSet<String>,
}

impl RemoveStopwords {
    /// Build against an explicit stopword list.
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for RemoveStopwords {
    fn default() -> Self {
        Self::with_words(stop_words::get(stop_words::LANGUAGE::English))
    }
}

impl Stage for RemoveStopwords {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.words.contains(t))
            .collect()
    }
}

/// Reduce each token to its stem with the Snowball English stemmer.
pub struct Stem {
    stemmer: Stemmer,
}

impl Default for Stem {
    fn default() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Stage for Stem {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|t| self.stemmer.stem(&t).into_owned())
            .collect()
    }
}
