// Frequency-ranked vocabulary encoding (bag-of-words).
//
// Two-phase by construction: a BagOfWords accumulates counts, and fitting
// it produces an immutable Vocabulary. Transform lives only on Vocabulary,
// so "transform before fit" is unrepresentable rather than a runtime error.
//
// Codes: 0 is reserved for padding and never assigned, 1 is the
// out-of-vocabulary code, and ranked entries start at 2. Ranking is by
// descending frequency with ties broken by first appearance during
// counting, which makes fitting deterministic for a given corpus.

use std::collections::HashMap;

use tracing::info;

/// Reserved for external padding; the encoder never assigns it.
pub const PADDING_CODE: u32 = 0;
/// Every token absent from the fitted vocabulary maps here.
pub const OOV_CODE: u32 = 1;

const FIRST_RANKED_CODE: u32 = 2;

/// The fit-phase accumulator: token frequencies plus first-seen order.
#[derive(Debug, Default)]
pub struct BagOfWords {
    counts: HashMap<String, TokenStats>,
    next_first_seen: usize,
}

#[derive(Debug, Clone, Copy)]
struct TokenStats {
    count: u64,
    first_seen: usize,
}

impl BagOfWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one token sequence. Call repeatedly for every sequence in the
    /// fitting corpus (pooled train+test, or train only, per policy).
    pub fn add<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            let token = token.as_ref();
            match self.counts.get_mut(token) {
                Some(stats) => stats.count += 1,
                None => {
                    self.counts.insert(
                        token.to_string(),
                        TokenStats {
                            count: 1,
                            first_seen: self.next_first_seen,
                        },
                    );
                    self.next_first_seen += 1;
                }
            }
        }
    }

    /// The raw counter view, highest counts first (first-seen breaks ties).
    /// Reporting only — code assignment goes through `fit`.
    pub fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
            .into_iter()
            .map(|(token, stats)| (token, stats.count))
            .collect()
    }

    /// Rank and freeze the vocabulary.
    ///
    /// `max_features` keeps only the top-N ranked tokens and is applied
    /// before the `min_occurrences` filter, matching the historical
    /// counter behavior the rest of the experiment stack assumes.
    pub fn fit(&self, min_occurrences: u64, max_features: Option<usize>) -> Vocabulary {
        let mut ranked = self.ranked();
        if let Some(max) = max_features {
            ranked.truncate(max);
        }

        let codes: HashMap<String, u32> = ranked
            .into_iter()
            .filter(|(_, stats)| stats.count >= min_occurrences)
            .zip(FIRST_RANKED_CODE..)
            .map(|((token, _), code)| (token, code))
            .collect();

        info!(
            vocabulary = codes.len(),
            min_occurrences, "fitted vocabulary"
        );
        Vocabulary { codes }
    }

    fn ranked(&self) -> Vec<(String, TokenStats)> {
        let mut entries: Vec<(String, TokenStats)> = self
            .counts
            .iter()
            .map(|(token, stats)| (token.clone(), *stats))
            .collect();
        entries.sort_by(|(_, a), (_, b)| {
            b.count.cmp(&a.count).then(a.first_seen.cmp(&b.first_seen))
        });
        entries
    }
}

/// An immutable token-to-code mapping produced by `BagOfWords::fit`.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    codes: HashMap<String, u32>,
}

impl Vocabulary {
    /// The code for one token, or `OOV_CODE` if it was never fitted.
    pub fn code(&self, token: &str) -> u32 {
        self.codes.get(token).copied().unwrap_or(OOV_CODE)
    }

    /// Encode a token sequence.
    pub fn transform<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<u32> {
        tokens.iter().map(|t| self.code(t.as_ref())).collect()
    }

    /// Vocabulary cardinality, excluding the two reserved codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn spam_corpus() -> BagOfWords {
        let mut bow = BagOfWords::new();
        bow.add(&toks(&["buy", "now", "!!!"]));
        bow.add(&toks(&["hello", "world"]));
        bow.add(&toks(&["buy", "cheap"]));
        bow
    }

    #[test]
    fn ranks_by_frequency_then_first_seen() {
        let vocab = spam_corpus().fit(1, None);
        assert_eq!(vocab.code("buy"), 2);
        assert_eq!(vocab.code("now"), 3);
        assert_eq!(vocab.code("!!!"), 4);
        assert_eq!(vocab.code("hello"), 5);
        assert_eq!(vocab.code("world"), 6);
        assert_eq!(vocab.code("cheap"), 7);
        assert_eq!(vocab.len(), 6);
    }

    #[test]
    fn unseen_tokens_map_to_oov() {
        let vocab = spam_corpus().fit(1, None);
        assert_eq!(vocab.transform(&toks(&["buy", "spam"])), vec![2, OOV_CODE]);
    }

    #[test]
    fn fit_is_deterministic() {
        let a = spam_corpus().fit(1, None);
        let b = spam_corpus().fit(1, None);
        for token in ["buy", "now", "!!!", "hello", "world", "cheap", "absent"] {
            assert_eq!(a.code(token), b.code(token));
        }
    }

    #[test]
    fn min_occurrences_filters_rare_tokens() {
        let vocab = spam_corpus().fit(2, None);
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.code("buy"), 2);
        assert_eq!(vocab.code("now"), OOV_CODE);
    }

    #[test]
    fn max_features_truncates_before_occurrence_filter() {
        // Truncating to the top 3 keeps {buy, now, !!!}; the occurrence
        // filter then removes the two singletons from that shortlist rather
        // than pulling in later tokens.
        let vocab = spam_corpus().fit(2, Some(3));
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.code("buy"), 2);
    }

    #[test]
    fn padding_code_is_never_assigned() {
        let vocab = spam_corpus().fit(1, None);
        for token in ["buy", "now", "!!!", "hello", "world", "cheap"] {
            assert_ne!(vocab.code(token), PADDING_CODE);
            assert_ne!(vocab.code(token), OOV_CODE);
        }
    }

    #[test]
    fn empty_corpus_yields_empty_vocabulary() {
        let vocab = BagOfWords::new().fit(1, None);
        assert!(vocab.is_empty());
        assert_eq!(vocab.code("anything"), OOV_CODE);
    }

    #[test]
    fn most_common_reports_raw_counts() {
        let bow = spam_corpus();
        let top = bow.most_common(2);
        assert_eq!(top[0], ("buy".to_string(), 2));
        assert_eq!(top[1], ("now".to_string(), 1));
    }
}
