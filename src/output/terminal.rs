// Colored terminal output for corpus preparation summaries.
//
// The report is the operator-facing view of one prepared dataset: split
// sizes, label balance, and the head of the fitted vocabulary. It also
// serializes to JSON for downstream harnesses.

use colored::Colorize;
use serde::Serialize;

use crate::corpus::Dataset;
use crate::vocab::{BagOfWords, Vocabulary};

/// Summary of one prepared corpus.
#[derive(Debug, Serialize)]
pub struct CorpusReport {
    pub training_size: usize,
    pub testing_size: usize,
    pub training_spam: usize,
    pub testing_spam: usize,
    pub provenance: String,
    pub vocabulary_size: usize,
    /// Highest-frequency tokens with their raw counts.
    pub top_tokens: Vec<(String, u64)>,
}

impl CorpusReport {
    pub fn build(dataset: &Dataset, bag: &BagOfWords, vocabulary: &Vocabulary) -> Self {
        Self {
            training_size: dataset.training_size(),
            testing_size: dataset.testing_size(),
            training_spam: dataset.training.iter().filter(|c| c.is_spam).count(),
            testing_spam: dataset.test.iter().filter(|c| c.is_spam).count(),
            provenance: dataset.provenance.as_str().to_string(),
            vocabulary_size: vocabulary.len(),
            top_tokens: bag.most_common(10),
        }
    }

    /// Render the report for a terminal.
    pub fn display(&self) {
        println!("\n{}", "=== Corpus Report ===".bold());
        println!();
        println!(
            "  Training: {} comments ({} spam / {} ham)",
            self.training_size.to_string().bold(),
            self.training_spam.to_string().red(),
            (self.training_size - self.training_spam).to_string().green(),
        );
        println!(
            "  Testing:  {} comments ({} spam / {} ham)",
            self.testing_size.to_string().bold(),
            self.testing_spam.to_string().red(),
            (self.testing_size - self.testing_spam).to_string().green(),
        );
        println!("  Split provenance: {}", self.provenance.bold());
        println!(
            "  Vocabulary: {} tokens (codes 2..{})",
            self.vocabulary_size.to_string().bold(),
            self.vocabulary_size + 1,
        );

        if !self.top_tokens.is_empty() {
            println!("\n  Most frequent tokens:");
            for (token, count) in &self.top_tokens {
                println!("    {:>6}  {}", count, token.dimmed());
            }
        }
        println!();
    }
}
