// Slang normalization — dictionary-driven replacement of informal tokens.
//
// The dictionary is an external tab-separated table, one mapping per line:
//
//   informal-term<TAB>canonical-term
//
// Lookups are case-insensitive. After replacement the token sequence is
// de-duplicated — consecutive and non-consecutive repeats both collapse to
// the first occurrence — because slang expansion tends to produce stuttered
// canonical forms ("u u r" -> "you you are" -> "you are").

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::traits::Stage;

/// Replace informal tokens with canonical forms, then de-duplicate.
pub struct SlangNormalize {
    /// Keys stored lowercase; lookup lowercases the candidate token.
    mapping: HashMap<String, String>,
}

impl SlangNormalize {
    /// Load the dictionary from a TSV file. A missing or unreadable file is
    /// fatal: the stage cannot exist without its table.
    pub fn from_file(path: &Path) -> Result<Self> {
        let table = fs::read_to_string(path)
            .with_context(|| format!("cannot read slang dictionary {}", path.display()))?;

        let mut mapping = HashMap::new();
        let mut skipped = 0usize;
        for line in table.lines() {
            match line.split_once('\t') {
                Some((informal, canonical)) if !informal.trim().is_empty() => {
                    mapping.insert(
                        informal.trim().to_lowercase(),
                        canonical.trim().to_string(),
                    );
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, "skipped malformed slang dictionary lines");
        }
        Ok(Self { mapping })
    }

    /// Build from in-memory pairs (tests, embedded defaults).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            mapping: pairs
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl Stage for SlangNormalize {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        let replaced = tokens.into_iter().map(|t| {
            self.mapping
                .get(&t.to_lowercase())
                .cloned()
                .unwrap_or(t)
        });

        // First-occurrence de-duplication over the whole sequence.
        let mut seen = HashSet::new();
        replaced.filter(|t| seen.insert(t.clone())).collect()
    }
}
