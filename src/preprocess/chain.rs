// Chain composition and the stage registry.
//
// A Chain is a linearly ordered list of stages applied in caller order —
// reordering changes output by design (lowercasing before stopword removal
// matches more stopwords than after, for example). The chain streams over
// comments in a single pass: the stream is not restartable, and once it is
// exhausted it must be rebuilt from the original source sequence.

use std::mem;
use std::path::PathBuf;

use anyhow::{bail, Result};

use super::lemma::Lemmatize;
use super::slang::SlangNormalize;
use super::stages::{
    CollapseRepeats, Lowercase, NormalizeEmoticons, NormalizeNumbers, NormalizeUrls,
    RemoveStopwords, Stem, StripHtmlEntities, StripPunctuation,
};
use super::traits::Stage;
use crate::corpus::Comment;

/// Every stage the registry can construct, selected exhaustively rather
/// than by ambient name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageKind {
    NormalizeUrls,
    NormalizeNumbers,
    NormalizeEmoticons,
    StripHtmlEntities,
    CollapseRepeats,
    /// Needs its external dictionary; a missing file fails construction.
    Slang { dictionary: PathBuf },
    Lemmatize,
    Stem,
    RemoveStopwords,
    Lowercase,
    StripPunctuation,
}

impl StageKind {
    /// Resolve a CLI stage name. The slang stage needs a dictionary path
    /// supplied separately, since a bare name cannot carry one.
    pub fn from_name(name: &str, slang_dictionary: Option<&PathBuf>) -> Result<Self> {
        Ok(match name {
            "urls" => StageKind::NormalizeUrls,
            "numbers" => StageKind::NormalizeNumbers,
            "emoticons" => StageKind::NormalizeEmoticons,
            "entities" => StageKind::StripHtmlEntities,
            "repeats" => StageKind::CollapseRepeats,
            "slang" => match slang_dictionary {
                Some(path) => StageKind::Slang {
                    dictionary: path.clone(),
                },
                None => bail!("the slang stage requires --slang-dict <FILE>"),
            },
            "lemmatize" => StageKind::Lemmatize,
            "stem" => StageKind::Stem,
            "stopwords" => StageKind::RemoveStopwords,
            "lowercase" => StageKind::Lowercase,
            "punctuation" => StageKind::StripPunctuation,
            other => bail!(
                "unknown stage {other:?}; valid stages: urls, numbers, emoticons, entities, \
                 repeats, slang, lemmatize, stem, stopwords, lowercase, punctuation"
            ),
        })
    }

    /// Build the concrete stage.
    pub fn build(&self) -> Result<Box<dyn Stage>> {
        Ok(match self {
            StageKind::NormalizeUrls => Box::new(NormalizeUrls::default()),
            StageKind::NormalizeNumbers => Box::new(NormalizeNumbers::default()),
            StageKind::NormalizeEmoticons => Box::new(NormalizeEmoticons::default()),
            StageKind::StripHtmlEntities => Box::new(StripHtmlEntities::default()),
            StageKind::CollapseRepeats => Box::new(CollapseRepeats),
            StageKind::Slang { dictionary } => Box::new(SlangNormalize::from_file(dictionary)?),
            StageKind::Lemmatize => Box::new(Lemmatize),
            StageKind::Stem => Box::new(Stem::default()),
            StageKind::RemoveStopwords => Box::new(RemoveStopwords::default()),
            StageKind::Lowercase => Box::new(Lowercase),
            StageKind::StripPunctuation => Box::new(StripPunctuation),
        })
    }
}

/// An ordered preprocessing chain.
pub struct Chain {
    stages: Vec<Box<dyn Stage>>,
}

impl Chain {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Build a chain from registry entries, failing fast if any stage
    /// cannot be constructed.
    pub fn from_kinds(kinds: &[StageKind]) -> Result<Self> {
        let stages = kinds
            .iter()
            .map(StageKind::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(stages))
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run one token sequence through every stage in order. Each stage sees
    /// the complete output of its predecessor.
    pub fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        self.stages
            .iter()
            .fold(tokens, |tokens, stage| stage.optimize(tokens))
    }

    /// Stream comments through the chain, rewriting each comment's tokens
    /// in place. Single-pass: the returned stream owns its source and is
    /// gone once consumed.
    pub fn optimize<I>(&self, comments: I) -> ChainStream<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Comment>,
    {
        ChainStream {
            chain: self,
            source: comments.into_iter(),
        }
    }
}

/// A single-pass, non-restartable stream of preprocessed comments.
pub struct ChainStream<'a, I> {
    chain: &'a Chain,
    source: I,
}

impl<I> Iterator for ChainStream<'_, I>
where
    I: Iterator<Item = Comment>,
{
    type Item = Comment;

    fn next(&mut self) -> Option<Comment> {
        let mut comment = self.source.next()?;
        comment.tokens = self.chain.apply(mem::take(&mut comment.tokens));
        Some(comment)
    }
}
