// Dataset partitioning policies.
//
// A Dataset is a (training, test) pair of comment sequences plus a
// provenance tag recording how the split was made. Provenance matters
// downstream: a record-level split may be resampled freely during
// cross-validation, while a file-level split must keep the file boundary
// intact in every fold or information leaks between them.
//
// Every randomized decision (record shuffles, held-out file choice) goes
// through an explicit RNG handed in by the caller, so a seeded run is fully
// reproducible.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use super::comment::Comment;
use super::reader::read_comments;

/// The fraction of records reserved for evaluation when the caller does not
/// say otherwise.
pub const DEFAULT_TEST_RATIO: f64 = 0.3;

/// How a dataset's train/test boundary came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Train and test were drawn from one pooled, shuffled corpus.
    RecordLevel,
    /// Train and test originate from disjoint source files. Folds must
    /// never mix the two sides.
    FileLevel,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::RecordLevel => "record-level",
            Provenance::FileLevel => "file-level",
        }
    }
}

/// A partitioned corpus. Never mutated after construction except through
/// the comments' `tokens` fields during preprocessing.
#[derive(Debug)]
pub struct Dataset {
    pub training: Vec<Comment>,
    pub test: Vec<Comment>,
    pub provenance: Provenance,
}

impl Dataset {
    /// Parse one file and split its records uniformly at random by
    /// `test_ratio` (not stratified by label). Record-level provenance.
    pub fn single_file<R: Rng>(path: &Path, test_ratio: f64, rng: &mut R) -> Result<Self> {
        check_test_ratio(test_ratio)?;
        let comments = read_comments(path)?;
        let (training, test) = random_split(comments, test_ratio, rng);
        Ok(Self::log_new(training, test, Provenance::RecordLevel))
    }

    /// Train on all of file A; test on a deterministic prefix of file B of
    /// length `ceil(len(A) * test_ratio)` (capped by B's size). File-level
    /// provenance — re-running with the same files and ratio yields the
    /// same test set.
    pub fn cross_file(training_path: &Path, test_path: &Path, test_ratio: f64) -> Result<Self> {
        check_test_ratio(test_ratio)?;
        let training = read_comments(training_path)?;
        let mut test = read_comments(test_path)?;
        let wanted = (training.len() as f64 * test_ratio).ceil() as usize;
        test.truncate(wanted);
        Ok(Self::log_new(training, test, Provenance::FileLevel))
    }

    /// Parse every file matching `pattern`, pool all records, then apply
    /// the single-file random split. Record-level provenance.
    pub fn pooled<R: Rng>(pattern: &str, test_ratio: f64, rng: &mut R) -> Result<Self> {
        check_test_ratio(test_ratio)?;
        let mut pool = Vec::new();
        for path in glob_files(pattern)? {
            pool.extend(read_comments(&path)?);
        }
        let (training, test) = random_split(pool, test_ratio, rng);
        Ok(Self::log_new(training, test, Provenance::RecordLevel))
    }

    /// Shuffle the files matching `pattern`, reserve the first shuffled file
    /// entirely as the test set, and pool the rest as training. Only the
    /// choice of reserved file is random; no per-record split happens.
    /// File-level provenance.
    pub fn held_out_file<R: Rng>(pattern: &str, rng: &mut R) -> Result<Self> {
        let mut files = glob_files(pattern)?;
        files.shuffle(rng);
        let test = read_comments(&files[0])?;
        let mut training = Vec::new();
        for path in &files[1..] {
            training.extend(read_comments(path)?);
        }
        Ok(Self::log_new(training, test, Provenance::FileLevel))
    }

    pub fn training_size(&self) -> usize {
        self.training.len()
    }

    pub fn testing_size(&self) -> usize {
        self.test.len()
    }

    fn log_new(training: Vec<Comment>, test: Vec<Comment>, provenance: Provenance) -> Self {
        info!(
            training = training.len(),
            test = test.len(),
            provenance = provenance.as_str(),
            "partitioned corpus"
        );
        Self {
            training,
            test,
            provenance,
        }
    }
}

/// Shuffle, then carve off `ceil(len * test_ratio)` records as the test set.
fn random_split<R: Rng>(
    mut comments: Vec<Comment>,
    test_ratio: f64,
    rng: &mut R,
) -> (Vec<Comment>, Vec<Comment>) {
    comments.shuffle(rng);
    let test_len = ((comments.len() as f64) * test_ratio).ceil() as usize;
    let test_len = test_len.min(comments.len());
    let test = comments.split_off(comments.len() - test_len);
    (comments, test)
}

/// A test ratio outside [0, 1] is a caller contract violation.
fn check_test_ratio(test_ratio: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&test_ratio) {
        bail!("test_ratio must be within [0, 1], got {test_ratio}");
    }
    Ok(())
}

/// Resolve a glob pattern to a sorted file list. Matching nothing is a
/// configuration error surfaced at construction time, and sorting keeps
/// any later shuffle reproducible under a fixed seed.
fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob::glob(pattern)
        .with_context(|| format!("invalid glob pattern {pattern:?}"))?
        .filter_map(|entry| entry.ok())
        .collect();
    if files.is_empty() {
        bail!("no corpus files match the pattern {pattern:?}");
    }
    files.sort();
    Ok(files)
}
