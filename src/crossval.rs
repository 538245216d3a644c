// Provenance-aware cross-validation folds.
//
// A fold is a (train-indices, test-indices) pair over the concatenated
// corpus: training records occupy [0, T) and test records [T, T+S). Each
// fold shuffles the two ranges independently and never resamples across
// them — the defining difference from naive k-fold. That separation is
// what keeps a file-level split leak-free: records from the held-out file
// can never drift into a training fold.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::corpus::Dataset;

/// One evaluation round's index lists.
#[derive(Debug, Clone, Serialize)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Generates repeated index shuffles that respect the train/test boundary.
#[derive(Debug, Clone, Copy)]
pub struct FoldGenerator {
    folds: usize,
    training_size: usize,
    testing_size: usize,
}

impl FoldGenerator {
    pub fn new(folds: usize, training_size: usize, testing_size: usize) -> Self {
        Self {
            folds,
            training_size,
            testing_size,
        }
    }

    /// Fold plan for an existing dataset. Only the partition sizes matter;
    /// the comments themselves are never touched.
    pub fn for_dataset(dataset: &Dataset, folds: usize) -> Self {
        Self::new(folds, dataset.training_size(), dataset.testing_size())
    }

    /// The number of folds this generator produces.
    pub fn n_splits(&self) -> usize {
        self.folds
    }

    /// Generate every fold. Eager by choice: fold counts are small and an
    /// owned Vec keeps the caller free of borrow entanglement with the RNG.
    pub fn splits<R: Rng>(&self, rng: &mut R) -> Vec<Fold> {
        let mut folds = Vec::with_capacity(self.folds);
        for _ in 0..self.folds {
            let mut train: Vec<usize> = (0..self.training_size).collect();
            let mut test: Vec<usize> =
                (self.training_size..self.training_size + self.testing_size).collect();
            train.shuffle(rng);
            test.shuffle(rng);
            folds.push(Fold { train, test });
        }
        debug!(
            folds = folds.len(),
            training = self.training_size,
            testing = self.testing_size,
            "generated cross-validation folds"
        );
        folds
    }
}
