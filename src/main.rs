use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use chaff::corpus::{Dataset, DEFAULT_TEST_RATIO};
use chaff::crossval::FoldGenerator;
use chaff::output::CorpusReport;
use chaff::preprocess::{Chain, StageKind};
use chaff::vocab::BagOfWords;

/// Chaff: corpus preparation for spam comment classification.
///
/// Loads labeled comment files, partitions them into training and
/// evaluation sets, normalizes the token streams, and encodes them into a
/// frequency-ranked vocabulary for a downstream classifier.
#[derive(Parser)]
#[command(name = "chaff", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a corpus, run the preprocessing chain, and fit a vocabulary
    Prepare {
        /// Single-file policy: random record-level split of one file
        #[arg(long, conflicts_with_all = ["train", "pool", "hold_out"])]
        file: Option<PathBuf>,

        /// Cross-file policy: this file is the training pool (requires --test)
        #[arg(long, requires = "test", conflicts_with_all = ["pool", "hold_out"])]
        train: Option<PathBuf>,

        /// Cross-file policy: prefix of this file is the test pool
        #[arg(long, requires = "train")]
        test: Option<PathBuf>,

        /// Pooled policy: glob pattern, all records pooled then split
        #[arg(long, conflicts_with = "hold_out")]
        pool: Option<String>,

        /// Held-out policy: glob pattern, one shuffled file reserved as test
        #[arg(long)]
        hold_out: Option<String>,

        /// Fraction of records reserved for evaluation
        #[arg(long, default_value_t = DEFAULT_TEST_RATIO)]
        test_ratio: f64,

        /// RNG seed for reproducible splits (omit for entropy seeding)
        #[arg(long)]
        seed: Option<u64>,

        /// Comma-separated stage list, applied in order
        /// (e.g. "urls,repeats,lowercase,stopwords")
        #[arg(long, default_value = "")]
        stages: String,

        /// Slang dictionary (TSV); required when the stage list names slang
        #[arg(long)]
        slang_dict: Option<PathBuf>,

        /// Drop vocabulary tokens occurring fewer times than this
        #[arg(long, default_value = "1")]
        min_occurrences: u64,

        /// Keep only the top-N ranked tokens
        #[arg(long)]
        max_features: Option<usize>,

        /// Emit the report as JSON instead of colored text
        #[arg(long)]
        json: bool,
    },

    /// Generate provenance-aware cross-validation fold index lists
    Folds {
        /// Training pool size (indices 0..T)
        #[arg(long)]
        train_size: usize,

        /// Test pool size (indices T..T+S)
        #[arg(long)]
        test_size: usize,

        /// Number of folds to generate
        #[arg(long, default_value = "3")]
        folds: usize,

        /// RNG seed for reproducible folds
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chaff=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare {
            file,
            train,
            test,
            pool,
            hold_out,
            test_ratio,
            seed,
            stages,
            slang_dict,
            min_occurrences,
            max_features,
            json,
        } => {
            let mut rng = seeded_rng(seed);

            let mut dataset = match (&file, &train, &test, &pool, &hold_out) {
                (Some(path), ..) => Dataset::single_file(path, test_ratio, &mut rng)?,
                (_, Some(train), Some(test), ..) => Dataset::cross_file(train, test, test_ratio)?,
                (_, _, _, Some(pattern), _) => Dataset::pooled(pattern, test_ratio, &mut rng)?,
                (.., Some(pattern)) => Dataset::held_out_file(pattern, &mut rng)?,
                _ => bail!("choose a policy: --file, --train/--test, --pool, or --hold-out"),
            };

            let chain = build_chain(&stages, slang_dict.as_ref())?;
            if !chain.is_empty() {
                // The chain is single-pass per split; both splits go through
                // the identical stage order.
                dataset.training = chain.optimize(dataset.training).collect();
                dataset.test = chain.optimize(dataset.test).collect();
                info!("preprocessing chain applied to both splits");
            }

            // Fit on the pooled token streams of both splits, the way the
            // downstream experiment harness consumes them.
            let mut bag = BagOfWords::new();
            for comment in dataset.training.iter().chain(&dataset.test) {
                bag.add(&comment.tokens);
            }
            let vocabulary = bag.fit(min_occurrences, max_features);

            let report = CorpusReport::build(&dataset, &bag, &vocabulary);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.display();
            }
        }

        Commands::Folds {
            train_size,
            test_size,
            folds,
            seed,
        } => {
            let mut rng = seeded_rng(seed);
            let generator = FoldGenerator::new(folds, train_size, test_size);
            let folds = generator.splits(&mut rng);
            println!("{}", serde_json::to_string_pretty(&folds)?);
        }
    }

    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Parse the comma-separated stage list into a chain via the registry.
fn build_chain(stages: &str, slang_dict: Option<&PathBuf>) -> Result<Chain> {
    let kinds = stages
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| StageKind::from_name(name, slang_dict))
        .collect::<Result<Vec<_>>>()?;
    Chain::from_kinds(&kinds)
}
