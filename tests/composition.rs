// Composition tests — the full preparation flow chained end to end:
//   corpus files -> Dataset -> Chain -> BagOfWords -> Vocabulary -> folds
// without touching anything beyond temporary files.

use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use chaff::corpus::Dataset;
use chaff::crossval::FoldGenerator;
use chaff::preprocess::{Chain, StageKind};
use chaff::vocab::{BagOfWords, OOV_CODE};

#[test]
fn prepared_corpus_round_trip() {
    let dir = TempDir::new().unwrap();
    let train_path = dir.path().join("train.csv");
    let test_path = dir.path().join("test.csv");
    fs::write(
        &train_path,
        "COMMENT_ID,AUTHOR,DATE,CONTENT,CLASS\n\
         z1,spammer,2014-11-07T06:20:48,BUY NOW at spam.com !!!,1\n\
         z2,fan,2014-11-07T07:00:00,great video thanks,0\n\
         z3,spammer,2014-11-07T08:15:30,BUY cheap followers 2013,1\n\
         z4,fan,2014-11-07T09:45:12,I liked the song,0\n",
    )
    .unwrap();
    fs::write(
        &test_path,
        "COMMENT_ID,AUTHOR,DATE,CONTENT,CLASS\n\
         z5,other,2014-11-08T10:00:00,BUY now,1\n\
         z6,other,2014-11-08T11:30:00,lovely tune,0\n",
    )
    .unwrap();

    // File-level split: train on A, prefix of B as test (ceil(4 * 0.3) = 2).
    let dataset = Dataset::cross_file(&train_path, &test_path, 0.3).unwrap();
    assert_eq!(dataset.training_size(), 4);
    assert_eq!(dataset.testing_size(), 2);

    // Folds are planned from the partition sizes before preprocessing ever
    // runs; the comments themselves are irrelevant to the fold generator.
    let generator = FoldGenerator::for_dataset(&dataset, 3);

    // Identical chain over both splits.
    let chain = Chain::from_kinds(&[
        StageKind::NormalizeUrls,
        StageKind::NormalizeNumbers,
        StageKind::Lowercase,
    ])
    .unwrap();
    let training: Vec<_> = chain.optimize(dataset.training).collect();
    let test: Vec<_> = chain.optimize(dataset.test).collect();

    assert_eq!(training[0].tokens, vec!["buy", "now", "at", "<url>", "!!!"]);
    assert_eq!(training[2].tokens[3], "<number>");

    // Vocabulary fitted on the pooled token streams.
    let mut bag = BagOfWords::new();
    for comment in training.iter().chain(&test) {
        bag.add(&comment.tokens);
    }
    let vocabulary = bag.fit(1, None);

    // "buy" appears three times across the pool and ranks first.
    assert_eq!(vocabulary.code("buy"), 2);
    let encoded = vocabulary.transform(&training[0].tokens);
    assert!(!encoded.contains(&OOV_CODE), "all fitted tokens must encode");
    assert_eq!(encoded[0], 2);

    // A token never seen during fitting encodes as OOV.
    assert_eq!(
        vocabulary.transform(&["buy".to_string(), "unseen".to_string()]),
        vec![2, OOV_CODE]
    );

    // Folds respect the file-level boundary.
    let mut rng = StdRng::seed_from_u64(99);
    for fold in generator.splits(&mut rng) {
        assert!(fold.train.iter().all(|&i| i < 4));
        assert!(fold.test.iter().all(|&i| (4..6).contains(&i)));
    }
}

#[test]
fn vocabulary_example_from_the_experiment_notes() {
    let corpus: Vec<Vec<String>> = [
        vec!["buy", "now", "!!!"],
        vec!["hello", "world"],
        vec!["buy", "cheap"],
    ]
    .into_iter()
    .map(|doc| doc.into_iter().map(str::to_string).collect())
    .collect();

    let mut bag = BagOfWords::new();
    for doc in &corpus {
        bag.add(doc);
    }
    let vocabulary = bag.fit(1, None);

    let expected = [
        ("buy", 2),
        ("now", 3),
        ("!!!", 4),
        ("hello", 5),
        ("world", 6),
        ("cheap", 7),
    ];
    for (token, code) in expected {
        assert_eq!(vocabulary.code(token), code, "code for {token}");
    }
    assert_eq!(
        vocabulary.transform(&["buy".to_string(), "spam".to_string()]),
        vec![2, 1]
    );
}

#[test]
fn stage_order_sensitivity_survives_the_registry() {
    let input: Vec<String> = ["The", "THE", "cat"].iter().map(|s| s.to_string()).collect();

    let lower_first =
        Chain::from_kinds(&[StageKind::Lowercase, StageKind::RemoveStopwords]).unwrap();
    assert_eq!(lower_first.apply(input.clone()), vec!["cat"]);

    let stop_first =
        Chain::from_kinds(&[StageKind::RemoveStopwords, StageKind::Lowercase]).unwrap();
    assert_eq!(stop_first.apply(input), vec!["the", "the", "cat"]);
}

#[test]
fn collapse_then_lowercase_normalizes_shouting() {
    let chain = Chain::from_kinds(&[StageKind::CollapseRepeats, StageKind::Lowercase]).unwrap();
    let out = chain.apply(vec!["HIIII!!!!".to_string(), "HI".to_string()]);
    assert_eq!(out, vec!["hii!!", "hi"]);
}
