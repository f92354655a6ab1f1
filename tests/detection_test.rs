//! End-to-end detection tests
//!
//! These tests drive the full profile lifecycle through the library API:
//! train profiles from raw text, save them to disk, load them back, and
//! score requests against the loaded store.

use glossa::detector::Detector;
use glossa::models::DetectRequest;
use glossa::profile::ProfileStore;
use glossa::trainer::spawn_training;

const EN_SENTENCES: &[&str] = &[
    "the quick brown fox jumps over the lazy dog",
    "a journey of a thousand miles begins with a single step",
    "all that glitters is not gold and all who wander are not lost",
    "to be or not to be that is the question",
];

const FR_SENTENCES: &[&str] = &[
    "le renard brun rapide saute par dessus le chien paresseux",
    "un voyage de mille lieues commence toujours par un premier pas",
    "tout ce qui brille n'est pas or et la nuit porte conseil",
    "être ou ne pas être telle est la question",
];

/// Build repeated training units so every gram survives the prune.
fn units(sentences: &[&str], repeat: usize) -> Vec<String> {
    let mut out = Vec::new();
    for _ in 0..repeat {
        out.extend(sentences.iter().map(|s| s.to_string()));
    }
    out
}

/// Train en + fr profiles, round-trip them through disk, and load.
fn trained_store(dir: &std::path::Path) -> ProfileStore {
    let pipeline = spawn_training(vec![
        ("en".to_string(), units(EN_SENTENCES, 3)),
        ("fr".to_string(), units(FR_SENTENCES, 3)),
    ]);
    let (trained, stats) = pipeline.join();
    assert_eq!(stats.failed, 0, "no training worker should panic");

    let mut store = ProfileStore::new();
    for result in trained {
        store.insert(result.lang, result.profile);
    }
    store.save(dir).expect("saving profiles should succeed");

    ProfileStore::load(dir, &["all".to_string()]).expect("loading profiles should succeed")
}

#[test]
fn test_train_save_load_detect_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = trained_store(dir.path());
    assert_eq!(store.languages(), vec!["en", "fr"]);

    let detector = Detector::new(store);
    let detection = detector.detect(&DetectRequest::new(EN_SENTENCES[0]).with_seed(7));

    assert_eq!(detection.lang, "en", "langs: {:?}", detection.langs);
    assert!(
        detection.prob > 0.5,
        "winner should carry most of the mass, got {}",
        detection.prob
    );
    assert!(detection.tokens_total > 0);
    assert!(detection.tokens_processed > 0);
}

#[test]
fn test_winner_is_stable_across_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let detector = Detector::new(trained_store(dir.path()));

    for seed in 0..32 {
        let detection = detector.detect(&DetectRequest::new(EN_SENTENCES[1]).with_seed(seed));
        assert_eq!(
            detection.lang, "en",
            "seed {} picked {:?}",
            seed, detection.langs
        );
    }
}

#[test]
fn test_same_seed_reproduces_the_full_distribution() {
    let dir = tempfile::tempdir().unwrap();
    let detector = Detector::new(trained_store(dir.path()));
    let request = DetectRequest::new(FR_SENTENCES[0]).with_seed(99);

    let first = detector.detect(&request);
    let second = detector.detect(&request);

    assert_eq!(first, second);
    assert_eq!(first.lang, "fr");
}

#[test]
fn test_zero_coefficient_eliminates_a_language() {
    let dir = tempfile::tempdir().unwrap();
    let detector = Detector::new(trained_store(dir.path()));

    let request = DetectRequest::new(EN_SENTENCES[0])
        .with_coefficient("en", 0.0)
        .with_seed(3);
    let detection = detector.detect(&request);

    assert_eq!(detection.lang, "fr");
    assert!(!detection.langs.contains_key("en"));
}

#[test]
fn test_restricting_candidates_forces_the_winner() {
    let dir = tempfile::tempdir().unwrap();
    let detector = Detector::new(trained_store(dir.path()));

    // English input scored only against fr exercises the floor probabilities
    // on nearly every token; the lone candidate still normalizes to 1.
    let request = DetectRequest::new(EN_SENTENCES[0])
        .with_langs(["fr"])
        .with_seed(11);
    let detection = detector.detect(&request);

    assert_eq!(detection.lang, "fr");
    assert_eq!(detection.prob, 1.0);
    assert!(detection.strict);
    assert_eq!(detection.langs.len(), 1);
}

#[test]
fn test_unknown_candidates_yield_empty_detection() {
    let dir = tempfile::tempdir().unwrap();
    let detector = Detector::new(trained_store(dir.path()));

    let request = DetectRequest::new(EN_SENTENCES[0]).with_langs(["zz", "yy"]);
    let detection = detector.detect(&request);

    assert_eq!(detection.lang, "");
    assert_eq!(detection.prob, 0.0);
    assert!(!detection.strict);
    assert!(detection.langs.is_empty());
    assert!(detection.tokens_total > 0, "input still tokenizes");
}
