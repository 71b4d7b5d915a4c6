//! End-to-end tests for distractor selection across items

use std::collections::HashSet;

use maze_core::lexicon::LengthOnly;
use maze_core::punct::normalize;
use maze_core::scoring::{ScoreTable, ScoredToken};
use maze_core::*;

struct ListProvider(Vec<&'static str>);

impl CandidateProvider for ListProvider {
    fn candidates(&self, _thresholds: &Thresholds, _params: &Params) -> Vec<String> {
        self.0.iter().map(|w| w.to_string()).collect()
    }
}

fn sentence(text: &str, id: &str) -> Sentence {
    let words = text.split_whitespace().map(str::to_string).collect();
    Sentence::with_positional_labels(words, id, "test").unwrap()
}

fn tokens(entries: &[(&str, f64)]) -> Vec<ScoredToken> {
    entries
        .iter()
        .map(|(token, score)| ScoredToken {
            token_str: token.to_string(),
            score: *score,
        })
        .collect()
}

/// Scores for "The cat sat down" / "A dog sat down"
fn cat_dog_scores() -> ScoreTable {
    let mut table = ScoreTable::default();
    for (det, noun) in [("the", "cat"), ("a", "dog")] {
        table.insert(
            format!("{det} [MASK] sat down"),
            tokens(&[(noun, 0.25), ("ran", 0.5)]),
        );
        // "sat" has surprisal 0.1, "ran" has surprisal 3
        table.insert(
            format!("{det} {noun} [MASK] down"),
            tokens(&[("sat", 2f64.powf(-0.1)), ("ran", 0.125)]),
        );
        table.insert(format!("{det} {noun} sat [MASK]"), tokens(&[("down", 0.8)]));
    }
    table
}

fn build_generator(
    oracle: ScoreTable,
    provider: ListProvider,
    params: Params,
) -> MazeGenerator {
    MazeGenerator::builder()
        .oracle(oracle)
        .candidates(provider)
        .thresholds(LengthOnly)
        .params(params)
        .build()
        .unwrap()
}

fn small_params() -> Params {
    Params::builder().min_abs(2.0).min_delta(1.0).build().unwrap()
}

fn assert_well_formed(item: &SentenceSet) {
    for sentence in item.sentences() {
        assert_eq!(sentence.distractors().len(), sentence.words().len());
        assert_eq!(sentence.distractors()[0], PLACEHOLDER);
        assert_eq!(
            sentence.distractor_sentence(),
            sentence.distractors().join(" ")
        );
        for (word, distractor) in sentence.words().iter().zip(sentence.distractors()).skip(1) {
            if distractor != PLACEHOLDER {
                assert_ne!(normalize(word), normalize(distractor));
            }
        }
    }
}

#[test]
fn test_surprisal_separated_candidate_selected() {
    let mut items = SentenceSet::group(vec![
        sentence("The cat sat down", "1"),
        sentence("A dog sat down", "1"),
    ])
    .unwrap();
    assert_eq!(items.len(), 1);

    let mut generator = build_generator(
        cat_dog_scores(),
        ListProvider(vec!["ran", "slept", "sat"]),
        small_params(),
    );

    let item = &mut items[0];
    item.run_model(&cat_dog_scores(), 10);
    item.compute_surprisals();
    for s in item.sentences() {
        assert!((s.surprisal("2").unwrap() - 0.1).abs() < 1e-9);
        assert_eq!(s.surprisal("0"), None);
    }

    generator.process_item(item);

    // label 1 cannot take "ran" (surprisal 1 is below target 3), so it takes
    // "slept"; label 2 takes "ran" (3.0 >= 2.0); label 3 gets the rest
    for s in item.sentences() {
        assert_eq!(s.distractors(), &["x-x-x", "slept", "ran", "sat"]);
        assert_eq!(s.distractor_sentence(), "x-x-x slept ran sat");
    }
    assert_well_formed(item);
    assert_eq!(generator.repeats().history(), &["slept", "ran", "sat"]);
}

#[test]
fn test_scratch_state_released_after_processing() {
    let mut items = SentenceSet::group(vec![sentence("The cat sat down", "1")]).unwrap();
    let mut generator = build_generator(
        cat_dog_scores(),
        ListProvider(vec!["ran", "slept", "sat"]),
        small_params(),
    );
    generator.process_item(&mut items[0]);

    assert!(items[0].label_groups().is_empty());
    assert!(items[0].distractor_for("2").is_none());
    assert!(items[0].sentences()[0].distribution("2").is_none());
    assert_eq!(items[0].sentences()[0].distractors().len(), 4);
}

#[test]
fn test_repeat_cap_spans_items() {
    let mut items = SentenceSet::group(vec![
        sentence("The cat sat down", "1"),
        sentence("A dog sat down", "1"),
        sentence("The cat sat down", "2"),
        sentence("A dog sat down", "2"),
    ])
    .unwrap();

    let params = Params::builder()
        .min_abs(2.0)
        .min_delta(1.0)
        .max_repeat(1)
        .build()
        .unwrap();
    let mut generator = build_generator(
        ScoreTable::default(),
        ListProvider(vec!["ran", "slept", "sat", "lamp", "desk", "cup"]),
        params,
    );

    let mut seen_items = Vec::new();
    generator.process_all(&mut items, |item| seen_items.push(item.id().to_string()));
    assert_eq!(seen_items, vec!["1", "2"]);

    assert_eq!(
        items[0].sentences()[0].distractor_sentence(),
        "x-x-x ran slept sat"
    );
    assert_eq!(
        items[1].sentences()[0].distractor_sentence(),
        "x-x-x lamp desk cup"
    );

    let history = generator.repeats().history();
    let unique: HashSet<&String> = history.iter().collect();
    assert_eq!(unique.len(), history.len());
    for item in &items {
        assert_well_formed(item);
    }
}

#[test]
fn test_unlimited_repeats_reuse_words() {
    let mut items = SentenceSet::group(vec![
        sentence("The cat sat down", "1"),
        sentence("The cat sat down", "2"),
    ])
    .unwrap();
    let mut generator = build_generator(
        ScoreTable::default(),
        ListProvider(vec!["ran", "slept", "sat", "lamp"]),
        small_params(),
    );
    generator.process_all(&mut items, |_| {});

    assert_eq!(
        items[0].sentences()[0].distractor_sentence(),
        items[1].sentences()[0].distractor_sentence()
    );
    assert_eq!(generator.repeats().count("ran"), 2);
    assert!(generator.repeats().banned().is_empty());
}

#[test]
fn test_empty_pool_yields_placeholders() {
    let mut items = SentenceSet::group(vec![sentence("The cat sat down.", "9")]).unwrap();
    let mut generator = build_generator(ScoreTable::default(), ListProvider(Vec::new()), small_params());
    generator.process_all(&mut items, |_| {});

    let s = &items[0].sentences()[0];
    assert_eq!(s.distractor_sentence(), "x-x-x x-x-x x-x-x x-x-x.");
    assert!(generator.repeats().history().is_empty());
}

#[test]
fn test_punctuation_and_case_follow_true_word() {
    let mut items = SentenceSet::group(vec![sentence("I met Anna, today.", "3")]).unwrap();
    let mut generator = build_generator(
        ScoreTable::default(),
        ListProvider(vec!["lamp", "desk", "cup"]),
        small_params(),
    );
    generator.process_all(&mut items, |_| {});

    assert_eq!(
        items[0].sentences()[0].distractor_sentence(),
        "x-x-x lamp Desk, cup."
    );
}

#[test]
fn test_fatal_errors_surface_from_grouping() {
    let a = Sentence::new(
        vec!["a".into(), "b".into()],
        vec!["0".into(), "1".into()],
        "1",
        "",
    )
    .unwrap();
    let b = Sentence::new(
        vec!["c".into(), "d".into()],
        vec!["1".into(), "2".into()],
        "1",
        "",
    )
    .unwrap();
    assert!(matches!(
        SentenceSet::group(vec![a, b]),
        Err(MazeError::LabelCollision { .. })
    ));

    let mut set = SentenceSet::new("1");
    assert!(matches!(
        set.add(sentence("x y", "2")),
        Err(MazeError::IdMismatch { .. })
    ));

    assert!(matches!(
        Sentence::new(
            vec!["a".into(), "b".into()],
            vec!["0".into(), "0".into()],
            "1",
            ""
        ),
        Err(MazeError::DuplicateLabels { .. })
    ));
}
