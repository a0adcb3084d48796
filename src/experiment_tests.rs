use super::*;
use crate::bitmap::{Bitmap, BITMAP_PIXELS, BITMAP_SIZE};
use crate::classification::Method;
use crate::config::MethodConfig;

/// A 16×16 glyph: "ell" is an L, "gamma" the same strokes mirrored upside
/// down. `shift` moves it horizontally without clipping.
fn glyph(class: &str, shift: i32) -> Bitmap {
    let left = usize::try_from(4 + shift).expect("non-negative column");
    let bar_row = if class == "ell" { 13 } else { 2 };
    let mut pixels = vec![0.0; BITMAP_PIXELS];
    for row in 2..=13 {
        pixels[row * BITMAP_SIZE + left] = 1.0;
    }
    for col in left..=left + 6 {
        pixels[bar_row * BITMAP_SIZE + col] = 1.0;
    }
    Bitmap::from_pixels(pixels).expect("valid glyph")
}

fn store() -> SampleStore {
    let mut store = SampleStore::new();
    for class in ["ell", "gamma"] {
        store.insert("A", class, (-1..=1).map(|s| glyph(class, s)).collect());
        store.insert("B", class, vec![glyph(class, -2), glyph(class, 2)]);
    }
    store
}

fn config(methods: Vec<MethodConfig>) -> ExperimentConfig {
    ExperimentConfig {
        methods,
        ..ExperimentConfig::default()
    }
}

#[test]
fn test_reports_in_method_then_dataset_order() {
    let experiment = Experiment::new(config(vec![
        MethodConfig::new(Method::KNearestNeighbors { k: 1, p: 2.0 }, FeatureKind::Moment),
        MethodConfig::new(Method::MinimumDistance, FeatureKind::Pixel),
    ]));
    let reports = experiment.run(&store()).expect("run");
    let keys: Vec<(&str, &str)> = reports
        .iter()
        .map(|r| (r.name.as_str(), r.dataset.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("1-NN (p=2)", "A"),
            ("1-NN (p=2)", "B"),
            ("minimum distance", "A"),
            ("minimum distance", "B"),
        ]
    );
    assert!(reports.iter().all(|r| r.train_dataset == "A"));
}

#[test]
fn test_moment_features_are_shift_invariant() {
    // Central moments ignore translation, so shifted test glyphs match exactly.
    let experiment = Experiment::new(config(vec![MethodConfig::new(
        Method::KNearestNeighbors { k: 1, p: 2.0 },
        FeatureKind::Moment,
    )]));
    let reports = experiment.run(&store()).expect("run");
    assert_eq!(reports[0].confusion.total(), 6);
    assert_eq!(reports[0].confusion.error_count(), 0);
    assert_eq!(reports[1].confusion.total(), 4);
    assert_eq!(reports[1].confusion.error_count(), 0);
}

#[test]
fn test_pixel_nearest_neighbor_on_training_set() {
    let experiment = Experiment::new(config(vec![MethodConfig::new(
        Method::KNearestNeighbors { k: 1, p: 2.0 },
        FeatureKind::Pixel,
    )]));
    let reports = experiment.run(&store()).expect("run");
    assert_eq!(reports[0].features, FeatureKind::Pixel);
    assert_eq!(reports[0].confusion.error_count(), 0);
    assert_eq!(reports[0].confusion.labels(), &["ell", "gamma"]);
}

#[test]
fn test_pairwise_bayes_runs_on_pixels() {
    let experiment = Experiment::new(config(vec![MethodConfig::new(
        Method::PairwiseBayes,
        FeatureKind::Pixel,
    )]));
    let reports = experiment.run(&store()).expect("run");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].name, "pairwise Bayes");
    assert_eq!(reports[0].confusion.error_count(), 0);
}

#[test]
fn test_missing_eval_dataset() {
    let mut cfg = config(vec![MethodConfig::new(Method::MinimumDistance, FeatureKind::Moment)]);
    cfg.eval_datasets = vec!["A".to_string(), "C".to_string()];
    let err = Experiment::new(cfg).run(&store()).expect_err("C not loaded");
    assert!(matches!(err, PatrecError::MissingDataset { ref dataset } if dataset == "C"));
}

#[test]
fn test_missing_train_dataset() {
    let cfg = config(vec![MethodConfig::new(Method::MinimumDistance, FeatureKind::Moment)])
        .with_train_dataset("Z");
    let err = Experiment::new(cfg).run(&store()).expect_err("Z not loaded");
    assert!(matches!(err, PatrecError::MissingDataset { ref dataset } if dataset == "Z"));
}

#[test]
fn test_zero_ink_glyph_aborts_moment_run() {
    let mut store = store();
    store.insert("A", "gamma", vec![Bitmap::from_pixels(vec![0.0; BITMAP_PIXELS]).expect("blank")]);
    let cfg = config(vec![MethodConfig::new(Method::MinimumDistance, FeatureKind::Moment)]);
    let err = Experiment::new(cfg).run(&store).expect_err("blank glyph");
    assert!(matches!(err, PatrecError::ZeroInk { ref label, index: 3 } if label == "gamma"));
}

#[test]
fn test_blank_glyph_is_fine_for_pixels() {
    let mut store = store();
    store.insert("A", "gamma", vec![Bitmap::from_pixels(vec![0.0; BITMAP_PIXELS]).expect("blank")]);
    let cfg = config(vec![MethodConfig::new(Method::MinimumDistance, FeatureKind::Pixel)]);
    assert!(Experiment::new(cfg).run(&store).is_ok());
}

#[test]
fn test_invalid_config_rejected() {
    let err = Experiment::new(config(Vec::new())).run(&store()).expect_err("no methods");
    assert!(err.to_string().contains("methods"));
}

#[test]
fn test_report_serializes() {
    let experiment = Experiment::new(config(vec![MethodConfig::new(
        Method::MinimumDistance,
        FeatureKind::Moment,
    )]));
    let reports = experiment.run(&store()).expect("run");
    let json = serde_json::to_string(&reports[0]).expect("serialize");
    assert!(json.contains(r#""features":"moment""#));
    assert!(json.contains(r#""dataset":"A""#));
    let back: MethodReport = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, reports[0]);
}
