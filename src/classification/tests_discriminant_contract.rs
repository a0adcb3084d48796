// =========================================================================
// FALSIFY-DISC: class-mean and pairwise discriminant contract tests
//
// Claims pinned here:
//   - minimum distance returns the class whose mean is queried
//   - the Mahalanobis form is invariant under a sign flip of x - m
//   - swapping the classes of a pairwise discriminant negates w and w0
//   - ties between classes resolve to the first label in order
//   - the pairwise vote winner holds the most votes
// =========================================================================

use super::*;

fn three_classes() -> LabeledSet<Vector<f32>> {
    let mut set = LabeledSet::new();
    for (dx, dy) in [(0.0, 0.0), (1.0, 0.3), (0.2, 1.0), (0.9, 0.8)] {
        set.push("a", Vector::from_slice(&[dx, dy]));
        set.push("b", Vector::from_slice(&[dx + 6.0, dy]));
        set.push("c", Vector::from_slice(&[dx, dy + 6.0]));
    }
    set
}

fn glyph_like() -> LabeledSet<Vector<f32>> {
    let mut set = LabeledSet::new();
    set.push("0", Vector::from_slice(&[1.0, 1.0, 1.0, 0.0, 1.0, 1.0]));
    set.push("0", Vector::from_slice(&[1.0, 1.0, 0.0, 0.0, 1.0, 1.0]));
    set.push("1", Vector::from_slice(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0]));
    set.push("1", Vector::from_slice(&[0.0, 1.0, 0.0, 1.0, 0.0, 0.0]));
    set.push("7", Vector::from_slice(&[1.0, 1.0, 1.0, 0.0, 0.0, 1.0]));
    set
}

/// FALSIFY-DISC-001: Querying a class mean returns that class
#[test]
fn falsify_disc_001_mean_query_returns_class() {
    let train = three_classes();
    let mut model = MinimumDistance::new();
    model.fit(&train).expect("fit");
    let means = model.means().expect("fitted").clone();
    for (label, mean) in &means {
        let pred = model.classify(mean).expect("classify");
        assert_eq!(pred, label, "FALSIFIED DISC-001: mean of {label} classified as {pred}");
    }

    let mut pooled = PooledCovariance::new();
    pooled.fit(&train).expect("fit");
    for (label, mean) in &means {
        let pred = pooled.classify(mean).expect("classify");
        assert_eq!(pred, label, "FALSIFIED DISC-001: pooled mean of {label} classified as {pred}");
    }
}

/// FALSIFY-DISC-002: Equidistant means resolve to the first class
#[test]
fn falsify_disc_002_tie_to_first_class() {
    let mut train = LabeledSet::new();
    train.push("first", Vector::from_slice(&[1.0, 0.0]));
    train.push("second", Vector::from_slice(&[0.0, 2.0]));
    let mut model = MinimumDistance::new();
    model.fit(&train).expect("fit");
    // Squared distances 1 and 4: the first class is strictly closer.
    let pred = model.classify(&Vector::from_slice(&[0.0, 0.0])).expect("classify");
    assert_eq!(pred, "first", "FALSIFIED DISC-002: got {pred}");

    let mut tied = LabeledSet::new();
    tied.push("first", Vector::from_slice(&[1.0, 0.0]));
    tied.push("second", Vector::from_slice(&[0.0, 1.0]));
    model.fit(&tied).expect("fit");
    let pred = model.classify(&Vector::from_slice(&[0.0, 0.0])).expect("classify");
    assert_eq!(pred, "first", "FALSIFIED DISC-002: tie resolved to {pred}");
}

/// FALSIFY-DISC-003: One-hot scenario picks the first class
#[test]
fn falsify_disc_003_one_hot_scenario() {
    let mut e0 = vec![0.0; 10];
    e0[0] = 1.0;
    let mut e1 = vec![0.0; 10];
    e1[1] = 1.0;
    let mut query = vec![0.0; 10];
    query[0] = 0.9;
    query[1] = 0.1;

    let mut train = LabeledSet::new();
    train.push("first", Vector::from_vec(e0));
    train.push("second", Vector::from_vec(e1));

    let mut model = MinimumDistance::new();
    model.fit(&train).expect("fit");
    let pred = model.classify(&Vector::from_vec(query)).expect("classify");
    assert_eq!(pred, "first", "FALSIFIED DISC-003: got {pred}");
}

/// FALSIFY-DISC-004: (x - m)ᵀ C⁻¹ (x - m) equals (m - x)ᵀ C⁻¹ (m - x)
#[test]
fn falsify_disc_004_quadratic_form_sign_invariant() {
    let mut model = PooledCovariance::new();
    model.fit(&three_classes()).expect("fit");
    let inv = model.inverse_covariance().expect("fitted");
    let x = Vector::from_slice(&[2.5, -1.0]);
    for (label, mean) in model.means().expect("fitted") {
        let forward = inv.quadratic_form(&(&x - mean)).expect("square");
        let backward = inv.quadratic_form(&(mean - &x)).expect("square");
        assert!(
            (forward - backward).abs() <= 1e-4 * forward.abs().max(1.0),
            "FALSIFIED DISC-004: class {label}: {forward} != {backward}"
        );
        assert!(forward >= 0.0, "FALSIFIED DISC-004: negative distance {forward}");
    }
}

/// FALSIFY-DISC-005: Swapping the two classes negates w and w0
#[test]
fn falsify_disc_005_pairwise_antisymmetry() {
    let mut model = PairwiseBayes::new();
    model.fit(&glyph_like()).expect("fit");
    let freq = model.frequencies();
    for i in 0..freq.len() {
        for j in (i + 1)..freq.len() {
            let forward = PairDiscriminant::new(i, &freq[i], j, &freq[j]).expect("same length");
            let backward = PairDiscriminant::new(j, &freq[j], i, &freq[i]).expect("same length");
            for (k, (w, v)) in forward.weights.iter().zip(backward.weights.iter()).enumerate() {
                assert!(
                    (w + v).abs() <= 1e-5 * w.abs().max(1.0),
                    "FALSIFIED DISC-005: pair ({i},{j}) weight {k}: {w} vs swapped {v}"
                );
            }
            assert!(
                (forward.bias + backward.bias).abs() <= 1e-4 * forward.bias.abs().max(1.0),
                "FALSIFIED DISC-005: pair ({i},{j}) bias {} vs swapped {}",
                forward.bias,
                backward.bias
            );

            // The fitted model stores the forward orientation.
            let stored = model
                .discriminants()
                .iter()
                .find(|d| (d.positive, d.negative) == (i, j))
                .expect("pair fitted");
            assert_eq!(stored, &forward, "FALSIFIED DISC-005: stored pair ({i},{j}) differs");

            let x = Vector::from_slice(&[0.0, 1.0, 1.0, 1.0, 0.0, 1.0]);
            assert!(
                (forward.score(&x) + backward.score(&x)).abs() <= 1e-4 * forward.score(&x).abs().max(1.0),
                "FALSIFIED DISC-005: pair ({i},{j}) scores do not negate"
            );
        }
    }
}

/// FALSIFY-DISC-006: Pairwise Bayes wins its own prototype
#[test]
fn falsify_disc_006_pairwise_prototype() {
    let mut model = PairwiseBayes::new();
    model.fit(&glyph_like()).expect("fit");
    let pred = model
        .classify(&Vector::from_slice(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0]))
        .expect("classify");
    assert_eq!(pred, "1", "FALSIFIED DISC-006: got {pred}");
}

/// FALSIFY-DISC-007: The prediction collects the most pairwise votes
#[test]
fn falsify_disc_007_prediction_has_most_votes() {
    let mut model = PairwiseBayes::new();
    model.fit(&glyph_like()).expect("fit");
    let queries = [
        [1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
        [0.0, 1.0, 1.0, 1.0, 0.0, 0.0],
        [1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    ];
    for q in &queries {
        let x = Vector::from_slice(q);
        let mut votes = vec![0_usize; model.labels().len()];
        for d in model.discriminants() {
            votes[d.vote(&x)] += 1;
        }
        let best = votes.iter().copied().max().unwrap_or(0);
        let pred = model.classify(&x).expect("classify");
        let idx = model
            .labels()
            .iter()
            .position(|l| l == pred)
            .expect("prediction is a label");
        assert_eq!(votes[idx], best, "FALSIFIED DISC-007: {pred} has {} of {best} votes", votes[idx]);
        assert!(
            votes[..idx].iter().all(|&v| v < best),
            "FALSIFIED DISC-007: an earlier label ties {pred}"
        );
    }
}
