// =========================================================================
// FALSIFY-KNN: k-nearest-neighbor contract tests
//
// Five-Whys:
//   Why 1: the neighbor scan keeps k slots and replaces only on strict `<`
//   Why 2: an off-by-one in that scan silently changes every tie-break
//   Why 3: recognition rates on real glyph sets hide such drift
//   Why 4: so the slot invariants are pinned on tiny hand-checked sets
//   Why 5: each test names the claim it would falsify
//
// References:
//   - Cover & Hart (1967) "Nearest Neighbor Pattern Classification"
// =========================================================================

use super::*;

fn two_clusters() -> LabeledSet<Vector<f32>> {
    let mut set = LabeledSet::new();
    for x in [[0.0, 0.0], [0.5, 0.5], [1.0, 0.0]] {
        set.push("0", Vector::from_slice(&x));
    }
    for x in [[5.0, 5.0], [5.5, 5.5], [6.0, 5.0]] {
        set.push("1", Vector::from_slice(&x));
    }
    set
}

/// FALSIFY-KNN-001: Predictions are labels of the training set
#[test]
fn falsify_knn_001_predictions_in_label_set() {
    let train = two_clusters();
    let mut knn = KNearestNeighbors::new(3);
    knn.fit(&train).expect("fit");

    let queries: Vec<Vector<f32>> = [[0.2, 0.2], [3.0, 3.0], [5.8, 5.8]]
        .iter()
        .map(|q| Vector::from_slice(q))
        .collect();
    let preds = knn.classify_all(&queries).expect("classify");
    assert_eq!(preds.len(), 3, "FALSIFIED KNN-001: {} predictions for 3 inputs", preds.len());
    for (i, p) in preds.iter().enumerate() {
        assert!(
            train.get(p).is_some(),
            "FALSIFIED KNN-001: prediction[{i}] = {p}, not a training label"
        );
    }
}

/// FALSIFY-KNN-002: 1-NN reproduces the class of every training sample, for any p
#[test]
fn falsify_knn_002_one_nn_self_classification() {
    let train = two_clusters();
    for p in [1.0, 2.0, 4.0, 7.5] {
        let mut knn = KNearestNeighbors::new(1).with_metric(DistanceMetric::Minkowski(p));
        knn.fit(&train).expect("fit");
        for (label, x) in train.samples() {
            let pred = knn.classify(x).expect("classify");
            assert_eq!(
                pred, label,
                "FALSIFIED KNN-002: p={p}, training sample of {label} classified as {pred}"
            );
        }
    }
}

/// FALSIFY-KNN-003: Well-separated clusters are classified correctly
#[test]
fn falsify_knn_003_separable_data() {
    let mut knn = KNearestNeighbors::new(3);
    knn.fit(&two_clusters()).expect("fit");
    let near_zero = knn.classify(&Vector::from_slice(&[0.3, 0.1])).expect("classify");
    let near_one = knn.classify(&Vector::from_slice(&[5.2, 5.4])).expect("classify");
    assert_eq!(near_zero, "0", "FALSIFIED KNN-003: cluster 0 query got {near_zero}");
    assert_eq!(near_one, "1", "FALSIFIED KNN-003: cluster 1 query got {near_one}");
}

/// FALSIFY-KNN-004: No empty slot survives the scan when k <= N
#[test]
fn falsify_knn_004_all_slots_filled() {
    let train = two_clusters();
    for k in 1..=train.n_samples() {
        let mut knn = KNearestNeighbors::new(k);
        knn.fit(&train).expect("fit");
        let neighbors = knn.neighbors(&Vector::from_slice(&[100.0, -100.0])).expect("neighbors");
        assert_eq!(
            neighbors.len(),
            k,
            "FALSIFIED KNN-004: k={k} but {} slots filled",
            neighbors.len()
        );
        assert!(
            neighbors.iter().all(|(_, d)| d.is_finite()),
            "FALSIFIED KNN-004: infinite distance left in a slot"
        );
    }
}

/// FALSIFY-KNN-005: The k slots are the k smallest distances
#[test]
fn falsify_knn_005_slots_are_k_smallest() {
    let train = two_clusters();
    let query = Vector::from_slice(&[2.0, 1.0]);
    let metric = DistanceMetric::Minkowski(2.0);

    let mut all: Vec<f32> = train.samples().map(|(_, x)| metric.distance(&query, x)).collect();
    all.sort_by(f32::total_cmp);

    let mut knn = KNearestNeighbors::new(4).with_metric(metric);
    knn.fit(&train).expect("fit");
    let got: Vec<f32> = knn.neighbors(&query).expect("neighbors").iter().map(|&(_, d)| d).collect();
    for (i, (g, e)) in got.iter().zip(all.iter()).enumerate() {
        assert!(
            (g - e).abs() < 1e-6,
            "FALSIFIED KNN-005: slot {i} holds {g}, expected {e}"
        );
    }
}

/// FALSIFY-KNN-006: One-hot scenario picks the first class
#[test]
fn falsify_knn_006_one_hot_scenario() {
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

    let mut knn = KNearestNeighbors::new(1).with_metric(DistanceMetric::Minkowski(2.0));
    knn.fit(&train).expect("fit");
    let pred = knn.classify(&Vector::from_vec(query)).expect("classify");
    assert_eq!(pred, "first", "FALSIFIED KNN-006: got {pred}");
}
