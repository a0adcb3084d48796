// =========================================================================
// FALSIFY-CM: confusion matrix contract
//
// Claims pinned here:
//   - the real-class block sums to the number of samples evaluated
//   - [n][n] equals the number of misclassified samples
//   - the error row and error column each sum (over real classes) to [n][n]
// =========================================================================

use super::*;

fn recorded(pairs: &[(&str, &str)]) -> ConfusionMatrix {
    let mut cm = ConfusionMatrix::new(vec!["0".into(), "1".into(), "2".into()]);
    for &(t, p) in pairs {
        cm.record(t, p).expect("known labels");
    }
    cm
}

const PAIRS: [(&str, &str); 8] = [
    ("0", "0"),
    ("0", "1"),
    ("1", "1"),
    ("1", "1"),
    ("1", "2"),
    ("2", "0"),
    ("2", "2"),
    ("2", "2"),
];

/// FALSIFY-CM-001: Real block sums to sample count
#[test]
fn falsify_cm_001_block_sum_is_sample_count() {
    let cm = recorded(&PAIRS);
    assert_eq!(
        cm.total(),
        PAIRS.len(),
        "FALSIFIED CM-001: block sums to {}, expected {}",
        cm.total(),
        PAIRS.len()
    );
}

/// FALSIFY-CM-002: [n][n] is the misclassified count
#[test]
fn falsify_cm_002_error_cell_counts_mistakes() {
    let cm = recorded(&PAIRS);
    let wrong = PAIRS.iter().filter(|(t, p)| t != p).count();
    assert_eq!(
        cm.error_count(),
        wrong,
        "FALSIFIED CM-002: [n][n] = {}, expected {wrong}",
        cm.error_count()
    );
    assert_eq!(cm.correct() + cm.error_count(), cm.total());
}

/// FALSIFY-CM-003: Error row and column agree with [n][n]
#[test]
fn falsify_cm_003_error_margins() {
    let cm = recorded(&PAIRS);
    let n = cm.error_index();
    let row: usize = (0..n).map(|p| cm.get(n, p)).sum();
    let col: usize = (0..n).map(|t| cm.get(t, n)).sum();
    assert_eq!(row, cm.error_count(), "FALSIFIED CM-003: error row sums to {row}");
    assert_eq!(col, cm.error_count(), "FALSIFIED CM-003: error column sums to {col}");
}

/// FALSIFY-CM-004: Per-class error cell equals off-diagonal row sum
#[test]
fn falsify_cm_004_class_error_cells() {
    let cm = recorded(&PAIRS);
    let n = cm.error_index();
    for t in 0..n {
        let off: usize = (0..n).filter(|&p| p != t).map(|p| cm.get(t, p)).sum();
        assert_eq!(cm.get(t, n), off, "FALSIFIED CM-004: class {t} error cell");
    }
}

/// FALSIFY-CM-005: Ten digit classes give an 11 x 11 matrix
#[test]
fn falsify_cm_005_digit_shape() {
    let digits: Vec<String> = (0..10).map(|d| d.to_string()).collect();
    let cm = ConfusionMatrix::new(digits);
    assert_eq!(cm.as_matrix().shape(), (11, 11), "FALSIFIED CM-005: wrong shape");
}
