//! Evaluation metrics for classifiers.
//!
//! A [`ConfusionMatrix`] counts, for every true class, how often each class
//! was predicted. One extra "error" row and column summarise the
//! misclassifications.

mod confusion;

pub use confusion::{evaluate, ConfusionMatrix};

/// Fraction of predictions equal to their true label.
///
/// Returns 0.0 for empty input.
///
/// # Examples
///
/// ```
/// use patrec::metrics::accuracy;
///
/// let y_true = ["0", "1", "2", "0"];
/// let y_pred = ["0", "2", "2", "0"];
/// assert!((accuracy(&y_pred, &y_true) - 0.75).abs() < 1e-6);
/// ```
///
/// # Panics
///
/// Panics if the slices have different lengths.
#[must_use]
pub fn accuracy<S: AsRef<str>>(y_pred: &[S], y_true: &[S]) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Slices must have same length");
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_pred
        .iter()
        .zip(y_true)
        .filter(|&(p, t)| {
            let (p, t): (&str, &str) = (p.as_ref(), t.as_ref());
            p == t
        })
        .count();
    correct as f32 / y_true.len() as f32
}

#[cfg(test)]
#[path = "confusion_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_confusion_contract.rs"]
mod tests_confusion_contract;
