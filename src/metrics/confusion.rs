//! Confusion matrix with a trailing error row and column.

use crate::bitmap::LabeledSet;
use crate::error::{PatrecError, Result};
use crate::primitives::{Matrix, Vector};
use crate::traits::Classifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Square count matrix over `n` classes plus one error index `n`.
///
/// - `[t][p]` counts samples of true class `t` predicted as `p`.
/// - `[t][n]` counts misclassified samples of class `t`.
/// - `[n][p]` counts samples wrongly predicted as `p`.
/// - `[n][n]` is the total number of misclassifications.
///
/// # Examples
///
/// ```
/// use patrec::metrics::ConfusionMatrix;
///
/// let mut cm = ConfusionMatrix::new(vec!["0".to_string(), "1".to_string()]);
/// cm.record("0", "0").expect("known labels");
/// cm.record("1", "0").expect("known labels");
/// assert_eq!(cm.error_count(), 1);
/// assert_eq!(cm.get(1, 2), 1);
/// assert_eq!(cm.get(2, 0), 1);
/// assert_eq!(cm.total(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Matrix<usize>,
}

impl ConfusionMatrix {
    /// Creates an all-zero matrix for the given class labels.
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        let size = labels.len() + 1;
        Self {
            labels,
            counts: Matrix::zeros(size, size),
        }
    }

    /// Records one prediction.
    ///
    /// # Errors
    ///
    /// Returns [`PatrecError::UnknownLabel`] if either label is not a class of
    /// this matrix.
    pub fn record(&mut self, truth: &str, predicted: &str) -> Result<()> {
        let t = self.index_of(truth)?;
        let p = self.index_of(predicted)?;
        let err = self.error_index();

        self.increment(t, p);
        if t != p {
            self.increment(t, err);
            self.increment(err, p);
            self.increment(err, err);
        }
        Ok(())
    }

    fn increment(&mut self, row: usize, col: usize) {
        self.counts.set(row, col, self.counts.get(row, col) + 1);
    }

    fn index_of(&self, label: &str) -> Result<usize> {
        self.labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| PatrecError::UnknownLabel {
                label: label.to_string(),
            })
    }

    /// Class labels in row/column order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of real classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Row/column index of the error summary.
    #[must_use]
    pub fn error_index(&self) -> usize {
        self.labels.len()
    }

    /// Count at `[truth][predicted]`, indices including the error index.
    ///
    /// # Panics
    ///
    /// Panics if an index exceeds the error index.
    #[must_use]
    pub fn get(&self, truth: usize, predicted: usize) -> usize {
        self.counts.get(truth, predicted)
    }

    /// Count for a pair of labels, `None` if either is unknown.
    #[must_use]
    pub fn count(&self, truth: &str, predicted: &str) -> Option<usize> {
        let t = self.index_of(truth).ok()?;
        let p = self.index_of(predicted).ok()?;
        Some(self.get(t, p))
    }

    /// Number of misclassified samples.
    #[must_use]
    pub fn error_count(&self) -> usize {
        let err = self.error_index();
        self.get(err, err)
    }

    /// Number of samples recorded.
    #[must_use]
    pub fn total(&self) -> usize {
        let n = self.n_classes();
        (0..n).flat_map(|t| (0..n).map(move |p| (t, p))).map(|(t, p)| self.get(t, p)).sum()
    }

    /// Number of correctly classified samples.
    #[must_use]
    pub fn correct(&self) -> usize {
        (0..self.n_classes()).map(|i| self.get(i, i)).sum()
    }

    /// Fraction of samples classified correctly, 0.0 if nothing was recorded.
    #[must_use]
    pub fn accuracy(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.correct() as f32 / total as f32
        }
    }

    /// Per-class recall (diagonal over row total); 0.0 for unseen classes.
    #[must_use]
    pub fn recall(&self) -> Vector<f32> {
        (0..self.n_classes())
            .map(|t| {
                let row: usize = (0..self.n_classes()).map(|p| self.get(t, p)).sum();
                if row == 0 {
                    0.0
                } else {
                    self.get(t, t) as f32 / row as f32
                }
            })
            .collect()
    }

    fn header(&self, index: usize) -> &str {
        self.labels.get(index).map_or("err", String::as_str)
    }

    /// The full `(n + 1) × (n + 1)` count matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &Matrix<usize> {
        &self.counts
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.error_index() + 1;
        let width = (0..size)
            .map(|i| self.header(i).len())
            .chain(self.counts.as_slice().iter().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(1);

        write!(f, "{:>width$}", "")?;
        for col in 0..size {
            write!(f, " {:>width$}", self.header(col))?;
        }
        writeln!(f)?;
        for row in 0..size {
            write!(f, "{:>width$}", self.header(row))?;
            for col in 0..size {
                write!(f, " {:>width$}", self.get(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Classifies every sample of `set` and tallies the results.
///
/// Classes are indexed in the label order of `set`.
///
/// # Errors
///
/// Returns any classification error, or [`PatrecError::UnknownLabel`] if the
/// classifier predicts a label that is not a class of `set`.
pub fn evaluate(set: &LabeledSet<Vector<f32>>, classifier: &dyn Classifier) -> Result<ConfusionMatrix> {
    let mut confusion = ConfusionMatrix::new(set.labels().map(str::to_string).collect());
    for (truth, sample) in set.samples() {
        let predicted = classifier.classify(sample)?;
        confusion.record(truth, predicted)?;
    }
    tracing::info!(
        method = %classifier.name(),
        samples = confusion.total(),
        errors = confusion.error_count(),
        accuracy = confusion.accuracy(),
        "evaluated classifier"
    );
    Ok(confusion)
}
