//! Core trait shared by every classifier family.

use crate::bitmap::LabeledSet;
use crate::error::Result;
use crate::primitives::Vector;

/// A decision rule trained on a labeled set of feature vectors.
///
/// Implementations own the statistics they precompute in [`fit`](Self::fit);
/// [`classify`](Self::classify) only reads them, so one fitted classifier can
/// answer any number of independent queries.
///
/// # Examples
///
/// ```
/// use patrec::prelude::*;
///
/// let mut train = LabeledSet::new();
/// train.push("0", Vector::from_slice(&[0.0, 0.0]));
/// train.push("1", Vector::from_slice(&[5.0, 5.0]));
///
/// let mut model = MinimumDistance::new();
/// model.fit(&train).unwrap();
/// assert_eq!(model.classify(&Vector::from_slice(&[4.0, 4.5])).unwrap(), "1");
/// ```
pub trait Classifier {
    /// Fits the classifier to a labeled training set.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty, a class has no samples, feature
    /// vectors differ in length, or a hyperparameter is invalid.
    fn fit(&mut self, train: &LabeledSet<Vector<f32>>) -> Result<()>;

    /// Predicts the class label of one feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the classifier is not fitted or the vector has the
    /// wrong dimension.
    fn classify(&self, sample: &Vector<f32>) -> Result<&str>;

    /// Short human-readable description including hyperparameters.
    fn name(&self) -> String;

    /// Predicts the label of every sample in order.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`classify`](Self::classify).
    fn classify_all<'a>(&'a self, samples: &[Vector<f32>]) -> Result<Vec<&'a str>> {
        samples.iter().map(|s| self.classify(s)).collect()
    }
}
