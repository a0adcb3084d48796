//! Pooled-covariance (Mahalanobis) discriminant.

use super::{check_dimension, min_label};
use crate::bitmap::LabeledSet;
use crate::error::{PatrecError, Result};
use crate::primitives::{Matrix, Vector};
use crate::stats::{mean_vectors, pooled_inverse_covariance};
use crate::traits::Classifier;
use std::collections::BTreeMap;

/// Nearest class mean under the Mahalanobis distance of the pooled
/// covariance.
///
/// Fitting computes every class mean and the inverse of the element-wise
/// average of the per-class sample covariance matrices. A sample `x` is
/// assigned to the class minimizing `(x − m)ᵀ · C⁻¹ · (x − m)`.
///
/// # Example
///
/// ```
/// use patrec::classification::PooledCovariance;
/// use patrec::prelude::*;
///
/// let mut train = LabeledSet::new();
/// for (x, y) in [(0.0, 0.0), (1.0, 0.2), (0.0, 1.0), (1.0, 1.1)] {
///     train.push("low", Vector::from_slice(&[x, y]));
///     train.push("high", Vector::from_slice(&[x + 4.0, y + 4.0]));
/// }
///
/// let mut model = PooledCovariance::new();
/// model.fit(&train).expect("invertible pooled covariance");
/// assert_eq!(model.classify(&Vector::from_slice(&[3.5, 4.0])).expect("fitted"), "high");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PooledCovariance {
    means: Option<BTreeMap<String, Vector<f32>>>,
    inv_cov: Option<Matrix<f32>>,
    n_features: usize,
}

impl PooledCovariance {
    /// Creates an unfitted classifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Class mean vectors.
    #[must_use]
    pub fn means(&self) -> Option<&BTreeMap<String, Vector<f32>>> {
        self.means.as_ref()
    }

    /// Inverse of the pooled covariance matrix.
    #[must_use]
    pub fn inverse_covariance(&self) -> Option<&Matrix<f32>> {
        self.inv_cov.as_ref()
    }

    /// Squared Mahalanobis distance from `sample` to the mean of `label`.
    ///
    /// # Errors
    ///
    /// Returns error if the model is not fitted, the label is unknown, or the
    /// dimension mismatches.
    pub fn distance(&self, sample: &Vector<f32>, label: &str) -> Result<f32> {
        let (means, inv_cov) = self.fitted()?;
        check_dimension(self.n_features, sample)?;
        let mean = means.get(label).ok_or_else(|| PatrecError::UnknownLabel {
            label: label.to_string(),
        })?;
        inv_cov.quadratic_form(&(sample - mean))
    }

    fn fitted(&self) -> Result<(&BTreeMap<String, Vector<f32>>, &Matrix<f32>)> {
        match (&self.means, &self.inv_cov) {
            (Some(means), Some(inv_cov)) => Ok((means, inv_cov)),
            _ => Err("Model not fitted".into()),
        }
    }
}

impl Classifier for PooledCovariance {
    /// Computes class means and the pooled inverse covariance.
    ///
    /// # Errors
    ///
    /// Returns error if a class has fewer than two samples, the vectors are
    /// ragged, or the pooled matrix is singular.
    fn fit(&mut self, train: &LabeledSet<Vector<f32>>) -> Result<()> {
        let n_features = train.dimension()?;
        let means = mean_vectors(train)?;
        let inv_cov = pooled_inverse_covariance(train)?;

        self.means = Some(means);
        self.inv_cov = Some(inv_cov);
        self.n_features = n_features;
        Ok(())
    }

    fn classify(&self, sample: &Vector<f32>) -> Result<&str> {
        let (means, inv_cov) = self.fitted()?;
        check_dimension(self.n_features, sample)?;

        let scores = means
            .iter()
            .map(|(label, mean)| Ok((label.as_str(), inv_cov.quadratic_form(&(sample - mean))?)))
            .collect::<Result<Vec<_>>>()?;
        min_label(scores).ok_or_else(|| PatrecError::empty_input("no class means"))
    }

    fn name(&self) -> String {
        "pooled covariance".to_string()
    }
}
