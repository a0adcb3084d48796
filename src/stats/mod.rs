//! Per-class statistics shared by the classifiers.
//!
//! - [`mean_vectors`]: class-conditional mean feature vectors
//! - [`frequency_vectors`]: class-conditional pixel frequencies (Bernoulli
//!   parameters in [0, 1] for binary features)
//! - [`pooled_inverse_covariance`]: inverse of the class-averaged covariance
//!
//! Every function takes a [`LabeledSet`] of feature vectors and returns maps
//! keyed by class label in label order.

pub mod covariance;

pub use covariance::{cov_matrix, pooled_covariance, pooled_inverse_covariance};

use crate::bitmap::LabeledSet;
use crate::error::Result;
use crate::primitives::Vector;
use std::collections::BTreeMap;

/// Element-wise arithmetic mean of each class's feature vectors.
///
/// # Errors
///
/// Returns [`PatrecError::EmptyClass`](crate::error::PatrecError::EmptyClass)
/// for a class with no samples, or a dimension mismatch for ragged vectors.
///
/// # Examples
///
/// ```
/// use patrec::bitmap::LabeledSet;
/// use patrec::primitives::Vector;
/// use patrec::stats::mean_vectors;
///
/// let mut set = LabeledSet::new();
/// set.push("a", Vector::from_slice(&[1.0, 2.0]));
/// set.push("a", Vector::from_slice(&[3.0, 6.0]));
/// let means = mean_vectors(&set).expect("non-empty classes");
/// assert_eq!(means["a"].as_slice(), &[2.0, 4.0]);
/// ```
pub fn mean_vectors(set: &LabeledSet<Vector<f32>>) -> Result<BTreeMap<String, Vector<f32>>> {
    let dim = set.dimension()?;
    let mut means = BTreeMap::new();

    for (label, samples) in set.iter() {
        let mut sum = vec![0.0_f32; dim];
        for v in samples {
            for (acc, &x) in sum.iter_mut().zip(v.iter()) {
                *acc += x;
            }
        }
        let n = samples.len() as f32;
        let mean: Vector<f32> = sum.into_iter().map(|s| s / n).collect();
        tracing::trace!(label, samples = samples.len(), "class mean");
        means.insert(label.to_string(), mean);
    }

    Ok(means)
}

/// Per-class, per-feature mean used as a Bernoulli success probability.
///
/// For binary pixel features this is the fraction of the class's samples with
/// that pixel set.
///
/// # Errors
///
/// Same as [`mean_vectors`].
pub fn frequency_vectors(set: &LabeledSet<Vector<f32>>) -> Result<BTreeMap<String, Vector<f32>>> {
    mean_vectors(set)
}
