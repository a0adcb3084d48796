//! Classification algorithms.
//!
//! This module implements four classical decision rules, each behind the
//! [`Classifier`] trait:
//! - K-Nearest Neighbors with a Minkowski distance of order p
//! - Minimum distance to the class mean
//! - Pooled-covariance (Mahalanobis) discriminant
//! - Pairwise log-likelihood-ratio Bernoulli Bayes with one-vs-one voting
//!
//! [`Method`] is the serializable description of one of them, used by the
//! experiment configuration to build and train classifiers.
//!
//! # Example
//!
//! ```
//! use patrec::classification::{DistanceMetric, KNearestNeighbors};
//! use patrec::prelude::*;
//!
//! let mut train = LabeledSet::new();
//! train.push("0", Vector::from_slice(&[0.0, 0.0]));
//! train.push("0", Vector::from_slice(&[0.0, 1.0]));
//! train.push("1", Vector::from_slice(&[5.0, 5.0]));
//! train.push("1", Vector::from_slice(&[6.0, 5.0]));
//!
//! let mut knn = KNearestNeighbors::new(3).with_metric(DistanceMetric::Minkowski(4.0));
//! knn.fit(&train).expect("Training data is valid with 4 samples");
//! assert_eq!(knn.classify(&Vector::from_slice(&[0.5, 0.5])).unwrap(), "0");
//! ```
//!
//! # Tie-breaking
//!
//! Classes are visited in ascending label order. Minimum searches and vote
//! counts keep the first best class they meet, so ties go to the smallest
//! label. The nearest-neighbor vote is the exception: tied labels are ranked
//! by their closest neighbor.

mod knn;
mod minimum_distance;
mod pairwise_bayes;
mod pooled_covariance;

pub use knn::{DistanceMetric, KNearestNeighbors};
pub use minimum_distance::MinimumDistance;
pub use pairwise_bayes::{PairDiscriminant, PairwiseBayes, FREQUENCY_CEIL, FREQUENCY_FLOOR};
pub use pooled_covariance::PooledCovariance;

use crate::bitmap::LabeledSet;
use crate::error::{PatrecError, Result};
use crate::primitives::Vector;
pub use crate::traits::Classifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A classifier family together with its hyperparameters.
///
/// # Example
///
/// ```
/// use patrec::classification::Method;
///
/// let method: Method = serde_json::from_str(r#"{"kind": "k_nearest_neighbors", "k": 5, "p": 2.0}"#)
///     .expect("valid method");
/// assert_eq!(method, Method::KNearestNeighbors { k: 5, p: 2.0 });
/// assert_eq!(method.to_string(), "5-NN (p=2)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Method {
    /// k-nearest neighbors with Minkowski distance of order `p`.
    KNearestNeighbors {
        /// Number of neighbors
        k: usize,
        /// Minkowski order
        p: f32,
    },
    /// Nearest class mean under squared Euclidean distance.
    MinimumDistance,
    /// Nearest class mean under the pooled inverse covariance.
    PooledCovariance,
    /// Pairwise Bernoulli log-likelihood ratios with majority voting.
    PairwiseBayes,
}

impl Method {
    /// Creates the unfitted classifier this method describes.
    #[must_use]
    pub fn build(&self) -> Box<dyn Classifier> {
        match *self {
            Method::KNearestNeighbors { k, p } => {
                Box::new(KNearestNeighbors::new(k).with_metric(DistanceMetric::Minkowski(p)))
            }
            Method::MinimumDistance => Box::new(MinimumDistance::new()),
            Method::PooledCovariance => Box::new(PooledCovariance::new()),
            Method::PairwiseBayes => Box::new(PairwiseBayes::new()),
        }
    }

    /// Builds and fits a classifier on `train`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by [`Classifier::fit`].
    pub fn train(&self, train: &LabeledSet<Vector<f32>>) -> Result<Box<dyn Classifier>> {
        let mut classifier = self.build();
        classifier.fit(train)?;
        tracing::info!(
            method = %classifier.name(),
            classes = train.n_classes(),
            samples = train.n_samples(),
            "trained classifier"
        );
        Ok(classifier)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::KNearestNeighbors { k, p } => write!(f, "{k}-NN (p={p})"),
            Method::MinimumDistance => write!(f, "minimum distance"),
            Method::PooledCovariance => write!(f, "pooled covariance"),
            Method::PairwiseBayes => write!(f, "pairwise Bayes"),
        }
    }
}

/// Checks that `sample` has the dimension a classifier was fitted with.
fn check_dimension(expected: usize, sample: &Vector<f32>) -> Result<()> {
    if sample.len() == expected {
        Ok(())
    } else {
        Err(PatrecError::dimension_mismatch("features", expected, sample.len()))
    }
}

/// Label with the smallest score; the first one met wins ties.
fn min_label<'a>(scores: impl IntoIterator<Item = (&'a str, f32)>) -> Option<&'a str> {
    let mut best: Option<(&str, f32)> = None;
    for (label, score) in scores {
        match best {
            Some((_, b)) if score >= b || score.is_nan() => {}
            _ => best = Some((label, score)),
        }
    }
    best.map(|(label, _)| label)
}

/// Index of the first maximum, or `None` for an empty iterator.
fn first_argmax(values: impl IntoIterator<Item = usize>) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, v) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}


#[cfg(test)]
#[path = "tests_knn_contract.rs"]
mod tests_knn_contract;

#[cfg(test)]
#[path = "tests_discriminant_contract.rs"]
mod tests_discriminant_contract;
