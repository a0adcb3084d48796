//! K-Nearest Neighbors.

use super::check_dimension;
use crate::bitmap::LabeledSet;
use crate::error::{PatrecError, Result};
use crate::primitives::Vector;
use crate::traits::Classifier;

/// Distance metric for K-Nearest Neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMetric {
    /// Euclidean distance: `sqrt(sum((x_i` - `y_i)^2`))
    Euclidean,
    /// Manhattan distance: `sum(|x_i` - `y_i`|)
    Manhattan,
    /// Minkowski distance with parameter p
    Minkowski(f32),
}

impl DistanceMetric {
    /// Computes the distance between two equal-length vectors.
    ///
    /// # Panics
    ///
    /// Panics if the vectors differ in length.
    #[must_use]
    pub fn distance(&self, a: &Vector<f32>, b: &Vector<f32>) -> f32 {
        assert_eq!(a.len(), b.len(), "Vector lengths must match");
        let pairs = a.iter().zip(b.iter());
        match *self {
            DistanceMetric::Euclidean => pairs.map(|(x, y)| (x - y) * (x - y)).sum::<f32>().sqrt(),
            DistanceMetric::Manhattan => pairs.map(|(x, y)| (x - y).abs()).sum(),
            DistanceMetric::Minkowski(p) => pairs
                .map(|(x, y)| (x - y).abs().powf(p))
                .sum::<f32>()
                .powf(1.0 / p),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            DistanceMetric::Minkowski(p) if !(p.is_finite() && p >= 1.0) => {
                Err(PatrecError::InvalidHyperparameter {
                    param: "p".to_string(),
                    value: p.to_string(),
                    constraint: "finite and >= 1".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// K-Nearest Neighbors classifier.
///
/// Instance-based learner: fitting stores the training set and every query
/// scans all of it. The k closest samples seen so far are kept in ascending
/// distance order; a later sample only displaces the current worst slot when
/// it is strictly closer, so among equidistant samples the one met first (in
/// label order) is kept.
///
/// The predicted class is the most frequent label among the k slots. Tied
/// labels are resolved in favor of the one with the nearest neighbor.
///
/// # Example
///
/// ```
/// use patrec::classification::KNearestNeighbors;
/// use patrec::prelude::*;
///
/// let mut train = LabeledSet::new();
/// for (label, x) in [("a", 0.0), ("a", 1.0), ("b", 5.0), ("b", 6.0)] {
///     train.push(label, Vector::from_slice(&[x]));
/// }
///
/// let mut knn = KNearestNeighbors::new(3);
/// knn.fit(&train).expect("Valid training data with 4 samples");
/// assert_eq!(knn.classify(&Vector::from_slice(&[4.0])).expect("fitted"), "b");
/// ```
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    /// Number of neighbors to use
    k: usize,
    /// Distance metric
    metric: DistanceMetric,
    /// Training set (stored during fit)
    train: Option<LabeledSet<Vector<f32>>>,
    /// Feature dimension of the training set
    n_features: usize,
}

impl KNearestNeighbors {
    /// Creates a new K-Nearest Neighbors classifier with Euclidean distance.
    ///
    /// # Arguments
    ///
    /// * `k` - Number of neighbors to use for voting
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            metric: DistanceMetric::Euclidean,
            train: None,
            n_features: 0,
        }
    }

    /// Sets the distance metric.
    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Number of neighbors.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Distance metric.
    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// The k nearest `(label, distance)` pairs in ascending distance order.
    ///
    /// # Errors
    ///
    /// Returns error if the model is not fitted or the dimension mismatches.
    pub fn neighbors(&self, sample: &Vector<f32>) -> Result<Vec<(&str, f32)>> {
        let train = self.train.as_ref().ok_or("Model not fitted")?;
        check_dimension(self.n_features, sample)?;

        let mut nearest: Vec<(Option<&str>, f32)> = vec![(None, f32::INFINITY); self.k];
        let worst = self.k - 1;

        for (label, x) in train.samples() {
            let dist = self.metric.distance(sample, x);
            if dist < nearest[worst].1 {
                nearest[worst] = (Some(label), dist);
                nearest.sort_by(|a, b| a.1.total_cmp(&b.1));
            }
        }

        Ok(nearest
            .into_iter()
            .filter_map(|(label, dist)| label.map(|l| (l, dist)))
            .collect())
    }
}

/// Most frequent label; ties go to the label appearing first in `neighbors`.
fn majority_vote<'a>(neighbors: &[(&'a str, f32)]) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &(label, _) in neighbors {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, c)) => *c += 1,
            None => counts.push((label, 1)),
        }
    }
    super::first_argmax(counts.iter().map(|&(_, c)| c)).map(|i| counts[i].0)
}

impl Classifier for KNearestNeighbors {
    /// Stores the training data.
    ///
    /// # Errors
    ///
    /// Returns error if k is zero or exceeds the number of training samples,
    /// the metric order is invalid, or the set is empty or ragged.
    fn fit(&mut self, train: &LabeledSet<Vector<f32>>) -> Result<()> {
        if self.k == 0 {
            return Err(PatrecError::InvalidHyperparameter {
                param: "k".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        self.metric.validate()?;
        let n_features = train.dimension()?;

        let n_samples = train.n_samples();
        if self.k > n_samples {
            return Err(PatrecError::InvalidHyperparameter {
                param: "k".to_string(),
                value: self.k.to_string(),
                constraint: format!("<= number of training samples ({n_samples})"),
            });
        }

        self.train = Some(train.clone());
        self.n_features = n_features;
        Ok(())
    }

    fn classify(&self, sample: &Vector<f32>) -> Result<&str> {
        let neighbors = self.neighbors(sample)?;
        majority_vote(&neighbors).ok_or_else(|| PatrecError::from("No neighbors found"))
    }

    fn name(&self) -> String {
        match self.metric {
            DistanceMetric::Euclidean => format!("{}-NN (euclidean)", self.k),
            DistanceMetric::Manhattan => format!("{}-NN (manhattan)", self.k),
            DistanceMetric::Minkowski(p) => format!("{}-NN (p={p})", self.k),
        }
    }
}
