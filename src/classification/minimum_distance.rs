//! Minimum distance to class mean.

use super::{check_dimension, min_label};
use crate::bitmap::LabeledSet;
use crate::error::{PatrecError, Result};
use crate::primitives::Vector;
use crate::stats::mean_vectors;
use crate::traits::Classifier;
use std::collections::BTreeMap;

/// Assigns a sample to the class whose mean vector is closest in squared
/// Euclidean distance.
///
/// # Example
///
/// ```
/// use patrec::classification::MinimumDistance;
/// use patrec::prelude::*;
///
/// let mut train = LabeledSet::new();
/// train.push("near", Vector::from_slice(&[1.0, 0.0]));
/// train.push("far", Vector::from_slice(&[0.0, 2.0]));
///
/// let mut model = MinimumDistance::new();
/// model.fit(&train).expect("valid training data");
/// assert_eq!(model.classify(&Vector::from_slice(&[0.0, 0.0])).expect("fitted"), "near");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MinimumDistance {
    /// Class means in label order (computed during fit)
    means: Option<BTreeMap<String, Vector<f32>>>,
    n_features: usize,
}

impl MinimumDistance {
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
}

impl Classifier for MinimumDistance {
    fn fit(&mut self, train: &LabeledSet<Vector<f32>>) -> Result<()> {
        self.n_features = train.dimension()?;
        self.means = Some(mean_vectors(train)?);
        Ok(())
    }

    fn classify(&self, sample: &Vector<f32>) -> Result<&str> {
        let means = self.means.as_ref().ok_or("Model not fitted")?;
        check_dimension(self.n_features, sample)?;

        min_label(
            means
                .iter()
                .map(|(label, mean)| (label.as_str(), sample.squared_distance(mean))),
        )
        .ok_or_else(|| PatrecError::empty_input("no class means"))
    }

    fn name(&self) -> String {
        "minimum distance".to_string()
    }
}
