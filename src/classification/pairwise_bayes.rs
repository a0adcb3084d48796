//! Pairwise log-likelihood-ratio Bayes for binary features.

use super::{check_dimension, first_argmax};
use crate::bitmap::LabeledSet;
use crate::error::{PatrecError, Result};
use crate::primitives::Vector;
use crate::stats::frequency_vectors;
use crate::traits::Classifier;

/// Replacement for a class frequency of exactly zero.
pub const FREQUENCY_FLOOR: f32 = 0.0033;

/// Replacement for a class frequency of exactly one.
pub const FREQUENCY_CEIL: f32 = 0.9967;

/// Linear discriminant between two classes under independent Bernoulli
/// features.
///
/// `score(x) = Σ x·w + w0` is positive when `x` is more likely under the
/// `positive` class.
#[derive(Debug, Clone, PartialEq)]
pub struct PairDiscriminant {
    /// Index of the class voted for by a positive score
    pub positive: usize,
    /// Index of the class voted for otherwise
    pub negative: usize,
    /// Per-feature log odds ratio
    pub weights: Vector<f32>,
    /// Constant term
    pub bias: f32,
}

impl PairDiscriminant {
    /// Builds the discriminant of class `positive` (frequencies `p`) against
    /// class `negative` (frequencies `q`).
    ///
    /// `w_i = ln(p_i (1 - q_i) / (q_i (1 - p_i)))` and
    /// `w0 = Σ ln((1 - p_i) / (1 - q_i))`. Swapping the two classes negates
    /// both. Frequencies must lie strictly inside `(0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`PatrecError::DimensionMismatch`] if `p` and `q` differ in
    /// length.
    pub fn new(positive: usize, p: &Vector<f32>, negative: usize, q: &Vector<f32>) -> Result<Self> {
        if p.len() != q.len() {
            return Err(PatrecError::dimension_mismatch("frequency vector", p.len(), q.len()));
        }
        let weights = p
            .iter()
            .zip(q.iter())
            .map(|(&p, &q)| ((p * (1.0 - q)) / (q * (1.0 - p))).ln())
            .collect();
        let bias = p
            .iter()
            .zip(q.iter())
            .map(|(&p, &q)| ((1.0 - p) / (1.0 - q)).ln())
            .sum();
        Ok(Self {
            positive,
            negative,
            weights,
            bias,
        })
    }

    /// Evaluates the discriminant on one sample.
    ///
    /// # Panics
    ///
    /// Panics if `sample` and the weights differ in length.
    #[must_use]
    pub fn score(&self, sample: &Vector<f32>) -> f32 {
        sample.dot(&self.weights) + self.bias
    }

    /// Index of the class this sample votes for.
    ///
    /// # Panics
    ///
    /// Panics if `sample` and the weights differ in length.
    #[must_use]
    pub fn vote(&self, sample: &Vector<f32>) -> usize {
        if self.score(sample) > 0.0 {
            self.positive
        } else {
            self.negative
        }
    }
}

/// One-vs-one Bernoulli Bayes classifier for binary pixel features.
///
/// Each class is modelled by per-feature "on" frequencies. Frequencies of
/// exactly 0 or 1 are replaced by a floor and a ceiling so that every log
/// ratio stays finite. Every unordered pair of classes gets a
/// [`PairDiscriminant`] at fit time; classification lets each pair vote and
/// returns the label with the most votes, the first label in order winning
/// ties.
///
/// # Example
///
/// ```
/// use patrec::classification::PairwiseBayes;
/// use patrec::prelude::*;
///
/// let mut train = LabeledSet::new();
/// train.push("left", Vector::from_slice(&[1.0, 0.0]));
/// train.push("left", Vector::from_slice(&[1.0, 1.0]));
/// train.push("right", Vector::from_slice(&[0.0, 1.0]));
///
/// let mut model = PairwiseBayes::new();
/// model.fit(&train).expect("valid binary features");
/// assert_eq!(model.classify(&Vector::from_slice(&[1.0, 0.0])).expect("fitted"), "left");
/// assert!(model.score(&Vector::from_slice(&[0.0, 1.0]), "left", "right").expect("known") < 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct PairwiseBayes {
    floor: f32,
    ceil: f32,
    labels: Vec<String>,
    frequencies: Vec<Vector<f32>>,
    discriminants: Vec<PairDiscriminant>,
    n_features: usize,
}

impl Default for PairwiseBayes {
    fn default() -> Self {
        Self::new()
    }
}

impl PairwiseBayes {
    /// Creates an unfitted classifier with the default frequency clamp.
    #[must_use]
    pub fn new() -> Self {
        Self {
            floor: FREQUENCY_FLOOR,
            ceil: FREQUENCY_CEIL,
            labels: Vec::new(),
            frequencies: Vec::new(),
            discriminants: Vec::new(),
            n_features: 0,
        }
    }

    /// Sets the values substituted for frequencies of exactly 0 and 1.
    ///
    /// Checked at fit time: `0 < floor < ceil < 1`.
    #[must_use]
    pub fn with_clamp(mut self, floor: f32, ceil: f32) -> Self {
        self.floor = floor;
        self.ceil = ceil;
        self
    }

    /// Class labels in the order used by the discriminant indices.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Clamped per-class frequencies, aligned with [`labels`](Self::labels).
    #[must_use]
    pub fn frequencies(&self) -> &[Vector<f32>] {
        &self.frequencies
    }

    /// Precomputed discriminants, one per unordered class pair.
    #[must_use]
    pub fn discriminants(&self) -> &[PairDiscriminant] {
        &self.discriminants
    }

    /// Log-likelihood-ratio score of `sample` for class `a` against `b`.
    ///
    /// Positive favors `a`. `score(x, a, b) == -score(x, b, a)`.
    ///
    /// # Errors
    ///
    /// Returns error if the model is not fitted, a label is unknown, or the
    /// dimension mismatches.
    pub fn score(&self, sample: &Vector<f32>, a: &str, b: &str) -> Result<f32> {
        if self.labels.is_empty() {
            return Err("Model not fitted".into());
        }
        check_dimension(self.n_features, sample)?;
        let ia = self.label_index(a)?;
        let ib = self.label_index(b)?;
        if ia == ib {
            return Ok(0.0);
        }
        let discriminant = self
            .discriminants
            .iter()
            .find(|d| (d.positive, d.negative) == (ia.min(ib), ia.max(ib)))
            .ok_or("Missing pair discriminant")?;
        let score = discriminant.score(sample);
        Ok(if ia < ib { score } else { -score })
    }

    fn label_index(&self, label: &str) -> Result<usize> {
        self.labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| PatrecError::UnknownLabel {
                label: label.to_string(),
            })
    }

    fn clamp(&self, p: f32) -> f32 {
        if p == 0.0 {
            self.floor
        } else if p == 1.0 {
            self.ceil
        } else {
            p
        }
    }
}

impl Classifier for PairwiseBayes {
    /// Computes clamped class frequencies and all pair discriminants.
    ///
    /// # Errors
    ///
    /// Returns error if the clamp bounds are invalid, a class is empty, or
    /// the vectors are ragged.
    fn fit(&mut self, train: &LabeledSet<Vector<f32>>) -> Result<()> {
        if !(self.floor > 0.0 && self.floor < self.ceil && self.ceil < 1.0) {
            return Err(PatrecError::InvalidHyperparameter {
                param: "clamp".to_string(),
                value: format!("({}, {})", self.floor, self.ceil),
                constraint: "0 < floor < ceil < 1".to_string(),
            });
        }
        let n_features = train.dimension()?;
        let frequencies = frequency_vectors(train)?;

        let (labels, frequencies): (Vec<String>, Vec<Vector<f32>>) = frequencies
            .into_iter()
            .map(|(label, freq)| (label, freq.map(|p| self.clamp(p))))
            .unzip();

        let mut discriminants = Vec::with_capacity(labels.len() * labels.len().saturating_sub(1) / 2);
        for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                discriminants.push(PairDiscriminant::new(i, &frequencies[i], j, &frequencies[j])?);
            }
        }
        tracing::debug!(
            classes = labels.len(),
            pairs = discriminants.len(),
            "precomputed pairwise discriminants"
        );

        self.labels = labels;
        self.frequencies = frequencies;
        self.discriminants = discriminants;
        self.n_features = n_features;
        Ok(())
    }

    fn classify(&self, sample: &Vector<f32>) -> Result<&str> {
        if self.labels.is_empty() {
            return Err("Model not fitted".into());
        }
        check_dimension(self.n_features, sample)?;

        let mut votes = vec![0_usize; self.labels.len()];
        for discriminant in &self.discriminants {
            votes[discriminant.vote(sample)] += 1;
        }
        let winner = first_argmax(votes).ok_or_else(|| PatrecError::empty_input("no classes"))?;
        Ok(&self.labels[winner])
    }

    fn name(&self) -> String {
        "pairwise Bayes".to_string()
    }
}
