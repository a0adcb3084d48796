//! Train-and-evaluate runner.
//!
//! An [`Experiment`] extracts features once per (dataset, feature space),
//! trains every configured classifier on the training dataset and evaluates
//! it against each evaluation dataset. Moment features of each dataset are
//! normalised by that dataset's own RMS.

use crate::bitmap::{LabeledSet, SampleStore};
use crate::config::ExperimentConfig;
use crate::error::{PatrecError, Result};
use crate::features::{moment_features, pixel_features, FeatureKind};
use crate::metrics::{evaluate, ConfusionMatrix};
use crate::primitives::Vector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of evaluating one trained classifier on one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodReport {
    /// Classifier description, e.g. `1-NN (p=2)`
    pub name: String,
    /// Feature space used
    pub features: FeatureKind,
    /// Dataset the classifier was trained on
    pub train_dataset: String,
    /// Dataset evaluated
    pub dataset: String,
    /// Evaluation counts
    pub confusion: ConfusionMatrix,
}

/// Runs every method of an [`ExperimentConfig`] against a [`SampleStore`].
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
}

type FeatureCache = HashMap<(String, FeatureKind), LabeledSet<Vector<f32>>>;

impl Experiment {
    /// Creates a runner for `config`.
    #[must_use]
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    /// The configuration being run.
    #[must_use]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Trains and evaluates every configured method.
    ///
    /// Reports come in method order, then evaluation dataset order.
    ///
    /// # Errors
    ///
    /// Returns [`PatrecError::MissingDataset`] if a configured dataset was
    /// not loaded, and the first feature, training or evaluation error.
    pub fn run(&self, store: &SampleStore) -> Result<Vec<MethodReport>> {
        self.config.validate()?;
        let cache = self.extract_features(store)?;
        let lookup = |dataset: &str, kind: FeatureKind| {
            cache
                .get(&(dataset.to_string(), kind))
                .ok_or_else(|| PatrecError::MissingDataset {
                    dataset: dataset.to_string(),
                })
        };

        let train_id = &self.config.train_dataset;
        let mut reports = Vec::with_capacity(self.config.methods.len() * self.config.eval_datasets.len());
        for run in &self.config.methods {
            let train = lookup(train_id, run.features)?;
            let classifier = run.method.train(train)?;
            let name = classifier.name();

            for dataset in &self.config.eval_datasets {
                let confusion = evaluate(lookup(dataset, run.features)?, classifier.as_ref())?;
                tracing::info!(
                    method = %name,
                    features = %run.features,
                    dataset = %dataset,
                    errors = confusion.error_count(),
                    total = confusion.total(),
                    "method report"
                );
                reports.push(MethodReport {
                    name: name.clone(),
                    features: run.features,
                    train_dataset: train_id.clone(),
                    dataset: dataset.clone(),
                    confusion,
                });
            }
        }
        Ok(reports)
    }

    fn extract_features(&self, store: &SampleStore) -> Result<FeatureCache> {
        let mut cache = FeatureCache::new();
        let datasets = std::iter::once(&self.config.train_dataset).chain(&self.config.eval_datasets);
        for dataset in datasets {
            let bitmaps = store.dataset(dataset).ok_or_else(|| PatrecError::MissingDataset {
                dataset: dataset.clone(),
            })?;
            for run in &self.config.methods {
                let key = (dataset.clone(), run.features);
                if cache.contains_key(&key) {
                    continue;
                }
                let features = match run.features {
                    FeatureKind::Moment => moment_features(bitmaps)?,
                    FeatureKind::Pixel => pixel_features(bitmaps),
                };
                tracing::debug!(
                    dataset = %dataset,
                    features = %run.features,
                    classes = features.n_classes(),
                    samples = features.n_samples(),
                    "extracted features"
                );
                cache.insert(key, features);
            }
        }
        Ok(cache)
    }
}

#[cfg(test)]
#[path = "experiment_tests.rs"]
mod tests;
