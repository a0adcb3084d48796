//! Experiment configuration.
//!
//! An [`ExperimentConfig`] names the dataset to train on, the datasets to
//! evaluate against, and the list of (classifier, feature space) runs. It is
//! plain serde data, loaded from JSON; every field has a default, so a partial
//! file only overrides what it mentions.
//!
//! ```
//! use patrec::config::ExperimentConfig;
//!
//! let config = ExperimentConfig::from_json_str(r#"{"train_dataset": "B"}"#).expect("valid JSON");
//! assert_eq!(config.train_dataset, "B");
//! assert_eq!(config.eval_datasets, vec!["A", "B"]);
//! assert_eq!(config.methods.len(), ExperimentConfig::default().methods.len());
//! ```

use crate::classification::Method;
use crate::error::{PatrecError, Result};
use crate::features::FeatureKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One classifier run: a method and the feature space it works in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    /// Classifier family and hyperparameters
    pub method: Method,
    /// Feature space the classifier is trained and evaluated in
    pub features: FeatureKind,
}

impl MethodConfig {
    /// Pairs a method with a feature space.
    #[must_use]
    pub fn new(method: Method, features: FeatureKind) -> Self {
        Self { method, features }
    }

    fn knn(k: usize, p: f32, features: FeatureKind) -> Self {
        Self::new(Method::KNearestNeighbors { k, p }, features)
    }
}

/// Datasets and classifier runs of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Dataset every classifier is trained on
    pub train_dataset: String,
    /// Datasets every trained classifier is evaluated against, in order
    pub eval_datasets: Vec<String>,
    /// Classifier runs, in report order
    pub methods: Vec<MethodConfig>,
}

impl Default for ExperimentConfig {
    /// Train on `A`; evaluate on `A` and `B`; k-NN runs in both feature
    /// spaces, then the three class-statistics classifiers.
    fn default() -> Self {
        Self {
            train_dataset: "A".to_string(),
            eval_datasets: vec!["A".to_string(), "B".to_string()],
            methods: vec![
                MethodConfig::knn(1, 2.0, FeatureKind::Moment),
                MethodConfig::knn(1, 4.0, FeatureKind::Moment),
                MethodConfig::knn(5, 2.0, FeatureKind::Moment),
                MethodConfig::knn(1, 2.0, FeatureKind::Pixel),
                MethodConfig::knn(5, 2.0, FeatureKind::Pixel),
                MethodConfig::new(Method::MinimumDistance, FeatureKind::Moment),
                MethodConfig::new(Method::PooledCovariance, FeatureKind::Moment),
                MethodConfig::new(Method::PairwiseBayes, FeatureKind::Pixel),
            ],
        }
    }
}

impl ExperimentConfig {
    /// Parses a JSON document, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PatrecError::Serialization`] for malformed JSON and
    /// [`PatrecError::Other`] if the result fails [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, plus any error of
    /// [`from_json_str`](Self::from_json_str).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            methods = config.methods.len(),
            "loaded experiment config"
        );
        Ok(config)
    }

    /// Replaces the training dataset.
    #[must_use]
    pub fn with_train_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.train_dataset = dataset.into();
        self
    }

    /// Checks that there is something to train on, evaluate, and run.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        if self.train_dataset.is_empty() {
            return Err(PatrecError::empty_input("train_dataset"));
        }
        if self.eval_datasets.is_empty() {
            return Err(PatrecError::empty_input("eval_datasets"));
        }
        if self.methods.is_empty() {
            return Err(PatrecError::empty_input("methods"));
        }
        Ok(())
    }
}
