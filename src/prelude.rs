//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use patrec::prelude::*;
//! ```

pub use crate::bitmap::{Bitmap, LabeledSet, SampleStore};
pub use crate::classification::{
    KNearestNeighbors, Method, MinimumDistance, PairwiseBayes, PooledCovariance,
};
pub use crate::config::{ExperimentConfig, MethodConfig};
pub use crate::error::PatrecError;
pub use crate::experiment::{Experiment, MethodReport};
pub use crate::features::{moment_features, pixel_features, FeatureKind};
pub use crate::metrics::{evaluate, ConfusionMatrix};
pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::Classifier;
