//! Patrec: handwritten digit recognition with classical pattern classifiers.
//!
//! Patrec loads 16×16 binary glyph bitmaps, turns them into feature vectors
//! (normalized central moments or raw pixels), and compares four decision
//! rules by their confusion matrices.
//!
//! # Quick Start
//!
//! ```
//! use patrec::prelude::*;
//!
//! // Two well-separated classes in a 2-D feature space
//! let mut train = LabeledSet::new();
//! train.push("0", Vector::from_slice(&[0.0, 0.0]));
//! train.push("0", Vector::from_slice(&[0.2, 0.1]));
//! train.push("1", Vector::from_slice(&[4.0, 4.0]));
//! train.push("1", Vector::from_slice(&[4.1, 3.8]));
//!
//! // Train 1-NN with Euclidean (p = 2) distance
//! let model = Method::KNearestNeighbors { k: 1, p: 2.0 }.train(&train).unwrap();
//!
//! // Evaluate on the training set
//! let confusion = evaluate(&train, model.as_ref()).unwrap();
//! assert_eq!(confusion.error_count(), 0);
//! assert_eq!(confusion.total(), 4);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`bitmap`]: 16×16 glyphs, labeled sets, and the glyph file parser
//! - [`features`]: Moment and pixel feature extractors
//! - [`stats`]: Class means and pooled covariance
//! - [`classification`]: k-NN, minimum distance, pooled covariance, pairwise Bayes
//! - [`metrics`]: Confusion matrix evaluation
//! - [`config`]: Serializable experiment configuration
//! - [`experiment`]: Train-and-evaluate runner

pub mod bitmap;
pub mod classification;
pub mod config;
pub mod error;
pub mod experiment;
pub mod features;
pub mod metrics;
pub mod prelude;
pub mod primitives;
pub mod stats;
pub mod traits;

pub use error::{PatrecError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::Classifier;
