//! Feature extraction from bitmap samples.
//!
//! Two extractors turn a [`LabeledSet`](crate::bitmap::LabeledSet) of bitmaps
//! into a labeled set of feature vectors:
//!
//! - [`pixel_features`]: the raw 256 pixel intensities, row-major.
//! - [`moment_features`]: 10 central geometric moments per glyph, each
//!   dimension scaled by its root-mean-square over the whole set.

pub mod moments;
mod pixel;

pub use moments::{central_moment, centroid, moment_features, raw_moments, rms, MOMENT_ORDERS};
pub use pixel::pixel_features;

use serde::{Deserialize, Serialize};

/// Which feature space a classifier works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Normalized central moments (10 dimensions).
    Moment,
    /// Flattened pixels (256 dimensions).
    Pixel,
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKind::Moment => write!(f, "moment"),
            FeatureKind::Pixel => write!(f, "pixel"),
        }
    }
}
