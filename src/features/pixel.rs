//! Pixel-space features.

use crate::bitmap::{Bitmap, LabeledSet};
use crate::primitives::Vector;

/// Flattens every bitmap into a 256-long row-major vector. No normalization.
///
/// # Examples
///
/// ```
/// use patrec::bitmap::{Bitmap, LabeledSet};
/// use patrec::features::pixel_features;
///
/// let mut set = LabeledSet::new();
/// set.push("1", Bitmap::from_rows(&[vec![true]], 1, 1));
/// let features = pixel_features(&set);
/// assert_eq!(features.get("1").map(|v| v[0].len()), Some(256));
/// ```
#[must_use]
pub fn pixel_features(set: &LabeledSet<Bitmap>) -> LabeledSet<Vector<f32>> {
    set.map(Bitmap::to_vector)
}
