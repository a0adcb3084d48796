//! Shape moments.
//!
//! For a glyph with pixel values `I(x, y)` on the 1-indexed grid (`x` is the
//! row number, `y` the column number), the raw moment of order `(p, q)` is
//!
//! ```text
//! M(p, q) = Σ x^p · y^q · I(x, y)
//! ```
//!
//! The centroid `(x_c, y_c) = (M(1,0) / A, M(0,1) / A)` with ink area
//! `A = Σ I(x, y)` makes the central moments
//!
//! ```text
//! μ(p, q) = Σ (x - x_c)^p · (y - y_c)^q · I(x, y)
//! ```
//!
//! translation invariant. Scale is handled over a whole labeled set: each of
//! the 10 dimensions is divided by its root-mean-square across all samples of
//! all classes.

use crate::bitmap::{Bitmap, LabeledSet, BITMAP_SIZE};
use crate::error::{PatrecError, Result};
use crate::primitives::Vector;

/// Orders `(p, q)` of the central moments, in feature-vector order.
pub const MOMENT_ORDERS: [(i32, i32); 10] = [
    (1, 1),
    (2, 1),
    (1, 2),
    (3, 1),
    (2, 2),
    (1, 3),
    (4, 1),
    (3, 2),
    (2, 3),
    (1, 4),
];

/// Moment of order `(p, q)` about `center`.
///
/// With `center = (0.0, 0.0)` this is the raw moment `M(p, q)`.
#[must_use]
pub fn central_moment(bitmap: &Bitmap, center: (f64, f64), (p, q): (i32, i32)) -> f64 {
    let (xc, yc) = center;
    let mut sum = 0.0;
    for row in 0..BITMAP_SIZE {
        let dx = (row + 1) as f64 - xc;
        for col in 0..BITMAP_SIZE {
            let pixel = bitmap.get(row, col);
            if pixel == 0.0 {
                continue;
            }
            let dy = (col + 1) as f64 - yc;
            sum += dx.powi(p) * dy.powi(q) * f64::from(pixel);
        }
    }
    sum
}

/// Ink centroid `(x_c, y_c)`, or `None` if the glyph has no ink.
#[must_use]
pub fn centroid(bitmap: &Bitmap) -> Option<(f64, f64)> {
    let area = f64::from(bitmap.ink());
    if area == 0.0 {
        return None;
    }
    let origin = (0.0, 0.0);
    Some((
        central_moment(bitmap, origin, (1, 0)) / area,
        central_moment(bitmap, origin, (0, 1)) / area,
    ))
}

/// The 10 unnormalized central moments of a glyph, or `None` if it has no ink.
///
/// # Examples
///
/// ```
/// use patrec::bitmap::Bitmap;
/// use patrec::features::raw_moments;
///
/// // A single pixel sits on its own centroid: every central moment vanishes.
/// let dot = Bitmap::from_rows(&[vec![true]], 1, 1);
/// let moments = raw_moments(&dot).expect("has ink");
/// assert!(moments.iter().all(|m| m.abs() < 1e-6));
/// ```
#[must_use]
pub fn raw_moments(bitmap: &Bitmap) -> Option<Vector<f32>> {
    let center = centroid(bitmap)?;
    Some(
        MOMENT_ORDERS
            .iter()
            .map(|&order| central_moment(bitmap, center, order) as f32)
            .collect(),
    )
}

/// Root-mean-square of every feature dimension over all samples of all classes.
///
/// # Errors
///
/// Returns an error if the set is empty or ragged, and
/// [`PatrecError::DegenerateFeature`] if a dimension is zero for every sample.
pub fn rms(set: &LabeledSet<Vector<f32>>) -> Result<Vector<f32>> {
    let dim = set.dimension()?;
    let n = set.n_samples() as f64;

    let mut sum_sq = vec![0.0_f64; dim];
    for (_, v) in set.samples() {
        for (acc, &x) in sum_sq.iter_mut().zip(v.iter()) {
            *acc += f64::from(x) * f64::from(x);
        }
    }

    let mut scale = Vec::with_capacity(dim);
    for (index, s) in sum_sq.into_iter().enumerate() {
        let r = (s / n).sqrt();
        if r == 0.0 {
            return Err(PatrecError::DegenerateFeature { index });
        }
        scale.push(r as f32);
    }
    Ok(Vector::from_vec(scale))
}

/// Extracts RMS-normalized moment vectors for every sample of `set`.
///
/// The scale couples all classes: a sample's features depend on the whole
/// set it was extracted with.
///
/// # Errors
///
/// Returns [`PatrecError::ZeroInk`] for a glyph with no ink, plus any error of
/// [`rms`].
pub fn moment_features(set: &LabeledSet<Bitmap>) -> Result<LabeledSet<Vector<f32>>> {
    let mut raw = LabeledSet::new();
    for (label, bitmaps) in set.iter() {
        let mut vectors = Vec::with_capacity(bitmaps.len());
        for (index, bitmap) in bitmaps.iter().enumerate() {
            let moments = raw_moments(bitmap).ok_or_else(|| PatrecError::ZeroInk {
                label: label.to_string(),
                index,
            })?;
            vectors.push(moments);
        }
        raw.extend(label, vectors);
    }

    let scale = rms(&raw)?;
    tracing::debug!(
        samples = raw.n_samples(),
        scale = ?scale.as_slice(),
        "normalized moment features"
    );

    Ok(raw.map(|v| {
        v.iter()
            .zip(scale.iter())
            .map(|(&x, &s)| x / s)
            .collect()
    }))
}

#[cfg(test)]
#[path = "moments_tests.rs"]
mod tests;
