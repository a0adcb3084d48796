//! Bitmap samples and the labeled collections that hold them.
//!
//! A [`Bitmap`] is a fixed 16×16 binary glyph. Samples are grouped by class
//! label in a [`LabeledSet`], and labeled sets are grouped by dataset
//! identifier in a [`SampleStore`].
//!
//! Class iteration order is ascending label order everywhere. Tie-breaks in
//! the classifiers and the row/column layout of confusion matrices depend on
//! it.

mod parser;

pub use parser::{parse_bitmaps, parse_file_name};

use crate::error::{PatrecError, Result};
use crate::primitives::Vector;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::Path;

/// Side length of every bitmap.
pub const BITMAP_SIZE: usize = 16;

/// Number of pixels in a bitmap.
pub const BITMAP_PIXELS: usize = BITMAP_SIZE * BITMAP_SIZE;

/// A 16×16 binary glyph stored row-major, values exactly 0.0 or 1.0.
///
/// # Examples
///
/// ```
/// use patrec::bitmap::Bitmap;
///
/// let glyph = Bitmap::from_rows(&[vec![true, true], vec![false, true]], 2, 2);
/// assert_eq!(glyph.ink(), 3.0);
/// // A 2x2 glyph is centred at offset (16 - 2) / 2 = 7.
/// assert_eq!(glyph.get(7, 7), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bitmap {
    pixels: Vec<f32>,
}

impl Bitmap {
    /// Builds a bitmap from exactly 256 row-major pixel values.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong or a value is not 0.0 or 1.0.
    pub fn from_pixels(pixels: Vec<f32>) -> Result<Self> {
        if pixels.len() != BITMAP_PIXELS {
            return Err(PatrecError::dimension_mismatch("pixels", BITMAP_PIXELS, pixels.len()));
        }
        if let Some(bad) = pixels.iter().find(|&&p| p != 0.0 && p != 1.0) {
            return Err(PatrecError::Other(format!(
                "bitmap pixels must be 0 or 1, found {bad}"
            )));
        }
        Ok(Self { pixels })
    }

    /// Fits a `height`×`width` glyph into the 16×16 grid.
    ///
    /// Dimensions smaller than 16 are centred with a leading offset of
    /// `(16 - size) / 2`; larger dimensions are cropped centrally, skipping
    /// `(size - 16) / 2` leading rows or columns. Missing rows or short rows
    /// read as background.
    #[must_use]
    pub fn from_rows(rows: &[Vec<bool>], height: usize, width: usize) -> Self {
        let (dst_row, src_row, n_rows) = fit_axis(height);
        let (dst_col, src_col, n_cols) = fit_axis(width);

        let mut pixels = vec![0.0; BITMAP_PIXELS];
        for i in 0..n_rows {
            let Some(row) = rows.get(src_row + i) else {
                break;
            };
            for j in 0..n_cols {
                if row.get(src_col + j).copied().unwrap_or(false) {
                    pixels[(dst_row + i) * BITMAP_SIZE + dst_col + j] = 1.0;
                }
            }
        }
        Self { pixels }
    }

    /// Pixel at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if either index is 16 or more.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < BITMAP_SIZE && col < BITMAP_SIZE, "bitmap index out of range");
        self.pixels[row * BITMAP_SIZE + col]
    }

    /// Total ink (number of foreground pixels).
    #[must_use]
    pub fn ink(&self) -> f32 {
        self.pixels.iter().sum()
    }

    /// Row-major pixel values.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.pixels
    }

    /// Flattens the bitmap into a 256-long feature vector.
    #[must_use]
    pub fn to_vector(&self) -> Vector<f32> {
        Vector::from_slice(&self.pixels)
    }
}

/// Returns (destination offset, source offset, copied length) along one axis.
fn fit_axis(size: usize) -> (usize, usize, usize) {
    if size >= BITMAP_SIZE {
        (0, (size - BITMAP_SIZE) / 2, BITMAP_SIZE)
    } else {
        ((BITMAP_SIZE - size) / 2, 0, size)
    }
}

/// Ordered association from class label to samples.
///
/// Iteration is in ascending label order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSet<T> {
    classes: BTreeMap<String, Vec<T>>,
}

impl<T> Default for LabeledSet<T> {
    fn default() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }
}

impl<T> LabeledSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends samples to a class, creating it if needed.
    pub fn extend(&mut self, label: impl Into<String>, samples: impl IntoIterator<Item = T>) {
        self.classes.entry(label.into()).or_default().extend(samples);
    }

    /// Appends one sample to a class.
    pub fn push(&mut self, label: impl Into<String>, sample: T) {
        self.classes.entry(label.into()).or_default().push(sample);
    }

    /// Samples of one class.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&[T]> {
        self.classes.get(label).map(Vec::as_slice)
    }

    /// Class labels in iteration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Total number of samples across classes.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    /// True if there are no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterates over `(label, samples)` in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.classes
            .iter()
            .map(|(label, samples)| (label.as_str(), samples.as_slice()))
    }

    /// Iterates over every `(label, sample)` pair, class by class.
    pub fn samples(&self) -> impl Iterator<Item = (&str, &T)> {
        self.iter()
            .flat_map(|(label, samples)| samples.iter().map(move |s| (label, s)))
    }

    /// Maps every sample, keeping labels and order.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> LabeledSet<U> {
        LabeledSet {
            classes: self
                .classes
                .iter()
                .map(|(label, samples)| (label.clone(), samples.iter().map(&mut f).collect()))
                .collect(),
        }
    }

    /// Fails with [`PatrecError::EmptyClass`] if any class has no samples.
    ///
    /// # Errors
    ///
    /// Returns the first empty class in label order.
    pub fn require_non_empty(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(PatrecError::empty_input("labeled set has no classes"));
        }
        match self.classes.iter().find(|(_, samples)| samples.is_empty()) {
            Some((label, _)) => Err(PatrecError::EmptyClass {
                label: label.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl LabeledSet<Vector<f32>> {
    /// Common feature dimension of every vector in the set.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty, a class is empty, or two vectors
    /// differ in length.
    pub fn dimension(&self) -> Result<usize> {
        self.require_non_empty()?;
        let mut samples = self.samples();
        let dim = samples.next().map_or(0, |(_, v)| v.len());
        for (label, v) in samples {
            if v.len() != dim {
                return Err(PatrecError::DimensionMismatch {
                    expected: format!("{dim} features"),
                    actual: format!("{} features in class '{label}'", v.len()),
                });
            }
        }
        Ok(dim)
    }
}

impl<T> FromIterator<(String, Vec<T>)> for LabeledSet<T> {
    fn from_iter<I: IntoIterator<Item = (String, Vec<T>)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (label, samples) in iter {
            set.extend(label, samples);
        }
        set
    }
}

impl<'a, T> IntoIterator for &'a LabeledSet<T> {
    type Item = (&'a String, &'a Vec<T>);
    type IntoIter = btree_map::Iter<'a, String, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

/// Bitmap samples grouped by dataset identifier, then class label.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    datasets: BTreeMap<String, LabeledSet<Bitmap>>,
}

impl SampleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every file and groups its glyphs by the dataset and label
    /// encoded in the file name (`<dataset>-<label>.<ext>`).
    ///
    /// # Errors
    ///
    /// Returns the first I/O or parse failure.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut store = Self::new();
        for path in paths {
            store.load_file(path.as_ref())?;
        }
        Ok(store)
    }

    /// Parses one file into the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file name is malformed, the file cannot be
    /// read, or its contents fail to parse.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let (dataset, label) = parse_file_name(path)?;
        let content = std::fs::read_to_string(path)?;
        let bitmaps = parse_bitmaps(&content)?;
        tracing::debug!(
            path = %path.display(),
            dataset = %dataset,
            label = %label,
            samples = bitmaps.len(),
            "loaded bitmap file"
        );
        self.insert(dataset, label, bitmaps);
        Ok(())
    }

    /// Adds samples for `(dataset, label)`.
    pub fn insert(&mut self, dataset: impl Into<String>, label: impl Into<String>, bitmaps: Vec<Bitmap>) {
        self.datasets
            .entry(dataset.into())
            .or_default()
            .extend(label, bitmaps);
    }

    /// Samples of one dataset.
    #[must_use]
    pub fn dataset(&self, id: &str) -> Option<&LabeledSet<Bitmap>> {
        self.datasets.get(id)
    }

    /// Dataset identifiers in ascending order.
    pub fn dataset_ids(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    /// True if nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
#[path = "bitmap_tests.rs"]
mod tests;
