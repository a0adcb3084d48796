//! Core compute primitives (Vector, Matrix).
//!
//! Dense row-major containers backing the feature vectors, statistics and
//! confusion counts of the pipeline.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
