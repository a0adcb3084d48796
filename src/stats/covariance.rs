//! Covariance computations.
//!
//! # Mathematical Background
//!
//! The sample covariance of features `i` and `j` over `n` observations is
//!
//! ```text
//! Cov(X_i, X_j) = 1/(n-1) Σ_k (x_ki - x̄_i)(x_kj - x̄_j)
//! ```
//!
//! The pooled covariance used by the shared-covariance discriminant is the
//! element-wise average of the per-class covariance matrices:
//!
//! ```text
//! Σ = 1/C Σ_c Cov_c
//! ```
//!
//! # Examples
//!
//! ```
//! use patrec::stats::cov_matrix;
//! use patrec::primitives::Matrix;
//!
//! // 3 samples, 2 features
//! let data = Matrix::from_vec(3, 2, vec![
//!     1.0, 2.0,
//!     2.0, 4.0,
//!     3.0, 6.0,
//! ]).expect("Valid matrix");
//!
//! let cov = cov_matrix(&data).expect("Should compute covariance matrix");
//! assert!((cov.get(0, 0) - 1.0).abs() < 1e-6);
//! assert!((cov.get(0, 1) - 2.0).abs() < 1e-6);
//! ```

use crate::bitmap::LabeledSet;
use crate::error::{PatrecError, Result};
use crate::primitives::{Matrix, Vector};

/// Computes the sample covariance matrix of a data matrix.
///
/// # Arguments
///
/// * `data` - Data matrix (n × p), where n is samples and p is features
///
/// # Returns
///
/// Covariance matrix (p × p) where entry (i, j) is `Cov(feature_i, feature_j)`
/// with denominator `n - 1`.
///
/// # Errors
///
/// Returns error if there are fewer than two samples or no features.
pub fn cov_matrix(data: &Matrix<f32>) -> Result<Matrix<f32>> {
    let n = data.n_rows(); // samples
    let p = data.n_cols(); // features

    if p == 0 {
        return Err(PatrecError::empty_input("covariance of zero features"));
    }
    if n < 2 {
        return Err(PatrecError::Other(format!(
            "Sample covariance needs at least 2 samples, got {n}"
        )));
    }

    // Compute means for each feature
    let mut means = vec![0.0_f32; p];
    #[allow(clippy::needless_range_loop)]
    for j in 0..p {
        let mut sum = 0.0;
        for i in 0..n {
            sum += data.get(i, j);
        }
        means[j] = sum / n as f32;
    }

    let denom = (n - 1) as f32;
    let mut cov = Matrix::zeros(p, p);
    for i in 0..p {
        for j in 0..=i {
            // Only compute lower triangle (symmetric)
            let mut cov_sum = 0.0;
            for k in 0..n {
                cov_sum += (data.get(k, i) - means[i]) * (data.get(k, j) - means[j]);
            }
            let cov_val = cov_sum / denom;

            cov.set(i, j, cov_val);
            cov.set(j, i, cov_val);
        }
    }

    Ok(cov)
}

/// Element-wise average of the per-class sample covariance matrices.
///
/// # Errors
///
/// Returns an error if a class is empty, has a single sample, or the vectors
/// are ragged.
pub fn pooled_covariance(set: &LabeledSet<Vector<f32>>) -> Result<Matrix<f32>> {
    let dim = set.dimension()?;
    let mut pooled = Matrix::zeros(dim, dim);

    for (label, samples) in set.iter() {
        let data = Matrix::from_rows(samples)?;
        let cov = cov_matrix(&data).map_err(|e| {
            PatrecError::Other(format!("covariance of class '{label}' failed: {e}"))
        })?;
        pooled = pooled
            .add(&cov)
            .map_err(|e| PatrecError::Other(e.to_string()))?;
    }

    Ok(pooled.mul_scalar(1.0 / set.n_classes() as f32))
}

/// Inverse of the pooled covariance matrix.
///
/// # Errors
///
/// Returns [`PatrecError::SingularMatrix`] if the averaged matrix cannot be
/// inverted, plus any error of [`pooled_covariance`].
pub fn pooled_inverse_covariance(set: &LabeledSet<Vector<f32>>) -> Result<Matrix<f32>> {
    let pooled = pooled_covariance(set)?;
    tracing::debug!(dim = pooled.n_rows(), classes = set.n_classes(), "inverting pooled covariance");
    pooled.inverse()
}

#[cfg(test)]
#[path = "covariance_tests.rs"]
mod tests;
