//! Growth-rate estimation from transfer matrices.

use nalgebra::{Complex, DMatrix};
use tracing::debug;

use crate::{Gadget, GadgetError, TransferMatrix};

/// Per-vertex growth bases above this value are impossible for #CIS and are
/// treated as numerical noise.
pub const MAX_PER_VERTEX_BASE: f64 = 2.0;

/// Imaginary parts below this magnitude count as real.
pub const REAL_EIGENVALUE_TOLERANCE: f64 = 1e-12;

/// Eigenvalue backend.
pub trait EigenSolver {
    /// All eigenvalues of the square `matrix`, possibly complex.
    fn eigenvalues(&self, matrix: &DMatrix<f64>) -> Vec<Complex<f64>>;
}

/// [`EigenSolver`] backed by nalgebra's real Schur decomposition.
#[derive(Clone, Copy, Debug, Default)]
pub struct NalgebraEigenSolver;

impl EigenSolver for NalgebraEigenSolver {
    fn eigenvalues(&self, matrix: &DMatrix<f64>) -> Vec<Complex<f64>> {
        match matrix.nrows() {
            0 => Vec::new(),
            1 => vec![Complex::new(matrix[(0, 0)], 0.0)],
            _ => matrix.complex_eigenvalues().iter().copied().collect(),
        }
    }
}

/// Spectral radius of a chain's transfer matrix together with the size of
/// the gadget it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthEstimate {
    spectral_radius: f64,
    node_count: usize,
}

impl GrowthEstimate {
    /// Largest eigenvalue modulus `R`.
    pub const fn spectral_radius(&self) -> f64 {
        self.spectral_radius
    }

    /// Vertices per chained copy.
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// `R^(1/|V|)`: #CIS of a long chain grows like this base per vertex.
    pub fn per_vertex_base(&self) -> f64 {
        self.spectral_radius.powf(1.0 / self.node_count as f64)
    }

    /// `log2` of [`GrowthEstimate::per_vertex_base`], comparable to a #CIS exponent.
    pub fn exponent(&self) -> f64 {
        self.per_vertex_base().log2()
    }
}

/// Turns transfer matrices into growth estimates.
#[derive(Clone, Debug, Default)]
pub struct GrowthRateEstimator<S = NalgebraEigenSolver> {
    solver: S,
}

impl GrowthRateEstimator {
    /// Estimator backed by [`NalgebraEigenSolver`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: EigenSolver> GrowthRateEstimator<S> {
    /// Estimator using a custom eigenvalue backend.
    pub const fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// Eigenvalues of `matrix` as reported by the backend.
    pub fn eigenvalues(&self, matrix: &TransferMatrix) -> Vec<Complex<f64>> {
        self.solver.eigenvalues(matrix.as_matrix())
    }

    /// Largest eigenvalue modulus. `0.0` for an empty matrix, NaN if the
    /// backend produced NaN.
    pub fn spectral_radius(&self, matrix: &TransferMatrix) -> f64 {
        self.eigenvalues(matrix)
            .iter()
            .map(|c| c.re.hypot(c.im))
            .fold(0.0, |acc: f64, m| if m.is_nan() || acc.is_nan() { f64::NAN } else { acc.max(m) })
    }

    /// Largest eigenvalue when every eigenvalue is real, otherwise `None`.
    pub fn max_real_eigenvalue(&self, matrix: &TransferMatrix) -> Option<f64> {
        let eigenvalues = self.eigenvalues(matrix);
        if eigenvalues
            .iter()
            .any(|c| c.im.abs() > REAL_EIGENVALUE_TOLERANCE)
        {
            return None;
        }
        eigenvalues.iter().map(|c| c.re).reduce(f64::max)
    }

    /// Growth estimate of a chain whose copies have `node_count` vertices.
    ///
    /// Returns `None` when the radius is NaN or the per-vertex base exceeds
    /// [`MAX_PER_VERTEX_BASE`].
    pub fn estimate(&self, matrix: &TransferMatrix, node_count: usize) -> Option<GrowthEstimate> {
        if node_count == 0 {
            return None;
        }

        let estimate = GrowthEstimate {
            spectral_radius: self.spectral_radius(matrix),
            node_count,
        };
        let base = estimate.per_vertex_base();
        if estimate.spectral_radius.is_nan() || base.is_nan() {
            debug!("discarding NaN growth estimate ({} vertices)", node_count);
            return None;
        }
        if base > MAX_PER_VERTEX_BASE {
            debug!(
                "discarding implausible growth estimate: base {} over {} vertices",
                base, node_count
            );
            return None;
        }

        debug!(
            "spectral radius {} over {} vertices -> base {}",
            estimate.spectral_radius, node_count, base
        );
        Some(estimate)
    }

    /// Growth estimate of chaining `gadget` with itself.
    ///
    /// # Errors
    ///
    /// Forwarded from [`Gadget::transfer_matrix`].
    pub fn estimate_gadget(&self, gadget: &Gadget) -> Result<Option<GrowthEstimate>, GadgetError> {
        let matrix = gadget.transfer_matrix()?;
        Ok(self.estimate(&matrix, gadget.node_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSolver(Vec<Complex<f64>>);

    impl EigenSolver for FixedSolver {
        fn eigenvalues(&self, _: &DMatrix<f64>) -> Vec<Complex<f64>> {
            self.0.clone()
        }
    }

    fn diag(entries: &[f64]) -> TransferMatrix {
        DMatrix::from_diagonal(&nalgebra::DVector::from_column_slice(entries)).into()
    }

    #[test]
    fn test_spectral_radius_of_diagonal() {
        let est = GrowthRateEstimator::new();
        let radius = est.spectral_radius(&diag(&[1.0, -5.0, 3.0]));
        assert!((radius - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_by_one() {
        let est = GrowthRateEstimator::new();
        let got = est.estimate(&diag(&[4.0]), 2).unwrap();
        assert!((got.per_vertex_base() - 2.0).abs() < 1e-12);
        assert!((got.exponent() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sanity_cap_discards_implausible_bases() {
        let est = GrowthRateEstimator::new();
        assert!(est.estimate(&diag(&[9.0]), 3).is_none());
        assert!(est.estimate(&diag(&[7.0]), 3).is_some());
        assert!(est.estimate(&diag(&[1.0]), 0).is_none());
    }

    #[test]
    fn test_nan_is_discarded() {
        let est = GrowthRateEstimator::with_solver(FixedSolver(vec![Complex::new(f64::NAN, 0.0)]));
        assert!(est.estimate(&diag(&[1.0]), 4).is_none());
    }

    #[test]
    fn test_max_real_eigenvalue() {
        let real = GrowthRateEstimator::with_solver(FixedSolver(vec![
            Complex::new(1.5, 0.0),
            Complex::new(-3.0, 0.0),
        ]));
        assert_eq!(real.max_real_eigenvalue(&diag(&[0.0])), Some(1.5));

        let complex = GrowthRateEstimator::with_solver(FixedSolver(vec![
            Complex::new(1.0, 1.0),
            Complex::new(1.0, -1.0),
        ]));
        assert_eq!(complex.max_real_eigenvalue(&diag(&[0.0])), None);
        assert!((complex.spectral_radius(&diag(&[0.0])) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_has_unit_radius() {
        let rotation: TransferMatrix = DMatrix::from_row_slice(2, 2, &[0.0, -1.0, 1.0, 0.0]).into();
        let est = GrowthRateEstimator::new();
        assert!((est.spectral_radius(&rotation) - 1.0).abs() < 1e-9);
        assert_eq!(est.max_real_eigenvalue(&rotation), None);
    }
}
