//! Transfer matrices of gadget chains.
//!
//! For a chain of copies of one gadget, row `r - 1` and column `j - 1` of the
//! matrix count the ways a subset leaving the previous copy through the
//! nonempty exit mask `j` extends through one more copy and leaves it through
//! the nonempty exit mask `r`. The largest eigenvalue modulus is the
//! per-copy growth factor of #CIS along the chain.

use nalgebra::DMatrix;
use tracing::trace;

use crate::gadget4::masks::*;
use crate::{GadgetError, PathValues};

/// Square transfer matrix of a gadget chain.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferMatrix {
    matrix: DMatrix<f64>,
}

impl TransferMatrix {
    /// Builds the `(2^(k/2) - 1)`-square matrix for any even `k`.
    ///
    /// Entry `[r - 1][j - 1]` is `left_to(r) - excludable_subsets(j, r)`.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::DegenerateGadget`] when `k` is zero or odd.
    pub fn from_path_values(values: &PathValues) -> Result<Self, GadgetError> {
        let k = values.link_count();
        if k == 0 || k % 2 != 0 {
            return Err(GadgetError::degenerate(format!(
                "transfer matrix needs a positive even link count, got {k}"
            )));
        }

        let exits = values.side_mask() as usize;
        let mut matrix = DMatrix::zeros(exits, exits);
        for r in 1..=values.side_mask() {
            let main = values.left_to(r)?;
            for j in 1..=values.side_mask() {
                let excluded = values.excludable_subsets(j, r)?;
                debug_assert!(excluded <= main);
                matrix[((r - 1) as usize, (j - 1) as usize)] = (main - excluded) as f64;
            }
        }

        trace!("transfer matrix for k = {}: {}", k, matrix);
        Ok(Self { matrix })
    }

    /// The 3x3 matrix of a four-link gadget written out with named aggregates.
    ///
    /// ```text
    /// [ Lc  - bc,  Lc  - ac,  Lc  ]
    /// [ Ld  - bd,  Ld  - ad,  Ld  ]
    /// [ Lcd - bcd, Lcd - acd, Lcd ]
    /// ```
    ///
    /// Agrees with [`TransferMatrix::from_path_values`] for `k = 4`.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] unless `k = 4`.
    pub fn four_link(values: &PathValues) -> Result<Self, GadgetError> {
        if values.link_count() != 4 {
            return Err(GadgetError::SizeMismatch {
                what: "link count",
                expected: 4,
                actual: values.link_count(),
            });
        }

        let v = |mask: u32| values.as_slice()[mask as usize];
        let lc = v(AC) + v(BC) + v(ABC);
        let ld = v(AD) + v(BD) + v(ABD);
        let lcd = v(ACD) + v(BCD) + v(ABCD);

        #[rustfmt::skip]
        let entries = [
            lc - v(BC),   lc - v(AC),   lc,
            ld - v(BD),   ld - v(AD),   ld,
            lcd - v(BCD), lcd - v(ACD), lcd,
        ];
        Ok(Self {
            matrix: DMatrix::from_row_iterator(3, 3, entries.into_iter().map(|e| e as f64)),
        })
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Entry at `(row, col)`, `None` out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.matrix.get((row, col)).copied()
    }

    /// Borrow as an nalgebra matrix.
    pub const fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Unwraps the nalgebra matrix.
    pub fn into_inner(self) -> DMatrix<f64> {
        self.matrix
    }
}

impl From<DMatrix<f64>> for TransferMatrix {
    fn from(matrix: DMatrix<f64>) -> Self {
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_link_matrix_is_one_by_one() {
        // Single edge: pv = [0, 1, 1, 1]. main(1) = 1 + 1, excludable(1, 1) = pv[2] = 1.
        let pv = PathValues::from_counts(2, vec![0, 1, 1, 1]).unwrap();
        let m = TransferMatrix::from_path_values(&pv).unwrap();
        assert_eq!(m.dim(), 1);
        assert_eq!(m.get(0, 0), Some(1.0));
    }

    #[test]
    fn test_general_matches_named_four_link_matrix() {
        let values = (0..16u64).map(|m| m * m + 3).collect();
        let pv = PathValues::from_counts(4, values).unwrap();
        assert_eq!(
            TransferMatrix::from_path_values(&pv).unwrap(),
            TransferMatrix::four_link(&pv).unwrap()
        );
    }

    #[test]
    fn test_rejects_odd_link_counts() {
        let pv = PathValues::zeroed(3).unwrap();
        assert!(TransferMatrix::from_path_values(&pv).is_err());
        assert!(TransferMatrix::four_link(&PathValues::zeroed(2).unwrap()).is_err());
    }

    #[test]
    fn test_six_link_dimension() {
        let pv = PathValues::from_counts(6, vec![1; 64]).unwrap();
        let m = TransferMatrix::from_path_values(&pv).unwrap();
        assert_eq!(m.dim(), 7);
        // r = 1, j = 7: no left bits free, so only the bare right mask is excluded.
        assert_eq!(m.get(0, 6), Some(7.0));
    }
}
