//! Four-link gadgets with named path values.
//!
//! Link nodes are called `a, b` (left side) and `c, d` (right side). A
//! subset's value is addressed by the letters of the link nodes it contains,
//! so `acd` counts the connected subsets meeting the links in exactly
//! `{a, c, d}`.

use cis_common::{Graph, NodeIdx};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::optimize::{LinkPairing, best_pairing};
use crate::{
    EigenSolver, Gadget, GadgetError, GrowthRateEstimator, PathValues, REAL_EIGENVALUE_TOLERANCE,
    TransferMatrix,
};

/// Relative gap below which two eigenvalues are treated as one.
const DISTINCT_EIGENVALUE_GAP: f64 = 1e-9;

/// Link masks of a four-link gadget.
pub mod masks {
    #![allow(missing_docs)]
    pub const A: u32 = 0b0001;
    pub const B: u32 = 0b0010;
    pub const C: u32 = 0b0100;
    pub const D: u32 = 0b1000;
    pub const AB: u32 = A | B;
    pub const AC: u32 = A | C;
    pub const AD: u32 = A | D;
    pub const BC: u32 = B | C;
    pub const BD: u32 = B | D;
    pub const CD: u32 = C | D;
    pub const ABC: u32 = A | B | C;
    pub const ABD: u32 = A | B | D;
    pub const ACD: u32 = A | C | D;
    pub const BCD: u32 = B | C | D;
    pub const ABCD: u32 = A | B | C | D;
}

use masks::*;

/// A [`Gadget`] with exactly four link nodes.
#[derive(Clone, Debug)]
pub struct Gadget4 {
    inner: Gadget,
}

impl Gadget4 {
    /// Creates a four-link gadget with links `[a, b, c, d]`.
    ///
    /// # Errors
    ///
    /// Same as [`Gadget::new`].
    pub fn new(graph: Graph, links: [NodeIdx; 4]) -> Result<Self, GadgetError> {
        Ok(Self {
            inner: Gadget::new(graph, links.to_vec())?,
        })
    }

    /// Creates a four-link gadget and adopts its best link pairing.
    ///
    /// # Errors
    ///
    /// Same as [`Gadget::new`].
    pub fn optimized(graph: Graph, links: [NodeIdx; 4]) -> Result<Self, GadgetError> {
        let mut gadget = Self::new(graph, links)?;
        gadget.optimize_link_pairing()?;
        Ok(gadget)
    }

    /// Views `gadget` as a four-link gadget.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] unless `gadget` has four links.
    pub fn from_gadget(gadget: Gadget) -> Result<Self, GadgetError> {
        if gadget.link_count() != 4 {
            return Err(GadgetError::SizeMismatch {
                what: "link count",
                expected: 4,
                actual: gadget.link_count(),
            });
        }
        Ok(Self { inner: gadget })
    }

    /// The general gadget view.
    pub const fn gadget(&self) -> &Gadget {
        &self.inner
    }

    /// Drops the four-link view.
    pub fn into_gadget(self) -> Gadget {
        self.inner
    }

    /// The underlying graph.
    pub const fn graph(&self) -> &Graph {
        self.inner.graph()
    }

    /// First left link node.
    pub fn a(&self) -> NodeIdx {
        self.inner.link_nodes()[0]
    }

    /// Second left link node.
    pub fn b(&self) -> NodeIdx {
        self.inner.link_nodes()[1]
    }

    /// First right link node, wired to `a` of the next copy.
    pub fn c(&self) -> NodeIdx {
        self.inner.link_nodes()[2]
    }

    /// Second right link node, wired to `b` of the next copy.
    pub fn d(&self) -> NodeIdx {
        self.inner.link_nodes()[3]
    }

    /// Reassigns `[a, b, c, d]` and drops cached path values.
    ///
    /// # Errors
    ///
    /// Same as [`Gadget::set_link_nodes`].
    pub fn set_link_nodes(&mut self, links: [NodeIdx; 4]) -> Result<(), GadgetError> {
        self.inner.set_link_nodes(links.to_vec())
    }

    /// Path values of the current `[a, b, c, d]`.
    pub fn path_values(&self) -> &PathValues {
        self.inner.path_values()
    }

    fn value(&self, mask: u32) -> u64 {
        self.path_values().as_slice()[mask as usize]
    }

    /// Connected subsets meeting the links in exactly `{a, c}`.
    pub fn ac(&self) -> u64 {
        self.value(AC)
    }

    /// Connected subsets meeting the links in exactly `{a, d}`.
    pub fn ad(&self) -> u64 {
        self.value(AD)
    }

    /// Connected subsets meeting the links in exactly `{b, c}`.
    pub fn bc(&self) -> u64 {
        self.value(BC)
    }

    /// Connected subsets meeting the links in exactly `{b, d}`.
    pub fn bd(&self) -> u64 {
        self.value(BD)
    }

    /// Connected subsets meeting the links in exactly `{a, b, c}`.
    pub fn abc(&self) -> u64 {
        self.value(ABC)
    }

    /// Connected subsets meeting the links in exactly `{a, b, d}`.
    pub fn abd(&self) -> u64 {
        self.value(ABD)
    }

    /// Connected subsets meeting the links in exactly `{a, c, d}`.
    pub fn acd(&self) -> u64 {
        self.value(ACD)
    }

    /// Connected subsets meeting the links in exactly `{b, c, d}`.
    pub fn bcd(&self) -> u64 {
        self.value(BCD)
    }

    /// Connected subsets meeting the links in exactly `{a, b, c, d}`.
    pub fn abcd(&self) -> u64 {
        self.value(ABCD)
    }

    /// Subsets spanning from the left side to the right side.
    pub fn lr(&self) -> u64 {
        self.lc() + self.ld() + self.lcd()
    }

    /// Spanning subsets whose right-side intersection is exactly `c`.
    pub fn lc(&self) -> u64 {
        self.ac() + self.bc() + self.abc()
    }

    /// Spanning subsets whose right-side intersection is exactly `d`.
    pub fn ld(&self) -> u64 {
        self.ad() + self.bd() + self.abd()
    }

    /// Spanning subsets containing both `c` and `d`.
    pub fn lcd(&self) -> u64 {
        self.acd() + self.bcd() + self.abcd()
    }

    /// All 16 masks, with `None` for those that do not span both sides.
    pub fn spanning_values(&self) -> [Option<u64>; 16] {
        let mut out = [None; 16];
        for (mask, slot) in out.iter_mut().enumerate() {
            let mask = mask as u32;
            if mask & AB != 0 && mask & CD != 0 {
                *slot = Some(self.value(mask));
            }
        }
        out
    }

    /// Adopts the pairing of link nodes with the most cross-side subsets.
    ///
    /// The cached path values are permuted rather than recomputed. Returns
    /// the pairing that was chosen relative to the previous link order.
    ///
    /// # Errors
    ///
    /// Never fails for a four-link gadget; errors are forwarded from the
    /// pairing and permutation helpers.
    pub fn optimize_link_pairing(&mut self) -> Result<LinkPairing, GadgetError> {
        let before = self.lr();
        let pairing = best_pairing(self.path_values())?;
        if pairing != LinkPairing::AbCd {
            self.inner.permute_links(&pairing.permutation())?;
        }
        debug!("link pairing {}: LR {} -> {}", pairing, before, self.lr());
        Ok(pairing)
    }

    /// The fixed 3x3 recursion matrix, see [`TransferMatrix::four_link`].
    ///
    /// # Errors
    ///
    /// Never fails for a four-link gadget.
    pub fn recursion_matrix(&self) -> Result<TransferMatrix, GadgetError> {
        TransferMatrix::four_link(self.path_values())
    }

    /// Largest eigenvalue of the recursion matrix, `None` if any eigenvalue is complex.
    ///
    /// # Errors
    ///
    /// Never fails for a four-link gadget.
    pub fn max_real_eigenvalue<S: EigenSolver>(
        &self,
        estimator: &GrowthRateEstimator<S>,
    ) -> Result<Option<f64>, GadgetError> {
        Ok(estimator.max_real_eigenvalue(&self.recursion_matrix()?))
    }

    /// Splits `1ᵀ Mᵏ s` into `Σ fᵢ λᵢᵏ`, where `M` is the recursion matrix,
    /// `s = (Lc, Ld, Lcd)` and `λᵢ` its eigenvalues.
    ///
    /// Returns `(λᵢ, fᵢ)` per eigenvalue. For long chains the term of the
    /// largest eigenvalue dominates, so `f_max λ_maxᵏ` estimates the number
    /// of subsets spanning `k + 1` chained copies. `None` when an
    /// eigenvalue is complex or repeated, since `M` then has no real
    /// eigenbasis to split along.
    ///
    /// # Errors
    ///
    /// Never fails for a four-link gadget.
    pub fn lower_bound_factors<S: EigenSolver>(
        &self,
        estimator: &GrowthRateEstimator<S>,
    ) -> Result<Option<Vec<(f64, f64)>>, GadgetError> {
        let matrix = self.recursion_matrix()?;
        let eigenvalues = estimator.eigenvalues(&matrix);
        if eigenvalues
            .iter()
            .any(|c| !c.re.is_finite() || c.im.abs() > REAL_EIGENVALUE_TOLERANCE)
        {
            return Ok(None);
        }

        let lambdas: Vec<f64> = eigenvalues.iter().map(|c| c.re).collect();
        let scale = lambdas.iter().fold(1.0f64, |acc, l| acc.max(l.abs()));
        for (i, li) in lambdas.iter().enumerate() {
            if lambdas[i + 1..]
                .iter()
                .any(|lj| (li - lj).abs() <= DISTINCT_EIGENVALUE_GAP * scale)
            {
                debug!("repeated eigenvalue {} in recursion matrix", li);
                return Ok(None);
            }
        }

        let m = matrix.as_matrix();
        let spanning = DVector::from_vec(vec![self.lc() as f64, self.ld() as f64, self.lcd() as f64]);
        let mut terms = Vec::with_capacity(lambdas.len());
        for &lambda in &lambdas {
            let shifted = m - DMatrix::<f64>::identity(m.nrows(), m.ncols()) * lambda;
            let (Some(right), Some(left)) =
                (null_vector(shifted.clone()), null_vector(shifted.transpose()))
            else {
                return Ok(None);
            };
            let overlap = left.dot(&right);
            if overlap.abs() <= REAL_EIGENVALUE_TOLERANCE {
                return Ok(None);
            }
            terms.push((lambda, right.sum() * left.dot(&spanning) / overlap));
        }
        Ok(Some(terms))
    }
}

/// Unit vector spanning the (numerical) kernel of a singular `matrix`.
fn null_vector(matrix: DMatrix<f64>) -> Option<DVector<f64>> {
    let svd = matrix.svd(false, true);
    let index = svd.singular_values.imin();
    svd.v_t.map(|v_t| v_t.row(index).transpose())
}

impl TryFrom<Gadget> for Gadget4 {
    type Error = GadgetError;

    fn try_from(gadget: Gadget) -> Result<Self, Self::Error> {
        Self::from_gadget(gadget)
    }
}

impl From<Gadget4> for Gadget {
    fn from(gadget: Gadget4) -> Self {
        gadget.inner
    }
}
