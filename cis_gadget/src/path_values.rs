//! Path-value vectors: connected subset counts keyed by link-node masks.
//!
//! Bit `i` of a mask stands for link node `i`. For a gadget with `k` link
//! nodes the left side is bits `0..k/2` and the right side bits `k/2..k`,
//! so a mask splits as `left | right << (k/2)`.

use contracts::*;

use crate::{GadgetError, MAX_LINK_NODES};

/// Counts of nonempty connected induced subsets by exact link-node intersection.
///
/// Entry `m` counts the subsets whose intersection with the link nodes is
/// exactly the set selected by `m`. The entries sum to the #CIS of the
/// gadget's graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathValues {
    link_count: usize,
    values: Vec<u64>,
}

impl PathValues {
    /// All-zero vector for `link_count` link nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] when `link_count` exceeds [`MAX_LINK_NODES`].
    pub fn zeroed(link_count: usize) -> Result<Self, GadgetError> {
        check_link_count(link_count)?;
        Ok(Self::empty(link_count))
    }

    #[debug_requires(link_count <= MAX_LINK_NODES)]
    pub(crate) fn empty(link_count: usize) -> Self {
        Self {
            link_count,
            values: vec![0; 1 << link_count],
        }
    }

    /// Wraps precomputed counts.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] when `link_count` exceeds
    /// [`MAX_LINK_NODES`] or `values.len() != 2^link_count`.
    pub fn from_counts(link_count: usize, values: Vec<u64>) -> Result<Self, GadgetError> {
        check_link_count(link_count)?;
        let expected = 1usize << link_count;
        if values.len() != expected {
            return Err(GadgetError::size_mismatch(
                "path value vector length",
                expected,
                values.len(),
            ));
        }
        Ok(Self { link_count, values })
    }

    pub(crate) fn record(&mut self, mask: u32) {
        self.values[mask as usize] += 1;
    }

    /// Number of link nodes `k`.
    pub const fn link_count(&self) -> usize {
        self.link_count
    }

    /// Number of link nodes per side, `k / 2`.
    pub const fn side_width(&self) -> usize {
        self.link_count / 2
    }

    /// Mask with every link bit set.
    pub const fn full_mask(&self) -> u32 {
        ((1u64 << self.link_count) - 1) as u32
    }

    /// Mask with every bit of one side set, `2^(k/2) - 1`.
    pub const fn side_mask(&self) -> u32 {
        (1u32 << self.side_width()) - 1
    }

    /// All `2^k` counts in mask order.
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    /// Count for `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] when `mask` selects a bit at or above `k`.
    pub fn get(&self, mask: u32) -> Result<u64, GadgetError> {
        self.values
            .get(mask as usize)
            .copied()
            .ok_or_else(|| GadgetError::size_mismatch("link mask width", self.link_count, mask_width(mask)))
    }

    /// Sum of all entries, the #CIS of the underlying graph.
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Number of subsets containing at least the link nodes in `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] when `mask` is wider than `k` bits.
    pub fn containing_all(&self, mask: u32) -> Result<u64, GadgetError> {
        self.check_width(mask, self.link_count, "link mask width")?;
        Ok(self
            .values
            .iter()
            .enumerate()
            .filter(|&(m, _)| (m as u32 & mask) == mask)
            .map(|(_, &v)| v)
            .sum())
    }

    /// Number of subsets touching at least one left and at least one right link node.
    pub fn left_right(&self) -> u64 {
        let h = self.side_width();
        let side = self.side_mask() as usize;
        self.values
            .iter()
            .enumerate()
            .filter(|&(m, _)| m & side != 0 && (m >> h) & side != 0)
            .map(|(_, &v)| v)
            .sum()
    }

    /// Relabels link positions: new link `i` is old link `perm[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] when `perm.len() != k` and
    /// [`GadgetError::InvalidPermutation`] when it repeats a position.
    pub fn permuted(&self, perm: &[usize]) -> Result<Self, GadgetError> {
        check_permutation(perm, self.link_count)?;

        let mut values = vec![0; self.values.len()];
        for (old_mask, &count) in self.values.iter().enumerate() {
            let new_mask = perm
                .iter()
                .enumerate()
                .fold(0usize, |acc, (i, &src)| acc | ((old_mask >> src) & 1) << i);
            values[new_mask] = count;
        }

        Ok(Self {
            link_count: self.link_count,
            values,
        })
    }

    /// Main term of the transfer matrix: subsets whose right-side
    /// intersection is exactly `right`, with any left-side intersection.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] when `right` is wider than `k/2` bits.
    pub fn left_to(&self, right: u32) -> Result<u64, GadgetError> {
        let h = self.side_width();
        self.check_width(right, h, "right side mask width")?;

        Ok((0..=self.side_mask())
            .map(|left| self.values[(left | right << h) as usize])
            .sum())
    }

    /// Correction term of the transfer matrix.
    ///
    /// Sums the subsets whose right-side intersection is exactly
    /// `final_exit` and whose left-side intersection avoids every bit of
    /// `prev_exit`. These are the subsets that cannot be glued onto a chain
    /// prefix leaving through `prev_exit`. The all-empty mask never counts.
    ///
    /// # Errors
    ///
    /// Returns [`GadgetError::SizeMismatch`] when either mask is wider than `k/2` bits.
    pub fn excludable_subsets(&self, prev_exit: u32, final_exit: u32) -> Result<u64, GadgetError> {
        let h = self.side_width();
        self.check_width(prev_exit, h, "previous exit mask width")?;
        self.check_width(final_exit, h, "final exit mask width")?;

        let free = !prev_exit & self.side_mask();
        let right = final_exit << h;
        Ok(submasks(free)
            .map(|left| left | right)
            .filter(|&mask| mask != 0)
            .map(|mask| self.values[mask as usize])
            .sum())
    }

    fn check_width(&self, mask: u32, bits: usize, what: &'static str) -> Result<(), GadgetError> {
        if mask_width(mask) > bits {
            Err(GadgetError::size_mismatch(what, bits, mask_width(mask)))
        } else {
            Ok(())
        }
    }
}

/// Number of significant bits in `mask`.
pub const fn mask_width(mask: u32) -> usize {
    (u32::BITS - mask.leading_zeros()) as usize
}

/// Every submask of `mask`, including `0` and `mask` itself.
pub fn submasks(mask: u32) -> impl Iterator<Item = u32> {
    let mut next = Some(mask);
    std::iter::from_fn(move || {
        let current = next?;
        next = if current == 0 {
            None
        } else {
            Some((current - 1) & mask)
        };
        Some(current)
    })
}

fn check_link_count(link_count: usize) -> Result<(), GadgetError> {
    if link_count > MAX_LINK_NODES {
        Err(GadgetError::size_mismatch("link count", MAX_LINK_NODES, link_count))
    } else {
        Ok(())
    }
}

pub(crate) fn check_permutation(perm: &[usize], k: usize) -> Result<(), GadgetError> {
    if perm.len() != k {
        return Err(GadgetError::size_mismatch("link permutation length", k, perm.len()));
    }
    let mut seen = vec![false; k];
    for &p in perm {
        if p >= k || std::mem::replace(&mut seen[p], true) {
            return Err(GadgetError::InvalidPermutation(perm.to_vec()));
        }
    }
    Ok(())
}
