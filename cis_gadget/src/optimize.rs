//! Choice of left/right pairing for four-link gadgets.
//!
//! A four-link gadget can split its links `a, b, c, d` into two sides in
//! three ways. The pairing with the fewest subsets confined to exactly one
//! full side leaves the most subsets spanning both sides.

use std::fmt;

use tracing::debug;

use crate::{GadgetError, PathValues};

/// One of the three ways to split four link nodes into two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkPairing {
    /// `(a, b | c, d)`, the identity.
    AbCd,
    /// `(a, c | b, d)`.
    AcBd,
    /// `(a, d | b, c)`.
    AdBc,
}

impl LinkPairing {
    /// All pairings in tie-break preference order.
    pub const ALL: [Self; 3] = [Self::AbCd, Self::AcBd, Self::AdBc];

    /// The two one-full-side masks `(left, right)` under this pairing.
    pub const fn same_side_masks(self) -> (u32, u32) {
        match self {
            Self::AbCd => (0b0011, 0b1100),
            Self::AcBd => (0b0101, 0b1010),
            Self::AdBc => (0b1001, 0b0110),
        }
    }

    /// Link permutation adopting this pairing: new link `i` is old link `perm[i]`.
    pub const fn permutation(self) -> [usize; 4] {
        match self {
            Self::AbCd => [0, 1, 2, 3],
            Self::AcBd => [0, 2, 1, 3],
            Self::AdBc => [0, 3, 2, 1],
        }
    }
}

impl fmt::Display for LinkPairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AbCd => "ab|cd",
            Self::AcBd => "ac|bd",
            Self::AdBc => "ad|bc",
        };
        f.write_str(s)
    }
}

/// Subsets whose link intersection is exactly one full side under `pairing`.
///
/// # Errors
///
/// Returns [`GadgetError::SizeMismatch`] unless `values` has four links.
pub fn same_side_count(values: &PathValues, pairing: LinkPairing) -> Result<u64, GadgetError> {
    check_four(values)?;
    let (left, right) = pairing.same_side_masks();
    Ok(values.get(left)? + values.get(right)?)
}

/// The pairing with the smallest [`same_side_count`]. Ties go to the
/// earlier entry of [`LinkPairing::ALL`].
///
/// # Errors
///
/// Returns [`GadgetError::SizeMismatch`] unless `values` has four links.
pub fn best_pairing(values: &PathValues) -> Result<LinkPairing, GadgetError> {
    check_four(values)?;

    let mut best = LinkPairing::AbCd;
    let mut best_count = same_side_count(values, best)?;
    for pairing in [LinkPairing::AcBd, LinkPairing::AdBc] {
        let count = same_side_count(values, pairing)?;
        if count < best_count {
            best = pairing;
            best_count = count;
        }
    }

    debug!("best pairing {} with {} same-side subsets", best, best_count);
    Ok(best)
}

fn check_four(values: &PathValues) -> Result<(), GadgetError> {
    if values.link_count() == 4 {
        Ok(())
    } else {
        Err(GadgetError::SizeMismatch {
            what: "link count",
            expected: 4,
            actual: values.link_count(),
        })
    }
}
