//! Error types for gadget operations.
//!
//! Every variant is a caller contract violation: a malformed argument or a
//! gadget that cannot exist. An implausible growth estimate is not an error
//! and never shows up here.

use cis_common::GraphError;
use thiserror::Error;

/// Errors raised while building, classifying, or chaining gadgets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GadgetError {
    /// An argument's width disagrees with the number of link nodes.
    #[error("Size mismatch for {what}: expected {expected}, got {actual}")]
    SizeMismatch {
        /// What was measured.
        what: &'static str,
        /// Width the gadget requires.
        expected: usize,
        /// Width that was given.
        actual: usize,
    },

    /// A chain repeat count the chaining routine cannot honor.
    #[error("Invalid chain count {repeats}: {reason}")]
    InvalidChainCount {
        /// Requested number of copies.
        repeats: usize,
        /// Why it was refused.
        reason: &'static str,
    },

    /// Too few vertices, too many link nodes, or link nodes that collide.
    #[error("Degenerate gadget: {0}")]
    DegenerateGadget(String),

    /// A link relabelling that is not a permutation of the link positions.
    #[error("Not a permutation of the link positions: {0:?}")]
    InvalidPermutation(Vec<usize>),

    /// Underlying graph operation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl GadgetError {
    /// Create a degenerate gadget error.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGadget(msg.into())
    }

    pub(crate) const fn size_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            what,
            expected,
            actual,
        }
    }
}
