//! Gadgets: graphs with distinguished link nodes that are chained into
//! larger graphs, and the machinery to predict how #CIS grows along such a
//! chain.
//!
//! A [`Gadget`] classifies its connected subsets by which link nodes they
//! contain ([`PathValues`]). From those counts alone a [`TransferMatrix`]
//! is built whose spectral radius `R` gives the per-copy growth factor of
//! #CIS along an infinite chain, so `R^(1/|V|)` lower-bounds the largest
//! achievable growth base per vertex.

mod classify;
pub mod combine;
mod error;
mod gadget;
mod gadget4;
mod growth;
pub mod optimize;
mod path_values;
mod single;
mod transfer;

pub use classify::classify;
pub use error::GadgetError;
pub use gadget::{Gadget, MAX_LINK_NODES};
pub use gadget4::{Gadget4, masks};
pub use growth::{
    EigenSolver, GrowthEstimate, GrowthRateEstimator, MAX_PER_VERTEX_BASE, NalgebraEigenSolver,
    REAL_EIGENVALUE_TOLERANCE,
};
pub use optimize::LinkPairing;
pub use path_values::{PathValues, mask_width, submasks};
pub use single::SingleLinkGadget;
pub use transfer::TransferMatrix;
