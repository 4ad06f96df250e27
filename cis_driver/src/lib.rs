//! Best-gadget search over a `(degree, size, link pairs)` grid.
//!
//! For every admitted grid cell the driver draws `iterations` random
//! connected cycle gadgets, estimates the growth rate of chaining each one,
//! and keeps the best. The result is a [`SearchReport`] that can be printed
//! or written as two CSV files.
//!
//! [`CycleExtremes`] instead samples random linked cycles per
//! `(degree, size)` cell and keeps those with the largest and smallest #CIS.

mod error;
mod extremes;
mod report;
mod search;

pub use error::DriverError;
pub use extremes::CycleExtremes;
pub use report::{
    CellReport, CycleRow, CycleSample, ExtremesCell, ExtremesReport, GraphRow, SearchReport,
    ValueRow,
};
pub use search::{GadgetSearch, MAX_CONNECT_ATTEMPTS, candidate_seed};
