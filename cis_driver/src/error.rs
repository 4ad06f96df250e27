use cis_gadget::GadgetError;
use cis_generate::GenerateError;
use thiserror::Error;

/// Errors raised by the search driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Gadget generation failed.
    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),

    /// Gadget analysis failed.
    #[error("Gadget error: {0}")]
    Gadget(#[from] GadgetError),

    /// Writing a report failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error while writing a report.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
