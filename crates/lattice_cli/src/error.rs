//! CLI error type.

use lattice_core::types::PricingError;
use lattice_models::instruments::InstrumentError;
use lattice_pricing::LatticeError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `lattice` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Contract arguments were rejected.
    #[error("Invalid contract: {0}")]
    Instrument(#[from] InstrumentError),

    /// The lattice engine failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialisation failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// CSV serialisation failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<LatticeError> for CliError {
    fn from(err: LatticeError) -> Self {
        CliError::Pricing(err.into())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
