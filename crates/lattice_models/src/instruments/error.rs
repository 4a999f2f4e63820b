//! Instrument error types.
//!
//! This module provides structured error handling for option contract
//! construction and validation.

use lattice_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidSpot`, `InvalidStrike`, `InvalidMaturity`: non-positive values
/// - `InvalidVolatility`: negative or non-finite volatility
/// - `InvalidDividendYield`: non-finite dividend yield
/// - `InvalidBarrier`: non-positive barrier level
/// - `MissingBarrier`: down-and-out style without a barrier level
/// - `UnexpectedBarrier`: barrier level supplied for a non-barrier style
/// - `MissingField`: a required builder field was never set
/// - `ParseError`: unrecognised option type or exercise style name
///
/// # Examples
/// ```
/// use lattice_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -40.0 };
/// assert!(format!("{}", err).contains("-40"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid spot price (non-positive).
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid maturity (non-positive).
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Invalid volatility (negative or non-finite).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid dividend yield (non-finite).
    #[error("Invalid dividend yield: q = {dividend_yield}")]
    InvalidDividendYield {
        /// The invalid dividend yield
        dividend_yield: f64,
    },

    /// Invalid barrier level (non-positive).
    #[error("Invalid barrier: B = {barrier}")]
    InvalidBarrier {
        /// The invalid barrier value
        barrier: f64,
    },

    /// Barrier style without a barrier level.
    #[error("Exercise style {style} requires a barrier level")]
    MissingBarrier {
        /// Name of the exercise style
        style: &'static str,
    },

    /// Barrier level supplied for a style that does not use one.
    #[error("Exercise style {style} does not take a barrier level")]
    UnexpectedBarrier {
        /// Name of the exercise style
        style: &'static str,
    },

    /// Required builder field not set.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Unrecognised textual representation.
    #[error("Cannot parse {kind} from '{value}'")]
    ParseError {
        /// What was being parsed
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::MissingBarrier { .. } | InstrumentError::UnexpectedBarrier { .. } => {
                PricingError::Configuration(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_spot_display() {
        let err = InstrumentError::InvalidSpot { spot: -41.0 };
        assert_eq!(format!("{}", err), "Invalid spot: S = -41");
    }

    #[test]
    fn test_invalid_maturity_display() {
        let err = InstrumentError::InvalidMaturity { maturity: 0.0 };
        assert_eq!(format!("{}", err), "Invalid maturity: T = 0");
    }

    #[test]
    fn test_missing_barrier_display() {
        let err = InstrumentError::MissingBarrier {
            style: "DownAndOut",
        };
        assert_eq!(
            format!("{}", err),
            "Exercise style DownAndOut requires a barrier level"
        );
    }

    #[test]
    fn test_barrier_errors_map_to_configuration() {
        let err: PricingError = InstrumentError::MissingBarrier {
            style: "DownAndOut",
        }
        .into();
        assert!(matches!(err, PricingError::Configuration(_)));

        let err: PricingError = InstrumentError::UnexpectedBarrier { style: "American" }.into();
        assert!(matches!(err, PricingError::Configuration(_)));
    }

    #[test]
    fn test_value_errors_map_to_invalid_input() {
        let err: PricingError = InstrumentError::InvalidStrike { strike: -1.0 }.into();
        match err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("strike")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let err = InstrumentError::ParseError {
            kind: "option type",
            value: "straddle".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Cannot parse option type from 'straddle'"
        );
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = InstrumentError::InvalidVolatility { volatility: -0.3 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
