//! # lattice_pricing (L3: Lattice Engine)
//!
//! Cox-Ross-Rubinstein binomial pricing of European, American and
//! down-and-out barrier options, with Delta, Gamma and Theta read off the
//! lattice.
//!
//! ## Estimators
//!
//! | Method | Construction |
//! |--------|--------------|
//! | `Plain` | Payoff-seeded terminal layer, full backward sweep |
//! | `Averaged` | Mean of the N and N+1 step lattices |
//! | `Hybrid` | Closed-form values on the layer one step before expiry |
//! | `Richardson` | 2·hybrid(N) - hybrid(⌊N/2⌋) |
//!
//! ## Usage Example
//!
//! ```rust
//! use lattice_models::instruments::{ExerciseKind, OptionContract, OptionType};
//! use lattice_pricing::{price_binomial, LatticeParams};
//!
//! let put = OptionContract::builder()
//!     .spot(41.0_f64)
//!     .strike(40.0)
//!     .maturity(1.0)
//!     .dividend_yield(0.01)
//!     .volatility(0.3)
//!     .option_type(OptionType::Put)
//!     .exercise(ExerciseKind::American)
//!     .build()
//!     .unwrap();
//!
//! let params = LatticeParams::new(5, 0.03, &put).unwrap();
//! let result = price_binomial(&put, &params, true).unwrap();
//!
//! assert!((result.price - 4.205_487_001_378_676).abs() < 1e-10);
//! assert!(result.delta.unwrap() < 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): convergence studies run step counts on rayon
//! - `serde`: serialization of configuration and results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod convergence;
pub mod engine;
pub mod error;
pub mod greeks;
pub mod lattice;
pub mod pricer;

pub use config::{LatticeConfig, LatticeConfigBuilder, LatticeMethod, MAX_STEPS};
pub use convergence::{ConvergencePoint, ConvergenceReport, ConvergenceStudy};
pub use engine::{
    price_averaged, price_binomial, price_hybrid, price_hybrid_with, price_richardson,
    price_richardson_with,
};
pub use error::LatticeError;
pub use greeks::{GreekStencil, LatticeResult};
pub use lattice::{LatticeLayer, LatticeParams};
pub use pricer::LatticePricer;
