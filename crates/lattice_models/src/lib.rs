//! # lattice_models (L2: Instruments and Analytics)
//!
//! Option contracts and the closed-form pricer consumed by the lattice engine.
//!
//! This crate provides:
//! - The immutable option contract (`instruments::OptionContract`) with its
//!   call/put flag and exercise style (European, American, down-and-out)
//! - The payoff seam (`instruments::Payoff`) used to seed terminal lattice layers
//! - The closed-form seam (`analytical::ClosedFormPricer`) and its
//!   Black-Scholes-Merton implementation with continuous dividend yield
//!
//! ## Design Principles
//!
//! - **Enum-based exercise styles** dispatched once per lattice node
//! - **Value semantics**: contracts are `Copy`; variants are derived with
//!   `with_spot` / `with_maturity` instead of mutating shared state
//! - **Builder pattern** with validation at build time

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
