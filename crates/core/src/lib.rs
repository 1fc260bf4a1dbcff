//! Navlens Core - NAV reporting engine: domain models, analytics, and traits.
//!
//! This crate contains the portfolio performance computation engine for
//! navlens. It is storage-agnostic and defines the traits its collaborators
//! (record store, benchmark feed) implement; the engine itself is a set of
//! pure, deterministic functions over in-memory daily record series.

pub mod benchmark;
pub mod constants;
pub mod errors;
pub mod performance;
pub mod records;
pub mod reporting;
pub mod utils;

// Re-export common types from the records, performance, and reporting modules
pub use benchmark::*;
pub use performance::*;
pub use records::*;
pub use reporting::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
