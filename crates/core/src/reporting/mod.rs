//! Investor-facing reporting layer.
//!
//! Turns computed metrics into display payloads with fixed two-decimal
//! strings, and exposes the async service boundary the API layer calls.

mod reporting_model;
mod reporting_service;
mod reporting_traits;

pub use reporting_model::*;
pub use reporting_service::*;
pub use reporting_traits::*;
