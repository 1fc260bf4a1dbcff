//! Portfolio performance analytics.
//!
//! Pure, deterministic transforms from a normalized daily series to the
//! derived figures the reporting layer surfaces: trailing returns and
//! drawdown, monthly/quarterly P&L tables, chart curves, and the
//! consolidated multi-account series.

mod aggregate;
mod baseline;
mod curves;
mod performance_model;
mod periods;
mod trailing;

pub use aggregate::*;
pub use baseline::*;
pub use curves::*;
pub use performance_model::*;
pub use periods::*;
pub use trailing::*;
