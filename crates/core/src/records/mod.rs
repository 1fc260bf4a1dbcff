//! Raw record ingestion and normalization.
//!
//! Source feeds disagree on field names, numeric precision, and whether
//! figures arrive as numbers or strings. This module is the single typed
//! parsing boundary that turns heterogeneous raw rows into a clean,
//! date-sorted `DailyRecord` series.

mod normalizer;
mod records_model;

pub use normalizer::*;
pub use records_model::*;
