//! Benchmark series alignment for side-by-side comparison.

mod aligner;
mod benchmark_model;
mod benchmark_traits;

pub use aligner::*;
pub use benchmark_model::*;
pub use benchmark_traits::*;
