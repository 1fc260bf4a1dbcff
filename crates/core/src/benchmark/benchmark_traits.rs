//! Benchmark provider traits.

use async_trait::async_trait;

use super::benchmark_model::RawBenchmarkPoint;
use crate::errors::Result;

/// Contract for the external benchmark-fetch collaborator.
///
/// Implementations own timeouts, retries, and caching; the core only sees
/// the fetched observations. A failed or empty upstream fetch surfaces as
/// an empty series, which aligns to empty curves downstream.
#[async_trait]
pub trait BenchmarkProviderTrait: Send + Sync {
    /// Raw observations for one benchmark, in no particular order.
    async fn get_benchmark_series(&self, benchmark_id: &str) -> Result<Vec<RawBenchmarkPoint>>;
}
