//! Trends service access
//!
//! - [`client`] - HTTP client speaking the trends service protocol
//! - [`payload`] - Request encoding and response decoding
//! - [`headers`] - Request headers
//! - [`pacer`] - Injectable pauses
//! - [`fetcher`] - Retry loop around a [`TrendSource`]

pub mod client;
pub mod fetcher;
pub mod headers;
pub mod pacer;
pub mod payload;

use async_trait::async_trait;

use crate::models::TrendTable;
use crate::utils::error::FetchError;

pub use client::TrendsClient;
pub use fetcher::{AttemptOutcome, TrendFetcher};
pub use pacer::{Pacer, RecordingPacer, TokioPacer};
pub use payload::{RequestScope, TrendRequest};

/// Anything that can answer one interest-over-time request
///
/// One call is one attempt: implementations never retry on their own.
#[async_trait]
pub trait TrendSource: Send + Sync {
    async fn interest_over_time(&self, request: &TrendRequest) -> Result<TrendTable, FetchError>;
}
