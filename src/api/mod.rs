//! Market intelligence backend integration.
//!
//! This module provides a high-level interface to the analysis backend,
//! handling request building, status checks and data conversion.

mod client;
mod converter;

pub use client::{ApiClient, ApiClientBuilder};
pub use converter::{DataConverter, RemoteHistoryDetail, RemoteHistoryEntry};

use crate::error::Result;
use crate::state::MarketData;
use async_trait::async_trait;

/// Something that can produce a sector analysis.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Request an analysis of `sector`.
    async fn analyze(&self, sector: &str) -> Result<MarketData>;
}
