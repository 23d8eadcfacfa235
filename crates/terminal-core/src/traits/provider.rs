//! External market-data provider boundary.

use crate::error::DataError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One normalized row of a full-market snapshot.
///
/// Providers return arbitrary-shaped rows; each implementation owns a
/// single adapter that maps its schema onto this fixed shape, skipping
/// rows it cannot parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    /// Bare 6-digit instrument code.
    pub code: String,
    /// Last traded price.
    pub price: f64,
    /// Day change in percent, as reported by the provider.
    pub change_percent: f64,
    /// Turnover rate in percent.
    pub turnover_rate: f64,
}

/// A provider answering one "snapshot all instruments" query per batch.
///
/// Called once per refresh cycle, never once per symbol; the chain
/// filters the full table down to the requested set.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Fetch the full market table.
    async fn snapshot(&self) -> Result<Vec<SnapshotRow>, DataError>;

    /// Provider name for logs.
    fn name(&self) -> &str;
}
