//! Trade record log.
//!
//! Every submitted order, simulated or live, is appended to a JSON file
//! so a session's activity survives restarts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use terminal_core::error::DataError;
use terminal_core::traits::OrderSide;

/// One executed or submitted trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub time: DateTime<Utc>,
    pub code: String,
    pub name: String,
    pub side: OrderSide,
    pub price: f64,
    pub volume: u32,
    pub amount: f64,
    /// Whether the order went to the simulated engine.
    pub simulated: bool,
}

/// Append-only JSON trade log.
pub struct TradeRecorder {
    path: PathBuf,
}

impl TradeRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one record. The whole file is rewritten; the log stays
    /// small enough that this is fine.
    pub fn add(&self, record: TradeRecord) -> Result<(), DataError> {
        let mut records = self.load()?;
        records.push(record);
        let body = serde_json::to_string_pretty(&records)
            .map_err(|e| DataError::Parse(e.to_string()))?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    /// The most recent `limit` records, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<TradeRecord>, DataError> {
        let mut records = self.load()?;
        records.reverse();
        records.truncate(limit);
        Ok(records)
    }

    fn load(&self) -> Result<Vec<TradeRecord>, DataError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|e| DataError::Parse(e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
