//! Primary full-market snapshot provider.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use terminal_core::error::DataError;
use terminal_core::traits::{SnapshotProvider, SnapshotRow};
use tracing::{debug, warn};

/// Default Eastmoney push2 spot endpoint serving the full A-share table
/// in one call.
pub const DEFAULT_SPOT_URL: &str = "https://push2.eastmoney.com/api/qt/clist/get";

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Query for the whole market in one page: SH/SZ main boards, ChiNext and
/// STAR, with code (f12), last price (f2), change percent (f3) and
/// turnover rate (f8) as plain decimals (fltt=2).
const SPOT_QUERY: &[(&str, &str)] = &[
    ("pn", "1"),
    ("pz", "6000"),
    ("po", "1"),
    ("np", "1"),
    ("fltt", "2"),
    ("invt", "2"),
    ("fid", "f3"),
    ("fs", "m:0 t:6,m:0 t:80,m:1 t:2,m:1 t:23"),
    ("fields", "f2,f3,f8,f12"),
];

/// Eastmoney spot-table provider.
pub struct EastmoneySpot {
    client: Client,
    base_url: String,
}

impl EastmoneySpot {
    pub fn new() -> Result<Self, DataError> {
        Self::with_base_url(DEFAULT_SPOT_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| DataError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Map one raw provider row onto the fixed snapshot shape.
    ///
    /// This is the single point where the provider's schema variants are
    /// resolved: suspended instruments report `"-"` placeholders instead
    /// of numbers and are skipped, as is any row whose code is not a
    /// 6-digit string.
    fn parse_row(row: &Value) -> Option<SnapshotRow> {
        let code = row.get("f12")?.as_str()?;
        if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let price = Self::number(row.get("f2")?)?;
        let change_percent = Self::number(row.get("f3")?)?;
        // Turnover can be missing for funds; default it rather than drop
        // the whole row.
        let turnover_rate = row.get("f8").and_then(Self::number).unwrap_or(0.0);

        Some(SnapshotRow {
            code: code.to_string(),
            price,
            change_percent,
            turnover_rate,
        })
    }

    /// Numeric field that may arrive as a number, a numeric string, or a
    /// `"-"` suspension placeholder.
    fn number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

#[async_trait]
impl SnapshotProvider for EastmoneySpot {
    async fn snapshot(&self) -> Result<Vec<SnapshotRow>, DataError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(SPOT_QUERY)
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let diff = body
            .get("data")
            .and_then(|d| d.get("diff"))
            .and_then(|d| d.as_array())
            .ok_or_else(|| DataError::Provider("snapshot payload missing data.diff".into()))?;

        let mut rows = Vec::with_capacity(diff.len());
        let mut skipped = 0usize;
        for raw in diff {
            match Self::parse_row(raw) {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(skipped, "snapshot rows skipped as unparseable");
        }
        if rows.is_empty() {
            warn!("snapshot returned no parseable rows");
        }

        Ok(rows)
    }

    fn name(&self) -> &str {
        "eastmoney"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_row_plain_numbers() {
        let row = json!({"f12": "600000", "f2": 7.85, "f3": -1.26, "f8": 0.31});
        let parsed = EastmoneySpot::parse_row(&row).unwrap();
        assert_eq!(parsed.code, "600000");
        assert_eq!(parsed.price, 7.85);
        assert_eq!(parsed.change_percent, -1.26);
        assert_eq!(parsed.turnover_rate, 0.31);
    }

    #[test]
    fn test_parse_row_numeric_strings() {
        let row = json!({"f12": "000001", "f2": "10.52", "f3": "2.04", "f8": "1.1"});
        let parsed = EastmoneySpot::parse_row(&row).unwrap();
        assert_eq!(parsed.price, 10.52);
        assert_eq!(parsed.change_percent, 2.04);
    }

    #[test]
    fn test_parse_row_suspended_placeholder_skipped() {
        let row = json!({"f12": "300750", "f2": "-", "f3": "-", "f8": "-"});
        assert!(EastmoneySpot::parse_row(&row).is_none());
    }

    #[test]
    fn test_parse_row_missing_turnover_defaults() {
        let row = json!({"f12": "510300", "f2": 3.95, "f3": 0.18});
        let parsed = EastmoneySpot::parse_row(&row).unwrap();
        assert_eq!(parsed.turnover_rate, 0.0);
    }

    #[test]
    fn test_parse_row_bad_code_skipped() {
        let row = json!({"f12": "BK0475", "f2": 1.0, "f3": 0.0, "f8": 0.0});
        assert!(EastmoneySpot::parse_row(&row).is_none());
    }
}
