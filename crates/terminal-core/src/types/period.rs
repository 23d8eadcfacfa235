//! Chart periods supported by the terminal.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Period {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "60m")]
    Hour1,
    #[serde(rename = "1d")]
    #[default]
    Daily,
}

impl Period {
    /// Duration of one bar in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Period::Minute1 => 60,
            Period::Minute5 => 300,
            Period::Minute15 => 900,
            Period::Hour1 => 3600,
            Period::Daily => 86400,
        }
    }

    /// Frequency string the vendor gateway's history APIs expect.
    pub fn gateway_frequency(&self) -> &'static str {
        match self {
            Period::Minute1 => "60s",
            Period::Minute5 => "300s",
            Period::Minute15 => "900s",
            Period::Hour1 => "3600s",
            Period::Daily => "1d",
        }
    }

    pub fn is_intraday(&self) -> bool {
        !matches!(self, Period::Daily)
    }

    pub fn all() -> &'static [Period] {
        &[
            Period::Minute1,
            Period::Minute5,
            Period::Minute15,
            Period::Hour1,
            Period::Daily,
        ]
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Minute1 => "1m",
            Period::Minute5 => "5m",
            Period::Minute15 => "15m",
            Period::Hour1 => "60m",
            Period::Daily => "1d",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Period {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" => Ok(Period::Minute1),
            "5m" | "5min" => Ok(Period::Minute5),
            "15m" | "15min" => Ok(Period::Minute15),
            "60m" | "1h" | "60min" => Ok(Period::Hour1),
            "1d" | "day" | "daily" => Ok(Period::Daily),
            _ => Err(DataError::InvalidPeriod(s.to_string())),
        }
    }
}
