//! Instrument identifiers.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exchange an instrument trades on, derived from its code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// Shanghai Stock Exchange
    Shanghai,
    /// Shenzhen Stock Exchange
    Shenzhen,
}

impl Exchange {
    /// Gateway-side prefix for qualified symbols.
    pub fn prefix(&self) -> &'static str {
        match self {
            Exchange::Shanghai => "SHSE",
            Exchange::Shenzhen => "SZSE",
        }
    }
}

/// A normalized instrument identifier: a 6-digit code plus the exchange
/// implied by its prefix.
///
/// Invalid or ambiguous codes are rejected at construction, before any
/// fetch can happen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    code: String,
    exchange: Exchange,
}

impl Symbol {
    /// Parse a raw identifier.
    ///
    /// Accepts a bare 6-digit code (`600000`), a gateway-qualified form
    /// (`SHSE.600000`) or a suffixed form (`000001.SZ`); everything but
    /// the 6-digit code is discarded and the exchange re-derived.
    pub fn parse(raw: &str) -> Result<Self, DataError> {
        let code = raw
            .split('.')
            .find(|part| part.len() == 6 && part.chars().all(|c| c.is_ascii_digit()))
            .ok_or_else(|| DataError::InvalidSymbol(raw.to_string()))?;

        let exchange = match &code[..2] {
            "60" | "68" | "11" | "12" | "13" => Exchange::Shanghai,
            "00" | "30" | "15" | "16" | "18" => Exchange::Shenzhen,
            _ => return Err(DataError::InvalidSymbol(raw.to_string())),
        };

        Ok(Self {
            code: code.to_string(),
            exchange,
        })
    }

    /// Bare 6-digit code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Exchange derived from the code prefix.
    pub fn exchange(&self) -> Exchange {
        self.exchange
    }

    /// Gateway-qualified form, e.g. `SHSE.600000`.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.exchange.prefix(), self.code)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl FromStr for Symbol {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::parse(s)
    }
}
