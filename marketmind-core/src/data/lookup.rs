//! Lookup request and response types for the stock-lookup backend.

use super::normalize::TailOhlcv;
use super::provider::LookupError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("unknown {kind} '{value}' (valid: {valid})")]
pub struct ParseRangeError {
    pub kind: &'static str,
    pub value: String,
    pub valid: String,
}

/// Overall range of history requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub const ALL: [Period; 7] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::SixMonths,
        Period::OneYear,
        Period::FiveYears,
        Period::Max,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::FiveYears => "5y",
            Period::Max => "max",
        }
    }
}

/// Spacing between bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[default]
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    pub const ALL: [Interval; 4] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::OneDay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::OneDay => "1d",
        }
    }
}

macro_rules! string_enum {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseRangeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ParseRangeError {
                        kind: $kind,
                        value: s.to_string(),
                        valid: <$ty>::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

string_enum!(Period, "period");
string_enum!(Interval, "interval");

/// Body POSTed to `{base}/api/lookup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub company: String,
    pub period: Period,
    pub interval: Interval,
}

impl LookupRequest {
    /// Build a request from user input. The ticker is trimmed and upper-cased.
    pub fn new(ticker: &str, period: Period, interval: Interval) -> Result<Self, LookupError> {
        let company = ticker.trim().to_uppercase();
        if company.is_empty() {
            return Err(LookupError::MissingTicker);
        }
        Ok(Self {
            company,
            period,
            interval,
        })
    }
}

/// Lookup backend response. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, rename = "shortName")]
    pub short_name: Option<String>,
    #[serde(default, rename = "lastPrice")]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub period_return_pct: Option<f64>,
    #[serde(default)]
    pub tail_ohlcv: Option<TailOhlcv>,
}

impl LookupResponse {
    /// Wrap a bare bar mapping.
    pub fn from_tail(tail: TailOhlcv) -> Self {
        Self {
            tail_ohlcv: Some(tail),
            ..Self::default()
        }
    }

    /// Best name to show for the result.
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.company.as_deref())
            .or(self.symbol.as_deref())
            .unwrap_or("Result")
    }
}
