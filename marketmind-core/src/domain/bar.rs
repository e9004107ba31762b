//! Bar — a single OHLCV observation as delivered by the lookup backend.

use serde::{Deserialize, Serialize};

/// OHLCV bar at one timestamp.
///
/// Every field is optional: the backend serializes pandas rows, and any
/// column may be missing or `null` for a given timestamp. Field names follow
/// the backend's wire format (`"Adj Close"` included).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(rename = "Open", default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(rename = "High", default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(rename = "Low", default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(rename = "Close", default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(rename = "Adj Close", default, skip_serializing_if = "Option::is_none")]
    pub adj_close: Option<f64>,
    #[serde(rename = "Volume", default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Bar {
    /// Bar with only a close price.
    pub fn from_close(close: f64) -> Self {
        Self {
            close: Some(close),
            ..Self::default()
        }
    }

    /// The price used for charting: adjusted close when present, else close.
    ///
    /// Returns `None` when the bar carries neither, in which case the
    /// normalizer drops it.
    pub fn usable_close(&self) -> Option<f64> {
        self.adj_close.or(self.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjusted_close_preferred() {
        let bar = Bar {
            close: Some(10.0),
            adj_close: Some(9.5),
            ..Bar::default()
        };
        assert_eq!(bar.usable_close(), Some(9.5));
    }

    #[test]
    fn falls_back_to_close() {
        assert_eq!(Bar::from_close(12.0).usable_close(), Some(12.0));
    }

    #[test]
    fn no_close_is_unusable() {
        let bar = Bar {
            open: Some(1.0),
            high: Some(2.0),
            volume: Some(100.0),
            ..Bar::default()
        };
        assert_eq!(bar.usable_close(), None);
    }

    #[test]
    fn deserializes_backend_field_names() {
        let json = r#"{"Open":1.0,"High":2.0,"Low":0.5,"Close":1.5,"Adj Close":1.4,"Volume":1200}"#;
        let bar: Bar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.open, Some(1.0));
        assert_eq!(bar.adj_close, Some(1.4));
        assert_eq!(bar.volume, Some(1200.0));
    }

    #[test]
    fn null_and_missing_fields_are_none() {
        let bar: Bar = serde_json::from_str(r#"{"Close":null,"Adj Close":3.0}"#).unwrap();
        assert_eq!(bar.close, None);
        assert_eq!(bar.open, None);
        assert_eq!(bar.usable_close(), Some(3.0));
    }
}
