//! Time series normalizer: bar mapping in, ordered price points out.

use super::timestamp::parse_timestamp;
use crate::domain::{Bar, PricePoint};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Timestamp-keyed bar mapping as returned in `tail_ohlcv`, in wire order.
pub type TailOhlcv = IndexMap<String, Bar>;

/// Raw timestamps longer than this keep their time-of-day in the label.
const DATETIME_LABEL_LEN: usize = 16;
const DATE_LABEL_LEN: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("unparseable timestamp '{0}'")]
    UnparseableTimestamp(String),
}

/// Convert a bar mapping into price points sorted by ascending timestamp.
///
/// Bars with neither an adjusted close nor a close are skipped. A missing
/// or empty mapping yields an empty vector. Any key that does not parse as a
/// timestamp fails the whole conversion.
pub fn normalize(tail: Option<&TailOhlcv>) -> Result<Vec<PricePoint>, NormalizeError> {
    let Some(tail) = tail else {
        return Ok(Vec::new());
    };

    let mut keyed = Vec::with_capacity(tail.len());
    for (raw, bar) in tail {
        let ts = parse_timestamp(raw)
            .ok_or_else(|| NormalizeError::UnparseableTimestamp(raw.clone()))?;
        keyed.push((ts, raw.as_str(), bar));
    }

    // Stable: equal instants keep the mapping's key order.
    keyed.sort_by_key(|(ts, _, _)| *ts);

    let mut points = Vec::with_capacity(keyed.len());
    for (_, raw, bar) in keyed {
        let Some(close) = bar.usable_close() else {
            debug!(timestamp = raw, "dropping bar without close");
            continue;
        };
        points.push(PricePoint::new(display_label(raw), close));
    }

    debug!(bars = tail.len(), points = points.len(), "normalized bar mapping");
    Ok(points)
}

/// Chart label for a raw timestamp: date and time if the key carries a time
/// component, else just the date.
pub fn display_label(raw: &str) -> String {
    let len = if raw.chars().count() > DATETIME_LABEL_LEN {
        DATETIME_LABEL_LEN
    } else {
        DATE_LABEL_LEN
    };
    raw.chars().take(len).collect()
}
