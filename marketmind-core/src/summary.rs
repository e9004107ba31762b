//! Snapshot of the most recent point of an enriched series.

use crate::domain::IndicatorPoint;
use serde::{Deserialize, Serialize};

/// Last close and last indicator values. Each field is independently absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSummary {
    pub last_close: Option<f64>,
    pub last_sma_short: Option<f64>,
    pub last_sma_long: Option<f64>,
    pub last_ema_short: Option<f64>,
    pub last_ema_long: Option<f64>,
}

impl IndicatorSummary {
    /// Project the last point of `series`. An empty series gives an all-absent
    /// summary; callers render that as "no data".
    pub fn from_series(series: &[IndicatorPoint]) -> Self {
        let Some(last) = series.last() else {
            return Self::default();
        };
        Self {
            last_close: Some(last.close),
            last_sma_short: last.sma_short.value(),
            last_sma_long: last.sma_long.value(),
            last_ema_short: last.ema_short.value(),
            last_ema_long: last.ema_long.value(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.last_close.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IndicatorSlot, PricePoint};

    #[test]
    fn empty_series_is_all_absent() {
        let summary = IndicatorSummary::from_series(&[]);
        assert_eq!(summary, IndicatorSummary::default());
        assert!(!summary.has_data());
    }

    #[test]
    fn projects_last_point_only() {
        let mut first = IndicatorPoint::from(PricePoint::new("a", 1.0));
        first.sma_short = IndicatorSlot::Value(99.0);
        let mut last = IndicatorPoint::from(PricePoint::new("b", 2.0));
        last.sma_short = IndicatorSlot::Null;
        last.ema_short = IndicatorSlot::Value(1.5);

        let summary = IndicatorSummary::from_series(&[first, last]);
        assert_eq!(summary.last_close, Some(2.0));
        assert_eq!(summary.last_sma_short, None);
        assert_eq!(summary.last_sma_long, None);
        assert_eq!(summary.last_ema_short, Some(1.5));
        assert!(summary.has_data());
    }
}
