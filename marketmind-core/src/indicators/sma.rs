//! Simple Moving Average (SMA).
//!
//! Trailing mean of close prices over `window` points, kept as a running sum.
//! Points before the window fills are written as `Null`.

use super::Annotator;
use crate::domain::{IndicatorField, IndicatorPoint, IndicatorSlot};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Sma {
    window: usize,
    field: IndicatorField,
    name: String,
}

impl Sma {
    pub fn new(window: usize, field: IndicatorField) -> Self {
        Self {
            window,
            field,
            name: format!("sma_{window}"),
        }
    }
}

impl Annotator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self) -> IndicatorField {
        self.field
    }

    fn window(&self) -> usize {
        self.window
    }

    fn annotate(&self, points: &mut [IndicatorPoint]) {
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        let Some(values) = sma_series(&closes, self.window) else {
            return;
        };
        for (point, value) in points.iter_mut().zip(values) {
            *point.slot_mut(self.field) = IndicatorSlot::from(value);
        }
        debug!(indicator = %self.name, column = %self.field, points = points.len(), "annotated");
    }
}

/// Trailing SMA of `closes`.
///
/// Returns `None` for `window <= 1` (no-op). Otherwise one entry per close:
/// `None` while fewer than `window` closes are available, the mean after.
pub fn sma_series(closes: &[f64], window: usize) -> Option<Vec<Option<f64>>> {
    if window <= 1 {
        return None;
    }

    let w = window as f64;
    let mut sum = 0.0;
    let mut result = Vec::with_capacity(closes.len());

    for (i, &close) in closes.iter().enumerate() {
        sum += close;
        if i >= window {
            sum -= closes[i - window];
        }
        result.push((i + 1 >= window).then_some(sum / w));
    }

    Some(result)
}
