//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = k * close[t] + (1 - k) * EMA[t-1], k = 2 / (window + 1).
//! Seed: EMA[0] = close[0]. Every point receives a value.

use super::Annotator;
use crate::domain::{IndicatorField, IndicatorPoint, IndicatorSlot};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Ema {
    window: usize,
    field: IndicatorField,
    name: String,
}

impl Ema {
    pub fn new(window: usize, field: IndicatorField) -> Self {
        Self {
            window,
            field,
            name: format!("ema_{window}"),
        }
    }
}

impl Annotator for Ema {
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
        let Some(values) = ema_series(&closes, self.window) else {
            return;
        };
        for (point, value) in points.iter_mut().zip(values) {
            *point.slot_mut(self.field) = IndicatorSlot::Value(value);
        }
        debug!(indicator = %self.name, column = %self.field, points = points.len(), "annotated");
    }
}

/// Smoothing factor for a window.
pub fn smoothing(window: usize) -> f64 {
    2.0 / (window as f64 + 1.0)
}

/// EMA of `closes`, seeded with the first close.
///
/// Returns `None` for `window <= 1` or an empty input (no-op).
pub fn ema_series(closes: &[f64], window: usize) -> Option<Vec<f64>> {
    let (&first, rest) = closes.split_first()?;
    if window <= 1 {
        return None;
    }

    let k = smoothing(window);
    let mut result = Vec::with_capacity(closes.len());
    let mut prev = first;
    result.push(prev);

    for &close in rest {
        prev = close * k + prev * (1.0 - k);
        result.push(prev);
    }

    Some(result)
}
