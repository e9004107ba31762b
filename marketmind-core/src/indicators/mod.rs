//! Moving-average annotators.
//!
//! Each annotator owns one indicator column and writes it into every point of
//! an ordered series. Points must already be sorted by ascending time; the
//! trailing windows are wrong otherwise.
//!
//! SMA and EMA deliberately differ in warmup: SMA writes `Null` until its
//! window is full, EMA is populated from the first point.

pub mod ema;
pub mod sma;

pub use ema::{ema_series, Ema};
pub use sma::{sma_series, Sma};

use crate::domain::{IndicatorField, IndicatorPoint};

/// An indicator that writes a single column of an [`IndicatorPoint`] series.
pub trait Annotator: Send + Sync {
    /// Human-readable name (e.g., "sma_20").
    fn name(&self) -> &str;

    /// Column this annotator writes.
    fn field(&self) -> IndicatorField;

    /// Lookback window.
    fn window(&self) -> usize;

    /// Annotate the series in place. Degenerate windows leave it untouched.
    fn annotate(&self, points: &mut [IndicatorPoint]);
}

/// Build indicator points from close prices for testing.
#[cfg(test)]
pub fn make_points(closes: &[f64]) -> Vec<IndicatorPoint> {
    use crate::domain::PricePoint;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| IndicatorPoint::from(PricePoint::new(format!("t{i}"), close)))
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
