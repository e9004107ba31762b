//! Domain types: bars, chartable points, window configuration.

pub mod bar;
pub mod point;
pub mod window;

pub use bar::Bar;
pub use point::{IndicatorField, IndicatorPoint, IndicatorSlot, PricePoint};
pub use window::{Window, MIN_WINDOW};
