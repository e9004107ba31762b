//! Moving-average window configuration.

use serde::{Deserialize, Serialize};

/// Smallest window the request layer forwards to the annotators.
pub const MIN_WINDOW: usize = 2;

/// Short and long lookback windows.
///
/// The annotators accept any pair independently; `short < long` is only
/// guidance for the caller (see [`Window::is_ordered`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub short: usize,
    pub long: usize,
}

impl Window {
    pub fn new(short: usize, long: usize) -> Self {
        Self { short, long }
    }

    /// Raise each window to at least [`MIN_WINDOW`].
    pub fn clamped(self) -> Self {
        Self {
            short: self.short.max(MIN_WINDOW),
            long: self.long.max(MIN_WINDOW),
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.short < self.long
    }
}

impl Default for Window {
    fn default() -> Self {
        Self {
            short: 20,
            long: 50,
        }
    }
}
