//! Price and indicator points — the chartable form of a bar series.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One chartable observation: display label plus the usable close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: String,
    pub close: f64,
}

impl PricePoint {
    pub fn new(time: impl Into<String>, close: f64) -> Self {
        Self {
            time: time.into(),
            close,
        }
    }
}

/// State of one indicator column at one point.
///
/// `Unset` means no annotator ever wrote the slot (window ≤ 1), `Null` means
/// an annotator ran but had too little history, `Value` holds the number.
/// On the wire `Unset` is omitted and `Null` is `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum IndicatorSlot {
    #[default]
    Unset,
    Null,
    Value(f64),
}

impl IndicatorSlot {
    pub fn value(self) -> Option<f64> {
        match self {
            IndicatorSlot::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, IndicatorSlot::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, IndicatorSlot::Null)
    }
}

impl From<Option<f64>> for IndicatorSlot {
    fn from(v: Option<f64>) -> Self {
        match v {
            Some(v) => IndicatorSlot::Value(v),
            None => IndicatorSlot::Null,
        }
    }
}

impl Serialize for IndicatorSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IndicatorSlot::Value(v) => serializer.serialize_f64(*v),
            IndicatorSlot::Unset | IndicatorSlot::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for IndicatorSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer).map(IndicatorSlot::from)
    }
}

/// The four indicator columns a point carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorField {
    SmaShort,
    SmaLong,
    EmaShort,
    EmaLong,
}

impl IndicatorField {
    pub const ALL: [IndicatorField; 4] = [
        IndicatorField::SmaShort,
        IndicatorField::SmaLong,
        IndicatorField::EmaShort,
        IndicatorField::EmaLong,
    ];

    /// Column name as used in JSON and CSV output.
    pub fn column(self) -> &'static str {
        match self {
            IndicatorField::SmaShort => "smaShort",
            IndicatorField::SmaLong => "smaLong",
            IndicatorField::EmaShort => "emaShort",
            IndicatorField::EmaLong => "emaLong",
        }
    }
}

impl fmt::Display for IndicatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A price point extended with moving-average columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPoint {
    pub time: String,
    pub close: f64,
    #[serde(default, skip_serializing_if = "IndicatorSlot::is_unset")]
    pub sma_short: IndicatorSlot,
    #[serde(default, skip_serializing_if = "IndicatorSlot::is_unset")]
    pub sma_long: IndicatorSlot,
    #[serde(default, skip_serializing_if = "IndicatorSlot::is_unset")]
    pub ema_short: IndicatorSlot,
    #[serde(default, skip_serializing_if = "IndicatorSlot::is_unset")]
    pub ema_long: IndicatorSlot,
}

impl IndicatorPoint {
    pub fn slot(&self, field: IndicatorField) -> IndicatorSlot {
        match field {
            IndicatorField::SmaShort => self.sma_short,
            IndicatorField::SmaLong => self.sma_long,
            IndicatorField::EmaShort => self.ema_short,
            IndicatorField::EmaLong => self.ema_long,
        }
    }

    pub fn slot_mut(&mut self, field: IndicatorField) -> &mut IndicatorSlot {
        match field {
            IndicatorField::SmaShort => &mut self.sma_short,
            IndicatorField::SmaLong => &mut self.sma_long,
            IndicatorField::EmaShort => &mut self.ema_short,
            IndicatorField::EmaLong => &mut self.ema_long,
        }
    }
}

impl From<PricePoint> for IndicatorPoint {
    fn from(p: PricePoint) -> Self {
        Self {
            time: p.time,
            close: p.close,
            sma_short: IndicatorSlot::Unset,
            sma_long: IndicatorSlot::Unset,
            ema_short: IndicatorSlot::Unset,
            ema_long: IndicatorSlot::Unset,
        }
    }
}
