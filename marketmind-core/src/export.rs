//! Output formats for an analysis: JSON, CSV and a fixed-width table.

use crate::domain::{IndicatorField, IndicatorPoint, IndicatorSlot};
use crate::pipeline::Analysis;
use std::fmt::Write as _;
use std::io::Write;
use thiserror::Error;

/// Message shown in place of a table when the series is empty.
pub const NO_DATA_MESSAGE: &str = "No price data returned for this period / interval.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pretty-printed JSON of the whole analysis.
pub fn to_json(analysis: &Analysis) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Write the series as CSV: `time,close,smaShort,smaLong,emaShort,emaLong`.
///
/// Unset and null slots are empty cells.
pub fn write_csv<W: Write>(series: &[IndicatorPoint], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["time", "close"];
    header.extend(IndicatorField::ALL.iter().map(|f| f.column()));
    wtr.write_record(&header)?;

    for point in series {
        let mut record = vec![point.time.clone(), point.close.to_string()];
        record.extend(
            IndicatorField::ALL
                .iter()
                .map(|f| slot_cell(point.slot(*f))),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn slot_cell(slot: IndicatorSlot) -> String {
    slot.value().map(|v| v.to_string()).unwrap_or_default()
}

/// Notice for an analysis with no points, shown alongside machine-readable
/// output that would otherwise be silently empty.
pub fn no_data_notice(analysis: &Analysis) -> Option<&'static str> {
    analysis.is_empty().then_some(NO_DATA_MESSAGE)
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.2}")).unwrap_or_else(|| "n/a".into())
}

/// Terminal rendering: header, summary block, then one row per point.
///
/// Returns [`NO_DATA_MESSAGE`] for an empty series.
pub fn render_table(analysis: &Analysis) -> String {
    if analysis.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let s = &analysis.summary;
    let w = analysis.window;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "=== {} ===", analysis.name);
    let _ = writeln!(
        out,
        "Symbol:     {}",
        analysis.symbol.as_deref().unwrap_or("N/A")
    );
    let _ = writeln!(
        out,
        "Last close: {}",
        s.last_close
            .map(|v| format!("${v:.2}"))
            .unwrap_or_else(|| "n/a".into())
    );
    let _ = writeln!(
        out,
        "SMA {} / {}: {} / {}",
        w.short,
        w.long,
        fmt_opt(s.last_sma_short),
        fmt_opt(s.last_sma_long)
    );
    let _ = writeln!(
        out,
        "EMA {} / {}: {} / {}",
        w.short,
        w.long,
        fmt_opt(s.last_ema_short),
        fmt_opt(s.last_ema_long)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<16} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Time", "Close", "SMA short", "SMA long", "EMA short", "EMA long"
    );
    let _ = writeln!(out, "{}", "-".repeat(71));
    for p in &analysis.series {
        let _ = writeln!(
            out,
            "{:<16} {:>10.2} {:>10} {:>10} {:>10} {:>10}",
            p.time,
            p.close,
            fmt_opt(p.sma_short.value()),
            fmt_opt(p.sma_long.value()),
            fmt_opt(p.ema_short.value()),
            fmt_opt(p.ema_long.value()),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, Window};
    use crate::pipeline::enrich;
    use crate::summary::IndicatorSummary;

    fn analysis(closes: &[f64], window: Window) -> Analysis {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(format!("2024-01-0{}", i + 1), *c))
            .collect();
        let series = enrich(points, window);
        let summary = IndicatorSummary::from_series(&series);
        Analysis {
            name: "Test Corp".into(),
            symbol: Some("TEST".into()),
            period: None,
            interval: None,
            window,
            series,
            summary,
        }
    }

    #[test]
    fn csv_layout() {
        let a = analysis(&[10.0, 12.0], Window::new(2, 1));
        let mut buf = Vec::new();
        write_csv(&a.series, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time,close,smaShort,smaLong,emaShort,emaLong");
        assert_eq!(lines[1], "2024-01-01,10,,,10,");
        let cells: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(&cells[..4], &["2024-01-02", "12", "11", ""]);
        let ema: f64 = cells[4].parse().unwrap();
        assert!((ema - 34.0 / 3.0).abs() < 1e-9);
        assert_eq!(cells[5], "");
    }

    #[test]
    fn table_shows_summary_and_rows() {
        let a = analysis(&[10.0, 12.0, 14.0], Window::new(2, 3));
        let table = render_table(&a);
        assert!(table.contains("=== Test Corp ==="));
        assert!(table.contains("Last close: $14.00"));
        assert!(table.contains("SMA 2 / 3: 13.00 / 12.00"));
        assert_eq!(table.lines().filter(|l| l.starts_with("2024-01-0")).count(), 3);
        assert!(table.contains("n/a"));
    }

    #[test]
    fn empty_table_is_no_data() {
        let a = analysis(&[], Window::default());
        assert_eq!(render_table(&a), NO_DATA_MESSAGE);
    }

    #[test]
    fn notice_only_when_empty() {
        assert_eq!(
            no_data_notice(&analysis(&[], Window::default())),
            Some(NO_DATA_MESSAGE)
        );
        assert_eq!(no_data_notice(&analysis(&[10.0], Window::default())), None);
    }

    #[test]
    fn json_keeps_null_warmup() {
        let a = analysis(&[10.0, 12.0], Window::new(2, 2));
        let json: serde_json::Value = serde_json::from_str(&to_json(&a).unwrap()).unwrap();
        assert!(json["series"][0]["smaShort"].is_null());
        assert_eq!(json["series"][1]["smaShort"], 11.0);
        assert_eq!(json["summary"]["lastClose"], 12.0);
        assert_eq!(json["window"]["short"], 2);
    }
}
