//! Enrichment pipeline: normalize → SMA (short, long) → EMA (short, long) → summary.
//!
//! Each call allocates its own series and owns it until it is returned, so
//! repeated calls on the same input give identical results.

use crate::data::{
    normalize, LookupError, LookupProvider, LookupRequest, LookupResponse, NormalizeError,
};
use crate::domain::{IndicatorField, IndicatorPoint, PricePoint, Window};
use crate::indicators::{Annotator, Ema, Sma};
use crate::summary::IndicatorSummary;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),
    #[error("normalize error: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("backend reported: {0}")]
    Backend(String),
}

/// The four annotators for a window pair, in pipeline order.
pub fn annotators(window: Window) -> Vec<Box<dyn Annotator>> {
    vec![
        Box::new(Sma::new(window.short, IndicatorField::SmaShort)),
        Box::new(Sma::new(window.long, IndicatorField::SmaLong)),
        Box::new(Ema::new(window.short, IndicatorField::EmaShort)),
        Box::new(Ema::new(window.long, IndicatorField::EmaLong)),
    ]
}

/// Copy price points into indicator points and run every annotator over them.
///
/// Windows are used as given; a window ≤ 1 leaves its columns unset.
pub fn enrich(points: Vec<PricePoint>, window: Window) -> Vec<IndicatorPoint> {
    let mut series: Vec<IndicatorPoint> = points.into_iter().map(IndicatorPoint::from).collect();
    for annotator in annotators(window) {
        annotator.annotate(&mut series);
    }
    series
}

/// Result of analyzing one lookup response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub name: String,
    pub symbol: Option<String>,
    pub period: Option<String>,
    pub interval: Option<String>,
    pub window: Window,
    pub series: Vec<IndicatorPoint>,
    pub summary: IndicatorSummary,
}

impl Analysis {
    /// True when the response carried no usable bars.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Normalize, enrich and summarize a lookup response.
pub fn analyze(response: &LookupResponse, window: Window) -> Result<Analysis, AnalysisError> {
    if let Some(err) = response.error.as_deref().filter(|e| !e.is_empty()) {
        return Err(AnalysisError::Backend(err.to_string()));
    }

    let points = normalize(response.tail_ohlcv.as_ref())?;
    let series = enrich(points, window);
    let summary = IndicatorSummary::from_series(&series);
    debug!(points = series.len(), ?window, "analysis complete");

    Ok(Analysis {
        name: response.display_name().to_string(),
        symbol: response.symbol.clone(),
        period: response.period.clone(),
        interval: response.interval.clone(),
        window,
        series,
        summary,
    })
}

/// Fetch a lookup through `provider` and analyze it.
///
/// Windows are clamped to the minimum before the pipeline runs; an unordered
/// pair is allowed but logged.
pub fn fetch_and_analyze(
    provider: &dyn LookupProvider,
    request: &LookupRequest,
    window: Window,
) -> Result<Analysis, AnalysisError> {
    let window = window.clamped();
    if !window.is_ordered() {
        warn!(
            short = window.short,
            long = window.long,
            "short window is not smaller than long window"
        );
    }

    let response = provider.lookup(request)?;
    debug!(provider = provider.name(), "lookup returned");
    analyze(&response, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TailOhlcv;
    use crate::domain::Bar;

    struct StaticProvider(LookupResponse);

    impl LookupProvider for StaticProvider {
        fn name(&self) -> &str {
            "static"
        }

        fn lookup(&self, _request: &LookupRequest) -> Result<LookupResponse, LookupError> {
            Ok(self.0.clone())
        }
    }

    fn response(closes: &[(&str, f64)]) -> LookupResponse {
        let tail: TailOhlcv = closes
            .iter()
            .map(|(k, c)| (k.to_string(), Bar::from_close(*c)))
            .collect();
        LookupResponse {
            symbol: Some("TEST".into()),
            ..LookupResponse::from_tail(tail)
        }
    }

    #[test]
    fn enrich_fills_all_four_columns() {
        let points = vec![
            PricePoint::new("a", 1.0),
            PricePoint::new("b", 2.0),
            PricePoint::new("c", 3.0),
        ];
        let series = enrich(points, Window::new(2, 3));
        let last = series.last().unwrap();
        assert_eq!(last.sma_short.value(), Some(2.5));
        assert_eq!(last.sma_long.value(), Some(2.0));
        assert!(last.ema_short.value().is_some());
        assert!(last.ema_long.value().is_some());
        assert!(series[0].sma_short.is_null());
        assert!(series[1].sma_long.is_null());
    }

    #[test]
    fn enrich_leaves_degenerate_windows_unset() {
        let series = enrich(vec![PricePoint::new("a", 1.0)], Window::new(1, 0));
        assert!(IndicatorField::ALL
            .iter()
            .all(|f| series[0].slot(*f).is_unset()));
    }

    #[test]
    fn analyze_reports_backend_error() {
        let resp = LookupResponse {
            error: Some("No data found".into()),
            ..LookupResponse::default()
        };
        assert!(matches!(
            analyze(&resp, Window::default()),
            Err(AnalysisError::Backend(msg)) if msg == "No data found"
        ));
    }

    #[test]
    fn analyze_without_bars_is_empty_not_error() {
        let analysis = analyze(&LookupResponse::default(), Window::default()).unwrap();
        assert!(analysis.is_empty());
        assert!(!analysis.summary.has_data());
    }

    #[test]
    fn fetch_clamps_windows() {
        let provider = StaticProvider(response(&[
            ("2024-01-01", 10.0),
            ("2024-01-02", 12.0),
            ("2024-01-03", 14.0),
        ]));
        let req = LookupRequest::new("test", Default::default(), Default::default()).unwrap();
        let analysis = fetch_and_analyze(&provider, &req, Window::new(0, 1)).unwrap();

        assert_eq!(analysis.window, Window::new(2, 2));
        assert_eq!(analysis.summary.last_sma_short, Some(13.0));
        assert_eq!(analysis.symbol.as_deref(), Some("TEST"));
    }

    #[test]
    fn replayed_bare_mapping_is_named_after_request() {
        use crate::data::FileLookupProvider;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"2024-01-01":{{"Close":10.0}},"2024-01-02":{{"Close":12.0}}}}"#)
            .unwrap();
        let provider = FileLookupProvider::new(file.path());
        let req = LookupRequest::new("aapl", Default::default(), Default::default()).unwrap();
        let analysis = fetch_and_analyze(&provider, &req, Window::new(2, 2)).unwrap();

        assert_eq!(analysis.name, "AAPL");
        assert_eq!(analysis.series.len(), 2);
    }
}
