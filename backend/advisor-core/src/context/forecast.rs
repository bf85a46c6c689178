//! Forecast points produced by an external time-series model.

use crate::error::ContextError;

use serde::{Deserialize, Serialize};

/// One predicted period with its uncertainty interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub period: String,
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Parse a JSON array of forecast points.
#[track_caller]
pub fn parse_forecast_json(json: &str) -> Result<Vec<ForecastPoint>, ContextError> {
    Ok(serde_json::from_str(json)?)
}

/// Render the last `tail` points as a plain-text table.
///
/// Returns an empty string when there is nothing to show.
pub fn render_forecast_tail(points: &[ForecastPoint], tail: usize) -> String {
    let start = points.len().saturating_sub(tail);
    let shown = &points[start..];
    if shown.is_empty() {
        return String::new();
    }

    let period_width = shown
        .iter()
        .map(|p| p.period.len())
        .max()
        .unwrap_or(0)
        .max("period".len());

    let header = format!(
        "{:>period_width$} {:>10} {:>10} {:>10}",
        "period", "estimate", "lower", "upper"
    );
    std::iter::once(header)
        .chain(shown.iter().map(|point| {
            format!(
                "{:>period_width$} {:>10.2} {:>10.2} {:>10.2}",
                point.period, point.estimate, point.lower, point.upper
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}
