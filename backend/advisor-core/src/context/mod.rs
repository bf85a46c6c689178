//! Prompt context assembled from dataset statistics and forecast output.
//!
//! Everything here flattens to plain text; the completion client treats
//! the result as an opaque string.

pub mod forecast;
pub mod sales;

pub use forecast::{ForecastPoint, parse_forecast_json, render_forecast_tail};
pub use sales::{ColumnStats, SalesRow, SalesTable};

pub const DEFAULT_FORECAST_TAIL: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    dataset_summary: Option<String>,
    forecast_tail: Option<String>,
    notes: Vec<String>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, table: &SalesTable) -> Self {
        if !table.categories.is_empty() {
            self.dataset_summary = Some(table.describe());
        }
        self
    }

    pub fn with_forecast(mut self, points: &[ForecastPoint], tail: usize) -> Self {
        let rendered = render_forecast_tail(points, tail);
        if !rendered.is_empty() {
            self.forecast_tail = Some(rendered);
        }
        self
    }

    /// Append free text. Blank text is ignored.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.notes.push(text.trim().to_string());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.dataset_summary.is_none() && self.forecast_tail.is_none() && self.notes.is_empty()
    }

    /// Join the sections into the context string, or `None` if there are none.
    pub fn render(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut sections = Vec::new();
        if let Some(summary) = &self.dataset_summary {
            sections.push(format!("Sales statistics:\n{summary}"));
        }
        if let Some(tail) = &self.forecast_tail {
            sections.push(format!("Forecasted values:\n{tail}"));
        }
        sections.extend(self.notes.iter().cloned());

        Some(sections.join("\n\n"))
    }
}
