//! Tabular sales data and its per-category summary.

use crate::error::ContextError;

use common::ErrorLocation;

use std::panic::Location;

use serde::{Deserialize, Serialize};

const STAT_LABEL_WIDTH: usize = 6;
const STAT_COLUMN_WIDTH: usize = 12;

/// One period of sales, one value per category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesRow {
    pub period: String,
    pub values: Vec<f64>,
}

/// Sales table: a period column plus one numeric column per category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesTable {
    pub categories: Vec<String>,
    #[serde(default)]
    pub rows: Vec<SalesRow>,
}

/// Summary statistics for one category column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = values.iter().sum::<f64>() / count as f64;

        // Sample standard deviation; undefined for a single observation.
        let std = if count > 1 {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        } else {
            f64::NAN
        };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count,
            mean,
            std,
            min,
            max,
        }
    }
}

impl SalesTable {
    /// Parse a table from JSON and check every row has one value per category.
    #[track_caller]
    pub fn from_json_str(json: &str) -> Result<Self, ContextError> {
        let table: SalesTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    #[track_caller]
    pub fn validate(&self) -> Result<(), ContextError> {
        let expected = self.categories.len();
        if let Some(row) = self.rows.iter().find(|r| r.values.len() != expected) {
            return Err(ContextError::RowWidth {
                period: row.period.clone(),
                expected,
                actual: row.values.len(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    pub fn stats(&self) -> Vec<(String, ColumnStats)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let values: Vec<f64> = self
                    .rows
                    .iter()
                    .filter_map(|row| row.values.get(index).copied())
                    .collect();
                (category.clone(), ColumnStats::from_values(&values))
            })
            .collect()
    }

    /// Fixed-width statistics table, one column per category:
    ///
    /// ```text
    ///               Beer        Wine
    /// count           12          12
    /// mean        120.50       80.25
    /// ```
    ///
    /// Columns are at least 12 wide and grow to fit long category names.
    pub fn describe(&self) -> String {
        let stats = self.stats();

        let rows: [(&str, fn(&ColumnStats) -> String); 5] = [
            ("count", |s: &ColumnStats| s.count.to_string()),
            ("mean", |s: &ColumnStats| format_stat(s.mean)),
            ("std", |s: &ColumnStats| format_stat(s.std)),
            ("min", |s: &ColumnStats| format_stat(s.min)),
            ("max", |s: &ColumnStats| format_stat(s.max)),
        ];

        // One separating space on top of the widest cell.
        let widths: Vec<usize> = stats
            .iter()
            .map(|(category, s)| {
                rows.iter()
                    .map(|(_, pick)| pick(s).len())
                    .fold(category.len(), usize::max)
                    .saturating_add(1)
                    .max(STAT_COLUMN_WIDTH)
            })
            .collect();

        let header: String = stats
            .iter()
            .zip(&widths)
            .map(|((category, _), &width)| format!("{category:>width$}"))
            .collect();

        let mut lines = vec![format!("{:<STAT_LABEL_WIDTH$}{header}", "")];
        for (label, pick) in rows {
            let cells: String = stats
                .iter()
                .zip(&widths)
                .map(|((_, s), &width)| format!("{:>width$}", pick(s)))
                .collect();
            lines.push(format!("{label:<STAT_LABEL_WIDTH$}{cells}"));
        }

        lines.join("\n")
    }
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}
