// Unit tests for dataset and forecast context rendering

use crate::context::{
    ForecastPoint, PromptContext, SalesRow, SalesTable, parse_forecast_json,
    render_forecast_tail,
};
use crate::error::ContextError;

fn sample_table() -> SalesTable {
    SalesTable {
        categories: vec!["Beer".to_string(), "Wine".to_string()],
        rows: vec![
            SalesRow {
                period: "Jan".to_string(),
                values: vec![100.0, 50.0],
            },
            SalesRow {
                period: "Feb".to_string(),
                values: vec![120.0, 70.0],
            },
            SalesRow {
                period: "Mar".to_string(),
                values: vec![140.0, 90.0],
            },
        ],
    }
}

fn sample_forecast() -> Vec<ForecastPoint> {
    (1..=5)
        .map(|m| ForecastPoint {
            period: format!("2024-0{m}"),
            estimate: 100.0 + m as f64,
            lower: 90.0 + m as f64,
            upper: 110.0 + m as f64,
        })
        .collect()
}

/// **VALUE**: Verifies column statistics use the sample standard deviation.
///
/// **BUG THIS CATCHES**: Would catch dividing by n instead of n-1, which
/// understates volatility in the summary the model reasons over.
#[test]
fn given_table_when_stats_then_computes_count_mean_std_min_max() {
    let stats = sample_table().stats();

    let (name, beer) = &stats[0];
    assert_eq!(name, "Beer");
    assert_eq!(beer.count, 3);
    assert!((beer.mean - 120.0).abs() < 1e-9);
    assert!((beer.std - 20.0).abs() < 1e-9);
    assert_eq!(beer.min, 100.0);
    assert_eq!(beer.max, 140.0);
}

#[test]
fn given_table_when_describe_then_renders_labelled_rows_and_columns() {
    let text = sample_table().describe();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 6, "header + count/mean/std/min/max");
    assert!(lines[0].contains("Beer") && lines[0].contains("Wine"));
    assert!(lines[1].starts_with("count"));
    assert!(lines[2].starts_with("mean") && lines[2].contains("120.00"));
    assert!(lines[3].starts_with("std") && lines[3].contains("20.00"));
    assert!(lines[5].starts_with("max") && lines[5].contains("90.00"));
}

/// **VALUE**: Verifies long category names widen their column instead of
/// running into the neighbouring one.
///
/// **BUG THIS CATCHES**: Would catch a fixed column width, which glues
/// `ImportedWhiskey` onto the next header and shifts every value under it.
#[test]
fn given_long_category_name_when_describe_then_columns_stay_aligned() {
    let mut table = sample_table();
    table.categories[0] = "ImportedSingleMaltWhiskey".to_string();

    let text = table.describe();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].contains("ImportedSingleMaltWhiskey "), "{}", lines[0]);
    let widths: Vec<usize> = lines.iter().map(|line| line.len()).collect();
    assert!(
        widths.iter().all(|&w| w == widths[0]),
        "Every row has the same width: {widths:?}"
    );
    let name = "ImportedSingleMaltWhiskey";
    let header_end = lines[0].find(name).unwrap() + name.len();
    assert!(lines[2][..header_end].ends_with("120.00"), "{}", lines[2]);
}

#[test]
fn given_single_row_when_describe_then_std_is_nan() {
    let mut table = sample_table();
    table.rows.truncate(1);

    let text = table.describe();

    assert!(text.lines().nth(3).unwrap().contains("NaN"));
}

#[test]
fn given_ragged_json_when_from_json_str_then_row_width_error() {
    let json = r#"{"categories":["Beer","Wine"],"rows":[{"period":"Jan","values":[1.0]}]}"#;

    let result = SalesTable::from_json_str(json);

    match result {
        Err(ContextError::RowWidth {
            period,
            expected,
            actual,
            ..
        }) => {
            assert_eq!(period, "Jan");
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("Expected RowWidth, got {other:?}"),
    }
}

#[test]
fn given_forecast_when_render_tail_then_only_last_points_shown() {
    let text = render_forecast_tail(&sample_forecast(), 3);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4, "header + 3 points");
    assert!(lines[0].contains("estimate"));
    assert!(lines[1].contains("2024-03") && lines[1].contains("103.00"));
    assert!(lines[3].contains("2024-05"));
    assert!(!text.contains("2024-02"));
}

#[test]
fn given_tail_larger_than_forecast_when_render_then_shows_all() {
    let points = sample_forecast();

    assert_eq!(render_forecast_tail(&points, 50).lines().count(), 6);
    assert_eq!(render_forecast_tail(&[], 3), "");
}

#[test]
fn given_invalid_forecast_json_when_parsed_then_parse_error() {
    assert!(matches!(
        parse_forecast_json("[{\"period\":\"2024-01\"}]"),
        Err(ContextError::Parse { .. })
    ));
}

#[test]
fn given_empty_context_when_render_then_none() {
    let context = PromptContext::new().with_text("   ");

    assert!(context.is_empty());
    assert_eq!(context.render(), None);
}

/// **VALUE**: Verifies all sections reach the final context string, in order.
#[test]
fn given_dataset_forecast_and_notes_when_render_then_sections_joined_in_order() {
    let context = PromptContext::new()
        .with_dataset(&sample_table())
        .with_forecast(&sample_forecast(), 3)
        .with_text("Holiday promotion planned in December.");

    let rendered = context.render().unwrap();

    let stats_at = rendered.find("Sales statistics:").unwrap();
    let forecast_at = rendered.find("Forecasted values:").unwrap();
    let notes_at = rendered.find("Holiday promotion").unwrap();
    assert!(stats_at < forecast_at && forecast_at < notes_at);
}
