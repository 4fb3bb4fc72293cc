// In crates/projections/src/projection/drawdown.rs

use crate::chart::{ChartKind, ChartSpec, Dataset, SeriesData};
use crate::view_state::Localizer;
use core_types::SeriesPoint;

pub const DATASET_LABEL: &str = "Drawdown (%)";

/// Drawdown curve. Values are already percentages in the export and are
/// plotted unscaled, unlike the fractional max drawdown in the statistics block.
pub fn project(series: &[SeriesPoint], localizer: &Localizer<'_>) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        labels: series.iter().map(|p| localizer.date_label(p.time)).collect(),
        datasets: vec![Dataset {
            label: DATASET_LABEL.to_string(),
            data: SeriesData::Values(series.iter().map(|p| p.value).collect()),
            border_color: vec!["rgba(255, 99, 132, 1)"],
            background_color: vec![],
        }],
        x_title: "Date".to_string(),
        y_title: "Drawdown (%)".to_string(),
        zoom: None,
    }
}
