// In crates/projections/src/projection/distribution.rs

use crate::chart::{ChartKind, ChartSpec, Dataset, SeriesData};
use core_types::TradeStatistics;

pub const CATEGORIES: [&str; 2] = ["Winning Trades", "Losing Trades"];

/// Two bars: winning vs losing trade counts.
pub fn project(stats: &TradeStatistics) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        labels: CATEGORIES.iter().map(|c| c.to_string()).collect(),
        datasets: vec![Dataset {
            label: "Trade Distribution".to_string(),
            data: SeriesData::Values(vec![
                Some(stats.number_of_winning_trades as f64),
                Some(stats.number_of_losing_trades as f64),
            ]),
            border_color: vec!["rgba(75, 192, 192, 1)", "rgba(255, 99, 132, 1)"],
            background_color: vec!["rgba(75, 192, 192, 0.2)", "rgba(255, 99, 132, 0.2)"],
        }],
        x_title: "Trade Type".to_string(),
        y_title: "Number of Trades".to_string(),
        zoom: None,
    }
}
