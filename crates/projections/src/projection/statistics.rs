// In crates/projections/src/projection/statistics.rs

use super::{as_is, fraction_as_percent};
use crate::table::StatLine;
use core_types::{PortfolioStatistics, TradeStatistics};

/// The summary block. Win rate and max drawdown arrive as fractions and are
/// scaled to percentages; everything else is shown as exported.
pub fn project(trades: &TradeStatistics, portfolio: &PortfolioStatistics) -> Vec<StatLine> {
    vec![
        line("Total Trades", trades.total_number_of_trades.to_string()),
        line("Winning Trades", trades.number_of_winning_trades.to_string()),
        line("Losing Trades", trades.number_of_losing_trades.to_string()),
        line("Win Rate", fraction_as_percent(trades.win_rate)),
        line("Total Profit/Loss", as_is(trades.total_profit_loss)),
        line("Sharpe Ratio", as_is(portfolio.sharpe_ratio)),
        line("Max Drawdown", fraction_as_percent(portfolio.drawdown)),
    ]
}

fn line(label: &'static str, value: String) -> StatLine {
    StatLine { label, value }
}
