// In crates/projections/src/projection/trades.rs

use super::as_is;
use crate::view_state::Localizer;
use core_types::Trade;

pub const COLUMNS: &[&str] = &[
    "Symbol",
    "Entry Time",
    "Entry Price",
    "Exit Time",
    "Exit Price",
    "Profit/Loss",
    "MAE",
    "MFE",
    "Duration",
    "End Trade Drawdown",
    "Win",
];

/// One row per closed trade, in export order.
pub fn rows(trades: &[Trade], localizer: &Localizer<'_>) -> Vec<Vec<String>> {
    trades.iter().map(|trade| row(trade, localizer)).collect()
}

fn row(trade: &Trade, localizer: &Localizer<'_>) -> Vec<String> {
    vec![
        trade.symbol.value.clone(),
        localizer.instant(&trade.entry_time),
        as_is(trade.entry_price),
        localizer.instant(&trade.exit_time),
        as_is(trade.exit_price),
        as_is(trade.profit_loss),
        as_is(trade.mae),
        as_is(trade.mfe),
        trade.duration.clone(),
        as_is(trade.end_trade_drawdown),
        if trade.is_win { "Yes" } else { "No" }.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::{DisplayFormats, ViewState};
    use chrono_tz::Tz;
    use core_types::{ReportInstant, Symbol};
    use rust_decimal_macros::dec;

    fn trade(symbol: &str, is_win: bool) -> Trade {
        Trade {
            symbol: Symbol { value: symbol.to_string() },
            entry_time: ReportInstant::from("2023-11-14T22:13:20Z".to_string()),
            entry_price: dec!(440.50),
            exit_time: ReportInstant::from("2023-11-15T15:00:00Z".to_string()),
            exit_price: dec!(452.5),
            profit_loss: dec!(1200),
            mae: dec!(-150),
            mfe: dec!(1300),
            duration: "16:46:40".to_string(),
            end_trade_drawdown: dec!(-100),
            is_win,
        }
    }

    #[test]
    fn rows_follow_the_column_layout() {
        let formats = DisplayFormats::default();
        let localizer = Localizer::new(ViewState::new(Tz::UTC), &formats);

        let rows = rows(&[trade("SPY", true)], &localizer);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), COLUMNS.len());
        assert_eq!(
            rows[0],
            vec![
                "SPY",
                "11/14/2023, 10:13:20 PM",
                "440.5",
                "11/15/2023, 3:00:00 PM",
                "452.5",
                "1200",
                "-150",
                "1300",
                "16:46:40",
                "-100",
                "Yes",
            ]
        );
    }

    #[test]
    fn win_flag_reads_yes_or_no_in_order() {
        let formats = DisplayFormats::default();
        let localizer = Localizer::new(ViewState::new(Tz::UTC), &formats);

        let rows = rows(&[trade("A", false), trade("B", true)], &localizer);

        let flags: Vec<&str> = rows.iter().map(|r| r[10].as_str()).collect();
        let symbols: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(flags, vec!["No", "Yes"]);
        assert_eq!(symbols, vec!["A", "B"]);
    }
}
