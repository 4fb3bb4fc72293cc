// In crates/projections/src/projection/orders.rs

use super::{as_is, two_places};
use crate::view_state::Localizer;
use core_types::Order;

pub const COLUMNS: &[&str] = &[
    "Symbol",
    "Time",
    "Type",
    "Quantity",
    "Price",
    "Direction",
    "Status",
    "Tag",
];

/// One row per order, in the export's insertion order, with codes decoded.
pub fn rows(orders: &[Order], localizer: &Localizer<'_>) -> Vec<Vec<String>> {
    orders
        .iter()
        .map(|order| {
            vec![
                order.symbol.value.clone(),
                localizer.instant(&order.time),
                order.order_type.label().to_string(),
                as_is(order.quantity),
                two_places(order.price),
                order.direction.label().to_string(),
                order.status.label().to_string(),
                order.tag.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::{DisplayFormats, ViewState};
    use chrono_tz::Tz;
    use core_types::{OrderDirection, OrderStatus, OrderType, ReportInstant, Symbol};
    use rust_decimal_macros::dec;

    fn order(type_code: i64, direction: i64, status: i64) -> Order {
        Order {
            symbol: Symbol { value: "SPY".to_string() },
            time: ReportInstant::from("2023-11-14T22:13:20Z".to_string()),
            order_type: OrderType::from(type_code),
            quantity: dec!(-25),
            price: dec!(380),
            direction: OrderDirection::from(direction),
            status: OrderStatus::from(status),
            tag: None,
        }
    }

    #[test]
    fn codes_decode_in_insertion_order() {
        let formats = DisplayFormats::default();
        let localizer = Localizer::new(ViewState::new(Tz::UTC), &formats);
        let orders = vec![order(1, 0, 3), order(0, 1, 5), order(9, 2, 4)];

        let rows = rows(&orders, &localizer);

        let decoded: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| (r[2].as_str(), r[5].as_str(), r[6].as_str()))
            .collect();
        assert_eq!(
            decoded,
            vec![
                ("Limit", "Buy", "Filled"),
                ("Liquidate", "Sell", "Cancelled"),
                ("Unknown", "Sell", "Unknown"),
            ]
        );
    }

    #[test]
    fn price_has_two_places_and_missing_tag_is_blank() {
        let formats = DisplayFormats::default();
        let localizer = Localizer::new(ViewState::new(Tz::UTC), &formats);

        let rows = rows(&[order(1, 0, 3)], &localizer);

        assert_eq!(rows[0][1], "11/14/2023, 10:13:20 PM");
        assert_eq!(rows[0][3], "-25");
        assert_eq!(rows[0][4], "380.00");
        assert_eq!(rows[0][7], "");
        assert_eq!(rows[0].len(), COLUMNS.len());
    }

    #[test]
    fn null_and_absent_tags_are_blank() {
        let formats = DisplayFormats::default();
        let localizer = Localizer::new(ViewState::new(Tz::UTC), &formats);
        let orders: Vec<Order> = serde_json::from_str(
            r#"[
                {"symbol": {"value": "QQQ"}, "time": "2023-11-15T15:30:00Z", "type": 1,
                 "quantity": 25, "price": 380, "direction": 0, "status": 3, "tag": null},
                {"symbol": {"value": "QQQ"}, "time": "2023-11-15T15:31:00Z", "type": 1,
                 "quantity": 25, "price": 380, "direction": 0, "status": 3}
            ]"#,
        )
        .unwrap();

        let rows = rows(&orders, &localizer);

        assert_eq!(rows[0][7], "");
        assert_eq!(rows[1][7], "");
    }
}
