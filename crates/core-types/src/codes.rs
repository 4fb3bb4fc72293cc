// In crates/core-types/src/codes.rs

//! Integer codes carried by exported orders, decoded into closed enumerations.
//!
//! Every code maps to a variant: anything the viewer does not name falls into
//! an explicit `Unknown` variant (or `Sell` for direction, where only `0` is
//! distinguished), so decoding can never fail.

use serde::Deserialize;
use std::fmt;

/// The kind of order as recorded by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum OrderType {
    Liquidate,
    Limit,
    Stop,
    Unknown(i64),
}

impl From<i64> for OrderType {
    fn from(code: i64) -> Self {
        match code {
            0 => OrderType::Liquidate,
            1 => OrderType::Limit,
            2 => OrderType::Stop,
            other => OrderType::Unknown(other),
        }
    }
}

impl OrderType {
    pub fn label(&self) -> &'static str {
        match self {
            OrderType::Liquidate => "Liquidate",
            OrderType::Limit => "Limit",
            OrderType::Stop => "Stop",
            OrderType::Unknown(_) => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum OrderDirection {
    Buy,
    /// Every code other than `0`.
    Sell,
}

impl From<i64> for OrderDirection {
    fn from(code: i64) -> Self {
        match code {
            0 => OrderDirection::Buy,
            _ => OrderDirection::Sell,
        }
    }
}

impl OrderDirection {
    pub fn label(&self) -> &'static str {
        match self {
            OrderDirection::Buy => "Buy",
            OrderDirection::Sell => "Sell",
        }
    }
}

/// Final state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum OrderStatus {
    Filled,
    Cancelled,
    Unknown(i64),
}

impl From<i64> for OrderStatus {
    fn from(code: i64) -> Self {
        match code {
            3 => OrderStatus::Filled,
            5 => OrderStatus::Cancelled,
            other => OrderStatus::Unknown(other),
        }
    }
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Filled => "Filled",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
