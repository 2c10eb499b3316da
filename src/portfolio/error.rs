// src/portfolio/error.rs
use chrono::NaiveDate;

use crate::models::Id;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValuationError {
    #[error("Unknown grouping {0:?}. Use: own, act, stock, own_stock, act_stock, own_act")]
    UnknownGrouping(String),

    #[error("Unknown date mode {0:?}. Use: latest, uniform")]
    UnknownMode(String),

    #[error("No price for commodity {commodity_id} on {date}")]
    MissingPrice { commodity_id: Id, date: NaiveDate },

    #[error("Value of commodity {commodity_id} on {date} overflows the decimal range")]
    Overflow { commodity_id: Id, date: NaiveDate },

    #[error("Total worth on {date} overflows the decimal range")]
    TotalOverflow { date: NaiveDate },
}
