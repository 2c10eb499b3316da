use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Id;

/// Price of a commodity on a date, in the commodity's own currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub commodity_id: Id,
    pub date: NaiveDate,
    pub native_price: Decimal,
}

impl Price {
    pub fn new(commodity_id: Id, date: NaiveDate, native_price: Decimal) -> Self {
        Self {
            commodity_id,
            date,
            native_price,
        }
    }
}
