use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Id;

/// Shares of a commodity held by an owner in an account, as of a date.
///
/// Records are append-only. A later-dated record for the same position
/// supersedes earlier ones; records sharing a date are summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub owner_id: Id,
    pub account_id: Id,
    pub commodity_id: Id,
    pub date: NaiveDate,
    /// Serialized as a string to avoid floating point precision issues
    pub shares: Decimal,
}

impl Holding {
    pub fn new(
        owner_id: Id,
        account_id: Id,
        commodity_id: Id,
        date: NaiveDate,
        shares: Decimal,
    ) -> Self {
        Self {
            owner_id,
            account_id,
            commodity_id,
            date,
            shares,
        }
    }

    pub fn position(&self) -> PositionKey {
        PositionKey {
            owner_id: self.owner_id,
            account_id: self.account_id,
            commodity_id: self.commodity_id,
        }
    }
}

/// The (owner, account, commodity) triple a holding series is tracked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionKey {
    pub owner_id: Id,
    pub account_id: Id,
    pub commodity_id: Id,
}
