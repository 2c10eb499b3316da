// src/portfolio/models.rs
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ValuationError;
use crate::models::{Id, PositionKey};

/// Which columns of a valuation row worth is summed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grouping {
    #[serde(rename = "own")]
    Owner,
    #[serde(rename = "act")]
    Account,
    #[default]
    #[serde(rename = "stock")]
    Commodity,
    #[serde(rename = "own_stock")]
    OwnerCommodity,
    #[serde(rename = "act_stock")]
    AccountCommodity,
    #[serde(rename = "own_act")]
    OwnerAccount,
}

impl Grouping {
    pub const ALL: [Grouping; 6] = [
        Grouping::Owner,
        Grouping::Account,
        Grouping::Commodity,
        Grouping::OwnerCommodity,
        Grouping::AccountCommodity,
        Grouping::OwnerAccount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "own",
            Self::Account => "act",
            Self::Commodity => "stock",
            Self::OwnerCommodity => "own_stock",
            Self::AccountCommodity => "act_stock",
            Self::OwnerAccount => "own_act",
        }
    }

    /// True when keys carry a single id rather than a pair.
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Owner | Self::Account | Self::Commodity)
    }

    pub fn key_for(&self, position: &PositionKey) -> GroupKey {
        let PositionKey {
            owner_id,
            account_id,
            commodity_id,
        } = *position;
        match self {
            Self::Owner => GroupKey::Owner(owner_id),
            Self::Account => GroupKey::Account(account_id),
            Self::Commodity => GroupKey::Commodity(commodity_id),
            Self::OwnerCommodity => GroupKey::OwnerCommodity(owner_id, commodity_id),
            Self::AccountCommodity => GroupKey::AccountCommodity(account_id, commodity_id),
            Self::OwnerAccount => GroupKey::OwnerAccount(owner_id, account_id),
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grouping {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == lowered)
            .ok_or_else(|| ValuationError::UnknownGrouping(s.to_string()))
    }
}

/// How the valuation date is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateMode {
    /// Most recent date, even if only some positions have data on it.
    Latest,
    /// Most recent date that has as many positions as the fullest date.
    #[default]
    Uniform,
}

impl DateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Uniform => "uniform",
        }
    }
}

impl fmt::Display for DateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateMode {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "uniform" => Ok(Self::Uniform),
            _ => Err(ValuationError::UnknownMode(s.to_string())),
        }
    }
}

/// Key of one worth group. Single-column groupings produce the first three
/// variants, two-column groupings the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Owner(Id),
    Account(Id),
    Commodity(Id),
    OwnerCommodity(Id, Id),
    AccountCommodity(Id, Id),
    OwnerAccount(Id, Id),
}

impl GroupKey {
    pub fn single_id(&self) -> Option<Id> {
        match *self {
            Self::Owner(id) | Self::Account(id) | Self::Commodity(id) => Some(id),
            _ => None,
        }
    }
}

/// Market value of one position on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationRow {
    pub owner_id: Id,
    pub account_id: Id,
    pub commodity_id: Id,
    pub date: NaiveDate,
    pub shares: Decimal,
    pub value: Decimal,
}

impl ValuationRow {
    pub fn position(&self) -> PositionKey {
        PositionKey {
            owner_id: self.owner_id,
            account_id: self.account_id,
            commodity_id: self.commodity_id,
        }
    }
}

/// Grouped worth on the selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorthSnapshot {
    /// `None` when there were no valuation rows at all.
    pub as_of_date: Option<NaiveDate>,
    pub grouping: Grouping,
    pub mode: DateMode,
    pub values: BTreeMap<GroupKey, Decimal>,
}

impl WorthSnapshot {
    pub fn empty(grouping: Grouping, mode: DateMode) -> Self {
        Self {
            as_of_date: None,
            grouping,
            mode,
            values: BTreeMap::new(),
        }
    }

    /// Sum of every group, or `TotalOverflow` past the `Decimal` range.
    pub fn total(&self) -> Result<Decimal, ValuationError> {
        let Some(date) = self.as_of_date else {
            return Ok(Decimal::ZERO);
        };
        self.values
            .values()
            .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
            .ok_or(ValuationError::TotalOverflow { date })
    }
}

/// Display form of one worth entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorthRecord {
    pub symbol: String,
    pub worth: String,
}

#[derive(Debug, Clone)]
pub struct WorthQuery {
    pub grouping: Grouping,
    pub mode: DateMode,
    /// Also render the display records.
    pub convert: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorthValue {
    pub key: GroupKey,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorthOutput {
    pub as_of_date: Option<NaiveDate>,
    pub grouping: Grouping,
    pub mode: DateMode,
    pub total: String,
    pub values: Vec<WorthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted: Option<Vec<WorthRecord>>,
}
