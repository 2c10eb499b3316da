// src/portfolio/worth.rs
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{
    DateMode, GroupKey, Grouping, ValuationError, ValuationRow, WorthRecord, WorthSnapshot,
};
use crate::format::format_fixed;
use crate::models::{Id, PositionKey};
use crate::storage::Catalog;

/// Label used for keys with no known symbol.
pub const UNKNOWN_SYMBOL: &str = "N/A";

/// Number of distinct positions valued on each date.
pub fn entry_counts(rows: &[ValuationRow]) -> BTreeMap<NaiveDate, usize> {
    let mut positions: BTreeMap<NaiveDate, BTreeSet<PositionKey>> = BTreeMap::new();
    for row in rows {
        positions.entry(row.date).or_default().insert(row.position());
    }
    positions
        .into_iter()
        .map(|(date, set)| (date, set.len()))
        .collect()
}

/// Pick the valuation date from per-date entry counts.
///
/// `Uniform` takes the latest of the dates tied at the highest count.
pub fn select_date(entries: &BTreeMap<NaiveDate, usize>, mode: DateMode) -> Option<NaiveDate> {
    match mode {
        DateMode::Latest => entries.keys().next_back().copied(),
        DateMode::Uniform => {
            let max_entries = entries.values().copied().max()?;
            entries
                .iter()
                .rev()
                .find(|&(_, &count)| count == max_entries)
                .map(|(&date, _)| date)
        }
    }
}

/// Sum valuation rows on the selected date by the requested grouping.
pub fn calc_worth(
    rows: &[ValuationRow],
    grouping: Grouping,
    mode: DateMode,
) -> Result<WorthSnapshot, ValuationError> {
    let entries = entry_counts(rows);
    let Some(as_of) = select_date(&entries, mode) else {
        return Ok(WorthSnapshot::empty(grouping, mode));
    };

    let mut values: BTreeMap<GroupKey, Decimal> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.date == as_of) {
        let sum = values
            .entry(grouping.key_for(&row.position()))
            .or_insert(Decimal::ZERO);
        *sum = sum
            .checked_add(row.value)
            .ok_or(ValuationError::Overflow {
                commodity_id: row.commodity_id,
                date: as_of,
            })?;
    }

    Ok(WorthSnapshot {
        as_of_date: Some(as_of),
        grouping,
        mode,
        values,
    })
}

/// Display labels for owner, account and commodity ids.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    owners: HashMap<Id, String>,
    accounts: HashMap<Id, String>,
    commodities: HashMap<Id, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owners by full name, accounts by name, commodities by symbol.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            owners: catalog.owners().map(|o| (o.id, o.full_name())).collect(),
            accounts: catalog.accounts().map(|a| (a.id, a.name.clone())).collect(),
            commodities: catalog
                .commodities()
                .map(|c| (c.id, c.symbol.clone()))
                .collect(),
        }
    }

    pub fn with_owner(mut self, id: Id, label: impl Into<String>) -> Self {
        self.owners.insert(id, label.into());
        self
    }

    pub fn with_account(mut self, id: Id, label: impl Into<String>) -> Self {
        self.accounts.insert(id, label.into());
        self
    }

    pub fn with_commodity(mut self, id: Id, symbol: impl Into<String>) -> Self {
        self.commodities.insert(id, symbol.into());
        self
    }

    /// Pair keys resolve only when both halves do.
    pub fn label(&self, key: &GroupKey) -> Option<String> {
        let pair = |a: Option<&String>, b: Option<&String>| Some(format!("{}, {}", a?, b?));
        match key {
            GroupKey::Owner(id) => self.owners.get(id).cloned(),
            GroupKey::Account(id) => self.accounts.get(id).cloned(),
            GroupKey::Commodity(id) => self.commodities.get(id).cloned(),
            GroupKey::OwnerCommodity(o, c) => pair(self.owners.get(o), self.commodities.get(c)),
            GroupKey::AccountCommodity(a, c) => {
                pair(self.accounts.get(a), self.commodities.get(c))
            }
            GroupKey::OwnerAccount(o, a) => pair(self.owners.get(o), self.accounts.get(a)),
        }
    }
}

/// Render worth values as `{symbol, worth}` records in key order.
pub fn convert_worth(
    worth: &BTreeMap<GroupKey, Decimal>,
    symbols: &SymbolTable,
) -> Vec<WorthRecord> {
    worth
        .iter()
        .map(|(key, value)| WorthRecord {
            symbol: symbols
                .label(key)
                .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
            worth: format_fixed(*value, 2),
        })
        .collect()
}
