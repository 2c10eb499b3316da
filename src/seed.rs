//! Fixture rows for a fresh ledger.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{Account, Commodity, Id, Owner};
use crate::storage::Storage;

/// Reference rows to write into storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedValues {
    pub owners: Vec<Owner>,
    pub accounts: Vec<Account>,
    pub commodities: Vec<Commodity>,
}

/// Rows written and rows left alone by [`apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

fn commodity(id: i64, symbol: &str, name: &str) -> Commodity {
    Commodity::new(Id::new(id), symbol, name)
}

/// Default owner, accounts, currencies and placeholder commodities.
pub fn init_values() -> SeedValues {
    SeedValues {
        owners: vec![
            Owner::new(Id::new(1), "Reuben", "Cummings").with_email("reubano@gmail.com")
        ],
        accounts: vec![
            Account::new(Id::new(1), "Scottrade", Id::new(1)),
            Account::new(Id::new(2), "Vanguard IRA", Id::new(1)),
        ],
        commodities: vec![
            commodity(1, "USD", "US Dollar"),
            commodity(2, "EUR", "Euro"),
            commodity(3, "GBP", "Pound Sterling"),
            commodity(4, "CAD", "Canadian Dollar"),
            commodity(5, "Multiple", "Multiple"),
            commodity(6, "AAPL", "Apple"),
            commodity(7, "Text", "Text"),
        ],
    }
}

/// Extra securities for a populated demo ledger.
pub fn pop_values() -> SeedValues {
    SeedValues {
        commodities: vec![
            commodity(8, "IBM", "International Business Machines"),
            commodity(9, "WMT", "Wal-Mart"),
            commodity(10, "CAT", "Caterpillar"),
        ],
        ..Default::default()
    }
}

/// Write seed rows, leaving any id that already exists untouched.
pub async fn apply(storage: &dyn Storage, values: &SeedValues) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for owner in &values.owners {
        if storage.get_owner(owner.id).await?.is_some() {
            warn!(table = "owner", id = %owner.id, "skipping existing seed row");
            report.skipped += 1;
        } else {
            storage.save_owner(owner).await?;
            report.inserted += 1;
        }
    }

    for account in &values.accounts {
        if storage.get_account(account.id).await?.is_some() {
            warn!(table = "account", id = %account.id, "skipping existing seed row");
            report.skipped += 1;
        } else {
            storage.save_account(account).await?;
            report.inserted += 1;
        }
    }

    for commodity in &values.commodities {
        if storage.get_commodity(commodity.id).await?.is_some() {
            warn!(table = "commodity", id = %commodity.id, "skipping existing seed row");
            report.skipped += 1;
        } else {
            storage.save_commodity(commodity).await?;
            report.inserted += 1;
        }
    }

    debug!(inserted = report.inserted, skipped = report.skipped, "seed applied");
    Ok(report)
}
