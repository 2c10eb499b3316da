mod catalog;
mod json_file;
mod memory;

pub use catalog::{find_account, find_commodity, find_owner, Catalog};
pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use anyhow::Result;

use crate::models::{Account, Commodity, Holding, Id, Owner, Price};

/// Storage trait for the ledger tables.
///
/// Reference tables (owners, accounts, commodities) are keyed by id and
/// saved by replacement. Holdings and prices are append-only.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // Owners
    async fn list_owners(&self) -> Result<Vec<Owner>>;
    async fn get_owner(&self, id: Id) -> Result<Option<Owner>>;
    async fn save_owner(&self, owner: &Owner) -> Result<()>;

    // Accounts
    async fn list_accounts(&self) -> Result<Vec<Account>>;
    async fn get_account(&self, id: Id) -> Result<Option<Account>>;
    async fn save_account(&self, account: &Account) -> Result<()>;

    // Commodities
    async fn list_commodities(&self) -> Result<Vec<Commodity>>;
    async fn get_commodity(&self, id: Id) -> Result<Option<Commodity>>;
    async fn save_commodity(&self, commodity: &Commodity) -> Result<()>;

    // Holdings
    async fn get_holdings(&self) -> Result<Vec<Holding>>;
    async fn append_holdings(&self, holdings: &[Holding]) -> Result<()>;

    /// Prices, one per (commodity, date). A later write for the same pair wins.
    async fn get_prices(&self) -> Result<Vec<Price>>;
    async fn put_prices(&self, prices: &[Price]) -> Result<()>;
}
