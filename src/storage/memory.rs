// src/storage/memory.rs
//! In-memory storage implementation for testing.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::models::{Account, Commodity, Holding, Id, Owner, Price};

use super::Storage;

/// In-memory storage for testing purposes.
#[derive(Default)]
pub struct MemoryStorage {
    owners: Mutex<BTreeMap<Id, Owner>>,
    accounts: Mutex<BTreeMap<Id, Account>>,
    commodities: Mutex<BTreeMap<Id, Commodity>>,
    holdings: Mutex<Vec<Holding>>,
    prices: Mutex<BTreeMap<(Id, NaiveDate), Price>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn list_owners(&self) -> Result<Vec<Owner>> {
        let owners = self.owners.lock().await;
        Ok(owners.values().cloned().collect())
    }

    async fn get_owner(&self, id: Id) -> Result<Option<Owner>> {
        let owners = self.owners.lock().await;
        Ok(owners.get(&id).cloned())
    }

    async fn save_owner(&self, owner: &Owner) -> Result<()> {
        let mut owners = self.owners.lock().await;
        owners.insert(owner.id, owner.clone());
        Ok(())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.values().cloned().collect())
    }

    async fn get_account(&self, id: Id) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn save_account(&self, account: &Account) -> Result<()> {
        let mut accounts = self.accounts.lock().await;
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn list_commodities(&self) -> Result<Vec<Commodity>> {
        let commodities = self.commodities.lock().await;
        Ok(commodities.values().cloned().collect())
    }

    async fn get_commodity(&self, id: Id) -> Result<Option<Commodity>> {
        let commodities = self.commodities.lock().await;
        Ok(commodities.get(&id).cloned())
    }

    async fn save_commodity(&self, commodity: &Commodity) -> Result<()> {
        let mut commodities = self.commodities.lock().await;
        commodities.insert(commodity.id, commodity.clone());
        Ok(())
    }

    async fn get_holdings(&self) -> Result<Vec<Holding>> {
        let holdings = self.holdings.lock().await;
        Ok(holdings.clone())
    }

    async fn append_holdings(&self, new_holdings: &[Holding]) -> Result<()> {
        let mut holdings = self.holdings.lock().await;
        holdings.extend(new_holdings.iter().cloned());
        Ok(())
    }

    async fn get_prices(&self) -> Result<Vec<Price>> {
        let prices = self.prices.lock().await;
        Ok(prices.values().cloned().collect())
    }

    async fn put_prices(&self, new_prices: &[Price]) -> Result<()> {
        if new_prices.is_empty() {
            return Ok(());
        }
        let mut prices = self.prices.lock().await;
        for price in new_prices {
            prices.insert((price.commodity_id, price.date), price.clone());
        }
        Ok(())
    }
}
