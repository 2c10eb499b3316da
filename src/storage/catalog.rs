use std::collections::BTreeMap;

use anyhow::Result;

use crate::models::{Account, Commodity, Id, Owner};

use super::Storage;

/// Snapshot of the reference tables, used to resolve relations between rows.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    owners: BTreeMap<Id, Owner>,
    accounts: BTreeMap<Id, Account>,
    commodities: BTreeMap<Id, Commodity>,
}

impl Catalog {
    pub fn new(owners: Vec<Owner>, accounts: Vec<Account>, commodities: Vec<Commodity>) -> Self {
        Self {
            owners: owners.into_iter().map(|o| (o.id, o)).collect(),
            accounts: accounts.into_iter().map(|a| (a.id, a)).collect(),
            commodities: commodities.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub async fn load(storage: &dyn Storage) -> Result<Self> {
        Ok(Self::new(
            storage.list_owners().await?,
            storage.list_accounts().await?,
            storage.list_commodities().await?,
        ))
    }

    pub fn owner(&self, id: Id) -> Option<&Owner> {
        self.owners.get(&id)
    }

    pub fn account(&self, id: Id) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn commodity(&self, id: Id) -> Option<&Commodity> {
        self.commodities.get(&id)
    }

    pub fn owners(&self) -> impl Iterator<Item = &Owner> {
        self.owners.values()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn commodities(&self) -> impl Iterator<Item = &Commodity> {
        self.commodities.values()
    }
}

pub async fn find_owner(storage: &dyn Storage, id_or_name: &str) -> Result<Option<Owner>> {
    if let Ok(id) = id_or_name.parse::<Id>() {
        if let Some(owner) = storage.get_owner(id).await? {
            return Ok(Some(owner));
        }
    }

    let owners = storage.list_owners().await?;
    let mut matches: Vec<Owner> = owners
        .into_iter()
        .filter(|o| {
            o.full_name().eq_ignore_ascii_case(id_or_name)
                || o.first_name.eq_ignore_ascii_case(id_or_name)
        })
        .collect();

    if matches.len() > 1 {
        let ids: Vec<String> = matches.iter().map(|o| o.id.to_string()).collect();
        anyhow::bail!("Multiple owners named '{id_or_name}'. Use an ID instead: {ids:?}");
    }

    Ok(matches.pop())
}

pub async fn find_account(storage: &dyn Storage, id_or_name: &str) -> Result<Option<Account>> {
    if let Ok(id) = id_or_name.parse::<Id>() {
        if let Some(account) = storage.get_account(id).await? {
            return Ok(Some(account));
        }
    }

    let accounts = storage.list_accounts().await?;
    let mut matches: Vec<Account> = accounts
        .into_iter()
        .filter(|a| a.name.eq_ignore_ascii_case(id_or_name))
        .collect();

    if matches.len() > 1 {
        let ids: Vec<String> = matches.iter().map(|a| a.id.to_string()).collect();
        anyhow::bail!("Multiple accounts named '{id_or_name}'. Use an ID instead: {ids:?}");
    }

    Ok(matches.pop())
}

pub async fn find_commodity(
    storage: &dyn Storage,
    id_or_symbol: &str,
) -> Result<Option<Commodity>> {
    if let Ok(id) = id_or_symbol.parse::<Id>() {
        if let Some(commodity) = storage.get_commodity(id).await? {
            return Ok(Some(commodity));
        }
    }

    let commodities = storage.list_commodities().await?;
    let mut matches: Vec<Commodity> = commodities
        .into_iter()
        .filter(|c| c.symbol.eq_ignore_ascii_case(id_or_symbol))
        .collect();

    if matches.len() > 1 {
        let ids: Vec<String> = matches.iter().map(|c| c.id.to_string()).collect();
        anyhow::bail!("Multiple commodities with symbol '{id_or_symbol}'. Use an ID instead: {ids:?}");
    }

    Ok(matches.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn find_commodity_by_id_or_symbol() -> Result<()> {
        let storage = MemoryStorage::new();
        storage
            .save_commodity(&Commodity::new(Id::new(6), "AAPL", "Apple"))
            .await?;

        let by_id = find_commodity(&storage, "6").await?;
        let by_symbol = find_commodity(&storage, "aapl").await?;
        assert_eq!(by_id, by_symbol);
        assert!(by_id.is_some());
        assert!(find_commodity(&storage, "IBM").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn find_account_rejects_ambiguous_names() -> Result<()> {
        let storage = MemoryStorage::new();
        storage
            .save_account(&Account::new(Id::new(1), "Brokerage", Id::new(1)))
            .await?;
        storage
            .save_account(&Account::new(Id::new(2), "brokerage", Id::new(2)))
            .await?;

        let err = find_account(&storage, "Brokerage").await.unwrap_err();
        assert!(err.to_string().contains("Multiple accounts"));

        Ok(())
    }

    #[tokio::test]
    async fn find_owner_matches_full_name() -> Result<()> {
        let storage = MemoryStorage::new();
        storage
            .save_owner(&Owner::new(Id::new(1), "Reuben", "Cummings"))
            .await?;

        let owner = find_owner(&storage, "reuben cummings").await?;
        assert_eq!(owner.map(|o| o.id), Some(Id::new(1)));

        Ok(())
    }
}
