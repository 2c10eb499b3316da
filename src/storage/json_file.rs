use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::Storage;
use crate::models::{Account, Commodity, Holding, Id, Owner, Price};

/// JSON file-based storage implementation.
///
/// Directory structure:
/// ```text
/// data/
///   owners.json
///   accounts.json
///   commodities.json
///   holdings.jsonl
///   prices.jsonl
/// ```
pub struct JsonFileStorage {
    base_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn owners_file(&self) -> PathBuf {
        self.base_path.join("owners.json")
    }

    fn accounts_file(&self) -> PathBuf {
        self.base_path.join("accounts.json")
    }

    fn commodities_file(&self) -> PathBuf {
        self.base_path.join("commodities.json")
    }

    fn holdings_file(&self) -> PathBuf {
        self.base_path.join("holdings.jsonl")
    }

    fn prices_file(&self) -> PathBuf {
        self.base_path.join("prices.jsonl")
    }

    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create directory")?;
        }
        Ok(())
    }

    async fn read_table<T: for<'de> serde::Deserialize<'de>>(&self, path: &Path) -> Result<Vec<T>> {
        match fs::read_to_string(path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON from {:?}", path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e).context("Failed to read file"),
        }
    }

    async fn write_table<T: serde::Serialize>(&self, path: &Path, rows: &[T]) -> Result<()> {
        self.ensure_dir(path).await?;
        let content = serde_json::to_string_pretty(rows).context("Failed to serialize JSON")?;
        fs::write(path, content)
            .await
            .context("Failed to write file")?;
        Ok(())
    }

    /// Insert or replace a row by id, keeping the table sorted by id.
    async fn upsert_row<T>(&self, path: &Path, row: &T, id_of: fn(&T) -> Id) -> Result<()>
    where
        T: serde::Serialize + for<'de> serde::Deserialize<'de> + Clone,
    {
        let rows: Vec<T> = self.read_table(path).await?;
        let mut by_id: BTreeMap<Id, T> = rows.into_iter().map(|r| (id_of(&r), r)).collect();
        by_id.insert(id_of(row), row.clone());
        let rows: Vec<T> = by_id.into_values().collect();
        self.write_table(path, &rows).await
    }

    async fn find_row<T>(&self, path: &Path, id: Id, id_of: fn(&T) -> Id) -> Result<Option<T>>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let rows: Vec<T> = self.read_table(path).await?;
        Ok(rows.into_iter().find(|r| id_of(r) == id))
    }

    async fn read_jsonl<T: for<'de> serde::Deserialize<'de>>(&self, path: &Path) -> Result<Vec<T>> {
        let file = match fs::File::open(path).await {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).context("Failed to open file"),
        };

        let reader = BufReader::new(file);
        let mut lines = reader.lines();
        let mut items = Vec::new();

        while let Some(line) = lines.next_line().await.context("Failed to read line")? {
            if line.trim().is_empty() {
                continue;
            }
            let item: T = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse JSONL line: {}", line))?;
            items.push(item);
        }

        Ok(items)
    }

    async fn append_jsonl<T: serde::Serialize>(&self, path: &Path, items: &[T]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        self.ensure_dir(path).await?;

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .context("Failed to open file for append")?;

        for item in items {
            let line = serde_json::to_string(item).context("Failed to serialize item")?;
            file.write_all(line.as_bytes()).await?;
            file.write_all(b"\n").await?;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Storage for JsonFileStorage {
    async fn list_owners(&self) -> Result<Vec<Owner>> {
        self.read_table(&self.owners_file()).await
    }

    async fn get_owner(&self, id: Id) -> Result<Option<Owner>> {
        self.find_row(&self.owners_file(), id, |o: &Owner| o.id).await
    }

    async fn save_owner(&self, owner: &Owner) -> Result<()> {
        self.upsert_row(&self.owners_file(), owner, |o| o.id).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.read_table(&self.accounts_file()).await
    }

    async fn get_account(&self, id: Id) -> Result<Option<Account>> {
        self.find_row(&self.accounts_file(), id, |a: &Account| a.id)
            .await
    }

    async fn save_account(&self, account: &Account) -> Result<()> {
        self.upsert_row(&self.accounts_file(), account, |a| a.id)
            .await
    }

    async fn list_commodities(&self) -> Result<Vec<Commodity>> {
        self.read_table(&self.commodities_file()).await
    }

    async fn get_commodity(&self, id: Id) -> Result<Option<Commodity>> {
        self.find_row(&self.commodities_file(), id, |c: &Commodity| c.id)
            .await
    }

    async fn save_commodity(&self, commodity: &Commodity) -> Result<()> {
        self.upsert_row(&self.commodities_file(), commodity, |c| c.id)
            .await
    }

    async fn get_holdings(&self) -> Result<Vec<Holding>> {
        self.read_jsonl(&self.holdings_file()).await
    }

    async fn append_holdings(&self, holdings: &[Holding]) -> Result<()> {
        self.append_jsonl(&self.holdings_file(), holdings).await
    }

    async fn get_prices(&self) -> Result<Vec<Price>> {
        let raw: Vec<Price> = self.read_jsonl(&self.prices_file()).await?;

        // Last write wins for a repeated (commodity, date).
        let mut latest = BTreeMap::new();
        for price in raw {
            latest.insert((price.commodity_id, price.date), price);
        }

        Ok(latest.into_values().collect())
    }

    async fn put_prices(&self, prices: &[Price]) -> Result<()> {
        self.append_jsonl(&self.prices_file(), prices).await
    }
}
