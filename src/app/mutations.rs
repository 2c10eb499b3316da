use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Holding, Price};
use crate::seed::{self, SeedReport};
use crate::storage::{find_account, find_commodity, find_owner, Storage};

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {value}"))
}

fn parse_decimal(label: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).with_context(|| format!("Invalid {label}: {value}"))
}

pub async fn seed(storage: &dyn Storage, populate: bool) -> Result<serde_json::Value> {
    let mut report = seed::apply(storage, &seed::init_values()).await?;
    if populate {
        let extra = seed::apply(storage, &seed::pop_values()).await?;
        report = SeedReport {
            inserted: report.inserted + extra.inserted,
            skipped: report.skipped + extra.skipped,
        };
    }

    Ok(serde_json::json!({
        "success": true,
        "populated": populate,
        "inserted": report.inserted,
        "skipped": report.skipped
    }))
}

pub async fn add_holding(
    storage: &dyn Storage,
    owner: &str,
    account: &str,
    commodity: &str,
    date: &str,
    shares: &str,
) -> Result<serde_json::Value> {
    let owner_row = find_owner(storage, owner)
        .await?
        .with_context(|| format!("Owner not found: {owner}"))?;
    let account_row = find_account(storage, account)
        .await?
        .with_context(|| format!("Account not found: {account}"))?;
    let commodity_row = find_commodity(storage, commodity)
        .await?
        .with_context(|| format!("Commodity not found: {commodity}"))?;

    if account_row.owner_id != owner_row.id {
        anyhow::bail!(
            "Account {} belongs to owner {}, not {}",
            account_row.name,
            account_row.owner_id,
            owner_row.id
        );
    }

    let holding = Holding::new(
        owner_row.id,
        account_row.id,
        commodity_row.id,
        parse_date(date)?,
        parse_decimal("shares", shares)?,
    );
    storage.append_holdings(std::slice::from_ref(&holding)).await?;

    Ok(serde_json::json!({
        "success": true,
        "holding": holding,
        "owner": owner_row.full_name(),
        "account": account_row.name,
        "commodity": commodity_row.symbol
    }))
}

pub async fn add_price(
    storage: &dyn Storage,
    commodity: &str,
    date: &str,
    price: &str,
) -> Result<serde_json::Value> {
    let commodity_row = find_commodity(storage, commodity)
        .await?
        .with_context(|| format!("Commodity not found: {commodity}"))?;

    let price = Price::new(
        commodity_row.id,
        parse_date(date)?,
        parse_decimal("price", price)?,
    );
    storage.put_prices(std::slice::from_ref(&price)).await?;

    Ok(serde_json::json!({
        "success": true,
        "price": price,
        "commodity": commodity_row.symbol
    }))
}
