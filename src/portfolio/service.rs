// src/portfolio/service.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::format::format_decimal;
use crate::storage::{Catalog, Storage};

use super::{
    calc_worth, convert_worth, share_value, SymbolTable, WorthOutput, WorthQuery, WorthValue,
};

/// Loads the ledger from storage and runs the worth pipeline.
pub struct WorthService {
    storage: Arc<dyn Storage>,
}

impl WorthService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn calc_worth(&self, query: &WorthQuery) -> Result<WorthOutput> {
        let holdings = self.storage.get_holdings().await?;
        let prices = self.storage.get_prices().await?;
        debug!(
            holdings = holdings.len(),
            prices = prices.len(),
            "loaded ledger for worth calculation"
        );

        let rows = share_value(&holdings, &prices).context("Failed to value holdings")?;
        let snapshot =
            calc_worth(&rows, query.grouping, query.mode).context("Failed to group worth")?;

        match snapshot.as_of_date {
            Some(date) => info!(
                date = %date,
                grouping = %query.grouping,
                mode = %query.mode,
                groups = snapshot.values.len(),
                "selected valuation date"
            ),
            None => info!("no valuation rows; worth is empty"),
        }

        let converted = if query.convert {
            let catalog = Catalog::load(self.storage.as_ref()).await?;
            Some(convert_worth(
                &snapshot.values,
                &SymbolTable::from_catalog(&catalog),
            ))
        } else {
            None
        };

        Ok(WorthOutput {
            as_of_date: snapshot.as_of_date,
            grouping: snapshot.grouping,
            mode: snapshot.mode,
            total: format_decimal(snapshot.total().context("Failed to total worth")?),
            values: snapshot
                .values
                .iter()
                .map(|(key, value)| WorthValue {
                    key: *key,
                    value: format_decimal(*value),
                })
                .collect(),
            converted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Commodity, Holding, Id, Price};
    use crate::portfolio::{DateMode, GroupKey, Grouping};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
    }

    async fn seeded_storage() -> Result<Arc<MemoryStorage>> {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save_commodity(&Commodity::new(Id::new(6), "AAPL", "Apple"))
            .await?;
        storage
            .append_holdings(&[Holding::new(
                Id::new(1),
                Id::new(1),
                Id::new(6),
                date(1),
                Decimal::from(10),
            )])
            .await?;
        storage
            .put_prices(&[Price::new(Id::new(6), date(1), Decimal::from(150))])
            .await?;
        Ok(storage)
    }

    #[tokio::test]
    async fn worth_service_values_by_commodity() -> Result<()> {
        let service = WorthService::new(seeded_storage().await?);
        let query = WorthQuery {
            grouping: Grouping::Commodity,
            mode: DateMode::Latest,
            convert: true,
        };

        let output = service.calc_worth(&query).await?;

        assert_eq!(output.as_of_date, Some(date(1)));
        assert_eq!(output.total, "1500");
        assert_eq!(output.values.len(), 1);
        assert_eq!(output.values[0].key, GroupKey::Commodity(Id::new(6)));
        let converted = output.converted.expect("converted records");
        assert_eq!(converted[0].symbol, "AAPL");
        assert_eq!(converted[0].worth, "1500.00");

        Ok(())
    }

    #[tokio::test]
    async fn worth_service_skips_conversion_unless_asked() -> Result<()> {
        let service = WorthService::new(seeded_storage().await?);
        let query = WorthQuery {
            grouping: Grouping::Owner,
            mode: DateMode::Uniform,
            convert: false,
        };

        let output = service.calc_worth(&query).await?;
        assert!(output.converted.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn worth_service_reports_missing_prices() -> Result<()> {
        let storage = seeded_storage().await?;
        storage
            .append_holdings(&[Holding::new(
                Id::new(1),
                Id::new(1),
                Id::new(6),
                date(2),
                Decimal::ONE,
            )])
            .await?;
        let service = WorthService::new(storage);
        let query = WorthQuery {
            grouping: Grouping::Commodity,
            mode: DateMode::Latest,
            convert: false,
        };

        let err = service.calc_worth(&query).await.unwrap_err();
        assert!(format!("{err:#}").contains("No price for commodity 6"));

        Ok(())
    }

    #[tokio::test]
    async fn worth_service_reports_overflow_instead_of_panicking() -> Result<()> {
        let storage = seeded_storage().await?;
        storage
            .put_prices(&[Price::new(Id::new(6), date(2), Decimal::from(10_000_000_000i64))])
            .await?;
        storage
            .append_holdings(&[Holding::new(
                Id::new(1),
                Id::new(1),
                Id::new(6),
                date(2),
                Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0),
            )])
            .await?;
        let service = WorthService::new(storage);
        let query = WorthQuery {
            grouping: Grouping::Commodity,
            mode: DateMode::Latest,
            convert: false,
        };

        let err = service.calc_worth(&query).await.unwrap_err();
        assert!(format!("{err:#}").contains("overflows the decimal range"));

        Ok(())
    }
}
