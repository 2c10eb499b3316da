// src/portfolio/share_value.rs
//! Joins holdings with prices into per-position market values.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::{ValuationError, ValuationRow};
use crate::models::{Holding, Id, PositionKey, Price};

/// Price history indexed by commodity, then date.
#[derive(Debug, Default)]
pub struct PriceIndex {
    by_commodity: HashMap<Id, BTreeMap<NaiveDate, Decimal>>,
}

impl PriceIndex {
    /// Later records for the same (commodity, date) replace earlier ones.
    pub fn new(prices: &[Price]) -> Self {
        let mut by_commodity: HashMap<Id, BTreeMap<NaiveDate, Decimal>> = HashMap::new();
        for price in prices {
            by_commodity
                .entry(price.commodity_id)
                .or_default()
                .insert(price.date, price.native_price);
        }
        Self { by_commodity }
    }

    pub fn price_on(&self, commodity_id: Id, date: NaiveDate) -> Option<Decimal> {
        self.by_commodity
            .get(&commodity_id)
            .and_then(|series| series.get(&date))
            .copied()
    }

    /// Price dates of a commodity on or after `start`.
    fn dates_from(&self, commodity_id: Id, start: NaiveDate) -> impl Iterator<Item = &NaiveDate> {
        self.by_commodity
            .get(&commodity_id)
            .into_iter()
            .flat_map(move |series| series.range(start..).map(|(date, _)| date))
    }
}

type ShareSeries = BTreeMap<PositionKey, BTreeMap<NaiveDate, Decimal>>;

fn add(a: Decimal, b: Decimal, commodity_id: Id, date: NaiveDate) -> Result<Decimal, ValuationError> {
    a.checked_add(b)
        .ok_or(ValuationError::Overflow { commodity_id, date })
}

fn mul(a: Decimal, b: Decimal, commodity_id: Id, date: NaiveDate) -> Result<Decimal, ValuationError> {
    a.checked_mul(b)
        .ok_or(ValuationError::Overflow { commodity_id, date })
}

/// Share count of each position on each date it was recorded, with records
/// on the same date summed.
fn share_series(holdings: &[Holding]) -> Result<ShareSeries, ValuationError> {
    let mut series = ShareSeries::new();
    for holding in holdings {
        let shares = series
            .entry(holding.position())
            .or_default()
            .entry(holding.date)
            .or_insert(Decimal::ZERO);
        *shares = add(*shares, holding.shares, holding.commodity_id, holding.date)?;
    }
    Ok(series)
}

/// Value every position on every date it has both shares and a price.
///
/// Each holding record contributes a row on its own date, which must have a
/// price. Between records the last known share count is carried forward onto
/// every price date of the commodity. Rows for the same position and date are
/// collapsed by summing shares and value. Output is sorted by
/// (owner, account, commodity, date). Arithmetic beyond the `Decimal` range
/// fails with `ValuationError::Overflow`.
pub fn share_value(
    holdings: &[Holding],
    prices: &[Price],
) -> Result<Vec<ValuationRow>, ValuationError> {
    let index = PriceIndex::new(prices);
    let series = share_series(holdings)?;
    let mut collapsed: BTreeMap<(PositionKey, NaiveDate), (Decimal, Decimal)> = BTreeMap::new();

    for holding in holdings {
        let price = index
            .price_on(holding.commodity_id, holding.date)
            .ok_or(ValuationError::MissingPrice {
                commodity_id: holding.commodity_id,
                date: holding.date,
            })?;
        let (commodity_id, date) = (holding.commodity_id, holding.date);
        let value = mul(holding.shares, price, commodity_id, date)?;
        let entry = collapsed
            .entry((holding.position(), date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 = add(entry.0, holding.shares, commodity_id, date)?;
        entry.1 = add(entry.1, value, commodity_id, date)?;
    }

    for (position, recorded) in &series {
        let Some((&first, _)) = recorded.first_key_value() else {
            continue;
        };
        for &date in index.dates_from(position.commodity_id, first) {
            if recorded.contains_key(&date) {
                continue;
            }
            let Some((_, &shares)) = recorded.range(..=date).next_back() else {
                continue;
            };
            let Some(price) = index.price_on(position.commodity_id, date) else {
                continue;
            };
            let value = mul(shares, price, position.commodity_id, date)?;
            collapsed.insert((*position, date), (shares, value));
        }
    }

    debug!(
        holdings = holdings.len(),
        prices = prices.len(),
        rows = collapsed.len(),
        "computed share values"
    );

    Ok(collapsed
        .into_iter()
        .map(|((position, date), (shares, value))| ValuationRow {
            owner_id: position.owner_id,
            account_id: position.account_id,
            commodity_id: position.commodity_id,
            date,
            shares,
            value,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, month, day).unwrap()
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn holding(owner: i64, account: i64, commodity: i64, on: NaiveDate, shares: &str) -> Holding {
        Holding::new(
            Id::new(owner),
            Id::new(account),
            Id::new(commodity),
            on,
            dec(shares),
        )
    }

    #[test]
    fn values_single_holding_at_its_price() {
        let holdings = vec![holding(1, 1, 6, date(1, 1), "10")];
        let prices = vec![Price::new(Id::new(6), date(1, 1), dec("150.0"))];

        let rows = share_value(&holdings, &prices).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].shares, dec("10"));
        assert_eq!(rows[0].value, dec("1500.00"));
    }

    #[test]
    fn missing_price_is_a_lookup_failure() {
        let holdings = vec![holding(1, 1, 6, date(1, 1), "10")];
        let prices = vec![Price::new(Id::new(6), date(1, 2), dec("150"))];

        let err = share_value(&holdings, &prices).unwrap_err();
        assert_eq!(
            err,
            ValuationError::MissingPrice {
                commodity_id: Id::new(6),
                date: date(1, 1),
            }
        );
    }

    #[test]
    fn carries_shares_forward_onto_later_price_dates() {
        let holdings = vec![
            holding(1, 1, 6, date(1, 1), "10"),
            holding(1, 1, 6, date(1, 3), "12"),
        ];
        let prices = vec![
            Price::new(Id::new(6), date(1, 1), dec("100")),
            Price::new(Id::new(6), date(1, 2), dec("110")),
            Price::new(Id::new(6), date(1, 3), dec("120")),
            Price::new(Id::new(6), date(1, 4), dec("130")),
        ];

        let rows = share_value(&holdings, &prices).unwrap();
        let values: Vec<(NaiveDate, Decimal, Decimal)> =
            rows.iter().map(|r| (r.date, r.shares, r.value)).collect();

        assert_eq!(
            values,
            vec![
                (date(1, 1), dec("10"), dec("1000")),
                (date(1, 2), dec("10"), dec("1100")),
                (date(1, 3), dec("12"), dec("1440")),
                (date(1, 4), dec("12"), dec("1560")),
            ]
        );
    }

    #[test]
    fn oversized_value_is_an_overflow_error() {
        let holdings = vec![holding(1, 1, 6, date(1, 1), "100000000000000000000")];
        let prices = vec![Price::new(Id::new(6), date(1, 1), dec("10000000000"))];

        let err = share_value(&holdings, &prices).unwrap_err();
        assert_eq!(
            err,
            ValuationError::Overflow {
                commodity_id: Id::new(6),
                date: date(1, 1),
            }
        );
    }

    #[test]
    fn oversized_carried_value_is_an_overflow_error() {
        let holdings = vec![holding(1, 1, 6, date(1, 1), "100000000000000000000")];
        let prices = vec![
            Price::new(Id::new(6), date(1, 1), dec("1")),
            Price::new(Id::new(6), date(1, 2), dec("10000000000")),
        ];

        let err = share_value(&holdings, &prices).unwrap_err();
        assert_eq!(
            err,
            ValuationError::Overflow {
                commodity_id: Id::new(6),
                date: date(1, 2),
            }
        );
    }

    #[test]
    fn ignores_prices_before_first_holding() {
        let holdings = vec![holding(1, 1, 6, date(1, 5), "1")];
        let prices = vec![
            Price::new(Id::new(6), date(1, 1), dec("90")),
            Price::new(Id::new(6), date(1, 5), dec("100")),
        ];

        let rows = share_value(&holdings, &prices).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, date(1, 5));
    }

    #[test]
    fn sums_duplicate_records_on_the_same_date() {
        let holdings = vec![
            holding(1, 1, 6, date(1, 1), "10"),
            holding(1, 1, 6, date(1, 1), "5"),
        ];
        let prices = vec![
            Price::new(Id::new(6), date(1, 1), dec("2")),
            Price::new(Id::new(6), date(1, 2), dec("3")),
        ];

        let rows = share_value(&holdings, &prices).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].shares, rows[0].value), (dec("15"), dec("30")));
        assert_eq!((rows[1].shares, rows[1].value), (dec("15"), dec("45")));
    }

    #[test]
    fn keeps_positions_apart() {
        let holdings = vec![
            holding(1, 1, 6, date(1, 1), "1"),
            holding(1, 2, 6, date(1, 1), "2"),
            holding(2, 3, 8, date(1, 1), "3"),
        ];
        let prices = vec![
            Price::new(Id::new(6), date(1, 1), dec("10")),
            Price::new(Id::new(8), date(1, 1), dec("20")),
        ];

        let rows = share_value(&holdings, &prices).unwrap();
        let values: Vec<Decimal> = rows.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![dec("10"), dec("20"), dec("60")]);
    }
}
