//! Choice lists and validators for entry forms.

use serde::{Deserialize, Serialize};

use super::{Record, ViewError};
use crate::storage::Catalog;

/// Where a choice label comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    /// A column of the record itself.
    Direct(&'static str),
    /// A column of the row a relation points at.
    Related {
        relation: &'static str,
        field: &'static str,
    },
}

impl LabelField {
    pub fn resolve(&self, record: &dyn Record, catalog: &Catalog) -> Result<String, ViewError> {
        match *self {
            Self::Direct(field) => record.require_field(field),
            Self::Related { relation, field } => {
                record.related(relation, catalog)?.require_field(field)
            }
        }
    }
}

/// Keep only records whose `column` is one of `values`.
#[derive(Debug, Clone)]
pub struct ChoiceFilter {
    pub column: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// Build `(value, label)` choices from records.
///
/// Choices are ordered by the first label. With two or more labels the first
/// two are joined with ", ".
pub fn get_choices<R: Record>(
    records: &[R],
    catalog: &Catalog,
    value_field: &str,
    labels: &[LabelField],
    filter: Option<&ChoiceFilter>,
) -> Result<Vec<Choice>, ViewError> {
    let (first, second) = match labels {
        [] => return Err(ViewError::EmptyLabels),
        [first] => (first, None),
        [first, second, ..] => (first, Some(second)),
    };

    let mut keyed = Vec::with_capacity(records.len());
    for record in records {
        if let Some(filter) = filter {
            let value = record.require_field(&filter.column)?;
            if !filter.values.contains(&value) {
                continue;
            }
        }

        let order = first.resolve(record, catalog)?;
        let label = match second {
            Some(second) => format!("{}, {}", order, second.resolve(record, catalog)?),
            None => order.clone(),
        };
        let choice = Choice {
            value: record.require_field(value_field)?,
            label,
        };
        keyed.push((order, choice));
    }

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, choice)| choice).collect())
}

/// Pair each record's `value_field` with a column of its related row.
pub fn get_x_choices<R: Record>(
    records: &[R],
    catalog: &Catalog,
    value_field: &str,
    relation: &'static str,
    label_field: &'static str,
) -> Result<Vec<Choice>, ViewError> {
    let label = LabelField::Related {
        relation,
        field: label_field,
    };
    records
        .iter()
        .map(|record| {
            Ok(Choice {
                value: record.require_field(value_field)?,
                label: label.resolve(record, catalog)?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Validator {
    Required,
    AnyOf { values: Vec<String>, message: String },
}

impl Validator {
    pub fn any_of(mut values: Vec<String>) -> Self {
        values.sort();
        let message = format!("Invalid value, must be one of: {}", values.join(", "));
        Self::AnyOf { values, message }
    }

    pub fn validate(&self, input: Option<&str>) -> Result<(), ViewError> {
        match self {
            Self::Required => match input {
                Some(value) if !value.trim().is_empty() => Ok(()),
                _ => Err(ViewError::Validation(
                    "This field is required.".to_string(),
                )),
            },
            Self::AnyOf { values, message } => match input {
                Some(value) if values.iter().any(|v| v == value) => Ok(()),
                _ => Err(ViewError::Validation(message.clone())),
            },
        }
    }
}

/// Validators requiring a value drawn from the records' `value_field`.
pub fn get_validators<R: Record>(
    records: &[R],
    value_field: &str,
) -> Result<Vec<Validator>, ViewError> {
    let values = records
        .iter()
        .map(|record| record.require_field(value_field))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(vec![Validator::Required, Validator::any_of(values)])
}

/// Run every validator against an input, stopping at the first failure.
pub fn validate_all(validators: &[Validator], input: Option<&str>) -> Result<(), ViewError> {
    validators.iter().try_for_each(|v| v.validate(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Commodity, Id, Owner};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Owner::new(Id::new(1), "Reuben", "Cummings"),
                Owner::new(Id::new(2), "Ada", "Lovelace"),
            ],
            vec![
                Account::new(Id::new(1), "Scottrade", Id::new(1)),
                Account::new(Id::new(2), "Vanguard IRA", Id::new(1)),
                Account::new(Id::new(3), "Analytical", Id::new(2)),
            ],
            vec![
                Commodity::new(Id::new(6), "AAPL", "Apple"),
                Commodity::new(Id::new(1), "USD", "US Dollar"),
            ],
        )
    }

    fn owners(catalog: &Catalog) -> Vec<Owner> {
        catalog.owners().cloned().collect()
    }

    fn accounts(catalog: &Catalog) -> Vec<Account> {
        catalog.accounts().cloned().collect()
    }

    #[test]
    fn choices_join_two_labels_and_sort_by_first() {
        let catalog = catalog();
        let choices = get_choices(
            &owners(&catalog),
            &catalog,
            "id",
            &[LabelField::Direct("first_name"), LabelField::Direct("last_name")],
            None,
        )
        .unwrap();

        assert_eq!(
            choices,
            vec![
                Choice {
                    value: "2".to_string(),
                    label: "Ada, Lovelace".to_string(),
                },
                Choice {
                    value: "1".to_string(),
                    label: "Reuben, Cummings".to_string(),
                },
            ]
        );
    }

    #[test]
    fn choices_resolve_related_labels() {
        let catalog = catalog();
        let choices = get_choices(
            &accounts(&catalog),
            &catalog,
            "id",
            &[
                LabelField::Direct("name"),
                LabelField::Related {
                    relation: "owner",
                    field: "name",
                },
            ],
            None,
        )
        .unwrap();

        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Analytical, Ada Lovelace",
                "Scottrade, Reuben Cummings",
                "Vanguard IRA, Reuben Cummings",
            ]
        );
    }

    #[test]
    fn choices_apply_filter() {
        let catalog = catalog();
        let filter = ChoiceFilter {
            column: "owner_id".to_string(),
            values: vec!["2".to_string()],
        };
        let choices = get_choices(
            &accounts(&catalog),
            &catalog,
            "id",
            &[LabelField::Direct("name")],
            Some(&filter),
        )
        .unwrap();

        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].label, "Analytical");
    }

    #[test]
    fn choices_propagate_lookup_failures() {
        let catalog = catalog();
        let err = get_choices(
            &accounts(&catalog),
            &catalog,
            "id",
            &[LabelField::Direct("nickname")],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ViewError::UnknownField { .. }));

        let err = get_choices(&accounts(&catalog), &catalog, "id", &[], None).unwrap_err();
        assert_eq!(err, ViewError::EmptyLabels);
    }

    #[test]
    fn x_choices_pair_value_with_related_label() {
        let catalog = catalog();
        let choices =
            get_x_choices(&accounts(&catalog), &catalog, "name", "owner", "first_name").unwrap();

        assert_eq!(choices[0].value, "Scottrade");
        assert_eq!(choices[0].label, "Reuben");
        assert_eq!(choices[2].label, "Ada");
    }

    #[test]
    fn validators_require_known_values() {
        let catalog = catalog();
        let commodities: Vec<Commodity> = catalog.commodities().cloned().collect();
        let validators = get_validators(&commodities, "symbol").unwrap();

        assert_eq!(validators[0], Validator::Required);
        assert_eq!(
            validators[1],
            Validator::AnyOf {
                values: vec!["AAPL".to_string(), "USD".to_string()],
                message: "Invalid value, must be one of: AAPL, USD".to_string(),
            }
        );

        assert!(validate_all(&validators, Some("AAPL")).is_ok());
        assert_eq!(
            validate_all(&validators, Some("IBM")),
            Err(ViewError::Validation(
                "Invalid value, must be one of: AAPL, USD".to_string()
            ))
        );
        assert_eq!(
            validate_all(&validators, None),
            Err(ViewError::Validation("This field is required.".to_string()))
        );
    }
}
