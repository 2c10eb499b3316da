use serde::Serialize;

use super::{get_choices, get_validators, Choice, LabelField, Table, Validator, ViewError};
use crate::models::{Account, Commodity, Owner};
use crate::storage::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    pub validators: Vec<Validator>,
}

impl FormField {
    fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            choices: None,
            validators: vec![Validator::Required],
        }
    }

    fn select(name: &str, choices: Vec<Choice>) -> Self {
        let values = choices.iter().map(|c| c.value.clone()).collect();
        Self {
            name: name.to_string(),
            choices: Some(choices),
            validators: vec![Validator::Required, Validator::any_of(values)],
        }
    }
}

/// Entry form for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSpec {
    pub table: Table,
    pub fields: Vec<FormField>,
}

impl FormSpec {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn owner_choices(owners: &[Owner], catalog: &Catalog) -> Result<Vec<Choice>, ViewError> {
    get_choices(
        owners,
        catalog,
        "id",
        &[LabelField::Direct("first_name"), LabelField::Direct("last_name")],
        None,
    )
}

fn account_choices(accounts: &[Account], catalog: &Catalog) -> Result<Vec<Choice>, ViewError> {
    get_choices(
        accounts,
        catalog,
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
}

fn commodity_choices(
    commodities: &[Commodity],
    catalog: &Catalog,
) -> Result<Vec<Choice>, ViewError> {
    get_choices(
        commodities,
        catalog,
        "id",
        &[LabelField::Direct("symbol")],
        None,
    )
}

/// Build the entry form for `table`, with choice lists drawn from `catalog`.
pub fn build_form(table: Table, catalog: &Catalog) -> Result<FormSpec, ViewError> {
    let owners: Vec<Owner> = catalog.owners().cloned().collect();
    let accounts: Vec<Account> = catalog.accounts().cloned().collect();
    let commodities: Vec<Commodity> = catalog.commodities().cloned().collect();

    let fields = match table {
        Table::Owner => vec![
            FormField::text("first_name"),
            FormField::text("last_name"),
            FormField {
                name: "email".to_string(),
                choices: None,
                validators: Vec::new(),
            },
        ],
        Table::Account => vec![
            FormField::text("name"),
            FormField::select("owner_id", owner_choices(&owners, catalog)?),
        ],
        Table::Commodity => vec![FormField::text("symbol"), FormField::text("name")],
        Table::Holding => vec![
            FormField::select("owner_id", owner_choices(&owners, catalog)?),
            FormField::select("account_id", account_choices(&accounts, catalog)?),
            FormField::select("commodity_id", commodity_choices(&commodities, catalog)?),
            FormField::text("date"),
            FormField::text("shares"),
        ],
        Table::Price => vec![
            FormField {
                name: "commodity".to_string(),
                choices: None,
                validators: get_validators(&commodities, "symbol")?,
            },
            FormField::text("date"),
            FormField::text("native_price"),
        ],
    };

    Ok(FormSpec { table, fields })
}

/// Check submitted values against a form, reporting the first failing field.
pub fn validate_form(
    form: &FormSpec,
    input: impl Fn(&str) -> Option<String>,
) -> Result<(), ViewError> {
    for field in &form.fields {
        let value = input(&field.name);
        for validator in &field.validators {
            validator
                .validate(value.as_deref())
                .map_err(|err| ViewError::Validation(format!("{}: {err}", field.name)))?;
        }
    }
    Ok(())
}
