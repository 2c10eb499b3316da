use anyhow::Result;
use serde::Serialize;

use super::{plural, title_case, FormSpec, Record, Table, ViewError};
use crate::storage::Storage;

/// Column layout and rendered rows of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableListing {
    pub form_fields: Vec<String>,
    pub table_headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything a list-and-entry page for one table needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub id: String,
    pub title: String,
    pub heading: String,
    pub subheading: String,
    pub rows: Vec<Vec<String>>,
    pub form: Option<FormSpec>,
    pub form_caption: String,
    pub table_caption: String,
    pub table_headers: Vec<String>,
    pub form_fields: Vec<String>,
    pub post_location: String,
    pub post_table: Option<String>,
}

pub fn get_kwargs(
    table: Table,
    module: &str,
    listing: TableListing,
    form: Option<FormSpec>,
    post_table: bool,
) -> ViewModel {
    let id = table.as_str();
    let plural_table = plural(id).replace('_', " ");
    let table_title = title_case(id).replace('_', " ");

    ViewModel {
        id: id.to_string(),
        title: title_case(&plural_table),
        heading: format!("The {plural_table} database"),
        subheading: format!(
            "Add {plural_table} to the database and see them instantly updated in the lists below."
        ),
        rows: listing.rows,
        form,
        form_caption: format!("{table_title} Entry Form"),
        table_caption: format!("{table_title} List"),
        table_headers: listing.table_headers,
        form_fields: listing.form_fields,
        post_location: format!("{module}.add"),
        post_table: post_table.then(|| id.to_string()),
    }
}

fn render_rows<R: Record>(records: &[R], columns: &[&str]) -> Result<Vec<Vec<String>>, ViewError> {
    records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.require_field(column))
                .collect()
        })
        .collect()
}

/// Load a table from storage and lay it out for display.
pub async fn table_listing(storage: &dyn Storage, table: Table) -> Result<TableListing> {
    let columns = table.columns();
    let rows = match table {
        Table::Owner => render_rows(&storage.list_owners().await?, columns)?,
        Table::Account => render_rows(&storage.list_accounts().await?, columns)?,
        Table::Commodity => render_rows(&storage.list_commodities().await?, columns)?,
        Table::Holding => render_rows(&storage.get_holdings().await?, columns)?,
        Table::Price => render_rows(&storage.get_prices().await?, columns)?,
    };

    Ok(TableListing {
        form_fields: columns
            .iter()
            .filter(|c| **c != "id")
            .map(|c| c.to_string())
            .collect(),
        table_headers: columns
            .iter()
            .map(|c| title_case(c).replace('_', " "))
            .collect(),
        rows,
    })
}
