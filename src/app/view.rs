use anyhow::Result;

use crate::storage::{Catalog, Storage};
use crate::views::{build_form, get_kwargs, table_listing, Table, ViewModel};

/// Assemble the list-and-entry view model for a table.
pub async fn view_table(
    storage: &dyn Storage,
    table: &str,
    module: &str,
    post_table: bool,
) -> Result<ViewModel> {
    let table: Table = table.parse()?;
    let listing = table_listing(storage, table).await?;
    let catalog = Catalog::load(storage).await?;
    let form = build_form(table, &catalog)?;

    Ok(get_kwargs(table, module, listing, Some(form), post_table))
}
