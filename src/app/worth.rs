use std::sync::Arc;

use anyhow::Result;

use crate::config::ResolvedConfig;
use crate::portfolio::{DateMode, Grouping, WorthOutput, WorthQuery, WorthService};
use crate::storage::Storage;

/// Run the worth pipeline, filling unset options from config.
pub async fn worth(
    storage: Arc<dyn Storage>,
    config: &ResolvedConfig,
    how: Option<&str>,
    mode: Option<&str>,
    convert: bool,
) -> Result<WorthOutput> {
    let grouping = match how {
        Some(how) => how.parse::<Grouping>()?,
        None => config.worth.default_grouping,
    };
    let mode = match mode {
        Some(mode) => mode.parse::<DateMode>()?,
        None => config.worth.default_mode,
    };

    let query = WorthQuery {
        grouping,
        mode,
        convert,
    };
    WorthService::new(storage).calc_worth(&query).await
}
