//! Command implementations behind the CLI. Each returns a value that the
//! binary prints as JSON.

mod config;
mod mutations;
mod view;
mod worth;

pub use config::config_output;
pub use mutations::{add_holding, add_price, seed};
pub use view::view_table;
pub use worth::worth;
