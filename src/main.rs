use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use worthbook::app;
use worthbook::config::{default_config_path, ResolvedConfig};
use worthbook::storage::{JsonFileStorage, Storage};

#[derive(Parser)]
#[command(name = "worthbook")]
#[command(about = "Track holdings and prices, and report portfolio worth")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current configuration
    Config,

    /// Write the default owners, accounts and commodities
    Seed {
        /// Also add the demo securities
        #[arg(long)]
        populate: bool,
    },

    /// Record shares of a commodity held in an account
    AddHolding {
        /// Owner id or name
        #[arg(long)]
        owner: String,
        /// Account id or name
        #[arg(long)]
        account: String,
        /// Commodity id or symbol
        #[arg(long)]
        commodity: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[arg(long)]
        shares: String,
    },

    /// Record a commodity's native price on a date
    AddPrice {
        /// Commodity id or symbol
        #[arg(long)]
        commodity: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[arg(long)]
        price: String,
    },

    /// Report worth on a single valuation date
    Worth {
        /// Grouping: own, act, stock, own_stock, act_stock, own_act
        #[arg(long)]
        how: Option<String>,
        /// Date selection: latest or uniform
        #[arg(long)]
        mode: Option<String>,
        /// Include labelled, two-decimal records
        #[arg(long)]
        convert: bool,
    },

    /// Show the list-and-entry view model for a table
    View {
        /// owner, account, commodity, holding or price
        table: String,
        /// Module the entry form posts to
        #[arg(long, default_value = "apollo")]
        module: String,
        /// Leave post_table unset
        #[arg(long)]
        no_post_table: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = ResolvedConfig::load_or_default(&config_path)?;
    let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::new(&config.data_dir));

    match cli.command {
        Command::Config => print_json(&app::config_output(&config_path, &config)),
        Command::Seed { populate } => print_json(&app::seed(storage.as_ref(), populate).await?),
        Command::AddHolding {
            owner,
            account,
            commodity,
            date,
            shares,
        } => {
            let output =
                app::add_holding(storage.as_ref(), &owner, &account, &commodity, &date, &shares)
                    .await?;
            print_json(&output)
        }
        Command::AddPrice {
            commodity,
            date,
            price,
        } => print_json(&app::add_price(storage.as_ref(), &commodity, &date, &price).await?),
        Command::Worth { how, mode, convert } => {
            let output = app::worth(
                storage,
                &config,
                how.as_deref(),
                mode.as_deref(),
                convert,
            )
            .await?;
            print_json(&output)
        }
        Command::View {
            table,
            module,
            no_post_table,
        } => {
            let view = app::view_table(storage.as_ref(), &table, &module, !no_post_table).await?;
            print_json(&view)
        }
    }
}
