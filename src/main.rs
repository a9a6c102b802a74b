//! Larder CLI - kitchen inventory from the terminal
//!
//! Usage: larder <COMMAND>
//!
//! Commands:
//!   add        Track a new ingredient
//!   list       Show everything in the kitchen
//!   expiring   Show what needs attention soon
//!   recheck    Show stale ripeness assessments
//!   low-stock  Show items at or below one unit
//!   edit       Update a tracked ingredient
//!   grocery    Shopping-list workflow
//!   scan       Look up a barcode and track the product

mod commands;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use larder::config::{self, Config};
use larder::{Clock, InventoryStore, JsonSnapshotStore, OpenFoodFactsClient, SystemClock};

/// Larder - kitchen inventory tracker
#[derive(Parser, Debug)]
#[command(name = "larder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data directory holding the snapshot files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Machine-readable JSON output for report commands
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Track a new ingredient
    Add(AddArgs),

    /// Show everything in the kitchen
    List,

    /// Show what needs attention soon
    Expiring {
        /// Look-ahead window in days (defaults to the configured threshold)
        #[arg(long)]
        days: Option<i64>,
    },

    /// Show items whose ripeness assessment has gone stale
    Recheck,

    /// Show items at or below one unit
    LowStock,

    /// Update a tracked ingredient
    Edit(EditArgs),

    /// Shopping-list workflow
    #[command(subcommand)]
    Grocery(GroceryCommands),

    /// Look up a barcode and track the product
    Scan {
        /// Barcode digits as printed on the packaging
        barcode: String,

        /// Name to use instead of the product database's
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        draft: DraftArgs,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Ingredient name
    name: String,

    #[command(flatten)]
    draft: DraftArgs,
}

/// Optional ingredient details shared by `add`, `scan`, and `grocery stock`
#[derive(Args, Debug)]
struct DraftArgs {
    /// Brand name
    #[arg(long)]
    brand: Option<String>,

    /// Category (dairy, produce, ...)
    #[arg(long)]
    category: Option<String>,

    /// Where it is kept (fridge, pantry, ...)
    #[arg(long)]
    location: Option<String>,

    /// Confection type (fresh, canned, ...)
    #[arg(long)]
    confection: Option<String>,

    /// Expiration date (YYYY-MM-DD)
    #[arg(long)]
    expires: Option<String>,

    /// Quantity value
    #[arg(long)]
    quantity: Option<f64>,

    /// Quantity unit
    #[arg(long, default_value = "items")]
    unit: String,

    /// Track as frozen from the start
    #[arg(long)]
    frozen: bool,

    /// Track as already opened
    #[arg(long)]
    opened: bool,
}

#[derive(Args, Debug)]
struct EditArgs {
    /// Ingredient id (as shown by `larder list`)
    id: String,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New brand
    #[arg(long)]
    brand: Option<String>,

    /// New category
    #[arg(long)]
    category: Option<String>,

    /// New storage location
    #[arg(long)]
    location: Option<String>,

    /// New confection type
    #[arg(long)]
    confection: Option<String>,

    /// New expiration date (YYYY-MM-DD)
    #[arg(long)]
    expires: Option<String>,

    /// New quantity value
    #[arg(long)]
    quantity: Option<f64>,

    /// New quantity unit (requires --quantity unless one is already tracked)
    #[arg(long)]
    unit: Option<String>,

    /// Freeze (pushes a near expiry up to six months out)
    #[arg(long)]
    freeze: bool,

    /// Thaw
    #[arg(long, conflicts_with = "freeze")]
    unfreeze: bool,

    /// Mark opened
    #[arg(long)]
    open: bool,

    /// Record a ripeness assessment
    /// (none, green, ripe/mature, advanced, too ripe)
    #[arg(long)]
    ripeness: Option<String>,
}

#[derive(Subcommand, Debug)]
enum GroceryCommands {
    /// Quick-add an item to the shopping list
    Add { name: String },

    /// Show the shopping list and recently bought items
    List,

    /// Mark a shopping-list item as bought
    Buy { id: String },

    /// Turn a recently bought item into a tracked ingredient
    Stock {
        /// Recently-bought item id (as shown by `larder grocery list`)
        id: String,

        /// Name to use instead of the grocery item's
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        draft: DraftArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => match config::default_config_path() {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        },
    };

    let data_dir = resolve_data_dir(cli.data_dir)?;
    let mut store = InventoryStore::open(JsonSnapshotStore::new(data_dir), SystemClock);
    let now = SystemClock.now();

    match cli.command {
        Commands::Add(args) => commands::add(&mut store, args, now),
        Commands::List => {
            commands::list(&store);
            Ok(())
        }
        Commands::Expiring { days } => commands::expiring(
            &store,
            now,
            days.unwrap_or(config.expiring_days),
            cli.json,
        ),
        Commands::Recheck => commands::recheck(&store, now, cli.json),
        Commands::LowStock => commands::low_stock(&store, cli.json),
        Commands::Edit(args) => commands::edit(&mut store, args, now),
        Commands::Grocery(command) => commands::grocery(&mut store, command, now),
        Commands::Scan {
            barcode,
            name,
            draft,
        } => {
            let lookup =
                OpenFoodFactsClient::new(Duration::from_secs(config.lookup_timeout_secs));
            commands::scan(&mut store, &lookup, &barcode, name, &draft, now)
        }
    }
}

/// Flag wins, then `LARDER_DATA_DIR`, then the platform data directory.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Ok(dir) = std::env::var("LARDER_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    config::default_data_dir().context("could not determine a data directory; pass --data-dir")
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
