mod config;
mod error;
mod render;
mod store;

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use larder_core::{Pantry, PantryState};
use larder_spoonacular::SpoonacularClient;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, load_api_key, load_config, resolve_store_config};
use crate::error::PantryToolError;
use crate::render::{render_detail, render_inventory, render_recipes};
use crate::store::{AnyStore, StoreType};

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Track pantry items, expiry dates and recipe ideas", long_about = None)]
struct Cli {
    /// Store type: fjall, rocks or firestore
    #[arg(long, global = true)]
    store_type: Option<StoreType>,

    /// Path to a local pantry store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every item with its expiry status
    List,

    /// Add one unit of an item, creating it if needed
    Add { name: String },

    /// Take away one unit of an item; the last unit removes it
    Remove { name: String },

    /// Create or overwrite an item with an exact quantity
    Set {
        name: String,

        quantity: u32,

        /// Expiry date
        #[arg(long, value_name = "YYYY-MM-DD")]
        expires: Option<NaiveDate>,
    },

    /// Remove an item entirely
    Delete { name: String },

    /// Suggest recipes that use the current inventory
    Recipes,

    /// Show the details of one recipe
    Recipe { id: u64 },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = load_config();
    let (store_type, store_path) = resolve_store_config(cli.store_type, cli.store, &config);
    let store = AnyStore::open(store_type, &store_path, &config)?;

    run(cli.command, Pantry::new(store), &config).await?;

    Ok(())
}

async fn run(
    command: Command,
    pantry: Pantry<AnyStore>,
    config: &Config,
) -> Result<(), PantryToolError> {
    let mut state = PantryState::new();

    match command {
        Command::List => state.apply(pantry.refresh().await)?,
        Command::Add { name } => state.apply(pantry.increment(&name).await)?,
        Command::Remove { name } => state.apply(pantry.decrement(&name).await)?,
        Command::Set {
            name,
            quantity,
            expires,
        } => state.apply(pantry.set_exact(&name, quantity, expires).await)?,
        Command::Delete { name } => state.apply(pantry.remove_completely(&name).await)?,
        Command::Recipes => {
            let client = SpoonacularClient::new(load_api_key(config)?);
            state.apply(pantry.refresh().await)?;
            state.show_recipes(client.suggest(state.inventory()).await);
            print!("{}", render_recipes(state.recipes()));
            return Ok(());
        }
        Command::Recipe { id } => {
            let client = SpoonacularClient::new(load_api_key(config)?);
            match client.details(id).await {
                Ok(detail) => state.open_detail(detail),
                Err(err) => warn!(recipe_id = id, error = %err, "Could not fetch recipe details"),
            }
            match state.detail() {
                Some(detail) => print!("{}", render_detail(detail)),
                None => println!("Recipe {} is unavailable.", id),
            }
            return Ok(());
        }
    }

    print!("{}", render_inventory(&state.rows(Utc::now())));
    Ok(())
}
