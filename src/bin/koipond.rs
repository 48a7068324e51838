//! Koipond CLI
//!
//! Loads an inventory document and queries the resulting database.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use koipond::{type_label, Catalogue, DataView, Database, InventoryConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "koipond")]
#[command(about = "Load and browse a personal inventory")]
#[command(version)]
struct Cli {
    /// Configuration file (koipond.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Inventory document (overrides data.path)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the document and print a summary
    Check,
    /// List every item
    Items,
    /// Show a single item
    Item {
        id: usize,
    },
    /// List populated collections
    Collections,
    /// List the items of a collection
    Collection {
        key: String,
    },
    /// List tags with item counts
    Tags,
    /// List the items carrying a tag
    Tag {
        tag: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match InventoryConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: InventoryConfig) -> anyhow::Result<()> {
    let path = cli.data.clone().unwrap_or_else(|| config.data_path());
    let file = File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
    let db = Database::load(BufReader::new(file))
        .with_context(|| format!("failed to decode database in {}", path.display()))?;

    let view = match cli.command {
        Commands::Check => {
            println!("✅ {} loaded", path.display());
            println!("   created:       {}", db.created());
            println!("   last modified: {}", db.last_modified());
            println!("   types:         {}", db.enabled_types().collect::<Vec<_>>().join(", "));
            println!("   items:         {}", db.items().len());
            println!("   collections:   {}", db.collections().len());
            println!("   tags:          {}", db.tag_counts().len());
            return Ok(());
        }
        Commands::Items => DataView::from(db.catalogue_of_everything()),
        Commands::Item { id } => match db.item(id) {
            Some(item) => DataView::from(item),
            None => bail!("item {} not found", id),
        },
        Commands::Collections => DataView::CollectionNames(db.collections()),
        Commands::Collection { key } => match db.collection_catalogue(&key) {
            Some(catalogue) => DataView::from(catalogue),
            None => bail!("collection {:?} not found", key),
        },
        Commands::Tags => DataView::TagCounts(db.tag_counts()),
        Commands::Tag { tag } => match db.tag_catalogue(&tag) {
            Some(catalogue) => DataView::from(catalogue),
            None => bail!("tag {:?} not found", tag),
        },
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

fn print_view(view: &DataView<'_>) {
    match view {
        DataView::Item(item) => {
            println!("{} #{}: {}", type_label(&item.type_key), item.id, item.label);
            for (key, value) in &item.metadata {
                println!("  {:<12} {}", key, value);
            }
        }
        DataView::Catalogue(catalogue) => print_catalogue(catalogue),
        DataView::TagCounts(counts) => {
            for (tag, count) in counts {
                println!("{:<20} {}", tag, count);
            }
        }
        DataView::CollectionNames(names) => {
            for (key, name) in names {
                println!("{:<20} {}", key, name);
            }
        }
    }
}

fn print_catalogue(catalogue: &Catalogue<'_>) {
    for (heading, items) in catalogue.groups() {
        if catalogue.has_multiple_groups() {
            println!("{}", heading);
        }
        for item in items {
            if catalogue.hides_tags() {
                println!("  {:>5}  {}", item.id, item.label);
            } else {
                println!("  {:>5}  {}  [{}]", item.id, item.label, item.tags().join(", "));
            }
        }
    }
}
