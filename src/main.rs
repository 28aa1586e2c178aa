//! Vitrine storefront CLI
//!
//! Thin frontend over the cart core: it binds commands to the store's
//! logical actions, re-renders the cart view after every mutation, and
//! prints the outbound order link on checkout. Opening the link is left to
//! the user, the external collaborator here.

use std::{path::PathBuf, process};

use clap::{Args, Parser, Subcommand};
use tabled::{Table, Tabled, settings::Style};
use tracing_subscriber::EnvFilter;

use vitrine::{
    cart::CartStore,
    catalog::Catalog,
    checkout::{CheckoutFlow, Contact},
    config::StorefrontConfig,
    presenter::{self, CartView},
    storage::JsonFileStore,
};

/// Catalog bundled with the binary, used when no catalog path is
/// configured.
const CATALOG_FIXTURE_YAML: &str = include_str!("../fixtures/catalog.yml");

#[derive(Debug, Parser)]
#[command(name = "vitrine", about = "Quote-based storefront cart", long_about = None)]
struct Cli {
    /// Path of the storefront configuration file.
    #[arg(long, default_value = "vitrine.yml")]
    config: PathBuf,

    /// Override the persisted cart path.
    #[arg(long)]
    cart: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the product catalog.
    List,

    /// Add one unit of a catalog item to the cart.
    Add(ItemArgs),

    /// Adjust the quantity of a cart entry by a signed delta.
    Qty(QtyArgs),

    /// Remove a cart entry.
    Remove(ItemArgs),

    /// Show the cart.
    Show,

    /// Empty the cart.
    Clear,

    /// Submit the cart as an order message.
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct ItemArgs {
    /// Catalog item id.
    id: String,
}

#[derive(Debug, Args)]
struct QtyArgs {
    /// Cart entry id.
    id: String,

    /// Signed quantity delta, typically 1 or -1.
    #[arg(allow_hyphen_values = true)]
    delta: i32,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Customer name.
    #[arg(long)]
    name: String,

    /// Contact phone number.
    #[arg(long)]
    phone: String,

    /// Contact email address.
    #[arg(long)]
    email: String,

    /// Delivery city.
    #[arg(long)]
    city: String,

    /// Optional free-form note.
    #[arg(long)]
    observation: Option<String>,
}

/// Catalog row as printed by `list`.
#[derive(Tabled)]
struct CatalogRow {
    /// Item id.
    #[tabled(rename = "ID")]
    id: String,

    /// Display name.
    #[tabled(rename = "Name")]
    name: String,

    /// Shelf price.
    #[tabled(rename = "Price")]
    price: String,
}

/// Cart row as printed by `show` and after every mutation.
#[derive(Tabled)]
struct CartTableRow {
    /// Entry id.
    #[tabled(rename = "ID")]
    id: String,

    /// Display name.
    #[tabled(rename = "Name")]
    name: String,

    /// Units in the cart.
    #[tabled(rename = "Qty")]
    quantity: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vitrine=warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = StorefrontConfig::load(&cli.config)
        .map_err(|error| format!("failed to load configuration: {error}"))?;

    if let Some(cart_path) = cli.cart {
        config.cart_path = cart_path;
    }

    let mut store = CartStore::open(JsonFileStore::new(&config.cart_path));

    match cli.command {
        Commands::List => {
            let catalog = load_catalog(&config)?;
            print_catalog(&catalog);
        }
        Commands::Add(args) => {
            let catalog = load_catalog(&config)?;
            let item = catalog
                .get(&args.id)
                .ok_or_else(|| format!("unknown catalog id: {}", args.id))?;

            store.add(&item.id, &item.name);
            print_cart(&presenter::render(store.snapshot()));
        }
        Commands::Qty(args) => {
            store.change_quantity(&args.id, args.delta);
            print_cart(&presenter::render(store.snapshot()));
        }
        Commands::Remove(args) => {
            store.remove(&args.id);
            print_cart(&presenter::render(store.snapshot()));
        }
        Commands::Show => {
            print_cart(&presenter::render(store.snapshot()));
        }
        Commands::Clear => {
            store.clear();
            print_cart(&presenter::render(store.snapshot()));
        }
        Commands::Checkout(args) => checkout(&mut store, &config, args)?,
    }

    Ok(())
}

fn checkout(
    store: &mut CartStore<JsonFileStore>,
    config: &StorefrontConfig,
    args: CheckoutArgs,
) -> Result<(), String> {
    let contact = Contact {
        name: args.name,
        phone: args.phone,
        email: args.email,
        city: args.city,
        observation: args.observation,
    };

    let mut flow = CheckoutFlow::new();
    flow.open_cart();
    flow.open_checkout(store.snapshot())
        .map_err(|error| error.to_string())?;

    let request = flow
        .submit(store, &contact, config)
        .map_err(|error| error.to_string())?;

    println!("{}", request.message);
    println!();
    println!("Open this link to send your order:");
    println!("{}", request.url);

    Ok(())
}

fn load_catalog(config: &StorefrontConfig) -> Result<Catalog, String> {
    let yaml = match &config.catalog_path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|error| format!("failed to read catalog {}: {error}", path.display()))?,
        None => CATALOG_FIXTURE_YAML.to_owned(),
    };

    Catalog::from_yaml(&yaml).map_err(|error| format!("failed to load catalog: {error}"))
}

fn print_catalog(catalog: &Catalog) {
    let rows: Vec<CatalogRow> = catalog
        .iter()
        .map(|item| CatalogRow {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price().to_string(),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
}

fn print_cart(view: &CartView) {
    if let Some(message) = view.empty_message {
        println!("{message}");
        return;
    }

    let rows: Vec<CartTableRow> = view
        .rows
        .iter()
        .map(|row| CartTableRow {
            id: row.id.clone(),
            name: row.name.clone(),
            quantity: row.quantity,
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
    println!("{} item(s) in cart - total: {}", view.badge_count, view.total_label);
}
