//! Corner Shop CLI - Browse the catalog and manage a local cart.
//!
//! # Usage
//!
//! ```bash
//! # List products, best sellers first
//! cs-cli products list --sort best-selling
//!
//! # Show a product with its options and variants
//! cs-cli products show classic-tee
//!
//! # Search by title prefix or tag
//! cs-cli search tee
//!
//! # Add a variant to the cart
//! cs-cli cart add classic-tee -o Color=Red -o Size=M -q 2
//!
//! # Show, update, and remove cart lines
//! cs-cli cart show
//! cs-cli cart update gid://shopify/ProductVariant/1 3
//! cs-cli cart remove gid://shopify/ProductVariant/1
//! ```
//!
//! The cart is stored in `CART_STORAGE_DIR` (default `.corner-shop`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Corner Shop catalog and cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Search products by title prefix or tag
    Search {
        /// Search term
        term: String,

        #[command(flatten)]
        sort: SortArgs,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List the first page of products
    List {
        #[command(flatten)]
        sort: SortArgs,
    },
    /// Show a product's options, variants, and recommendations
    Show {
        /// Product handle
        handle: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines, subtotal, and free-shipping progress
    Show,
    /// Add a product variant to the cart
    Add {
        /// Product handle
        handle: String,

        /// Option selection as NAME=VALUE (repeatable)
        #[arg(short = 'o', long = "option", value_parser = commands::parse_option_pair)]
        options: Vec<(String, String)>,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a line by variant ID
    Remove {
        /// Variant ID
        id: String,
    },
    /// Set a line's quantity (0 or less removes it)
    Update {
        /// Variant ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
}

#[derive(clap::Args)]
struct SortArgs {
    /// Sort key (relevance, title, price, best-selling, created-at, ...)
    #[arg(short, long, default_value = "relevance")]
    sort: String,

    /// Reverse the sort order
    #[arg(short, long)]
    reverse: bool,
}

#[tokio::main]
async fn main() {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List { sort } => {
                commands::catalog::list(&sort.sort, sort.reverse).await?;
            }
            ProductsAction::Show { handle } => commands::catalog::show(&handle).await?,
        },
        Commands::Search { term, sort } => {
            commands::catalog::search(&term, &sort.sort, sort.reverse).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add {
                handle,
                options,
                quantity,
            } => commands::cart::add(&handle, &options, quantity).await?,
            CartAction::Remove { id } => commands::cart::remove(&id)?,
            CartAction::Update { id, quantity } => commands::cart::update(&id, quantity)?,
        },
    }
    Ok(())
}
