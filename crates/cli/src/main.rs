//! Driftwood CLI - cart tools for exercising the live store.
//!
//! Drives the same cart synchronization component the storefront uses, with
//! the active cart id persisted in a local file (`CART_STORE_PATH`, default
//! `.driftwood/cart-id`), so a cart built across invocations survives until
//! it is cleared or expires remotely.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart (creates one on first run)
//! dw-cli cart show
//!
//! # Add two of a variant
//! dw-cli cart add gid://shopify/ProductVariant/123 --quantity 2
//!
//! # Change a line's quantity (0 removes the line)
//! dw-cli cart update gid://shopify/CartLine/abc --quantity 3
//!
//! # Remove a line
//! dw-cli cart remove gid://shopify/CartLine/abc
//!
//! # Print the hosted checkout URL
//! dw-cli cart checkout
//!
//! # Forget the cart locally
//! dw-cli cart clear
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI's output is stdout
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dw-cli")]
#[command(author, version, about = "Driftwood CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and mutate the persistent shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart, creating one if none exists
    Show,
    /// Add a variant to the cart
    Add {
        /// Variant id (e.g. gid://shopify/ProductVariant/123)
        variant_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of an existing line (0 or less removes it)
    Update {
        /// Cart line id
        line_id: String,

        /// Target quantity
        #[arg(short, long)]
        quantity: i64,
    },
    /// Remove a line from the cart
    Remove {
        /// Cart line id
        line_id: String,
    },
    /// Forget the cart locally (no remote call)
    Clear,
    /// Print the hosted checkout URL for the current cart
    Checkout,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show().await?,
            CartAction::Add {
                variant_id,
                quantity,
            } => commands::cart::add(&variant_id, quantity).await?,
            CartAction::Update { line_id, quantity } => {
                commands::cart::update(&line_id, quantity).await?;
            }
            CartAction::Remove { line_id } => commands::cart::remove(&line_id).await?,
            CartAction::Clear => commands::cart::clear()?,
            CartAction::Checkout => commands::cart::checkout().await?,
        },
    }
    Ok(())
}
