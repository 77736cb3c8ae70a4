//! Cart commands.
//!
//! Each invocation constructs a fresh synchronizer over the file-backed id
//! store, so the cart follows the operator across invocations exactly as it
//! follows a shopper across page loads.

use std::error::Error;

use driftwood_core::{CartLineId, VariantId};
use driftwood_storefront::cart::{CartSync, FileStore};
use driftwood_storefront::config::StorefrontConfig;
use driftwood_storefront::shopify::StorefrontClient;

type LiveCart = CartSync<StorefrontClient, FileStore>;

fn build_sync() -> Result<LiveCart, Box<dyn Error>> {
    let config = StorefrontConfig::from_env()?;
    let client = StorefrontClient::new(&config.shopify);
    let store = FileStore::new(&config.cart_store_path);
    Ok(CartSync::new(client, store))
}

/// Fail the command if the last operation recorded an error, otherwise print
/// the resulting cart.
fn report(sync: &LiveCart) -> Result<(), Box<dyn Error>> {
    if let Some(message) = sync.error() {
        return Err(message.into());
    }
    print_cart(sync);
    Ok(())
}

fn print_cart(sync: &LiveCart) {
    let Some(cart) = sync.snapshot() else {
        println!("No cart.");
        return;
    };

    println!("Cart {}", cart.id);
    if cart.lines.is_empty() {
        println!("  (empty)");
    }
    for line in &cart.lines {
        println!(
            "  {} x{}  {} {}  [{}]",
            line.merchandise.product.title,
            line.quantity,
            line.merchandise.price.amount,
            line.merchandise.price.currency_code,
            line.id,
        );
    }
    println!(
        "Items: {}   Total: {} {}",
        sync.item_count(),
        sync.total(),
        cart.cost.total_amount.currency_code,
    );
}

pub async fn show() -> Result<(), Box<dyn Error>> {
    let sync = build_sync()?;
    sync.initialize().await;
    report(&sync)
}

pub async fn add(variant_id: &str, quantity: u32) -> Result<(), Box<dyn Error>> {
    let sync = build_sync()?;
    sync.add_line(VariantId::new(variant_id), quantity).await;
    report(&sync)
}

pub async fn update(line_id: &str, quantity: i64) -> Result<(), Box<dyn Error>> {
    let sync = build_sync()?;
    sync.initialize().await;
    if sync.error().is_some() {
        return report(&sync);
    }
    sync.update_line(&CartLineId::new(line_id), quantity).await;
    report(&sync)
}

pub async fn remove(line_id: &str) -> Result<(), Box<dyn Error>> {
    let sync = build_sync()?;
    sync.initialize().await;
    if sync.error().is_some() {
        return report(&sync);
    }
    sync.remove_line(&CartLineId::new(line_id)).await;
    report(&sync)
}

pub fn clear() -> Result<(), Box<dyn Error>> {
    let sync = build_sync()?;
    sync.clear();
    println!("Cart cleared.");
    Ok(())
}

pub async fn checkout() -> Result<(), Box<dyn Error>> {
    let sync = build_sync()?;
    sync.initialize().await;
    if let Some(message) = sync.error() {
        return Err(message.into());
    }

    match sync.snapshot() {
        Some(cart) => {
            println!("{}", cart.checkout_url);
            Ok(())
        }
        None => Err("No cart to check out".into()),
    }
}
