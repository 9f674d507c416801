use anyhow::Context;
use tracing::info;

use target_orders::parse_orders_from_html;

/// Parse a saved orders-page snapshot and print the orders as indented JSON.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: target-orders <orders.html>")?;
    let html = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;

    let orders = parse_orders_from_html(&html)?;
    info!("Found {} orders", orders.len());

    println!("{}", orders.to_json_pretty()?);

    Ok(())
}
