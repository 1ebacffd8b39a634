//! Cart editing commands.

use anyhow::Result;
use pantry_cache::KeyValueStore;
use pantry_commerce::cart::{Cart, CartTotals, DeliveryNotice, QuantityChange, SizeVariant};
use pantry_commerce::ids::ProductId;
use pantry_commerce::store::CartStore;
use pantry_commerce::Money;
use serde::Serialize;

use super::{AddArgs, QtyArgs, RemoveArgs};
use crate::context::Context;

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store(ctx.output.badge_only())?;
    let product = product_id(&args.name);
    let price = Money::new(args.price);

    // Stage the quantity the way a product card's +/- buttons would.
    store.stage_pending_quantity(&product, args.qty - 1);
    let added = match args.size {
        Some(size) => {
            store.commit_selected_variant(&product, &args.name, &SizeVariant::new(size, price))?
        }
        None => store.commit_pending_quantity(&product, args.name.as_str(), price)?,
    };

    tracing::debug!(product = %product, added, "added to cart");
    emit_json(ctx, &store)
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store(ctx.output.cart_panel())?;
    if !store.remove_item(&args.name)? {
        ctx.output.warn(&format!("'{}' is not in the cart", args.name));
    }
    emit_json(ctx, &store)
}

/// Run the qty command.
pub async fn qty(args: QtyArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store(ctx.output.cart_panel())?;
    match store.change_quantity(&args.name, args.delta)? {
        QuantityChange::Missing => {
            ctx.output.warn(&format!("'{}' is not in the cart", args.name))
        }
        QuantityChange::Removed => ctx.output.info(&format!("Removed '{}'", args.name)),
        QuantityChange::Updated(_) => {}
    }
    emit_json(ctx, &store)
}

/// Run the show command.
pub async fn show(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store(ctx.output.cart_panel())?;
    ctx.output.header("Your cart");
    store.refresh();
    emit_json(ctx, &store)
}

/// Run the clear command.
pub async fn clear(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store(ctx.output.badge_only())?;
    store.clear()?;
    ctx.output.success("Cart cleared");
    emit_json(ctx, &store)
}

/// Machine-readable cart state for `--json`.
#[derive(Serialize)]
struct CartReport<'a> {
    items: &'a Cart,
    count: i64,
    #[serde(flatten)]
    totals: CartTotals,
    delivery_notice: DeliveryNotice,
}

fn emit_json<S: KeyValueStore>(ctx: &Context, store: &CartStore<S>) -> Result<()> {
    if !ctx.output.is_json() {
        return Ok(());
    }
    let totals = store.totals()?;
    ctx.output.json(&CartReport {
        items: store.cart(),
        count: store.cart_count(),
        totals,
        delivery_notice: store.policy().delivery_notice(totals.subtotal),
    });
    Ok(())
}

/// Stable product key derived from a display name, e.g. `red-chilli-powder`.
pub fn product_id(name: &str) -> ProductId {
    let slug = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    ProductId::new(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_slug() {
        assert_eq!(product_id("Red Chilli Powder").as_str(), "red-chilli-powder");
        assert_eq!(product_id("  Turmeric (Organic) ").as_str(), "turmeric-organic");
    }
}
