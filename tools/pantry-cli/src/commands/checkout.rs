//! Checkout command.

use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input};
use pantry_commerce::checkout::{Checkout, CustomerDetails, Order};
use pantry_commerce::view::CartView;
use serde::Serialize;

use super::CheckoutArgs;
use crate::channels::{PrintHandoff, WebhookChannel};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    // No display targets: the cart is shown once below, not again when
    // checkout clears it.
    let mut store = ctx.open_store(CartView::new())?;

    if store.cart().is_empty() {
        bail!("Cart is empty");
    }

    ctx.output.header("Checkout");
    let totals = store.totals()?;
    ctx.output.cart_table(store.cart().items(), &totals);
    ctx.output
        .delivery_notice(&store.policy().delivery_notice(totals.subtotal));

    let saved = store.saved_customer().unwrap_or_default();
    let customer = if args.yes {
        CustomerDetails::new(
            args.name.unwrap_or(saved.name),
            args.phone.unwrap_or(saved.phone),
            args.address.unwrap_or(saved.address),
        )
    } else {
        CustomerDetails::new(
            ask("Name", args.name, saved.name)?,
            ask("Phone", args.phone, saved.phone)?,
            ask("Address", args.address, saved.address)?,
        )
    };

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let settings = ctx.config.order_settings();
    let timeout = Duration::from_secs(ctx.config.order.webhook_timeout_secs);
    let webhook = WebhookChannel::new(ctx.config.order.webhook_url.clone(), timeout)
        .context("Failed to build HTTP client")?;
    let handoff = PrintHandoff::new(ctx.output);

    let order = match Checkout::new(&settings, &webhook, &handoff).submit(&mut store, &customer) {
        Ok(order) => order,
        Err(e) if e.is_user_facing() => bail!("{}", e),
        Err(e) => return Err(e).context("Checkout failed"),
    };

    if !webhook.is_idle() {
        let spinner = ctx.output.spinner("Recording order...");
        webhook.drain().await;
        spinner.finish_and_clear();
    }

    if ctx.output.is_json() {
        ctx.output.json(&CheckoutReport {
            order: &order,
            messaging_url: handoff.last_url(),
        });
    } else {
        ctx.output.success(&format!("Order {} placed", order.id()));
        ctx.output.kv("Total", &order.total().to_string());
    }

    Ok(())
}

/// Machine-readable checkout result for `--json`.
#[derive(Serialize)]
struct CheckoutReport<'a> {
    order: &'a Order,
    messaging_url: Option<String>,
}

/// Use the flag value if given, otherwise prompt with the saved value as default.
fn ask(prompt: &str, given: Option<String>, saved: String) -> Result<String> {
    if let Some(value) = given {
        return Ok(value);
    }
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if !saved.is_empty() {
        input = input.default(saved);
    }
    Ok(input.interact_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_commerce::cart::{compute_totals, Cart};
    use pantry_commerce::checkout::{MessagingHandoff, MessagingLink};
    use pantry_commerce::ids::OrderId;
    use pantry_commerce::Money;

    use crate::output::Output;

    #[test]
    fn test_json_report_carries_messaging_link() {
        let mut cart = Cart::new();
        cart.add_item("Turmeric (250g)", Money::new(180), 2);
        let order = Order::from_cart(
            OrderId::new("VL1234564321"),
            chrono::Local::now(),
            CustomerDetails::new("Lakshmi", "9848012345", "12 Temple St"),
            &cart,
            compute_totals(&cart).unwrap(),
        )
        .unwrap();

        let handoff = PrintHandoff::new(Output::new(true));
        let url = MessagingLink::whatsapp("919618082853").for_order(&order, "Vijayalakshmi Foods");
        handoff.open(&url);

        let report = serde_json::to_value(CheckoutReport {
            order: &order,
            messaging_url: handoff.last_url(),
        })
        .unwrap();
        assert_eq!(report["messaging_url"], url.as_str());
        assert_eq!(report["order"]["id"], "VL1234564321");
    }
}
