//! Terminal rendering for the cart and command feedback.
//!
//! In `--json` mode everything human-oriented is suppressed and only the
//! command's JSON report (or an error object) reaches stdout/stderr.

use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use pantry_commerce::cart::{CartTotals, DeliveryNotice, LineItem};
use pantry_commerce::view::CartView;

/// Column widths for the cart table: item, price, qty, amount.
const CART_COLUMNS: [usize; 4] = [32, 8, 5, 9];

/// Terminal writer shared by commands and cart observers.
#[derive(Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Informational line on stdout.
    pub fn info(&self, msg: &str) {
        self.status(style("ℹ").blue(), msg, false);
    }

    /// Confirmation line on stdout.
    pub fn success(&self, msg: &str) {
        self.status(style("✓").green(), msg, false);
    }

    /// Warning line on stderr.
    pub fn warn(&self, msg: &str) {
        self.status(style("⚠").yellow(), msg, true);
    }

    /// Error on stderr; a `{"error": ...}` object in JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    fn status(&self, icon: StyledObject<&str>, msg: &str, to_stderr: bool) {
        if self.json {
            return;
        }
        if to_stderr {
            eprintln!("{} {}", icon, msg);
        } else {
            println!("{} {}", icon, msg);
        }
    }

    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Labelled value, indented under a header.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    /// Pretty-printed JSON report; printed in every mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "failed to encode JSON report"),
        }
    }

    /// Spinner shown while waiting on the network; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(template);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Cart lines followed by subtotal, delivery and total.
    pub fn cart_table(&self, items: &[LineItem], totals: &CartTotals) {
        if self.json {
            return;
        }
        if items.is_empty() {
            self.info("Your cart is empty.");
            return;
        }

        print_row(&["ITEM", "PRICE", "QTY", "AMOUNT"]);
        for item in items {
            let amount = item
                .line_total()
                .map(|m| m.to_string())
                .unwrap_or_else(|_| "-".to_string());
            print_row(&[
                &item.name,
                &item.unit_price.to_string(),
                &item.quantity.to_string(),
                &amount,
            ]);
        }
        println!();
        self.kv("Subtotal", &totals.subtotal.to_string());
        self.kv("Delivery", &totals.delivery.to_string());
        println!("  {}: {}", style("Total").bold(), style(totals.total).bold());
    }

    pub fn delivery_notice(&self, notice: &DeliveryNotice) {
        if self.json {
            return;
        }
        match notice {
            DeliveryNotice::Free => {
                println!("  {} Delivery: {}", style("🚚").green(), style("FREE").green().bold())
            }
            _ => println!("  {}", style(notice.message()).dim()),
        }
    }

    pub fn badge(&self, count: i64) {
        if !self.json {
            println!("{} {} in cart", style("🛒").cyan(), style(count).bold());
        }
    }

    /// Full cart panel: badge, line list, delivery message and toasts.
    pub fn cart_panel(self) -> CartView {
        self.badge_only()
            .with_list(move |items: &[LineItem], totals: &CartTotals| self.cart_table(items, totals))
            .with_delivery(move |notice: &DeliveryNotice| self.delivery_notice(notice))
    }

    /// Badge and toasts only, as on a product page.
    pub fn badge_only(self) -> CartView {
        CartView::new()
            .with_badge(move |count: i64| self.badge(count))
            .with_toast(move |msg: &str| self.success(msg))
    }
}

fn print_row(cols: &[&str]) {
    let cells: Vec<String> = cols
        .iter()
        .zip(CART_COLUMNS)
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect();
    println!("  {}", cells.join("  "));
}
