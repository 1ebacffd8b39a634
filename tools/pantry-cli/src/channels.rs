//! Concrete order channels for the terminal.

use std::cell::RefCell;
use std::time::Duration;

use pantry_commerce::checkout::{MessagingHandoff, OrderChannel, OrderPayload};
use tokio::task::JoinHandle;

use crate::output::Output;

/// Posts orders to the order-intake webhook.
///
/// Each submission runs on its own task; the result is only logged.
pub struct WebhookChannel {
    client: reqwest::Client,
    url: Option<String>,
    in_flight: RefCell<Vec<JoinHandle<()>>>,
}

impl WebhookChannel {
    /// Create a channel. With no URL, submissions are skipped.
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            in_flight: RefCell::new(Vec::new()),
        })
    }

    /// Wait for outstanding submissions so the process does not exit under them.
    pub async fn drain(&self) {
        let handles: Vec<_> = self.in_flight.borrow_mut().drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "webhook task failed");
            }
        }
    }

    /// Whether any submission is outstanding.
    pub fn is_idle(&self) -> bool {
        self.in_flight.borrow().is_empty()
    }
}

impl OrderChannel for WebhookChannel {
    fn submit(&self, payload: &OrderPayload) {
        let Some(url) = self.url.clone() else {
            tracing::info!(order_id = %payload.order_id, "no webhook configured; skipping order record");
            return;
        };

        let client = self.client.clone();
        let body = payload.clone();
        let handle = tokio::spawn(async move {
            match client.post(&url).json(&body).send().await {
                Ok(resp) => {
                    tracing::debug!(order_id = %body.order_id, status = %resp.status(), "webhook delivered")
                }
                Err(e) => {
                    tracing::warn!(order_id = %body.order_id, error = %e, "webhook delivery failed")
                }
            }
        });
        self.in_flight.borrow_mut().push(handle);
    }
}

/// Hands the messaging link to the shopper by printing it.
///
/// The last link is kept so `--json` reports can carry it instead.
pub struct PrintHandoff {
    output: Output,
    last_url: RefCell<Option<String>>,
}

impl PrintHandoff {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            last_url: RefCell::new(None),
        }
    }

    /// The most recent link handed off, if any.
    pub fn last_url(&self) -> Option<String> {
        self.last_url.borrow().clone()
    }
}

impl MessagingHandoff for PrintHandoff {
    fn open(&self, url: &str) {
        self.last_url.replace(Some(url.to_string()));
        if self.output.is_json() {
            return;
        }
        self.output.info("Send this message to confirm your order:");
        println!("  {}", url);
    }
}
