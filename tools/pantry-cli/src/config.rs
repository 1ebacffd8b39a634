//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pantry_commerce::cart::PricingPolicy;
use pantry_commerce::checkout::{OrderSettings, DEFAULT_SHOP_NAME};
use pantry_commerce::ids::DEFAULT_ORDER_PREFIX;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["pantry.toml", ".pantry.toml", "pantry.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Shop identity.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Delivery and minimum-order rules.
    #[serde(default)]
    pub pricing: PricingPolicy,

    /// Where orders go.
    #[serde(default)]
    pub order: OrderConfig,

    /// Where cart state lives.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Settings for the checkout flow.
    pub fn order_settings(&self) -> OrderSettings {
        OrderSettings {
            shop_name: self.shop.name.clone(),
            id_prefix: self.order.id_prefix.clone(),
            whatsapp_number: self.order.whatsapp_number.clone(),
        }
    }

    /// Storage directory, resolved against `base` when relative.
    pub fn storage_dir(&self, base: &Path) -> PathBuf {
        if self.storage.dir.is_absolute() {
            self.storage.dir.clone()
        } else {
            base.join(&self.storage.dir)
        }
    }
}

/// Shop identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Name printed at the top of order messages.
    #[serde(default = "default_shop_name")]
    pub name: String,
}

fn default_shop_name() -> String {
    DEFAULT_SHOP_NAME.to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: default_shop_name(),
        }
    }
}

/// Order routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Prefix for generated order identifiers.
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Messaging number, digits only with country code.
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,

    /// Order-intake webhook. Orders are only handed to messaging when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    /// Seconds to wait for the webhook before exiting.
    #[serde(default = "default_webhook_timeout")]
    pub webhook_timeout_secs: u64,
}

fn default_id_prefix() -> String {
    DEFAULT_ORDER_PREFIX.to_string()
}

fn default_whatsapp_number() -> String {
    OrderSettings::default().whatsapp_number
}

fn default_webhook_timeout() -> u64 {
    10
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            whatsapp_number: default_whatsapp_number(),
            webhook_url: None,
            webhook_timeout_secs: default_webhook_timeout(),
        }
    }
}

/// Cart storage location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the `cart` and `customer` slots.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".pantry")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Generate a default pantry.toml config file.
pub fn generate_default_config(shop_name: &str) -> String {
    format!(
        r#"# Pantry cart configuration

[shop]
name = "{shop_name}"

[pricing]
free_delivery_threshold = 1299
delivery_fee = 80
minimum_order = 99

[order]
id_prefix = "{prefix}"
whatsapp_number = "{number}"
# webhook_url = "https://script.google.com/macros/s/<deployment>/exec"
webhook_timeout_secs = 10

[storage]
dir = ".pantry"
"#,
        shop_name = shop_name,
        prefix = DEFAULT_ORDER_PREFIX,
        number = default_whatsapp_number(),
    )
}
