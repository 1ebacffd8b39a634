//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use pantry_cache::{Cache, FileStore};
use pantry_commerce::store::CartStore;
use pantry_commerce::view::CartObserver;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative storage paths resolve against.
    pub base_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, base_dir) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (CliConfig::load(&path)?, base)
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        tracing::debug!(base = %base_dir.display(), "configuration loaded");
        Ok(Self {
            config,
            output,
            cwd,
            base_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(&config_path) {
                        Ok(config) => return Some((config, current)),
                        Err(e) => tracing::warn!(error = %format!("{:#}", e), "ignoring config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the cart and customer slots.
    pub fn storage_dir(&self) -> PathBuf {
        self.config.storage_dir(&self.base_dir)
    }

    /// Open the cart store, notifying `observer` on every change.
    pub fn open_store(
        &self,
        observer: impl CartObserver + 'static,
    ) -> Result<CartStore<FileStore>> {
        let dir = self.storage_dir();
        let backend = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;
        Ok(CartStore::load(Cache::new(backend), self.config.pricing).with_observer(observer))
    }
}
