//! Type-safe Key-Value persistence layer for the Pantry cart.
//!
//! Provides a small, ergonomic API for keeping cart state in a durable
//! key-value slot with automatic JSON serialization. Two backends ship with
//! the crate: an in-memory store for tests and embedding, and a file-backed
//! store that keeps one JSON document per key.
//!
//! # Example
//!
//! ```rust,no_run
//! use pantry_cache::{Cache, FileStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default)]
//! struct Cart {
//!     items: Vec<String>,
//! }
//!
//! let cache = Cache::new(FileStore::open(".pantry")?);
//!
//! // Store a value
//! cache.set("cart", &Cart::default())?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = cache.get("cart")?;
//!
//! // Delete a value
//! cache.delete("cart")?;
//! # Ok::<(), pantry_cache::CacheError>(())
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
