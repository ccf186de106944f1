//! Key-value storage port for TurboCommerce pages.
//!
//! Page state that outlives a request (favorites, for instance) goes through
//! the [`KeyValueStore`] trait instead of a global. [`Cache`] adds automatic
//! JSON serialization on top of any store.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_cache::{Cache, SpinStore};
//!
//! // In a Spin component
//! let cache = Cache::new(SpinStore::open_default()?);
//!
//! cache.set("favorites", &favorites)?;
//! let favorites: Option<Vec<String>> = cache.get("favorites")?;
//! cache.delete("favorites")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{Cache, KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use kv::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KeyValueStore, MemoryStore};
}
