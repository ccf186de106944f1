//! Device-local favorite products.

use turbo_cache::{Cache, CacheError, KeyValueStore};
use turbo_reviews::ProductId;

/// Favorites list kept as a JSON array of product ids under a single key.
pub struct Favorites<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// All favorite ids, in insertion order. A missing key is an empty list.
    pub fn list(&self) -> Result<Vec<ProductId>, CacheError> {
        Ok(self.cache.get(&self.key)?.unwrap_or_default())
    }

    pub fn contains(&self, id: &ProductId) -> Result<bool, CacheError> {
        Ok(self.list()?.contains(id))
    }

    /// Add or remove `id`, returning whether it is now a favorite.
    pub fn toggle(&self, id: &ProductId) -> Result<bool, CacheError> {
        let mut ids = self.list()?;
        let now_favorite = if ids.contains(id) {
            ids.retain(|fav| fav != id);
            false
        } else {
            ids.push(id.clone());
            true
        };
        self.cache.set(&self.key, &ids)?;
        Ok(now_favorite)
    }
}
