//! TurboCommerce product-detail page with review trust analytics.
//!
//! [`ProductPage`] loads a product and its reviews through the
//! [`StorefrontApi`] port, keeps the review feed's analytics current as
//! reviews arrive and handles review submission, image uploads and
//! favorites.
//!
//! ```rust,ignore
//! use turbo_cache::MemoryStore;
//! use turbo_pdp::prelude::*;
//!
//! let config = PdpConfig::load("pdp.toml")?;
//! let mut page = ProductPage::new("prod-1", storefront, MemoryStore::new(), &config);
//! page.load().await;
//!
//! for (review, indicator) in page.feed().indicators() {
//!     println!("{} {}", review.id, indicator.status);
//! }
//! println!("trust score: {}%", page.analytics().snapshot.trust_score);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod favorites;
pub mod http;
pub mod page;
pub mod retry;

pub use api::{ApiError, ProductDetail, StorefrontApi};
pub use config::PdpConfig;
pub use error::PdpError;
pub use page::ProductPage;

#[cfg(target_arch = "wasm32")]
pub use http::SpinStorefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{ApiError, ProductDetail, StorefrontApi};
    pub use crate::config::PdpConfig;
    pub use crate::error::PdpError;
    pub use crate::favorites::Favorites;
    pub use crate::page::ProductPage;
    pub use crate::retry::{BackoffStrategy, RetryPolicy};
    pub use turbo_reviews::prelude::*;
}
