//! Page-level error types.

use thiserror::Error;
use turbo_cache::CacheError;
use turbo_reviews::ReviewError;

use crate::api::ApiError;

/// Errors surfaced by the product page.
///
/// `Display` is the message shown to the shopper.
#[derive(Error, Debug)]
pub enum PdpError {
    /// The product could not be loaded, even after retrying.
    #[error("Failed to load product. Please try again.")]
    ProductUnavailable(#[source] ApiError),

    #[error("Failed to load reviews. Please try again.")]
    ReviewsUnavailable(#[source] ApiError),

    /// The action needs a loaded product.
    #[error("Product is not loaded")]
    ProductNotLoaded,

    /// Draft or upload rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ReviewError),

    #[error("{}", rejection_message(.0, "Failed to submit review"))]
    Submission(#[source] ApiError),

    #[error("{}", rejection_message(.0, "Failed to upload images"))]
    Upload(#[source] ApiError),

    #[error("Failed to update favorites: {0}")]
    Favorites(#[from] CacheError),
}

/// Server-provided messages are shown as-is; anything else gets `fallback`.
fn rejection_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Rejected(message) => message.clone(),
        _ => fallback.to_string(),
    }
}
