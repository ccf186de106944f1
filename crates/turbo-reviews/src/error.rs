//! Review error types.
//!
//! The resolver and aggregator are total and never fail; these errors only
//! cover validation of user input before it leaves the page.

use thiserror::Error;

/// Errors raised while preparing a review or its images for submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// Comment is empty or whitespace only.
    #[error("Please enter a review comment")]
    EmptyComment,

    /// Rating outside of 1..=5.
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    /// Upload batch would exceed the per-review image limit.
    #[error("Maximum {max} images allowed per review")]
    TooManyImages { max: usize },

    /// A single image is over the size limit.
    #[error("Image {name} is too large. Maximum size is {max_mb}MB")]
    ImageTooLarge { name: String, max_mb: u64 },

    /// File is not an image.
    #[error("{0} is not an image file")]
    NotAnImage(String),

    /// Image index does not exist in the pending list.
    #[error("No pending image at index {0}")]
    ImageIndexOutOfRange(usize),
}
