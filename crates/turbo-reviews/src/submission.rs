//! Review drafts and image uploads, validated before they are sent.

use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// Rating a fresh review form starts with.
pub const DEFAULT_RATING: u8 = 5;

/// Body of a review submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
    /// URLs of images uploaded beforehand.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING,
            comment: String::new(),
            images: Vec::new(),
        }
    }
}

impl ReviewDraft {
    pub fn new(rating: u8, comment: impl Into<String>) -> Self {
        Self {
            rating,
            comment: comment.into(),
            images: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn validate(&self) -> Result<(), ReviewError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ReviewError::InvalidRating(self.rating));
        }
        if self.comment.trim().is_empty() {
            return Err(ReviewError::EmptyComment);
        }
        Ok(())
    }
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Per-review image limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLimits {
    #[serde(default = "default_max_images")]
    pub max_images: usize,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

fn default_max_images() -> usize {
    5
}

fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_images: default_max_images(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl UploadLimits {
    /// Check a batch against the limits, given how many images are already
    /// attached to the draft. The first violation wins.
    pub fn validate(&self, attached: usize, batch: &[ImageUpload]) -> Result<(), ReviewError> {
        if attached + batch.len() > self.max_images {
            return Err(ReviewError::TooManyImages {
                max: self.max_images,
            });
        }

        for upload in batch {
            if upload.size_bytes() > self.max_image_bytes {
                return Err(ReviewError::ImageTooLarge {
                    name: upload.file_name.clone(),
                    max_mb: self.max_image_bytes / (1024 * 1024),
                });
            }
            if !upload.is_image() {
                return Err(ReviewError::NotAnImage(upload.file_name.clone()));
            }
        }

        Ok(())
    }
}
