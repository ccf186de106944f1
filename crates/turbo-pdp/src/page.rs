//! Product-detail page controller.
//!
//! Owns the page state (product, review feed, pending uploads, favorite
//! flag) and drives it through the [`StorefrontApi`] port.

use turbo_cache::KeyValueStore;
use turbo_reviews::analytics::{AnalyticsEnrichment, ProductAnalytics};
use turbo_reviews::feed::ReviewFeed;
use turbo_reviews::review::Review;
use turbo_reviews::submission::{ImageUpload, ReviewDraft, UploadLimits};
use turbo_reviews::{ProductId, ReviewError, UserId};

use crate::api::{ProductDetail, StorefrontApi};
use crate::config::PdpConfig;
use crate::error::PdpError;
use crate::favorites::Favorites;
use crate::retry::RetryPolicy;

/// Reviews plus whatever enrichment arrived with them.
type FeedLoad = (Vec<Review>, Option<AnalyticsEnrichment>);

/// State of one product-detail page.
pub struct ProductPage<A, S> {
    api: A,
    favorites: Favorites<S>,
    retry: RetryPolicy,
    upload_limits: UploadLimits,
    product_id: ProductId,
    current_user: Option<UserId>,

    product: Option<ProductDetail>,
    error: Option<String>,
    reviews_error: Option<String>,
    feed: ReviewFeed,
    pending_images: Vec<String>,
    is_favorite: bool,
    has_user_reviewed: bool,
}

impl<A: StorefrontApi, S: KeyValueStore> ProductPage<A, S> {
    pub fn new(product_id: impl Into<ProductId>, api: A, store: S, config: &PdpConfig) -> Self {
        Self {
            api,
            favorites: Favorites::new(store, config.favorites.key.clone()),
            retry: config.retry_policy(),
            upload_limits: config.uploads,
            product_id: product_id.into(),
            current_user: None,
            product: None,
            error: None,
            reviews_error: None,
            feed: ReviewFeed::new(),
            pending_images: Vec::new(),
            is_favorite: false,
            has_user_reviewed: false,
        }
    }

    /// Identify the signed-in shopper, so their existing review is detected.
    pub fn with_current_user(mut self, user: impl Into<UserId>) -> Self {
        self.current_user = Some(user.into());
        self
    }

    /// Load the product and its reviews in parallel.
    ///
    /// Failures are recorded on the page (`error`, `reviews_error`) rather
    /// than returned; the two loads do not affect each other.
    pub async fn load(&mut self) {
        tracing::info!(product_id = %self.product_id, "loading product page");

        let (product, feed) = futures::join!(self.fetch_product(), self.fetch_feed());

        let _ = self.apply_product(product);
        let _ = self.apply_feed(feed);
    }

    /// Load (or reload) only the product.
    pub async fn load_product(&mut self) -> Result<&ProductDetail, PdpError> {
        let result = self.fetch_product().await;
        self.apply_product(result)
    }

    /// Load (or reload) only the reviews and their analytics.
    pub async fn load_reviews(&mut self) -> Result<&ReviewFeed, PdpError> {
        let result = self.fetch_feed().await;
        self.apply_feed(result)
    }

    async fn fetch_product(&self) -> Result<ProductDetail, PdpError> {
        let api = &self.api;
        let id = &self.product_id;

        self.retry
            .run(move |attempt| {
                tracing::debug!(product_id = %id, attempt, "fetching product");
                api.fetch_product(id)
            })
            .await
            .map_err(PdpError::ProductUnavailable)
    }

    async fn fetch_feed(&self) -> Result<FeedLoad, PdpError> {
        let reviews = self
            .api
            .fetch_reviews(&self.product_id)
            .await
            .map_err(PdpError::ReviewsUnavailable)?;

        let enrichment = match self.api.fetch_analytics(&self.product_id).await {
            Ok(enrichment) => enrichment,
            Err(error) => {
                tracing::warn!(
                    product_id = %self.product_id,
                    error = %error,
                    "analytics enrichment unavailable, using local analytics"
                );
                None
            }
        };

        Ok((reviews, enrichment))
    }

    fn apply_product(
        &mut self,
        result: Result<ProductDetail, PdpError>,
    ) -> Result<&ProductDetail, PdpError> {
        match result {
            Ok(product) => {
                self.is_favorite = match self.favorites.contains(&product.id) {
                    Ok(is_favorite) => is_favorite,
                    Err(error) => {
                        tracing::warn!(product_id = %product.id, error = %error, "could not read favorites");
                        false
                    }
                };
                self.error = None;
                tracing::info!(
                    product_id = %product.id,
                    num_reviews = product.num_reviews,
                    "product loaded"
                );
                Ok(self.product.insert(product))
            }
            Err(error) => {
                tracing::error!(product_id = %self.product_id, error = ?error, "product load failed");
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    fn apply_feed(&mut self, result: Result<FeedLoad, PdpError>) -> Result<&ReviewFeed, PdpError> {
        match result {
            Ok((reviews, enrichment)) => {
                self.feed.replace(reviews);
                if let Some(enrichment) = enrichment {
                    self.feed.merge_enrichment(enrichment);
                }
                self.reviews_error = None;
                if let Some(user) = &self.current_user {
                    self.has_user_reviewed = self.feed.has_review_by(user);
                }

                let snapshot = self.feed.snapshot();
                tracing::info!(
                    product_id = %self.product_id,
                    total_reviews = snapshot.total_reviews,
                    genuine = snapshot.genuine,
                    suspicious = snapshot.suspicious,
                    trust_score = %snapshot.trust_score,
                    enriched = self.feed.analytics().enrichment.is_some(),
                    "reviews loaded"
                );
                Ok(&self.feed)
            }
            Err(error) => {
                tracing::error!(product_id = %self.product_id, error = ?error, "reviews load failed");
                self.reviews_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Submit a review with the pending images attached.
    ///
    /// The draft is validated before any request. On success the review is
    /// prepended to the feed, analytics are recomputed and the product's
    /// running rating is updated. Submissions are never retried.
    pub async fn submit_review(&mut self, draft: ReviewDraft) -> Result<(), PdpError> {
        draft.validate()?;

        let mut draft = draft;
        draft.images.extend(self.pending_images.iter().cloned());

        let review = self
            .api
            .submit_review(&self.product_id, &draft)
            .await
            .map_err(|error| {
                tracing::warn!(product_id = %self.product_id, error = %error, "review submission failed");
                PdpError::Submission(error)
            })?;

        self.feed.prepend(review);
        if let Some(product) = self.product.as_mut() {
            product.record_review(draft.rating);
        }
        self.pending_images.clear();
        self.has_user_reviewed = true;

        tracing::info!(
            product_id = %self.product_id,
            rating = draft.rating,
            images = draft.images.len(),
            total_reviews = self.feed.len(),
            "review submitted"
        );
        Ok(())
    }

    /// Validate and upload images, appending their URLs to the pending list.
    ///
    /// Returns how many images were added.
    pub async fn upload_images(&mut self, uploads: &[ImageUpload]) -> Result<usize, PdpError> {
        if uploads.is_empty() {
            return Ok(0);
        }

        self.upload_limits
            .validate(self.pending_images.len(), uploads)?;

        let urls = self
            .api
            .upload_images(uploads)
            .await
            .map_err(|error| {
                tracing::warn!(files = uploads.len(), error = %error, "image upload failed");
                PdpError::Upload(error)
            })?;

        let added = urls.len();
        self.pending_images.extend(urls);
        tracing::debug!(added, pending = self.pending_images.len(), "images uploaded");
        Ok(added)
    }

    /// Drop a pending image by position.
    pub fn remove_image(&mut self, index: usize) -> Result<String, PdpError> {
        if index >= self.pending_images.len() {
            return Err(ReviewError::ImageIndexOutOfRange(index).into());
        }
        Ok(self.pending_images.remove(index))
    }

    /// Flip the loaded product's favorite flag and persist it.
    pub fn toggle_favorite(&mut self) -> Result<bool, PdpError> {
        let product = self.product.as_ref().ok_or(PdpError::ProductNotLoaded)?;
        self.is_favorite = self.favorites.toggle(&product.id)?;
        tracing::debug!(product_id = %product.id, is_favorite = self.is_favorite, "favorite toggled");
        Ok(self.is_favorite)
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product(&self) -> Option<&ProductDetail> {
        self.product.as_ref()
    }

    /// Product load error message, if the last load failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Review load error message, if the last load failed.
    pub fn reviews_error(&self) -> Option<&str> {
        self.reviews_error.as_deref()
    }

    pub fn feed(&self) -> &ReviewFeed {
        &self.feed
    }

    pub fn analytics(&self) -> &ProductAnalytics {
        self.feed.analytics()
    }

    pub fn pending_images(&self) -> &[String] {
        &self.pending_images
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn has_user_reviewed(&self) -> bool {
        self.has_user_reviewed
    }
}
