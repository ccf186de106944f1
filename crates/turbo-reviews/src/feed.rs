//! In-memory review collection of a product page.
//!
//! The feed is the single owner of the collection and of the analytics
//! derived from it. Every change re-runs the aggregation over the whole
//! collection and swaps the snapshot, so out-of-order loads and local
//! submissions can never leave counters out of sync with the reviews.

use crate::analytics::{
    compute_analytics, AnalyticsEnrichment, AnalyticsSnapshot, AuthenticityBucket, ProductAnalytics,
};
use crate::ids::UserId;
use crate::indicator::{classify_for_display, ReviewIndicator};
use crate::review::Review;

/// What the authenticity chart should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticityView<'a> {
    /// Reviews have not been loaded yet.
    NoData,
    /// Two bars, possibly both zero.
    Bars(&'a [AuthenticityBucket; 2]),
}

/// Reviews of one product and their analytics.
#[derive(Debug, Clone, Default)]
pub struct ReviewFeed {
    reviews: Vec<Review>,
    analytics: ProductAnalytics,
    loaded: bool,
}

impl ReviewFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection with a freshly loaded one.
    pub fn replace(&mut self, reviews: Vec<Review>) {
        self.reviews = reviews;
        self.loaded = true;
        self.recompute();
    }

    /// Insert a just-submitted review at the front.
    pub fn prepend(&mut self, review: Review) {
        self.reviews.insert(0, review);
        self.loaded = true;
        self.recompute();
    }

    /// Attach server-side enrichment. The local snapshot is left as is.
    pub fn merge_enrichment(&mut self, enrichment: AnalyticsEnrichment) {
        self.analytics.merge(enrichment);
    }

    fn recompute(&mut self) {
        self.analytics.snapshot = compute_analytics(&self.reviews);
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn analytics(&self) -> &ProductAnalytics {
        &self.analytics
    }

    pub fn snapshot(&self) -> &AnalyticsSnapshot {
        &self.analytics.snapshot
    }

    /// Whether a collection has been loaded or a review submitted.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Reviews paired with their display badge, in feed order.
    pub fn indicators(&self) -> impl Iterator<Item = (&Review, ReviewIndicator)> + '_ {
        self.reviews
            .iter()
            .map(|review| (review, classify_for_display(review)))
    }

    /// Whether `user` wrote any review in the feed.
    pub fn has_review_by(&self, user: &UserId) -> bool {
        self.reviews
            .iter()
            .filter_map(|review| review.user.as_ref())
            .any(|author| author.id.as_ref() == Some(user))
    }

    /// Placeholder until loaded, then always two bars.
    pub fn authenticity_view(&self) -> AuthenticityView<'_> {
        if self.loaded {
            AuthenticityView::Bars(&self.analytics.snapshot.chart_data.review_authenticity)
        } else {
            AuthenticityView::NoData
        }
    }
}
