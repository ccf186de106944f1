//! Review trust analytics for TurboCommerce product pages.
//!
//! This crate turns customer reviews, each optionally carrying a verdict from
//! an upstream fraud classifier, into:
//!
//! - **Indicators**: a green/yellow/red badge per review
//! - **Analytics**: product-level counters, rating distribution, trust and
//!   reliability percentages, and chart-ready breakdowns
//! - **Feed**: the in-memory review collection that keeps both in sync
//!
//! Everything here is pure. Malformed verdicts degrade to yellow
//! on the badge and to suspicious in the counters; classification and
//! aggregation never fail. Only draft and upload validation return errors.
//!
//! # Example
//!
//! ```rust
//! use turbo_reviews::prelude::*;
//!
//! let reviews: Vec<Review> = serde_json::from_str(
//!     r#"[
//!         {"_id": "1", "rating": 5, "verifiedPurchase": true,
//!          "aiAnalysis": {"classification": "genuine"}},
//!         {"_id": "2", "rating": 2}
//!     ]"#,
//! )
//! .unwrap();
//!
//! let snapshot = compute_analytics(&reviews);
//! assert_eq!(snapshot.trust_score, "50.0");
//!
//! let badge = classify_for_display(&reviews[1]);
//! assert_eq!(badge.status, "Pending Review");
//! ```

pub mod analytics;
pub mod error;
pub mod feed;
pub mod ids;
pub mod indicator;
pub mod review;
pub mod submission;
pub mod verdict;

pub use error::ReviewError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::ReviewError;
    pub use crate::ids::*;

    pub use crate::review::{
        AgentApproval, AiAnalysis, Classification, DisplayIndicator, Review, ReviewAuthor,
    };
    pub use crate::verdict::Verdict;

    pub use crate::indicator::{classify_for_display, IndicatorStyle, ReviewIndicator, TrustState};

    pub use crate::analytics::{
        classify_for_aggregate, compute_analytics, AggregateClass, AnalyticsEnrichment,
        AnalyticsSnapshot, Authenticity, AuthenticityBucket, ChartBucket, ChartData,
        EnrichmentEnvelope, ProductAnalytics, RatingDistribution, RatingRow,
    };

    pub use crate::feed::{AuthenticityView, ReviewFeed};
    pub use crate::submission::{ImageUpload, ReviewDraft, UploadLimits, DEFAULT_RATING};
}
