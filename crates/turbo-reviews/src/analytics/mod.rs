//! Product-level review analytics.

mod aggregate;
mod chart;
mod enrichment;
mod snapshot;

pub use aggregate::*;
pub use chart::*;
pub use enrichment::*;
pub use snapshot::{compute_analytics, AnalyticsSnapshot, RatingDistribution};
