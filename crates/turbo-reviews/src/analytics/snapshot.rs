//! Product-level analytics computed from the full review collection.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::aggregate::{classify_for_aggregate, AggregateClass, Authenticity};
use super::chart::ChartData;
use crate::indicator::TrustState;
use crate::review::Review;

/// Count of valid star ratings, 1 through 5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingDistribution([usize; 5]);

impl RatingDistribution {
    /// Count for a star value. Out of range values have no reviews.
    pub fn count(&self, star: u8) -> usize {
        match star {
            1..=5 => self.0[usize::from(star - 1)],
            _ => 0,
        }
    }

    fn increment(&mut self, star: u8) {
        if let 1..=5 = star {
            self.0[usize::from(star - 1)] += 1;
        }
    }

    /// Number of reviews with a valid star rating.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// `(star, count)` pairs in ascending star order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        (1u8..=5).map(move |star| (star, self.count(star)))
    }
}

impl Serialize for RatingDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for (star, count) in self.iter() {
            map.serialize_entry(&star.to_string(), &count)?;
        }
        map.end()
    }
}

/// Raw counters accumulated by the fold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Counters {
    pub total: usize,
    pub genuine: usize,
    pub suspicious: usize,
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    pub verified: usize,
    pub unverified: usize,
}

impl Counters {
    fn record(&mut self, class: AggregateClass) {
        match class.authenticity {
            Authenticity::Genuine => self.genuine += 1,
            Authenticity::Suspicious => self.suspicious += 1,
        }
        match class.indicator {
            TrustState::Green => self.green += 1,
            TrustState::Yellow => self.yellow += 1,
            TrustState::Red => self.red += 1,
        }
    }
}

/// Share of `count` in `total` as a percentage with one decimal place.
///
/// The exact binary value is rounded once, with exact ties going up, the
/// way storefront clients format it. A zero total yields `"0"`.
pub(crate) fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "0".to_string();
    }
    let pct = count as f64 / total as f64 * 100.0;

    // Only multiples of 0.25 with an odd quarter count sit exactly halfway.
    let quarters = pct * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return format!("{:.1}", (pct * 10.0 + 0.5).floor() / 10.0);
    }
    format!("{:.1}", pct)
}

/// Trust metrics for one product.
///
/// Always rebuilt from scratch by [`compute_analytics`]; never patched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_reviews: usize,
    pub genuine: usize,
    pub suspicious: usize,
    pub green_indicator: usize,
    pub yellow_indicator: usize,
    pub red_indicator: usize,
    pub verified_purchasers: usize,
    pub unverified_users: usize,
    pub rating_distribution: RatingDistribution,
    /// Mean of valid star ratings, `0.0` when there are none.
    pub average_rating: f64,
    /// Genuine share of all reviews.
    pub trust_score: String,
    /// Verified-purchaser share of all reviews.
    pub reliability_percentage: String,
    pub chart_data: ChartData,
}

impl AnalyticsSnapshot {
    /// Whether any review was counted.
    pub fn has_reviews(&self) -> bool {
        self.total_reviews > 0
    }
}

impl Default for AnalyticsSnapshot {
    fn default() -> Self {
        compute_analytics(&[])
    }
}

/// Fold a review collection into a snapshot.
///
/// Pure and total: the same input always yields an equal snapshot, and an
/// empty input yields all-zero counters with every chart bucket present.
pub fn compute_analytics(reviews: &[Review]) -> AnalyticsSnapshot {
    let mut counters = Counters {
        total: reviews.len(),
        ..Default::default()
    };
    let mut distribution = RatingDistribution::default();
    let mut rating_sum = 0u64;
    let mut rating_count = 0u64;

    for review in reviews {
        if let Some(star) = review.star() {
            distribution.increment(star);
            rating_sum += u64::from(star);
            rating_count += 1;
        }

        if review.is_verified() {
            counters.verified += 1;
        } else {
            counters.unverified += 1;
        }

        counters.record(classify_for_aggregate(review));
    }

    let average_rating = if rating_count > 0 {
        rating_sum as f64 / rating_count as f64
    } else {
        0.0
    };

    AnalyticsSnapshot {
        total_reviews: counters.total,
        genuine: counters.genuine,
        suspicious: counters.suspicious,
        green_indicator: counters.green,
        yellow_indicator: counters.yellow,
        red_indicator: counters.red,
        verified_purchasers: counters.verified,
        unverified_users: counters.unverified,
        rating_distribution: distribution,
        average_rating,
        trust_score: percentage(counters.genuine, counters.total),
        reliability_percentage: percentage(counters.verified, counters.total),
        chart_data: ChartData::build(&counters, &distribution),
    }
}
