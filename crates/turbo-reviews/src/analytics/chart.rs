//! Chart-ready breakdowns of a snapshot.

use serde::Serialize;

use super::snapshot::{percentage, Counters, RatingDistribution};

/// Chart palette.
pub mod colors {
    pub const GREEN: &str = "#10B981";
    pub const AMBER: &str = "#F59E0B";
    pub const RED: &str = "#EF4444";
    pub const GRAY: &str = "#6B7280";
}

/// A named, colored count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartBucket {
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
}

/// One row of the star breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingRow {
    /// Label such as `"4 Star"`.
    pub rating: String,
    pub count: usize,
    pub percentage: String,
}

/// One bar of the genuine/suspicious chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticityBucket {
    pub name: &'static str,
    pub count: usize,
    pub percentage: String,
    pub color: &'static str,
}

/// All chart structures derived from a snapshot.
///
/// Bucket counts are fixed by the array types, so a chart is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub trust_distribution: [ChartBucket; 3],
    pub purchase_verification: [ChartBucket; 2],
    /// Rows for 1 through 5 stars, in that order.
    pub rating_breakdown: Vec<RatingRow>,
    pub review_authenticity: [AuthenticityBucket; 2],
}

impl ChartData {
    pub(crate) fn build(counters: &Counters, distribution: &RatingDistribution) -> Self {
        let total = counters.total;

        Self {
            trust_distribution: [
                ChartBucket {
                    name: "Verified Genuine",
                    value: counters.green,
                    color: colors::GREEN,
                },
                ChartBucket {
                    name: "Needs Review",
                    value: counters.yellow,
                    color: colors::AMBER,
                },
                ChartBucket {
                    name: "Suspicious",
                    value: counters.red,
                    color: colors::RED,
                },
            ],
            purchase_verification: [
                ChartBucket {
                    name: "Verified Buyers",
                    value: counters.verified,
                    color: colors::GREEN,
                },
                ChartBucket {
                    name: "Unverified Users",
                    value: counters.unverified,
                    color: colors::GRAY,
                },
            ],
            rating_breakdown: distribution
                .iter()
                .map(|(star, count)| RatingRow {
                    rating: format!("{} Star", star),
                    count,
                    percentage: percentage(count, total),
                })
                .collect(),
            review_authenticity: [
                AuthenticityBucket {
                    name: "Genuine Reviews",
                    count: counters.genuine,
                    percentage: percentage(counters.genuine, total),
                    color: colors::GREEN,
                },
                AuthenticityBucket {
                    name: "Suspicious Reviews",
                    count: counters.suspicious,
                    percentage: percentage(counters.suspicious, total),
                    color: colors::RED,
                },
            ],
        }
    }

    /// Bucket for a star value, if in range.
    pub fn rating_row(&self, star: u8) -> Option<&RatingRow> {
        match star {
            1..=5 => self.rating_breakdown.get(usize::from(star - 1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::analytics::compute_analytics;
    use crate::review::{AiAnalysis, Classification, Review};

    use super::colors;

    #[test]
    fn test_empty_charts_are_present_and_zeroed() {
        let chart = compute_analytics(&[]).chart_data;

        assert_eq!(chart.trust_distribution.len(), 3);
        assert!(chart.trust_distribution.iter().all(|b| b.value == 0));
        assert_eq!(chart.purchase_verification.len(), 2);
        assert_eq!(chart.rating_breakdown.len(), 5);
        assert!(chart
            .rating_breakdown
            .iter()
            .all(|row| row.count == 0 && row.percentage == "0"));
        assert_eq!(chart.review_authenticity.len(), 2);
        assert!(chart
            .review_authenticity
            .iter()
            .all(|b| b.count == 0 && b.percentage == "0"));
    }

    #[test]
    fn test_bucket_names_and_colors() {
        let chart = compute_analytics(&[]).chart_data;

        let names: Vec<_> = chart.trust_distribution.iter().map(|b| b.name).collect();
        assert_eq!(names, ["Verified Genuine", "Needs Review", "Suspicious"]);
        assert_eq!(chart.purchase_verification[1].color, colors::GRAY);
        assert_eq!(chart.review_authenticity[0].name, "Genuine Reviews");
        assert_eq!(chart.review_authenticity[1].color, colors::RED);
    }

    #[test]
    fn test_rating_rows() {
        let reviews = vec![
            Review::new("a", 1),
            Review::new("b", 1),
            Review::new("c", 4).with_ai_analysis(AiAnalysis::classified(Classification::Genuine)),
        ];
        let chart = compute_analytics(&reviews).chart_data;

        let one = chart.rating_row(1).unwrap();
        assert_eq!(one.rating, "1 Star");
        assert_eq!(one.count, 2);
        assert_eq!(one.percentage, "66.7");
        assert_eq!(chart.rating_row(3).unwrap().percentage, "0.0");
        assert!(chart.rating_row(6).is_none());

        assert_eq!(chart.review_authenticity[0].count, 1);
        assert_eq!(chart.review_authenticity[0].percentage, "33.3");
        assert_eq!(chart.review_authenticity[1].percentage, "66.7");
    }
}
