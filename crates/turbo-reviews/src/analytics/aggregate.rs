//! Trust classification used when counting reviews.
//!
//! Unlike [`crate::indicator::classify_for_display`], this never yields a
//! neutral bucket: every review is either genuine or suspicious. Reviews
//! flagged for review (yellow) and unanalyzed reviews both count as
//! suspicious. Whether yellow approvals were meant to be neutral is not
//! settled upstream; the behavior here matches what the storefront has
//! always reported.

use serde::Serialize;

use crate::indicator::TrustState;
use crate::review::{Classification, DisplayIndicator, Review};
use crate::verdict::Verdict;

/// Two-way authenticity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Authenticity {
    Genuine,
    Suspicious,
}

/// Buckets a single review is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AggregateClass {
    pub authenticity: Authenticity,
    pub indicator: TrustState,
}

impl AggregateClass {
    const GENUINE: Self = Self {
        authenticity: Authenticity::Genuine,
        indicator: TrustState::Green,
    };
    const FLAGGED: Self = Self {
        authenticity: Authenticity::Suspicious,
        indicator: TrustState::Yellow,
    };
    const SUSPICIOUS: Self = Self {
        authenticity: Authenticity::Suspicious,
        indicator: TrustState::Red,
    };
}

/// Classify a review for the product-level counters.
pub fn classify_for_aggregate(review: &Review) -> AggregateClass {
    match Verdict::of(review) {
        Verdict::Unanalyzed => AggregateClass::SUSPICIOUS,
        Verdict::Approval(indicator) => match indicator {
            DisplayIndicator::Green => AggregateClass::GENUINE,
            DisplayIndicator::Red => AggregateClass::SUSPICIOUS,
            DisplayIndicator::Yellow | DisplayIndicator::Other(_) => AggregateClass::FLAGGED,
        },
        Verdict::Classified(Some(Classification::Genuine)) => AggregateClass::GENUINE,
        Verdict::Classified(Some(Classification::Suspicious)) => AggregateClass::SUSPICIOUS,
        Verdict::Classified(_) => AggregateClass::FLAGGED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::classify_for_display;
    use crate::review::{AgentApproval, AiAnalysis};

    #[test]
    fn test_unanalyzed_is_suspicious_red_but_displayed_pending() {
        let review = Review::new("r", 3);

        let display = classify_for_display(&review);
        assert_eq!(display.state, TrustState::Yellow);

        let class = classify_for_aggregate(&review);
        assert_eq!(class.authenticity, Authenticity::Suspicious);
        assert_eq!(class.indicator, TrustState::Red);
    }

    #[test]
    fn test_yellow_approval_counts_as_suspicious() {
        let review = Review::new("r", 3).with_ai_analysis(
            AiAnalysis::classified(Classification::Genuine)
                .with_approval(AgentApproval::indicating(DisplayIndicator::Yellow)),
        );
        let class = classify_for_aggregate(&review);
        assert_eq!(class.authenticity, Authenticity::Suspicious);
        assert_eq!(class.indicator, TrustState::Yellow);
    }

    #[test]
    fn test_top_level_green_approval_is_genuine() {
        let review = Review::new("r", 3)
            .with_ai_analysis(AiAnalysis::default())
            .with_agent_approval(AgentApproval::indicating(DisplayIndicator::Green));
        assert_eq!(classify_for_aggregate(&review), AggregateClass::GENUINE);
    }

    #[test]
    fn test_classification_fallback() {
        let genuine = Review::new("r", 3).with_ai_analysis(AiAnalysis::classified(Classification::Genuine));
        assert_eq!(classify_for_aggregate(&genuine), AggregateClass::GENUINE);

        let suspicious =
            Review::new("r", 3).with_ai_analysis(AiAnalysis::classified(Classification::Suspicious));
        assert_eq!(classify_for_aggregate(&suspicious), AggregateClass::SUSPICIOUS);

        let unknown = Review::new("r", 3).with_ai_analysis(AiAnalysis::default());
        assert_eq!(classify_for_aggregate(&unknown), AggregateClass::FLAGGED);
    }
}
