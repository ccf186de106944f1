//! Per-review trust indicator used to color review cards.

use serde::Serialize;

use crate::review::{Classification, DisplayIndicator, Review};
use crate::verdict::Verdict;

/// Status labels shown next to the badge.
pub mod status {
    pub const VERIFIED_GENUINE: &str = "Verified Genuine";
    pub const SUSPICIOUS: &str = "Suspicious";
    pub const NEEDS_REVIEW: &str = "Needs Review";
    pub const PENDING_REVIEW: &str = "Pending Review";
}

/// The three trust states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustState {
    Green,
    Yellow,
    Red,
}

impl TrustState {
    /// Fixed styling tokens for this state.
    pub fn style(&self) -> IndicatorStyle {
        match self {
            Self::Green => IndicatorStyle {
                bg_color: "bg-green-50",
                text_color: "text-green-800",
                border_color: "border-green-200",
            },
            Self::Yellow => IndicatorStyle {
                bg_color: "bg-yellow-50",
                text_color: "text-yellow-800",
                border_color: "border-yellow-200",
            },
            Self::Red => IndicatorStyle {
                bg_color: "bg-red-50",
                text_color: "text-red-800",
                border_color: "border-red-200",
            },
        }
    }
}

/// CSS class tokens for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorStyle {
    pub bg_color: &'static str,
    pub text_color: &'static str,
    pub border_color: &'static str,
}

/// Display payload for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewIndicator {
    #[serde(rename = "color")]
    pub state: TrustState,
    pub status: &'static str,
    #[serde(flatten)]
    pub style: IndicatorStyle,
}

impl ReviewIndicator {
    fn new(state: TrustState, status: &'static str) -> Self {
        Self {
            state,
            status,
            style: state.style(),
        }
    }

    fn green() -> Self {
        Self::new(TrustState::Green, status::VERIFIED_GENUINE)
    }

    fn red() -> Self {
        Self::new(TrustState::Red, status::SUSPICIOUS)
    }

    fn needs_review() -> Self {
        Self::new(TrustState::Yellow, status::NEEDS_REVIEW)
    }

    fn pending() -> Self {
        Self::new(TrustState::Yellow, status::PENDING_REVIEW)
    }
}

/// Resolve the badge shown on a single review card.
///
/// Unanalyzed reviews are shown as pending (yellow). The aggregate count
/// treats them differently, see [`crate::analytics::classify_for_aggregate`].
pub fn classify_for_display(review: &Review) -> ReviewIndicator {
    match Verdict::of(review) {
        Verdict::Unanalyzed => ReviewIndicator::pending(),
        Verdict::Approval(indicator) => match indicator {
            DisplayIndicator::Green => ReviewIndicator::green(),
            DisplayIndicator::Red => ReviewIndicator::red(),
            DisplayIndicator::Yellow | DisplayIndicator::Other(_) => ReviewIndicator::needs_review(),
        },
        Verdict::Classified(Some(Classification::Genuine)) => ReviewIndicator::green(),
        Verdict::Classified(Some(Classification::Suspicious)) => ReviewIndicator::red(),
        Verdict::Classified(_) => ReviewIndicator::pending(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{AgentApproval, AiAnalysis};
    use serde_json::json;

    fn approved(indicator: DisplayIndicator) -> Review {
        Review::new("r", 4)
            .with_ai_analysis(AiAnalysis::default().with_approval(AgentApproval::indicating(indicator)))
    }

    #[test]
    fn test_missing_analysis_is_pending() {
        let indicator = classify_for_display(&Review::new("r", 1).verified());
        assert_eq!(indicator.state, TrustState::Yellow);
        assert_eq!(indicator.status, status::PENDING_REVIEW);
    }

    #[test]
    fn test_missing_analysis_ignores_other_fields() {
        let review = Review::from_value(&json!({
            "_id": "r",
            "rating": 5,
            "classification": "genuine",
            "agentApproval": { "displayIndicator": "green" }
        }));
        assert_eq!(classify_for_display(&review).status, status::PENDING_REVIEW);
    }

    #[test]
    fn test_approval_indicators() {
        assert_eq!(classify_for_display(&approved(DisplayIndicator::Green)).state, TrustState::Green);
        assert_eq!(classify_for_display(&approved(DisplayIndicator::Red)).state, TrustState::Red);

        let yellow = classify_for_display(&approved(DisplayIndicator::Yellow));
        assert_eq!(yellow.state, TrustState::Yellow);
        assert_eq!(yellow.status, status::NEEDS_REVIEW);

        let other = classify_for_display(&approved(DisplayIndicator::parse("blue")));
        assert_eq!(other.status, status::NEEDS_REVIEW);
    }

    #[test]
    fn test_nested_red_beats_genuine_classification() {
        let review = Review::from_value(&json!({
            "aiAnalysis": {
                "classification": "genuine",
                "agentApproval": { "displayIndicator": "red" }
            }
        }));
        let indicator = classify_for_display(&review);
        assert_eq!(indicator.state, TrustState::Red);
        assert_eq!(indicator.status, status::SUSPICIOUS);
    }

    #[test]
    fn test_classification_fallback() {
        let genuine = Review::new("r", 5).with_ai_analysis(AiAnalysis::classified(Classification::Genuine));
        assert_eq!(classify_for_display(&genuine).status, status::VERIFIED_GENUINE);

        let suspicious =
            Review::new("r", 5).with_ai_analysis(AiAnalysis::classified(Classification::Suspicious));
        assert_eq!(classify_for_display(&suspicious).state, TrustState::Red);

        let pending = Review::new("r", 5)
            .with_ai_analysis(AiAnalysis::classified(Classification::parse("pending")));
        assert_eq!(classify_for_display(&pending).status, status::PENDING_REVIEW);
    }

    #[test]
    fn test_styles_are_keyed_by_state() {
        let indicator = classify_for_display(&approved(DisplayIndicator::Green));
        assert_eq!(indicator.style.bg_color, "bg-green-50");
        assert_eq!(indicator.style.text_color, "text-green-800");
        assert_eq!(indicator.style.border_color, "border-green-200");
        assert_eq!(indicator.style, TrustState::Green.style());
    }

    #[test]
    fn test_state_serializes_as_color_name() {
        for (state, name) in [
            (TrustState::Green, "green"),
            (TrustState::Yellow, "yellow"),
            (TrustState::Red, "red"),
        ] {
            assert_eq!(serde_json::to_value(state).unwrap(), json!(name));
        }
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(classify_for_display(&approved(DisplayIndicator::Red))).unwrap();
        assert_eq!(
            value,
            json!({
                "color": "red",
                "status": "Suspicious",
                "bgColor": "bg-red-50",
                "textColor": "text-red-800",
                "borderColor": "border-red-200"
            })
        );
    }
}
