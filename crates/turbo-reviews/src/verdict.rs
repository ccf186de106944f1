//! Normalization of a review's verdict fields.
//!
//! The approval can sit inside `aiAnalysis` or, for reviews written by older
//! pipelines, at the top level of the review. Both the display resolver and
//! the aggregate classifier branch on the canonical [`Verdict`] produced here
//! and never look at the raw fields themselves.

use crate::review::{Classification, DisplayIndicator, Review};

/// Canonical view of a review's verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict<'a> {
    /// The review carries no `aiAnalysis` at all.
    Unanalyzed,
    /// An approval with a usable display indicator.
    Approval(&'a DisplayIndicator),
    /// Analyzed, but no usable approval. Holds the classifier label, if any.
    Classified(Option<&'a Classification>),
}

impl<'a> Verdict<'a> {
    /// Normalize the verdict of `review`.
    ///
    /// The nested approval wins whenever it is present, even if it carries no
    /// indicator; the top-level one is only consulted when the nested one is
    /// missing.
    pub fn of(review: &'a Review) -> Self {
        let Some(analysis) = &review.ai_analysis else {
            return Self::Unanalyzed;
        };

        let approval = analysis
            .agent_approval
            .as_ref()
            .or(review.agent_approval.as_ref());

        if let Some(indicator) = approval.and_then(|a| a.display_indicator.as_ref()) {
            return Self::Approval(indicator);
        }

        Self::Classified(analysis.classification.as_ref())
    }
}
