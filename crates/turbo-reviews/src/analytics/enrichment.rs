//! Optional server-side analytics merged next to the local snapshot.

use serde::{Deserialize, Serialize};

use super::snapshot::AnalyticsSnapshot;

/// Supplementary scalars from the analytics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEnrichment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_authenticity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// `{ success, data }` response of the analytics endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichmentEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AnalyticsEnrichment>,
}

impl EnrichmentEnvelope {
    /// Data is only usable when the endpoint reports success.
    pub fn into_enrichment(self) -> Option<AnalyticsEnrichment> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

/// Local snapshot plus whatever enrichment has arrived.
///
/// The snapshot is always the locally computed one; enrichment only adds
/// fields next to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductAnalytics {
    #[serde(flatten)]
    pub snapshot: AnalyticsSnapshot,
    #[serde(flatten)]
    pub enrichment: Option<AnalyticsEnrichment>,
}

impl ProductAnalytics {
    pub fn local(snapshot: AnalyticsSnapshot) -> Self {
        Self {
            snapshot,
            enrichment: None,
        }
    }

    /// Attach enrichment, replacing any previous one.
    pub fn merge(&mut self, enrichment: AnalyticsEnrichment) {
        self.enrichment = Some(enrichment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::compute_analytics;
    use crate::review::Review;

    #[test]
    fn test_envelope_requires_success() {
        let envelope: EnrichmentEnvelope = serde_json::from_str(
            r#"{"success": false, "data": {"avgConfidence": 0.8}}"#,
        )
        .unwrap();
        assert!(envelope.into_enrichment().is_none());

        let envelope: EnrichmentEnvelope = serde_json::from_str(
            r#"{"success": true, "data": {"avgConfidence": 0.8, "avgAuthenticityScore": 71.5, "lastUpdated": "2024-05-01T00:00:00Z"}}"#,
        )
        .unwrap();
        let enrichment = envelope.into_enrichment().unwrap();
        assert_eq!(enrichment.avg_confidence, Some(0.8));
        assert_eq!(enrichment.avg_authenticity_score, Some(71.5));
        assert_eq!(enrichment.last_updated.as_deref(), Some("2024-05-01T00:00:00Z"));
    }

    #[test]
    fn test_merge_keeps_local_snapshot() {
        let snapshot = compute_analytics(&[Review::new("a", 5), Review::new("b", 2)]);
        let mut analytics = ProductAnalytics::local(snapshot.clone());

        analytics.merge(AnalyticsEnrichment {
            avg_confidence: Some(0.5),
            ..Default::default()
        });

        assert_eq!(analytics.snapshot, snapshot);
        assert_eq!(analytics.enrichment.as_ref().and_then(|e| e.avg_confidence), Some(0.5));
    }

    #[test]
    fn test_flattened_shape() {
        let mut analytics = ProductAnalytics::local(compute_analytics(&[]));
        let value = serde_json::to_value(&analytics).unwrap();
        assert_eq!(value["trustScore"], "0");
        assert!(value.get("avgConfidence").is_none());

        analytics.merge(AnalyticsEnrichment {
            avg_confidence: Some(0.9),
            ..Default::default()
        });
        let value = serde_json::to_value(&analytics).unwrap();
        assert_eq!(value["avgConfidence"], 0.9);
        assert_eq!(value["chartData"]["reviewAuthenticity"][0]["name"], "Genuine Reviews");
    }
}
