//! Review records as delivered by the reviews API.
//!
//! Upstream payloads are heterogeneous: the verdict may be missing, nested in
//! a different place, or carry values of an unexpected type. Parsing is
//! therefore total. Every field is read from a `serde_json::Value` and
//! degrades to "absent" instead of failing, using the same truthiness rules
//! the storefront's browser client applies.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::ids::{ReviewId, UserId};

/// JavaScript truthiness of a JSON value.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field<'a>(map: &'a Map<String, Value>, key: &str) -> &'a Value {
    map.get(key).unwrap_or(&Value::Null)
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    field(map, key).as_str().map(str::to_string)
}

/// Upstream fraud classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Genuine,
    Suspicious,
    /// Any other label, including "pending" and non-string values.
    Other(String),
}

impl Classification {
    /// Parse a label. Matching is exact, as the upstream contract is.
    pub fn parse(label: &str) -> Self {
        match label {
            "genuine" => Self::Genuine,
            "suspicious" => Self::Suspicious,
            other => Self::Other(other.to_string()),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::parse(s)),
            v if truthy(v) => Some(Self::Other(v.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Genuine => "genuine",
            Self::Suspicious => "suspicious",
            Self::Other(label) => label,
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Color an approval agent asks the storefront to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayIndicator {
    Green,
    Yellow,
    Red,
    /// Unrecognized value; treated as "needs review".
    Other(String),
}

impl DisplayIndicator {
    pub fn parse(label: &str) -> Self {
        match label {
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "red" => Self::Red,
            other => Self::Other(other.to_string()),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Self::parse(s)),
            v if truthy(v) => Some(Self::Other(v.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Other(label) => label,
        }
    }
}

impl Serialize for DisplayIndicator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Decision of the approval agent that reviews the classifier output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentApproval {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_indicator: Option<DisplayIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_display_status: Option<String>,
}

impl AgentApproval {
    /// Approval carrying only a display indicator.
    pub fn indicating(indicator: DisplayIndicator) -> Self {
        Self {
            display_indicator: Some(indicator),
            user_display_status: None,
        }
    }

    /// Falsy values are absent; truthy non-objects are present but empty.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self {
                display_indicator: DisplayIndicator::from_value(field(map, "displayIndicator")),
                user_display_status: string_field(map, "userDisplayStatus"),
            }),
            v if truthy(v) => Some(Self::default()),
            _ => None,
        }
    }
}

/// Verdict container produced by the upstream classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_approval: Option<AgentApproval>,
}

impl AiAnalysis {
    /// Analysis carrying only a classification.
    pub fn classified(classification: Classification) -> Self {
        Self {
            classification: Some(classification),
            ..Default::default()
        }
    }

    /// Attach a nested approval.
    pub fn with_approval(mut self, approval: AgentApproval) -> Self {
        self.agent_approval = Some(approval);
        self
    }

    /// Falsy values are absent; truthy non-objects are present but empty.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self {
                classification: Classification::from_value(field(map, "classification")),
                confidence: field(map, "confidence").as_f64(),
                agent_approval: AgentApproval::from_value(field(map, "agentApproval")),
            }),
            v if truthy(v) => Some(Self::default()),
            _ => None,
        }
    }
}

/// Author of a review.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewAuthor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ReviewAuthor {
    fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let id = map
            .get("_id")
            .or_else(|| map.get("id"))
            .and_then(UserId::from_value);
        Some(Self {
            id,
            name: string_field(map, "name"),
        })
    }
}

/// A customer review.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    /// Raw rating. Only integral values in 1..=5 count as a star rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ReviewAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub verified_purchase: bool,
    pub has_purchased: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    /// Legacy location of the approval, outside of `aiAnalysis`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_approval: Option<AgentApproval>,
}

impl Review {
    /// Create an unanalyzed, unverified review.
    pub fn new(id: impl Into<ReviewId>, rating: u8) -> Self {
        Self {
            id: id.into(),
            rating: Some(f64::from(rating)),
            ..Default::default()
        }
    }

    /// Mark the review as a verified purchase.
    pub fn verified(mut self) -> Self {
        self.verified_purchase = true;
        self
    }

    pub fn with_ai_analysis(mut self, analysis: AiAnalysis) -> Self {
        self.ai_analysis = Some(analysis);
        self
    }

    /// Set the top-level (legacy) approval.
    pub fn with_agent_approval(mut self, approval: AgentApproval) -> Self {
        self.agent_approval = Some(approval);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Read a review from any JSON value. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let map = value.as_object().unwrap_or(&empty);

        let id = map
            .get("_id")
            .or_else(|| map.get("id"))
            .and_then(ReviewId::from_value)
            .unwrap_or_default();

        let images = field(map, "images")
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id,
            rating: field(map, "rating").as_f64(),
            comment: string_field(map, "comment").unwrap_or_default(),
            user: ReviewAuthor::from_value(field(map, "user")),
            images,
            created_at: string_field(map, "createdAt"),
            verified_purchase: truthy(field(map, "verifiedPurchase")),
            has_purchased: truthy(field(map, "hasPurchased")),
            ai_analysis: AiAnalysis::from_value(field(map, "aiAnalysis")),
            agent_approval: AgentApproval::from_value(field(map, "agentApproval")),
        }
    }

    /// Star value if the rating is an integer in 1..=5.
    pub fn star(&self) -> Option<u8> {
        let rating = self.rating?;
        if rating.fract() == 0.0 && (1.0..=5.0).contains(&rating) {
            Some(rating as u8)
        } else {
            None
        }
    }

    /// Either legacy purchase flag counts.
    pub fn is_verified(&self) -> bool {
        self.verified_purchase || self.has_purchased
    }
}

impl<'de> Deserialize<'de> for Review {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
