//! Storefront API port and wire envelopes.

use async_trait::async_trait;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use turbo_reviews::analytics::{AnalyticsEnrichment, EnrichmentEnvelope};
use turbo_reviews::submission::{ImageUpload, ReviewDraft};
use turbo_reviews::review::Review;
use turbo_reviews::ProductId;

/// Error type for storefront calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The response parsed but lacked the expected payload.
    #[error("{0}")]
    MissingData(String),

    /// The server answered with an `{ error }` body.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Build the error for a non-2xx response.
    ///
    /// A JSON `{ "error": "..." }` body wins over the bare status.
    pub fn from_response(status: u16, url: impl Into<String>, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody { error: Some(message) }) if !message.is_empty() => {
                Self::Rejected(message)
            }
            _ => Self::Http {
                status,
                url: url.into(),
            },
        }
    }
}

/// Decode a JSON response body.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Product as returned by the availability endpoint.
///
/// Fields the page does not interpret are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(rename = "_id", deserialize_with = "lenient_id")]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    /// Running average rating.
    #[serde(default)]
    pub ratings: f64,
    #[serde(default)]
    pub num_reviews: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductDetail {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fold one new rating into the running average.
    pub fn record_review(&mut self, rating: u8) {
        let count = f64::from(self.num_reviews);
        self.ratings = (self.ratings * count + f64::from(rating)) / (count + 1.0);
        self.num_reviews += 1;
    }
}

/// Accept string or numeric product IDs.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ProductId, D::Error> {
    let value = Value::deserialize(deserializer)?;
    ProductId::from_value(&value)
        .ok_or_else(|| D::Error::custom(format!("invalid product id: {value}")))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// `{ product }` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductEnvelope {
    #[serde(default)]
    pub product: Option<ProductDetail>,
}

impl ProductEnvelope {
    pub fn into_product(self) -> Result<ProductDetail, ApiError> {
        self.product
            .ok_or_else(|| ApiError::MissingData("Product data not found".to_string()))
    }
}

/// `{ reviews }` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewsEnvelope {
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// `{ review }` envelope returned on submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewEnvelope {
    #[serde(default)]
    pub review: Option<Review>,
}

impl ReviewEnvelope {
    pub fn into_review(self) -> Result<Review, ApiError> {
        self.review
            .ok_or_else(|| ApiError::MissingData("Review data not found".to_string()))
    }
}

/// `{ images }` envelope returned by the upload endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagesEnvelope {
    #[serde(default)]
    pub images: Vec<String>,
}

/// Decode an analytics response, honoring its `success` flag.
pub fn decode_enrichment(body: &[u8]) -> Result<Option<AnalyticsEnrichment>, ApiError> {
    decode::<EnrichmentEnvelope>(body).map(EnrichmentEnvelope::into_enrichment)
}

/// Storefront endpoints the product page depends on.
///
/// Spin's outbound HTTP futures are not `Send`, so on `wasm32` the methods
/// drop that bound.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait StorefrontApi: Send + Sync {
    /// `GET /api/products/{id}/available`
    async fn fetch_product(&self, id: &ProductId) -> Result<ProductDetail, ApiError>;

    /// `GET /api/products/{id}/reviews`
    async fn fetch_reviews(&self, id: &ProductId) -> Result<Vec<Review>, ApiError>;

    /// `GET /api/products/{id}/analytics`
    ///
    /// `Ok(None)` when the endpoint answered without usable data.
    async fn fetch_analytics(&self, id: &ProductId)
        -> Result<Option<AnalyticsEnrichment>, ApiError>;

    /// `POST /api/products/{id}/reviews`
    async fn submit_review(&self, id: &ProductId, draft: &ReviewDraft) -> Result<Review, ApiError>;

    /// `POST /api/reviews/upload-images`, returning the stored URLs.
    async fn upload_images(&self, uploads: &[ImageUpload]) -> Result<Vec<String>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_envelope() {
        let envelope: ProductEnvelope = decode(
            br#"{"product": {"_id": "p1", "name": "Lamp", "ratings": 4.0, "numReviews": 3, "price": 20}}"#,
        )
        .unwrap();
        let product = envelope.into_product().unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.num_reviews, 3);
        assert_eq!(product.extra.get("price"), Some(&Value::from(20)));
    }

    #[test]
    fn test_numeric_product_id() {
        let product = decode::<ProductEnvelope>(br#"{"product": {"_id": 42, "name": "Lamp"}}"#)
            .unwrap()
            .into_product()
            .unwrap();
        assert_eq!(product.id.as_str(), "42");
        assert_eq!(product.name, "Lamp");

        assert!(decode::<ProductEnvelope>(br#"{"product": {"_id": [1], "name": "Lamp"}}"#).is_err());
    }

    #[test]
    fn test_missing_product() {
        let envelope: ProductEnvelope = decode(br#"{}"#).unwrap();
        let err = envelope.into_product().unwrap_err();
        assert_eq!(err.to_string(), "Product data not found");
    }

    #[test]
    fn test_record_review() {
        let mut product = ProductDetail::new("p1", "Lamp");
        product.ratings = 4.0;
        product.num_reviews = 3;

        product.record_review(2);

        assert_eq!(product.ratings, 3.5);
        assert_eq!(product.num_reviews, 4);
    }

    #[test]
    fn test_record_first_review() {
        let mut product = ProductDetail::new("p1", "Lamp");
        product.record_review(5);
        assert_eq!(product.ratings, 5.0);
        assert_eq!(product.num_reviews, 1);
    }

    #[test]
    fn test_error_body_wins() {
        let err = ApiError::from_response(400, "/api/products/p1/reviews", br#"{"error": "Already reviewed"}"#);
        assert_eq!(err, ApiError::Rejected("Already reviewed".into()));

        let err = ApiError::from_response(502, "/api/products/p1/reviews", b"<html>");
        assert!(matches!(err, ApiError::Http { status: 502, .. }));
    }

    #[test]
    fn test_reviews_envelope_is_lenient() {
        let envelope: ReviewsEnvelope =
            decode(br#"{"reviews": [{"_id": 1, "rating": "5"}, "junk"]}"#).unwrap();
        assert_eq!(envelope.reviews.len(), 2);
        assert_eq!(envelope.reviews[0].id.as_str(), "1");
        assert_eq!(envelope.reviews[0].star(), None);
    }

    #[test]
    fn test_enrichment_requires_success() {
        assert_eq!(decode_enrichment(br#"{"success": false}"#).unwrap(), None);

        let enrichment = decode_enrichment(br#"{"success": true, "data": {"avgConfidence": 0.9}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(enrichment.avg_confidence, Some(0.9));

        assert!(matches!(
            decode_enrichment(b"nope"),
            Err(ApiError::Deserialization(_))
        ));
    }

    #[test]
    fn test_other_envelopes() {
        let images: ImagesEnvelope = decode(br#"{"images": ["/u/a.png"]}"#).unwrap();
        assert_eq!(images.images, vec!["/u/a.png"]);

        let review: ReviewEnvelope = decode(br#"{"review": {"_id": "r1", "rating": 4}}"#).unwrap();
        assert_eq!(review.into_review().unwrap().star(), Some(4));
    }
}
