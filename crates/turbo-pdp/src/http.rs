//! HTTP binding of the storefront endpoints.
//!
//! The request paths and response parsers are target independent. The
//! [`SpinStorefront`] client that sends them only exists on `wasm32`.

use turbo_reviews::analytics::AnalyticsEnrichment;
use turbo_reviews::review::Review;
use turbo_reviews::submission::ImageUpload;
use turbo_reviews::ProductId;

use crate::api::{
    decode, decode_enrichment, ApiError, ImagesEnvelope, ProductDetail, ProductEnvelope,
    ReviewEnvelope, ReviewsEnvelope,
};

/// Form field the upload endpoint reads files from.
pub const UPLOAD_FIELD: &str = "images";

pub const UPLOAD_PATH: &str = "/api/reviews/upload-images";

pub fn product_path(id: &ProductId) -> String {
    format!("/api/products/{id}/available")
}

/// Listing and submission share this path.
pub fn reviews_path(id: &ProductId) -> String {
    format!("/api/products/{id}/reviews")
}

pub fn analytics_path(id: &ProductId) -> String {
    format!("/api/products/{id}/analytics")
}

/// Reject non-2xx responses, handing back the body otherwise.
pub fn ensure_success<'a>(status: u16, url: &str, body: &'a [u8]) -> Result<&'a [u8], ApiError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::from_response(status, url, body))
    }
}

pub fn parse_product(status: u16, url: &str, body: &[u8]) -> Result<ProductDetail, ApiError> {
    decode::<ProductEnvelope>(ensure_success(status, url, body)?)?.into_product()
}

pub fn parse_reviews(status: u16, url: &str, body: &[u8]) -> Result<Vec<Review>, ApiError> {
    Ok(decode::<ReviewsEnvelope>(ensure_success(status, url, body)?)?.reviews)
}

pub fn parse_analytics(
    status: u16,
    url: &str,
    body: &[u8],
) -> Result<Option<AnalyticsEnrichment>, ApiError> {
    decode_enrichment(ensure_success(status, url, body)?)
}

pub fn parse_submitted_review(status: u16, url: &str, body: &[u8]) -> Result<Review, ApiError> {
    decode::<ReviewEnvelope>(ensure_success(status, url, body)?)?.into_review()
}

pub fn parse_uploaded_images(status: u16, url: &str, body: &[u8]) -> Result<Vec<String>, ApiError> {
    Ok(decode::<ImagesEnvelope>(ensure_success(status, url, body)?)?.images)
}

/// Encode uploads as a `multipart/form-data` body under [`UPLOAD_FIELD`].
pub fn multipart_body(boundary: &str, uploads: &[ImageUpload]) -> Vec<u8> {
    let mut body = Vec::new();
    for upload in uploads {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{UPLOAD_FIELD}\"; filename=\"{}\"\r\n",
                upload.file_name.replace('"', "%22")
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", upload.content_type).as_bytes());
        body.extend_from_slice(&upload.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(target_arch = "wasm32")]
pub use spin::SpinStorefront;

#[cfg(target_arch = "wasm32")]
mod spin {
    use async_trait::async_trait;
    use spin_sdk::http::{Method, Request, Response};
    use turbo_reviews::submission::ReviewDraft;

    use super::*;
    use crate::api::StorefrontApi;

    const BOUNDARY: &str = "turbo-pdp-upload-boundary";

    /// Storefront reached through Spin's outbound HTTP.
    #[derive(Debug, Clone)]
    pub struct SpinStorefront {
        base_url: String,
    }

    impl SpinStorefront {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into().trim_end_matches('/').to_string(),
            }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        async fn send(&self, request: Request, url: &str) -> Result<(u16, Vec<u8>), ApiError> {
            let response: Response = spin_sdk::http::send(request)
                .await
                .map_err(|e| ApiError::Connection(format!("{url}: {e}")))?;
            Ok((*response.status(), response.body().to_vec()))
        }

        async fn get(&self, url: &str) -> Result<(u16, Vec<u8>), ApiError> {
            self.send(Request::get(url).build(), url).await
        }

        async fn post(
            &self,
            url: &str,
            content_type: &str,
            body: Vec<u8>,
        ) -> Result<(u16, Vec<u8>), ApiError> {
            let request = Request::builder()
                .method(Method::Post)
                .uri(url)
                .header("content-type", content_type)
                .body(body)
                .build();
            self.send(request, url).await
        }
    }

    #[async_trait(?Send)]
    impl StorefrontApi for SpinStorefront {
        async fn fetch_product(&self, id: &ProductId) -> Result<ProductDetail, ApiError> {
            let url = self.url(&product_path(id));
            let (status, body) = self.get(&url).await?;
            parse_product(status, &url, &body)
        }

        async fn fetch_reviews(&self, id: &ProductId) -> Result<Vec<Review>, ApiError> {
            let url = self.url(&reviews_path(id));
            let (status, body) = self.get(&url).await?;
            parse_reviews(status, &url, &body)
        }

        async fn fetch_analytics(
            &self,
            id: &ProductId,
        ) -> Result<Option<AnalyticsEnrichment>, ApiError> {
            let url = self.url(&analytics_path(id));
            let (status, body) = self.get(&url).await?;
            parse_analytics(status, &url, &body)
        }

        async fn submit_review(
            &self,
            id: &ProductId,
            draft: &ReviewDraft,
        ) -> Result<Review, ApiError> {
            let url = self.url(&reviews_path(id));
            let payload = serde_json::to_vec(draft)
                .map_err(|e| ApiError::Deserialization(e.to_string()))?;
            let (status, body) = self.post(&url, "application/json", payload).await?;
            parse_submitted_review(status, &url, &body)
        }

        async fn upload_images(&self, uploads: &[ImageUpload]) -> Result<Vec<String>, ApiError> {
            let url = self.url(UPLOAD_PATH);
            let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
            let payload = multipart_body(BOUNDARY, uploads);
            let (status, body) = self.post(&url, &content_type, payload).await?;
            parse_uploaded_images(status, &url, &body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let id = ProductId::new("p1");
        assert_eq!(product_path(&id), "/api/products/p1/available");
        assert_eq!(reviews_path(&id), "/api/products/p1/reviews");
        assert_eq!(analytics_path(&id), "/api/products/p1/analytics");
    }

    #[test]
    fn test_parse_product() {
        let product = parse_product(
            200,
            "/api/products/p1/available",
            br#"{"product": {"_id": "p1", "name": "Lamp"}}"#,
        )
        .unwrap();
        assert_eq!(product.name, "Lamp");

        let err = parse_product(200, "/api/products/p1/available", br#"{"product": null}"#)
            .unwrap_err();
        assert_eq!(err, ApiError::MissingData("Product data not found".into()));
    }

    #[test]
    fn test_error_status_uses_error_body() {
        let err = parse_submitted_review(
            400,
            "/api/products/p1/reviews",
            br#"{"error": "You have already reviewed this product"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "You have already reviewed this product");

        let err = parse_reviews(502, "/api/products/p1/reviews", b"bad gateway").unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                url: "/api/products/p1/reviews".into()
            }
        );
    }

    #[test]
    fn test_parse_reviews_and_uploads() {
        let reviews = parse_reviews(
            200,
            "/api/products/p1/reviews",
            br#"{"reviews": [{"_id": "r1", "rating": 5, "comment": "Great"}]}"#,
        )
        .unwrap();
        assert_eq!(reviews.len(), 1);

        let urls = parse_uploaded_images(
            200,
            UPLOAD_PATH,
            br#"{"images": ["/uploads/a.png", "/uploads/b.png"]}"#,
        )
        .unwrap();
        assert_eq!(urls, vec!["/uploads/a.png", "/uploads/b.png"]);
    }

    #[test]
    fn test_parse_analytics_honors_success_flag() {
        let enrichment =
            parse_analytics(200, "/api/products/p1/analytics", br#"{"success": false}"#).unwrap();
        assert!(enrichment.is_none());

        assert!(parse_analytics(500, "/api/products/p1/analytics", b"").is_err());
    }

    #[test]
    fn test_multipart_body() {
        let uploads = vec![ImageUpload::new("a.png", "image/png", b"PNG".to_vec())];
        let body = String::from_utf8(multipart_body("xyz", &uploads)).unwrap();

        assert!(body.starts_with("--xyz\r\n"));
        assert!(body.contains("name=\"images\"; filename=\"a.png\""));
        assert!(body.contains("Content-Type: image/png\r\n\r\nPNG\r\n"));
        assert!(body.ends_with("--xyz--\r\n"));
    }
}
