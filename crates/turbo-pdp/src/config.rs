//! Product page configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_reviews::submission::UploadLimits;

use crate::retry::RetryPolicy;

/// Product page configuration file.
///
/// ```toml
/// [retry]
/// max_retries = 3
/// backoff_ms = 1000
///
/// [uploads]
/// max_images = 5
/// max_image_bytes = 5242880
///
/// [favorites]
/// key = "favorites"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdpConfig {
    /// Product load retry.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Review image upload limits.
    #[serde(default)]
    pub uploads: UploadLimits,

    /// Favorites storage.
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

impl PdpConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Retry policy for the product load.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(
            self.retry.max_retries,
            Duration::from_millis(self.retry.backoff_ms),
        )
    }
}

/// Retry settings for the product load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Re-fetches after the first failure (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts (default: 1000).
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    1000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// Favorites storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Store key holding the JSON array of product ids.
    #[serde(default = "default_favorites_key")]
    pub key: String,
}

fn default_favorites_key() -> String {
    "favorites".to_string()
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            key: default_favorites_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PdpConfig::default();
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.backoff_ms, 1000);
        assert_eq!(config.uploads.max_images, 5);
        assert_eq!(config.uploads.max_image_bytes, 5 * 1024 * 1024);
        assert_eq!(config.favorites.key, "favorites");
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(PdpConfig::from_toml_str("").unwrap(), PdpConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = PdpConfig::from_toml_str(
            r#"
            [retry]
            backoff_ms = 250

            [uploads]
            max_images = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.backoff_ms, 250);
        assert_eq!(config.uploads.max_images, 3);
        assert_eq!(config.uploads.max_image_bytes, 5 * 1024 * 1024);

        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(
            policy.backoff.delay_for_attempt(0),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_zero_backoff_disables_waiting() {
        let config = PdpConfig::from_toml_str("[retry]\nmax_retries = 1\nbackoff_ms = 0").unwrap();
        let policy = config.retry_policy();

        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.backoff, crate::retry::BackoffStrategy::None);
    }

    #[test]
    fn test_load_json() {
        let path = std::env::temp_dir().join(format!("pdp-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"favorites": {"key": "wishlist"}}"#).unwrap();

        let config = PdpConfig::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.favorites.key, "wishlist");
        assert_eq!(config.retry, RetryConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = PdpConfig::load("/nonexistent/pdp.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(PdpConfig::from_toml_str("[retry]\nmax_retries = \"many\"").is_err());
    }
}
