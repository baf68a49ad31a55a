//! Data models and structures
//!
//! Defines the value objects exchanged with the generation service, the
//! presentation-layer ad composite, and runtime configuration.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the seeded placeholder shown when no image was supplied.
const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/seed";

/// An image attached to a request as an inline binary part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Base64 text of the raw file bytes.
    pub data: String,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// `data:` URL used to display the uploaded image back to the user.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Structured guess returned by the Analyze operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalysisResult {
    pub product_name: String,
    pub product_details: String,
    pub target_audience: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Approved,
    ReviewNeeded,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Approved => "approved",
            ComplianceStatus::ReviewNeeded => "review_needed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ComplianceResult {
    pub status: ComplianceStatus,
    pub feedback: String,
}

/// Ad copy plus compliance verdict returned by the Generate operation.
///
/// Title and description lengths are requested from the model, not enforced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AdContent {
    pub title: String,
    pub description: String,
    pub category: String,
    pub compliance: ComplianceResult,
}

/// What the result view displays for a generated ad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAd {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
}

impl GeneratedAd {
    /// Uses the uploaded image when one accompanied the request, otherwise a
    /// placeholder seeded by the title.
    pub fn from_content(content: &AdContent, image: Option<&ImagePayload>) -> Self {
        let image_url = match image {
            Some(image) => image.data_url(),
            None => placeholder_image_url(&content.title),
        };

        Self {
            title: content.title.clone(),
            description: content.description.clone(),
            category: content.category.clone(),
            image_url,
        }
    }
}

pub fn placeholder_image_url(title: &str) -> String {
    format!(
        "{}/{}/600/600",
        PLACEHOLDER_IMAGE_BASE,
        urlencoding::encode(title)
    )
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process environment in
    /// production).
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| crate::Error::Config("API_KEY not set".to_string()))?;

        let model = lookup("GEMINI_MODEL")
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = lookup("GEMINI_BASE_URL").filter(|url| !url.trim().is_empty());

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    crate::Error::Config(format!(
                        "REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                if secs == 0 {
                    return Err(crate::Error::Config(
                        "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn sample_content(title: &str) -> AdContent {
        AdContent {
            title: title.to_string(),
            description: "desc".to_string(),
            category: "Apparel & Accessories > Shoes".to_string(),
            compliance: ComplianceResult {
                status: ComplianceStatus::Approved,
                feedback: "ok".to_string(),
            },
        }
    }

    #[test]
    fn test_image_payload_encodes_base64() {
        let image = ImagePayload::from_bytes(b"hello", "image/png");
        assert_eq!(image.data, "aGVsbG8=");
        assert_eq!(image.data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_analysis_result_uses_camel_case_fields() {
        let json = r#"{"productName":"Mug","productDetails":"Ceramic","targetAudience":"Coffee lovers"}"#;
        let parsed: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.product_name, "Mug");
        assert_eq!(parsed.target_audience, "Coffee lovers");
    }

    #[test]
    fn test_analysis_result_rejects_missing_field() {
        let json = r#"{"productName":"Mug","productDetails":"Ceramic"}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_ad_content_parses_nested_compliance() {
        let json = r#"{
            "title": "Shoe",
            "description": "Light",
            "category": "Apparel & Accessories > Shoes",
            "compliance": {"status": "review_needed", "feedback": "Check claims"}
        }"#;
        let parsed: AdContent = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.compliance.status, ComplianceStatus::ReviewNeeded);
    }

    #[test]
    fn test_ad_content_rejects_unknown_status() {
        let json = r#"{
            "title": "Shoe",
            "description": "Light",
            "category": "Shoes",
            "compliance": {"status": "maybe", "feedback": "?"}
        }"#;
        assert!(serde_json::from_str::<AdContent>(json).is_err());
    }

    #[test]
    fn test_placeholder_url_is_seeded_by_title() {
        assert_eq!(
            placeholder_image_url("Ultra-light running shoe"),
            "https://picsum.photos/seed/Ultra-light%20running%20shoe/600/600"
        );
        assert_eq!(placeholder_image_url("a"), placeholder_image_url("a"));
    }

    #[test]
    fn test_generated_ad_prefers_uploaded_image() {
        let image = ImagePayload::from_bytes(&[1, 2, 3], "image/jpeg");
        let ad = GeneratedAd::from_content(&sample_content("Shoe"), Some(&image));
        assert_eq!(ad.image_url, image.data_url());

        let ad = GeneratedAd::from_content(&sample_content("Shoe"), None);
        assert_eq!(ad.image_url, placeholder_image_url("Shoe"));
    }

    #[test]
    fn test_config_requires_api_key() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));

        let err = Config::from_lookup(lookup_from(&[("API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.base_url.is_none());
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9000"),
            ("REQUEST_TIMEOUT_SECS", "45"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let err = Config::from_lookup(lookup_from(&[
            ("API_KEY", "secret"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let err = Config::from_lookup(lookup_from(&[
            ("API_KEY", "secret"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
