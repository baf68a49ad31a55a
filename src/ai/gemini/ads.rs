use super::client::GeminiHttpClient;
use super::schema;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::ai::{AdCopyService, AdRequest, AnalyzeRequest};
use crate::models::{AdContent, AnalysisResult, Config, ImagePayload};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

const JSON_MIME_TYPE: &str = "application/json";

pub struct GeminiAdClient {
    http: GeminiHttpClient,
}

impl GeminiAdClient {
    pub fn new(http: GeminiHttpClient) -> Self {
        Self { http }
    }

    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        let mut http = GeminiHttpClient::new_with_client(
            config.api_key.clone(),
            config.model.clone(),
            config.request_timeout,
            client,
        );
        if let Some(base_url) = &config.base_url {
            http = http.with_base_url(base_url.clone());
        }
        Self::new(http)
    }

    /// Instruction text first, then the image when there is one.
    fn build_request(
        instruction: String,
        image: Option<&ImagePayload>,
        response_schema: serde_json::Value,
    ) -> GenerateContentRequest {
        let mut parts = vec![Part::Text { text: instruction }];
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }

        GenerateContentRequest {
            contents: vec![Content { role: None, parts }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE.to_string(),
                response_schema,
            },
        }
    }

    async fn structured_call<T: DeserializeOwned>(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<T> {
        let response: GenerateContentResponse = self.http.generate_content(request).await?;

        let text = response.text().ok_or_else(|| {
            let reason = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("no candidates");
            Error::AiProvider(format!("No text in Gemini response ({})", reason))
        })?;

        let text = text.trim();
        serde_json::from_str(text).map_err(|e| {
            tracing::error!("Response did not match the declared schema: {}\nText: {}", e, text);
            Error::AiProvider(format!("Response did not match the declared schema: {}", e))
        })
    }
}

#[async_trait]
impl AdCopyService for GeminiAdClient {
    async fn analyze_product(&self, request: &AnalyzeRequest) -> Result<AnalysisResult> {
        tracing::debug!(
            "Analyzing product via Gemini (model: {}, image: {})",
            self.http.model(),
            request.image().is_some()
        );

        let payload = Self::build_request(
            request.instruction(),
            request.image(),
            schema::analysis_schema(),
        );

        let result: AnalysisResult = self.structured_call(&payload).await.map_err(|e| {
            tracing::error!("Product analysis failed: {}", e);
            Error::AnalysisFailed(e.to_string())
        })?;

        tracing::info!("Analysis suggested product name: {}", result.product_name);
        Ok(result)
    }

    async fn generate_ad(&self, request: &AdRequest) -> Result<AdContent> {
        tracing::debug!(
            "Generating ad via Gemini (model: {}, image: {})",
            self.http.model(),
            request.image().is_some()
        );

        let payload =
            Self::build_request(request.instruction(), request.image(), schema::ad_schema());

        let content: AdContent = self.structured_call(&payload).await.map_err(|e| {
            tracing::error!("Ad generation failed: {}", e);
            Error::GenerationFailed(e.to_string())
        })?;

        tracing::info!(
            "Generated ad '{}' (compliance: {})",
            content.title,
            content.compliance.status.as_str()
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComplianceStatus;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiAdClient {
        GeminiAdClient::new(
            GeminiHttpClient::new("test-key".to_string(), "gemini-2.5-flash".to_string(), None)
                .with_base_url(server.uri()),
        )
    }

    fn text_response(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        }))
    }

    fn ad_json() -> String {
        serde_json::json!({
            "title": "Ultra-light Running Shoe, Breathable Mesh",
            "description": "Made for long runs.",
            "category": "Apparel & Accessories > Shoes",
            "compliance": { "status": "approved", "feedback": "No issues found." }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_analyze_reference_sends_text_only() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_string_contains("\"responseMimeType\":\"application/json\""))
            .and(body_string_contains("\"responseSchema\""))
            .and(body_string_contains("https://shop.example/item/42"))
            .respond_with(text_response(
                r#"{"productName":"Trail Shoe","productDetails":"Grippy sole","targetAudience":"Hikers"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let request = AnalyzeRequest::new(None, Some("https://shop.example/item/42")).unwrap();
        let result = client_for(&server).analyze_product(&request).await.unwrap();

        assert_eq!(result.product_name, "Trail Shoe");
        assert_eq!(result.target_audience, "Hikers");

        let received = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&received[0].body);
        assert!(!body.contains("inlineData"));
    }

    #[tokio::test]
    async fn test_analyze_image_attaches_inline_part() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_string_contains("\"inlineData\""))
            .and(body_string_contains("\"mimeType\":\"image/png\""))
            .respond_with(text_response(
                "  {\"productName\":\"Mug\",\"productDetails\":\"Ceramic\",\"targetAudience\":\"Coffee lovers\"}\n",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let image = ImagePayload::from_bytes(&[0x89, 0x50, 0x4E, 0x47], "image/png");
        let request = AnalyzeRequest::new(Some(image), None).unwrap();
        let result = client_for(&server).analyze_product(&request).await.unwrap();

        assert_eq!(result.product_name, "Mug");
    }

    #[tokio::test]
    async fn test_analyze_malformed_json_is_analysis_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(text_response(r#"{"productName":"Mug"}"#))
            .mount(&server)
            .await;

        let request = AnalyzeRequest::new(None, Some("mug")).unwrap();
        let err = client_for(&server)
            .analyze_product(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AnalysisFailed(_)));
    }

    #[tokio::test]
    async fn test_analyze_joins_split_text_parts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [
                            { "text": r#"{"productName":"Mug","# },
                            { "text": r#""productDetails":"Ceramic","targetAudience":"All"}"# }
                        ]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = AnalyzeRequest::new(None, Some("mug")).unwrap();
        let result = client_for(&server).analyze_product(&request).await.unwrap();

        assert_eq!(result.product_name, "Mug");
        assert_eq!(result.product_details, "Ceramic");
        assert_eq!(result.target_audience, "All");
    }

    #[tokio::test]
    async fn test_generate_parses_ad_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_string_contains("**Target Audience:** general"))
            .and(body_string_contains("review_needed"))
            .respond_with(text_response(&ad_json()))
            .expect(1)
            .mount(&server)
            .await;

        let request = AdRequest::new(
            "Ultra-light running shoe",
            "breathable mesh, size 38-44",
            None,
            None,
        )
        .unwrap();
        let content = client_for(&server).generate_ad(&request).await.unwrap();

        assert_eq!(content.category, "Apparel & Accessories > Shoes");
        assert_eq!(content.compliance.status, ComplianceStatus::Approved);
    }

    #[tokio::test]
    async fn test_generate_api_error_is_generation_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .expect(1)
            .mount(&server)
            .await;

        let request = AdRequest::new("Shoe", "Mesh", None, None).unwrap();
        let err = client_for(&server).generate_ad(&request).await.unwrap_err();
        assert!(matches!(err, Error::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_generate_blocked_candidate_is_generation_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "finishReason": "SAFETY" }]
            })))
            .mount(&server)
            .await;

        let request = AdRequest::new("Shoe", "Mesh", None, None).unwrap();
        let err = client_for(&server).generate_ad(&request).await.unwrap_err();
        match err {
            Error::GenerationFailed(detail) => assert!(detail.contains("SAFETY")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_build_request_orders_text_before_image() {
        let image = ImagePayload::from_bytes(&[1, 2, 3], "image/webp");
        let request = GeminiAdClient::build_request(
            "describe".to_string(),
            Some(&image),
            schema::analysis_schema(),
        );

        let json = serde_json::to_value(&request).unwrap();
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"], "describe");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/webp");
        assert_eq!(parts[1]["inlineData"]["data"], image.data);
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }
}
