use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::{Client, StatusCode};
use std::env;

use super::endpoints::{
    Content, GeminiAvailableModel, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Part, Provider, DEFAULT_MODEL, GEMINI_BASE_URL, GEMINI_MODELS,
};
use super::image::ImageData;

#[derive(Debug, thiserror::Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError { status: StatusCode, error_body: String },
    #[error("API returned no text content")]
    EmptyResponse,
}

impl ApiConnectionError {
    /// True when the failure comes from the credential rather than the network.
    pub fn is_credential_problem(&self) -> bool {
        match self {
            ApiConnectionError::MissingApiKey(_) => true,
            ApiConnectionError::ApiError { status, error_body } => {
                *status == StatusCode::UNAUTHORIZED
                    || *status == StatusCode::FORBIDDEN
                    || error_body.contains("API key")
            }
            _ => false,
        }
    }
}

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Drops the request URL so it never reaches logs or error output.
fn network_error(e: reqwest::Error) -> ApiConnectionError {
    ApiConnectionError::NetworkError(e.without_url())
}

/// Anything that turns a prompt and an optional image into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, image: Option<&ImageData>) -> Result<String, ApiConnectionError>;
}

impl Provider {
    /// A Gemini provider reading its key from `api_key_env_var_name` at call
    /// time. There is no built-in fallback key.
    pub fn gemini(api_key_env_var_name: &str) -> Self {
        Self::gemini_at(api_key_env_var_name, GEMINI_BASE_URL)
    }

    pub fn gemini_at(api_key_env_var_name: &str, base_url: &str) -> Self {
        dotenv().ok();
        Self::Gemini {
            api_key: api_key_env_var_name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            available_models: GEMINI_MODELS.to_vec(),
        }
    }

    pub fn get_available_models(&self) -> Vec<GeminiAvailableModel> {
        match self {
            Provider::Gemini {
                available_models, ..
            } => available_models.clone(),
        }
    }

    pub async fn call_generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiConnectionError> {
        match self {
            Provider::Gemini {
                api_key: api_key_env_var_name,
                base_url,
                ..
            } => {
                dotenv().ok();
                let actual_api_key = env::var(api_key_env_var_name)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| ApiConnectionError::MissingApiKey(api_key_env_var_name.clone()))?;

                let client = Client::new();
                let url = format!("{}/models/{}:generateContent", base_url, request.model);

                tracing::debug!(model = %request.model, parts = request.contents.iter().map(|c| c.parts.len()).sum::<usize>(), "sending generateContent request");

                let response = client
                    .post(&url)
                    .header(API_KEY_HEADER, actual_api_key)
                    .json(&request)
                    .send()
                    .await
                    .map_err(network_error)?;

                if response.status().is_success() {
                    let body = response.text().await.map_err(network_error)?;
                    let parsed = serde_json::from_str::<GenerateContentResponse>(&body)?;
                    Ok(parsed)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    tracing::error!(%status, "Gemini API returned an error");
                    Err(ApiConnectionError::ApiError { status, error_body })
                }
            }
        }
    }
}

/// Builds a single-turn request: the prompt text, then the image if any.
pub fn build_request(model: &str, prompt: &str, image: Option<&ImageData>) -> GenerateContentRequest {
    let mut parts = vec![Part::Text {
        text: prompt.to_string(),
    }];
    if let Some(image) = image {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.base64.clone(),
            },
        });
    }

    GenerateContentRequest {
        model: model.to_string(),
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: Some(GenerationConfig {
            temperature: Some(0.4),
            max_output_tokens: Some(2048),
        }),
    }
}

/// A provider bound to one model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    provider: Provider,
    model: String,
}

impl GeminiClient {
    pub fn new(provider: Provider, model: Option<&str>) -> Self {
        Self {
            provider,
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, image: Option<&ImageData>) -> Result<String, ApiConnectionError> {
        if let Some(image) = image {
            tracing::debug!(mime_type = %image.mime_type, "attaching image to request");
        }
        let request = build_request(&self.model, prompt, image);
        let response = self.provider.call_generate_content(request).await?;
        let text = response.text().ok_or(ApiConnectionError::EmptyResponse)?;
        let preview: String = text.chars().take(200).collect();
        tracing::debug!(%preview, "received model reply");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_with_image() {
        let image = ImageData {
            mime_type: "image/webp".to_string(),
            base64: "UklGRg==".to_string(),
        };
        let request = build_request("gemini-1.5-flash", "Analyze", Some(&image));
        assert_eq!(request.contents[0].parts.len(), 2);
        assert_eq!(
            request.contents[0].parts[1],
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: "image/webp".to_string(),
                    data: "UklGRg==".to_string(),
                }
            }
        );
    }

    #[test]
    fn test_build_request_text_only() {
        let request = build_request("gemini-1.5-flash", "Hi", None);
        assert_eq!(request.contents[0].parts.len(), 1);
    }

    #[test]
    fn test_credential_problem_classification() {
        assert!(ApiConnectionError::MissingApiKey("X".to_string()).is_credential_problem());
        assert!(ApiConnectionError::ApiError {
            status: StatusCode::BAD_REQUEST,
            error_body: "API key not valid. Please pass a valid API key.".to_string(),
        }
        .is_credential_problem());
        assert!(!ApiConnectionError::ApiError {
            status: StatusCode::SERVICE_UNAVAILABLE,
            error_body: "overloaded".to_string(),
        }
        .is_credential_problem());
        assert!(!ApiConnectionError::EmptyResponse.is_credential_problem());
    }

    #[test]
    fn test_client_defaults_model() {
        let client = GeminiClient::new(Provider::gemini("NUTRICARE_TEST_KEY"), None);
        assert_eq!(client.model(), DEFAULT_MODEL);
    }
}
