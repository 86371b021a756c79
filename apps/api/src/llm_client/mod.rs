/// LLM Client — the single point of entry for hosted-model calls.
///
/// No other module talks to the model provider directly; the advisory service
/// goes through `LlmClient::generate`.
///
/// Provider: Alibaba DashScope text generation, model `qwen-turbo`
/// (hardcoded so every deployment critiques with the same model).
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation";
/// The model used for all generation calls.
pub const MODEL: &str = "qwen-turbo";
const TOP_P: f32 = 0.8;
const RESULT_FORMAT: &str = "text";
const REQUEST_TIMEOUT_SECS: u64 = 120;
/// Upper bound on attempts per call; keeps the backoff at 16s or less.
pub const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    input: GenerationInput<'a>,
    parameters: GenerationParameters<'a>,
}

#[derive(Debug, Serialize)]
struct GenerationInput<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationParameters<'a> {
    top_p: f32,
    result_format: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    pub output: GenerationOutput,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationOutput {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl GenerationResponse {
    /// The generated text, if the model produced any.
    pub fn text(&self) -> Option<&str> {
        self.output
            .text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Wraps the DashScope generation API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    max_attempts: u32,
}

impl LlmClient {
    pub fn new(api_key: String, endpoint: String, max_attempts: u32) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            endpoint,
            max_attempts: max_attempts.clamp(1, MAX_ATTEMPTS),
        })
    }

    /// Sends one prompt and returns the generated text.
    /// Retries transport errors, 429, and 5xx with exponential backoff.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        response
            .text()
            .map(String::from)
            .ok_or(LlmError::EmptyContent)
    }

    /// Raw call returning the full response object.
    pub async fn call(&self, prompt: &str) -> Result<GenerationResponse, LlmError> {
        let request_body = GenerationRequest {
            model: MODEL,
            input: GenerationInput { prompt },
            parameters: GenerationParameters {
                top_p: TOP_P,
                result_format: RESULT_FORMAT,
            },
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: provider_message(&body),
                });
            }

            let body = response.text().await?;
            let generation: GenerationResponse = serde_json::from_str(&body)?;

            if let Some(usage) = &generation.usage {
                debug!(
                    "LLM call {} succeeded: input_tokens={}, output_tokens={}",
                    generation.request_id.as_deref().unwrap_or("-"),
                    usage.input_tokens,
                    usage.output_tokens
                );
            }

            return Ok(generation);
        }

        Err(last_error.unwrap_or(LlmError::RetriesExhausted {
            attempts: self.max_attempts,
        }))
    }
}

/// Pulls the provider's `code: message` out of an error body, falling back to
/// the raw body.
fn provider_message(body: &str) -> String {
    match serde_json::from_str::<ProviderError>(body) {
        Ok(ProviderError {
            code: Some(code),
            message,
        }) => format!("{code}: {message}"),
        Ok(ProviderError { code: None, message }) => message,
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = GenerationRequest {
            model: MODEL,
            input: GenerationInput { prompt: "hi" },
            parameters: GenerationParameters {
                top_p: TOP_P,
                result_format: RESULT_FORMAT,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "qwen-turbo");
        assert_eq!(json["input"]["prompt"], "hi");
        assert_eq!(json["parameters"]["result_format"], "text");
    }

    #[test]
    fn test_response_text_extracted() {
        let json = r#"{
            "output": {"text": "建议补充量化成果", "finish_reason": "stop"},
            "usage": {"input_tokens": 120, "output_tokens": 48},
            "request_id": "abc"
        }"#;
        let response: GenerationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("建议补充量化成果"));
        assert_eq!(response.usage.unwrap().output_tokens, 48);
    }

    #[test]
    fn test_blank_response_text_is_none() {
        let json = r#"{"output": {"text": "  "}}"#;
        let response: GenerationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_provider_message_with_code() {
        let body = r#"{"code":"InvalidApiKey","message":"Invalid API-key provided.","request_id":"x"}"#;
        assert_eq!(
            provider_message(body),
            "InvalidApiKey: Invalid API-key provided."
        );
    }

    #[test]
    fn test_provider_message_falls_back_to_raw_body() {
        assert_eq!(provider_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_attempts_are_clamped() {
        let client = |attempts| {
            LlmClient::new("key".to_string(), DEFAULT_ENDPOINT.to_string(), attempts)
                .unwrap()
                .max_attempts
        };
        assert_eq!(client(0), 1);
        assert_eq!(client(3), 3);
        assert_eq!(client(u32::MAX), MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        // Port 9 (discard) is closed on test hosts, so the connection is refused.
        let client = LlmClient::new("key".to_string(), "http://127.0.0.1:9/".to_string(), 1)
            .unwrap();
        let result = client.generate("prompt").await;
        assert!(matches!(result, Err(LlmError::Http(_))));
    }
}
