use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{error, warn};

use campusforge_application::{AnswerGenerator, GenerationOutcome, GenerationRequest};
use campusforge_core::{AppError, AppResult};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

/// Connection settings for the generative language endpoint.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Full URL of the `generateContent` action.
    pub endpoint: String,
    /// API key sent as the `key` query parameter.
    pub api_key: String,
}

impl GeminiConfig {
    /// Creates settings for the hosted endpoint with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: api_key.into(),
        }
    }
}

/// HTTP-based answer generator backed by the Gemini API.
pub struct GeminiAnswerGenerator {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiAnswerGenerator {
    /// Creates a generator that calls the configured endpoint.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: GeminiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl AnswerGenerator for GeminiAnswerGenerator {
    async fn generate(&self, request: GenerationRequest) -> AppResult<GenerationOutcome> {
        let body = generation_body(&request);

        let response = self
            .http_client
            .post(self.config.endpoint.as_str())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|error| {
                error!(%error, "generation request could not be sent");
                AppError::upstream("failed to reach the AI service", None)
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_owned());
            error!(%status, %detail, "generation request was rejected upstream");
            return Err(AppError::upstream(
                "failed to get a response from the AI service",
                Some(status.as_u16().to_string()),
            ));
        }

        let payload: Value = response.json().await.map_err(|error| {
            error!(%error, "generation response was not valid JSON");
            AppError::upstream("failed to read the AI service response", None)
        })?;

        match generation_outcome(&payload) {
            Some(outcome) => Ok(outcome),
            None => {
                warn!("generation response carried no candidates and no block reason");
                Err(AppError::upstream(
                    "the AI service returned an unexpected response",
                    None,
                ))
            }
        }
    }
}

fn generation_body(request: &GenerationRequest) -> Value {
    let mut generation_config = json!({
        "temperature": request.temperature,
        "maxOutputTokens": request.max_output_tokens,
        "topP": request.top_p,
    });
    if let Some(top_k) = request.top_k {
        generation_config["topK"] = json!(top_k);
    }

    json!({
        "contents": [{ "parts": [{ "text": request.prompt }] }],
        "generationConfig": generation_config,
    })
}

fn generation_outcome(payload: &Value) -> Option<GenerationOutcome> {
    if let Some(text) = payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
    {
        return Some(GenerationOutcome::Answer(text.to_owned()));
    }

    let reason = payload
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)?;
    Some(GenerationOutcome::Blocked {
        reason: reason.to_owned(),
    })
}
