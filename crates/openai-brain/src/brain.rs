//! OpenAiBrain implementation using the chat completions API.

use brain_core::{async_trait, Brain, BrainError, Completion, CompletionRequest, TokenUsage};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::OpenAiBrainConfig;

/// API error type for an exhausted billing quota.
const INSUFFICIENT_QUOTA: &str = "insufficient_quota";

/// A completion backend that calls an OpenAI-compatible chat completions API.
///
/// Each call is a single attempt. The transport timeout comes from the
/// configuration; retries are left to the caller.
pub struct OpenAiBrain {
    client: Client,
    config: OpenAiBrainConfig,
}

impl OpenAiBrain {
    /// Create a new OpenAiBrain with the given configuration.
    pub fn new(config: OpenAiBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.trim().is_empty() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "OpenAiBrain initialized with model: {}, timeout: {:?}",
            config.model, config.timeout
        );

        Ok(Self { client, config })
    }

    /// Create an OpenAiBrain from environment variables.
    ///
    /// See [`OpenAiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        let config = OpenAiBrainConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiBrainConfig {
        &self.config
    }

    fn build_request(&self, request: CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Make a chat completion request to the API.
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let url = self.config.completions_url();

        debug!(
            "Sending request to {} (model: {}, messages: {}, max_tokens: {})",
            url,
            request.model,
            request.messages.len(),
            request.max_tokens
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &error_text));
        }

        // Body read failures are transport errors; only the parse is malformed
        let body = response.bytes().await.map_err(classify_transport_error)?;

        serde_json::from_slice(&body)
            .map_err(|e| BrainError::MalformedResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Brain for OpenAiBrain {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BrainError> {
        let api_request = self.build_request(request);
        let response = self.chat_completion(api_request).await?;
        let completion = completion_from_response(response, &self.config.model)?;

        debug!(
            "Token usage - prompt: {}, completion: {}, total: {}",
            completion.usage.prompt_tokens,
            completion.usage.completion_tokens,
            completion.usage.total()
        );

        Ok(completion)
    }

    fn name(&self) -> &str {
        "OpenAiBrain"
    }
}

fn classify_transport_error(e: reqwest::Error) -> BrainError {
    if e.is_timeout() {
        BrainError::Timeout
    } else {
        BrainError::Network(format!("Failed to send request: {}", e))
    }
}

/// Turn a non-success status and body into a [`BrainError`], preferring the
/// API's own error message when the body parses.
///
/// A 429 carrying `insufficient_quota` will not clear on retry, so it is
/// reported as a permanent invalid request.
fn classify_status(status: u16, body: &str) -> BrainError {
    let (message, error_type) = match serde_json::from_str::<ApiError>(body) {
        Ok(api_error) => (api_error.error.message, api_error.error.error_type),
        Err(_) => (body.to_string(), None),
    };

    if error_type.as_deref() == Some(INSUFFICIENT_QUOTA) {
        return BrainError::InvalidRequest(format!("{}: {}", INSUFFICIENT_QUOTA, message));
    }
    BrainError::from_status(status, message)
}

/// Extract text and usage from a response.
///
/// Successful completions always carry non-empty text and token counts.
fn completion_from_response(
    response: ChatCompletionResponse,
    fallback_model: &str,
) -> Result<Completion, BrainError> {
    let usage = response
        .usage
        .ok_or_else(|| BrainError::MalformedResponse("response has no usage".to_string()))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BrainError::MalformedResponse("response has no choices".to_string()))?;

    let text = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| {
            BrainError::MalformedResponse(format!(
                "response has no content (finish_reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

    let model = if response.model.is_empty() {
        fallback_model.to_string()
    } else {
        response.model
    };

    Ok(Completion::new(
        text,
        TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
        model,
    ))
}
