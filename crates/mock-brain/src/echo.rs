//! Echo brain implementation - canned replies with recorded requests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use brain_core::{Brain, BrainError, Completion, CompletionRequest, TokenUsage};

/// Model name reported by mock completions.
pub const MOCK_MODEL: &str = "mock-model";

/// A brain that answers without any AI processing.
///
/// Every request is recorded so tests can inspect the prompts the pipeline
/// built. Token usage is approximated as one token per four characters
/// unless fixed with [`EchoBrain::with_usage`].
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    /// Fixed reply; defaults to a description of the user message.
    reply: Option<String>,
    /// Fixed usage; defaults to a character-based estimate.
    usage: Option<TokenUsage>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl EchoBrain {
    /// Create a new EchoBrain with the default reply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBrain that always answers with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::default()
        }
    }

    /// Report fixed token counts on every completion.
    pub fn with_usage(mut self, prompt_tokens: u32, completion_tokens: u32) -> Self {
        self.usage = Some(TokenUsage::new(prompt_tokens, completion_tokens));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn reply_for(&self, request: &CompletionRequest) -> String {
        match &self.reply {
            Some(reply) => reply.clone(),
            None => format!(
                "Echo: received {} characters",
                request.user_content().map(|c| c.chars().count()).unwrap_or(0)
            ),
        }
    }
}

fn estimate_tokens(chars: usize) -> u32 {
    chars.div_ceil(4) as u32
}

#[async_trait]
impl Brain for EchoBrain {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BrainError> {
        let text = self.reply_for(&request);
        let usage = self.usage.unwrap_or_else(|| {
            TokenUsage::new(
                estimate_tokens(request.content_chars()),
                estimate_tokens(text.chars().count()),
            )
        });

        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request);
        }

        Ok(Completion::new(text, usage, MOCK_MODEL))
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}
