//! Tagged result of one orchestrated completion.

use brain_core::Completion;
use serde::Serialize;

/// Successful completion payload.
///
/// `output_text` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionOutput {
    pub output_text: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    /// Estimate derived from the price table, not a billing record.
    pub estimated_cost_usd: f64,
    pub model: String,
}

impl CompletionOutput {
    pub fn from_completion(completion: Completion, estimated_cost_usd: f64) -> Self {
        Self {
            prompt_tokens: completion.usage.prompt_tokens,
            completion_tokens: completion.usage.completion_tokens,
            total_tokens: completion.usage.total(),
            output_text: completion.text,
            estimated_cost_usd,
            model: completion.model,
        }
    }
}

/// Outcome of an orchestrated completion: output or a readable error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompletionResult {
    Success(CompletionOutput),
    Failure { error_message: String },
}

impl CompletionResult {
    pub fn failure(error_message: impl Into<String>) -> Self {
        Self::Failure {
            error_message: error_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn output(&self) -> Option<&CompletionOutput> {
        match self {
            Self::Success(output) => Some(output),
            Self::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error_message } => Some(error_message),
        }
    }

    /// Estimated cost, zero for failures.
    pub fn cost(&self) -> f64 {
        self.output().map(|o| o.estimated_cost_usd).unwrap_or(0.0)
    }
}
