//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::message::{Completion, CompletionRequest};

/// A backend that turns a prompt into generated text.
///
/// Implementations can range from deterministic test doubles to remote
/// HTTP services. This trait is object-safe and can be used with
/// `Box<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Send one completion request and wait for the result.
    ///
    /// Implementations make a single attempt; retrying is the caller's call.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BrainError>;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;
}
