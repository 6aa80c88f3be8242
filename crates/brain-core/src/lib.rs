//! Core trait and types for completion backends.
//!
//! This crate provides the shared interface for every backend that turns a
//! prompt into generated text in the docsuite toolkit. It defines:
//!
//! - [`Brain`] - The trait that all completion backends must implement
//! - [`CompletionRequest`] / [`Completion`] - Request and response types
//! - [`BrainError`] - Error taxonomy, split into transient and permanent causes
//! - [`PriceTable`] - Per-1K-token pricing used to estimate request cost
//! - [`RetryPolicy`] / [`with_retry`] - Bounded exponential backoff for transient failures
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError, Completion, CompletionRequest, TokenUsage};
//! use async_trait::async_trait;
//!
//! struct FixedBrain;
//!
//! #[async_trait]
//! impl Brain for FixedBrain {
//!     async fn complete(&self, _request: CompletionRequest) -> Result<Completion, BrainError> {
//!         Ok(Completion::new("A short summary.", TokenUsage::new(10, 4), "fixed"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "FixedBrain"
//!     }
//! }
//! ```

mod error;
mod message;
mod pricing;
mod retry;
mod trait_def;

pub use error::BrainError;
pub use message::{ChatMessage, Completion, CompletionRequest, TokenUsage};
pub use pricing::PriceTable;
pub use retry::{with_retry, RetryPolicy};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
