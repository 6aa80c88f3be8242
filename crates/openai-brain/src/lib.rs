//! OpenAI-compatible completion backend.
//!
//! This crate provides a [`Brain`] implementation that talks to any service
//! exposing the `/v1/chat/completions` endpoint (OpenAI by default).
//!
//! # Features
//!
//! - Defaults to `gpt-4o-mini` and its published per-1K-token prices
//! - Single attempt per call with a bounded transport timeout
//! - HTTP failures classified into transient and permanent [`BrainError`]s
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_brain::{Brain, CompletionRequest, OpenAiBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = OpenAiBrain::from_env()?;
//!     let request = CompletionRequest::new(
//!         "Create concise executive summaries.",
//!         "Provide a 2-3 paragraph executive summary:\n\n...",
//!         0.5,
//!         300,
//!     );
//!     let completion = brain.complete(request).await?;
//!     println!("{}", completion.text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::OpenAiBrain;
pub use config::{OpenAiBrainConfig, OpenAiBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{
    async_trait, Brain, BrainError, ChatMessage, Completion, CompletionRequest, PriceTable,
    TokenUsage,
};
