//! Mock completion backends for pipeline tests.
//!
//! This crate provides mock implementations of the `Brain` trait:
//! - `EchoBrain` - Answers every request with a canned reply and records it
//! - `FailingBrain` - Fails a set number of times (or forever) with a chosen error
//! - `StallingBrain` - Answers a set number of calls, then never returns
//!
//! For production use, use the `openai-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, CompletionRequest, EchoBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = EchoBrain::with_reply("Three key points.");
//!
//!     let request = CompletionRequest::new("Be brief.", "Summarize: ...", 0.4, 300);
//!     let completion = brain.complete(request).await?;
//!
//!     assert_eq!(completion.text, "Three key points.");
//!     assert_eq!(brain.requests().len(), 1);
//!     Ok(())
//! }
//! ```

mod echo;
mod failing;
mod stalling;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, Completion, CompletionRequest, TokenUsage};

// Export mock implementations
pub use echo::EchoBrain;
pub use failing::FailingBrain;
pub use stalling::StallingBrain;
