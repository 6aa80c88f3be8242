//! Prompt-templated completion pipeline for loaded documents.
//!
//! This crate provides the [`Orchestrator`] type which turns normalized
//! documents into completion requests, sends them through a [`Brain`], and
//! reports either the model output with token usage and an estimated cost,
//! or a readable failure.
//!
//! # Features
//!
//! - Fixed prompt template and model parameters per [`Task`]
//! - Hard per-document character ceilings before anything is sent
//! - Retry with backoff for transient service errors
//! - Sequential batch runs that survive per-document failures
//! - Timestamped JSON and plain-text report writers
//!
//! # Architecture
//!
//! ```text
//! path ──► doc_loader::load ──► NormalizedDocument
//!                                     │
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  1. Check document count against the task                   │
//! │  2. Truncate each segment, fill the task template           │
//! │  3. Call the brain (retrying transient errors)              │
//! │  4. Price token usage                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     ▼
//!                  CompletionResult ──► BatchRun ──► report files
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use orchestrator::{Orchestrator, Task};
//! use openai_brain::OpenAiBrain;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::new(OpenAiBrain::from_env()?);
//!     let doc = doc_loader::load("report.pdf")?;
//!
//!     let result = orchestrator
//!         .complete_document(Task::ExecutiveSummary, &doc)
//!         .await;
//!     if let Some(output) = result.output() {
//!         println!("{}", output.output_text);
//!     }
//!     Ok(())
//! }
//! ```

mod batch;
mod error;
mod orchestrator;
mod prompt;
mod report;
mod result;
mod sections;
mod task;

// Public exports
pub use batch::{collect_batch_files, run_batch, BatchRun, DocumentOutcome, DocumentRecord, FailureStage};
pub use error::{PromptError, ReportError};
pub use orchestrator::Orchestrator;
pub use prompt::{build_request, truncate, Segment};
pub use report::{
    format_cost, render_batch_json, render_batch_report, render_comparison_report,
    render_export_json, render_synthesis_report, timestamped_filename, write_batch_json,
    write_batch_report, write_comparison_report, write_export_json, write_synthesis_report,
};
pub use result::{CompletionOutput, CompletionResult};
pub use sections::parse_sections;
pub use task::{Arity, Task, TaskSpec};

// Re-export commonly used types from dependencies
pub use brain_core::{Brain, BrainError, PriceTable, RetryPolicy};
pub use doc_loader::{DocumentFormat, LoadError, NormalizedDocument};
