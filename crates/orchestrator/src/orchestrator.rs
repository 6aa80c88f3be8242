//! The completion orchestrator.

use brain_core::{with_retry, Brain, PriceTable, RetryPolicy};
use doc_loader::NormalizedDocument;
use tracing::{debug, info, warn};

use crate::prompt::{build_request, Segment};
use crate::result::{CompletionOutput, CompletionResult};
use crate::task::Task;

/// Runs prompt-templated completions against a [`Brain`].
///
/// For every call the orchestrator:
/// - truncates each segment to the task's ceiling and fills its template
/// - sends the request, retrying transient failures per its [`RetryPolicy`]
/// - prices the reported token usage with its [`PriceTable`]
/// - folds any error into [`CompletionResult::Failure`]
///
/// Calls are sequential: each one awaits its response before returning.
pub struct Orchestrator<B: Brain> {
    brain: B,
    prices: PriceTable,
    retry: RetryPolicy,
}

impl<B: Brain> Orchestrator<B> {
    /// Create an orchestrator with gpt-4o-mini prices and the default retry policy.
    pub fn new(brain: B) -> Self {
        Self {
            brain,
            prices: PriceTable::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_prices(mut self, prices: PriceTable) -> Self {
        self.prices = prices;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn brain(&self) -> &B {
        &self.brain
    }

    pub fn prices(&self) -> PriceTable {
        self.prices
    }

    /// Run `task` over `segments`. Never fails: errors become `Failure`.
    pub async fn complete(&self, task: Task, segments: &[Segment]) -> CompletionResult {
        let request = match build_request(task, segments) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected {} request: {}", task.as_str(), e);
                return CompletionResult::failure(e.to_string());
            }
        };

        info!(
            "Running {} over {} document(s) via {}",
            task.as_str(),
            segments.len(),
            self.brain.name()
        );
        debug!(
            "Request size: {} chars, max_tokens: {}",
            request.content_chars(),
            request.max_tokens
        );

        match with_retry(&self.retry, || self.brain.complete(request.clone())).await {
            Ok(completion) => {
                let cost = self.prices.cost_of(&completion.usage);
                info!(
                    "{} complete: {} tokens, ${:.6}",
                    task.as_str(),
                    completion.usage.total(),
                    cost
                );
                CompletionResult::Success(CompletionOutput::from_completion(completion, cost))
            }
            Err(e) => {
                warn!("{} failed: {}", task.as_str(), e);
                CompletionResult::failure(e.to_string())
            }
        }
    }

    /// Run a single-document task.
    pub async fn complete_document(&self, task: Task, doc: &NormalizedDocument) -> CompletionResult {
        self.complete(task, &[Segment::from_document(doc)]).await
    }

    /// Compare two documents.
    pub async fn compare(
        &self,
        first: &NormalizedDocument,
        second: &NormalizedDocument,
    ) -> CompletionResult {
        let segments = [Segment::from_document(first), Segment::from_document(second)];
        self.complete(Task::Comparison, &segments).await
    }

    /// Synthesize three or more documents.
    pub async fn synthesize(&self, docs: &[NormalizedDocument]) -> CompletionResult {
        let segments: Vec<Segment> = docs.iter().map(Segment::from_document).collect();
        self.complete(Task::Synthesis, &segments).await
    }
}
