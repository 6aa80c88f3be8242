//! Failing brain implementation - injects errors before (optionally) answering.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use brain_core::{Brain, BrainError, Completion, CompletionRequest};

use crate::echo::EchoBrain;

/// A brain that fails with a fixed error.
///
/// Either fails forever ([`FailingBrain::new`]) or fails a fixed number of
/// times and then answers like the wrapped [`EchoBrain`]
/// ([`FailingBrain::then_succeed`]). Useful for exercising retry and
/// partial-failure paths.
#[derive(Debug, Clone)]
pub struct FailingBrain {
    error: BrainError,
    failures: Option<u32>,
    fallback: EchoBrain,
    calls: Arc<AtomicU32>,
}

impl FailingBrain {
    /// Fail every call with `error`.
    pub fn new(error: BrainError) -> Self {
        Self {
            error,
            failures: None,
            fallback: EchoBrain::new(),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Fail the first `failures` calls with `error`, then answer via `fallback`.
    pub fn then_succeed(error: BrainError, failures: u32, fallback: EchoBrain) -> Self {
        Self {
            error,
            failures: Some(failures),
            fallback,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BrainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failures {
            Some(limit) if call >= limit => self.fallback.complete(request).await,
            _ => Err(self.error.clone()),
        }
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }
}
