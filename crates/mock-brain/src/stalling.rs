//! Stalling brain implementation - answers a few calls, then never returns.

use std::future::pending;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use brain_core::{Brain, BrainError, Completion, CompletionRequest};

/// A brain that wraps another brain and hangs after a number of answers.
///
/// Useful for testing cancellation: the first `answered` calls go to the
/// inner brain, every later call stays pending until its future is dropped.
#[derive(Debug, Clone)]
pub struct StallingBrain<B: Brain> {
    inner: B,
    answered: u32,
    calls: Arc<AtomicU32>,
}

impl<B: Brain> StallingBrain<B> {
    /// Answer the first `answered` calls via `inner`, then stall.
    pub fn after(answered: u32, inner: B) -> Self {
        Self {
            inner,
            answered,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Number of calls received so far, stalled ones included.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<B: Brain> Brain for StallingBrain<B> {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BrainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.answered {
            return self.inner.complete(request).await;
        }
        pending().await
    }

    fn name(&self) -> &str {
        "StallingBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoBrain;
    use std::time::Duration;
    use tokio::time::timeout;

    fn request() -> CompletionRequest {
        CompletionRequest::new("system", "text", 0.5, 300)
    }

    #[tokio::test]
    async fn test_stalls_after_answers() {
        let brain = StallingBrain::after(1, EchoBrain::with_reply("ok"));

        let first = brain.complete(request()).await.unwrap();
        assert_eq!(first.text, "ok");

        let second = timeout(Duration::from_millis(50), brain.complete(request())).await;
        assert!(second.is_err());
        assert_eq!(brain.calls(), 2);
    }
}
