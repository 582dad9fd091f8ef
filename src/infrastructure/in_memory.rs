use crate::domain::ports::{SubmissionGateway, SubmissionReceipt};
use crate::domain::wire::WirePayload;
use crate::error::{FormError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A gateway that keeps every payload it receives in memory.
///
/// Answers immediately with the configured outcome. Clones share the same
/// record of submissions, so a test can hand one clone to the orchestrator and
/// inspect the other.
#[derive(Default, Clone)]
pub struct InMemoryGateway {
    submissions: Arc<RwLock<Vec<WirePayload>>>,
    failing: bool,
}

impl InMemoryGateway {
    /// Creates a gateway that accepts every submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway that records submissions but reports failure.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn submissions(&self) -> Vec<WirePayload> {
        self.submissions.read().await.clone()
    }
}

#[async_trait]
impl SubmissionGateway for InMemoryGateway {
    async fn submit(&self, payload: WirePayload) -> Result<SubmissionReceipt> {
        let mut submissions = self.submissions.write().await;
        submissions.push(payload);
        if self.failing {
            return Err(FormError::SubmissionFailed(
                "endpoint rejected the submission".to_string(),
            ));
        }
        Ok(SubmissionReceipt { status: 200 })
    }
}
