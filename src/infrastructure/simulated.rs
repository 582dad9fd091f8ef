use crate::domain::ports::{SubmissionGateway, SubmissionReceipt};
use crate::domain::wire::WirePayload;
use crate::error::{FormError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Default round-trip time of the simulated endpoint.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// Stands in for the remote endpoint: waits, then succeeds with status 200
/// unless configured to fail.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
    fail: bool,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY, false)
    }
}

impl SimulatedGateway {
    pub fn new(latency: Duration, fail: bool) -> Self {
        Self { latency, fail }
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn submit(&self, payload: WirePayload) -> Result<SubmissionReceipt> {
        info!(
            employers = payload.employer.len(),
            latency = ?self.latency,
            "sending submission"
        );
        tokio::time::sleep(self.latency).await;
        if self.fail {
            return Err(FormError::SubmissionFailed(
                "simulated endpoint failure".to_string(),
            ));
        }
        Ok(SubmissionReceipt { status: 200 })
    }
}
