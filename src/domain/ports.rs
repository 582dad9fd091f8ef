use super::wire::WirePayload;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// What the remote endpoint answered. Only success or failure is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub status: u16,
}

/// The remote endpoint that receives a validated form.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, payload: WirePayload) -> Result<SubmissionReceipt>;
}

/// Source of the current calendar date, used when an end date is absent.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub type SubmissionGatewayRef = Arc<dyn SubmissionGateway>;
pub type ClockBox = Box<dyn Clock>;
