use crate::domain::submission::{SubmissionEvent, SubmissionStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Invalid submission transition: {event:?} while {from:?}")]
    InvalidTransition {
        from: SubmissionStatus,
        event: SubmissionEvent,
    },
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),
    #[error("Script error: {0}")]
    ScriptError(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
