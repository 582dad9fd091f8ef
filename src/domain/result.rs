use super::submission::SubmissionStatus;

/// What the result region of the form shows. Exactly one variant at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResult {
    Nothing,
    ValidationError,
    Loading,
    Success,
    Failed,
}

impl FormResult {
    /// A validation error hides whatever the submission status says.
    pub fn derive(validation_error: bool, status: SubmissionStatus) -> Self {
        if validation_error {
            return FormResult::ValidationError;
        }
        match status {
            SubmissionStatus::Idle => FormResult::Nothing,
            SubmissionStatus::Pending => FormResult::Loading,
            SubmissionStatus::Resolved => FormResult::Success,
            SubmissionStatus::Rejected => FormResult::Failed,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            FormResult::Nothing => None,
            FormResult::ValidationError => Some("Error"),
            FormResult::Loading => Some("Loading..."),
            FormResult::Success => Some("Form successfully submitted"),
            FormResult::Failed => Some("Submission failed, please retry"),
        }
    }

    /// Rendered with alert semantics.
    pub fn is_alert(&self) -> bool {
        matches!(self, FormResult::ValidationError | FormResult::Failed)
    }
}
