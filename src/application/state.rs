use crate::domain::coverage::CoverageRule;
use crate::domain::employer::{EmployerField, SlotId};
use crate::domain::form::{FormData, PersonalField, PersonalInfo};
use crate::domain::registry::EmployerRegistry;
use crate::domain::result::FormResult;
use crate::domain::submission::{SubmissionStateMachine, SubmissionStatus};
use chrono::NaiveDate;
use tracing::warn;

/// A user interaction that changes the form synchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    EditPersonal {
        field: PersonalField,
        value: String,
    },
    EditEmployer {
        slot: SlotId,
        field: EmployerField,
        value: String,
    },
    AddAnotherEmployer,
}

/// Everything the form knows between two events.
#[derive(Debug, Default)]
pub struct FormState {
    pub personal: PersonalInfo,
    pub registry: EmployerRegistry,
    pub validation_error: bool,
    pub submission: SubmissionStateMachine,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an edit or the add-employer action. Every event clears the
    /// validation error flag.
    pub fn apply(&mut self, event: FormEvent, rule: &CoverageRule, today: NaiveDate) {
        self.validation_error = false;
        match event {
            FormEvent::EditPersonal { field, value } => self.personal.set(field, &value),
            FormEvent::EditEmployer { slot, field, value } => {
                self.registry.apply_field_edit(slot, field, &value);
            }
            FormEvent::AddAnotherEmployer => {
                if self.registry.should_offer_another_employer(rule, today) {
                    self.registry.reveal_second_slot();
                } else {
                    warn!("another employer is not on offer; ignoring");
                }
            }
        }
    }

    /// Current field values plus the registry snapshot.
    pub fn gather(&self) -> FormData {
        FormData {
            personal: self.personal.clone(),
            employers: self.registry.snapshot(),
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.submission.status()
    }

    pub fn result(&self) -> FormResult {
        FormResult::derive(self.validation_error, self.submission.status())
    }
}
