use super::config::FormConfig;
use super::state::{FormEvent, FormState};
use crate::domain::coverage::CoverageRule;
use crate::domain::ports::{ClockBox, SubmissionGatewayRef, SubmissionReceipt};
use crate::domain::result::FormResult;
use crate::domain::submission::{SubmissionEvent, SubmissionStatus};
use crate::domain::wire::{WirePayload, to_wire_payload};
use crate::error::Result;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// What a submit action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The coverage rule rejected the form; the validation error is raised.
    Invalid,
    /// An attempt is still in flight; the action was ignored.
    AlreadyPending,
    /// The payload was handed to the gateway and the attempt is pending.
    Dispatched(WirePayload),
}

type Settlement = oneshot::Receiver<Result<SubmissionReceipt>>;

/// Drives one form session: edits, validation, transformation and the
/// submission lifecycle.
///
/// Validation failures and endpoint failures are recorded as state and read
/// back through [`FormOrchestrator::result`]. Methods only return `Err` when
/// the submission lifecycle itself is broken.
pub struct FormOrchestrator {
    state: FormState,
    rule: CoverageRule,
    gateway: SubmissionGatewayRef,
    clock: ClockBox,
    in_flight: Option<Settlement>,
}

impl FormOrchestrator {
    /// Creates a new `FormOrchestrator` instance.
    ///
    /// # Arguments
    ///
    /// * `config` - Session tunables; only the coverage rule is read here.
    /// * `gateway` - The endpoint valid forms are submitted to.
    /// * `clock` - Source of "today" for open-ended employments.
    pub fn new(config: &FormConfig, gateway: SubmissionGatewayRef, clock: ClockBox) -> Self {
        Self {
            state: FormState::new(),
            rule: config.coverage_rule(),
            gateway,
            clock,
            in_flight: None,
        }
    }

    /// Applies a field edit or the add-employer action.
    pub fn handle(&mut self, event: FormEvent) {
        let today = self.clock.today();
        self.state.apply(event, &self.rule, today);
    }

    pub fn should_offer_another_employer(&self) -> bool {
        self.state
            .registry
            .should_offer_another_employer(&self.rule, self.clock.today())
    }

    /// Runs one submit action up to the point where the remote call is in
    /// flight.
    ///
    /// The call runs on a spawned tokio task, so this must be invoked from
    /// within a runtime. Use [`FormOrchestrator::settle`] to observe its end.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.state.submission.is_pending() {
            warn!("submission already in flight; ignoring submit");
            return Ok(SubmitOutcome::AlreadyPending);
        }

        self.state.validation_error = false;

        let data = self.state.gather();
        let employers = data.employers.as_deref().unwrap_or_default();
        let verdict = self.rule.validate(employers, self.clock.today());
        if !verdict.valid {
            info!(employers = employers.len(), "form rejected by coverage rule");
            self.state.validation_error = true;
            return Ok(SubmitOutcome::Invalid);
        }

        let payload = to_wire_payload(&data);
        // A settled attempt is only cleared once a new one is about to start.
        if self.state.submission.is_settled() {
            self.state.submission.transition(SubmissionEvent::Reset)?;
        }
        self.state.submission.transition(SubmissionEvent::Start)?;

        let (sender, receiver) = oneshot::channel();
        let gateway = self.gateway.clone();
        let outgoing = payload.clone();
        tokio::spawn(async move {
            let result = gateway.submit(outgoing).await;
            // The receiver is gone only if the orchestrator was dropped.
            let _ = sender.send(result);
        });
        self.in_flight = Some(receiver);

        info!(
            attempt = self.state.submission.attempts(),
            employers = payload.employer.len(),
            "submission dispatched"
        );
        Ok(SubmitOutcome::Dispatched(payload))
    }

    /// Waits for the in-flight call, if any, and moves the attempt to its
    /// terminal state. Returns the resulting status.
    pub async fn settle(&mut self) -> Result<SubmissionStatus> {
        let Some(receiver) = self.in_flight.take() else {
            return Ok(self.state.status());
        };
        let settled = receiver.await.ok();
        self.apply_settlement(settled)
    }

    /// Non-blocking variant of [`FormOrchestrator::settle`] for event loops.
    /// Returns `None` while the call is still running.
    pub fn try_settle(&mut self) -> Result<Option<SubmissionStatus>> {
        let Some(receiver) = self.in_flight.as_mut() else {
            return Ok(Some(self.state.status()));
        };
        let settled = match receiver.try_recv() {
            Err(oneshot::error::TryRecvError::Empty) => return Ok(None),
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Closed) => None,
        };
        self.in_flight = None;
        self.apply_settlement(settled).map(Some)
    }

    /// Submits and, when dispatched, waits for settlement.
    pub async fn submit_and_settle(&mut self) -> Result<SubmitOutcome> {
        let outcome = self.submit()?;
        if matches!(outcome, SubmitOutcome::Dispatched(_)) {
            self.settle().await?;
        }
        Ok(outcome)
    }

    // `None` means the task ended without sending a result.
    fn apply_settlement(
        &mut self,
        settled: Option<Result<SubmissionReceipt>>,
    ) -> Result<SubmissionStatus> {
        let event = match settled {
            Some(Ok(receipt)) => {
                info!(status = receipt.status, "submission resolved");
                SubmissionEvent::Succeed
            }
            Some(Err(e)) => {
                warn!(error = %e, "submission rejected");
                SubmissionEvent::Fail
            }
            None => {
                error!("submission task ended without a result");
                SubmissionEvent::Fail
            }
        };
        self.state.submission.transition(event)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state.status()
    }

    pub fn result(&self) -> FormResult {
        self.state.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employer::{EmployerField, SlotId};
    use crate::domain::form::PersonalField;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::in_memory::InMemoryGateway;
    use crate::infrastructure::simulated::SimulatedGateway;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::time::Duration;

    fn clock() -> ClockBox {
        Box::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()))
    }

    fn orchestrator(gateway: SubmissionGatewayRef) -> FormOrchestrator {
        FormOrchestrator::new(&FormConfig::default(), gateway, clock())
    }

    fn fill_personal(form: &mut FormOrchestrator) {
        for (field, value) in [
            (PersonalField::FirstName, "edu"),
            (PersonalField::LastName, "romo"),
            (PersonalField::CurrentAddress, "Madrid"),
        ] {
            form.handle(FormEvent::EditPersonal {
                field,
                value: value.to_string(),
            });
        }
    }

    fn fill_employer(form: &mut FormOrchestrator, slot: SlotId, name: &str, start: &str, end: &str) {
        for (field, value) in [
            (EmployerField::Name, name),
            (EmployerField::StartDate, start),
            (EmployerField::EndDate, end),
        ] {
            form.handle(FormEvent::EditEmployer {
                slot,
                field,
                value: value.to_string(),
            });
        }
    }

    #[tokio::test]
    async fn test_no_employer_raises_validation_error() {
        let gateway = InMemoryGateway::new();
        let mut form = orchestrator(Arc::new(gateway.clone()));
        fill_personal(&mut form);

        let outcome = form.submit_and_settle().await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(form.result(), FormResult::ValidationError);
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert!(gateway.submissions().await.is_empty());
    }

    #[tokio::test]
    async fn test_short_single_employer_raises_validation_error() {
        let gateway = InMemoryGateway::new();
        let mut form = orchestrator(Arc::new(gateway.clone()));
        fill_personal(&mut form);
        fill_employer(&mut form, SlotId::First, "romo corp", "2023-03-21", "2023-08-21");

        assert_eq!(form.submit().unwrap(), SubmitOutcome::Invalid);
        assert_eq!(form.result(), FormResult::ValidationError);
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert!(gateway.submissions().await.is_empty());
    }

    #[tokio::test]
    async fn test_valid_form_goes_pending_then_resolved() {
        let gateway = SimulatedGateway::new(Duration::from_millis(20), false);
        let mut form = orchestrator(Arc::new(gateway));
        fill_personal(&mut form);
        fill_employer(&mut form, SlotId::First, "romo corp", "2018-03-21", "2023-03-21");

        let SubmitOutcome::Dispatched(payload) = form.submit().unwrap() else {
            panic!("expected the form to be dispatched");
        };
        assert_eq!(payload.personal.first_name, "edu");
        assert_eq!(payload.employer[0].start_date, "20180321");
        assert_eq!(payload.employer[0].end_date, "20230321");
        assert_eq!(form.result(), FormResult::Loading);

        assert_eq!(form.settle().await.unwrap(), SubmissionStatus::Resolved);
        assert_eq!(form.result(), FormResult::Success);
        assert!(!form.result().is_alert());
    }

    #[tokio::test]
    async fn test_failed_submission_is_rejected() {
        let gateway = InMemoryGateway::failing();
        let mut form = orchestrator(Arc::new(gateway.clone()));
        fill_employer(&mut form, SlotId::First, "romo corp", "2018-03-21", "");

        form.submit_and_settle().await.unwrap();

        assert_eq!(form.status(), SubmissionStatus::Rejected);
        assert_eq!(form.result(), FormResult::Failed);
        assert_eq!(gateway.submissions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_while_pending_is_ignored() {
        let gateway = SimulatedGateway::new(Duration::from_millis(50), false);
        let mut form = orchestrator(Arc::new(gateway));
        fill_employer(&mut form, SlotId::First, "romo corp", "2018-03-21", "2023-03-21");

        assert!(matches!(form.submit().unwrap(), SubmitOutcome::Dispatched(_)));
        assert_eq!(form.submit().unwrap(), SubmitOutcome::AlreadyPending);
        assert_eq!(form.state().submission.attempts(), 1);
        assert_eq!(form.try_settle().unwrap(), None);

        assert_eq!(form.settle().await.unwrap(), SubmissionStatus::Resolved);
    }

    #[tokio::test]
    async fn test_resubmit_after_settlement_starts_new_attempt() {
        let gateway = InMemoryGateway::new();
        let mut form = orchestrator(Arc::new(gateway.clone()));
        fill_employer(&mut form, SlotId::First, "romo corp", "2018-03-21", "2023-03-21");

        form.submit_and_settle().await.unwrap();
        form.submit_and_settle().await.unwrap();

        assert_eq!(form.status(), SubmissionStatus::Resolved);
        assert_eq!(form.state().submission.attempts(), 2);
        assert_eq!(gateway.submissions().await.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_resubmit_after_success_keeps_status() {
        let gateway = InMemoryGateway::new();
        let mut form = orchestrator(Arc::new(gateway.clone()));
        fill_employer(&mut form, SlotId::First, "romo corp", "2018-03-21", "2023-03-21");
        form.submit_and_settle().await.unwrap();

        form.handle(FormEvent::EditEmployer {
            slot: SlotId::First,
            field: EmployerField::StartDate,
            value: "2023-01-01".into(),
        });
        assert_eq!(form.submit().unwrap(), SubmitOutcome::Invalid);
        assert_eq!(form.status(), SubmissionStatus::Resolved);
        assert_eq!(form.state().submission.attempts(), 1);
        assert_eq!(form.result(), FormResult::ValidationError);
        assert_eq!(gateway.submissions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_resubmit_after_failure_keeps_status() {
        let mut form = orchestrator(Arc::new(InMemoryGateway::failing()));
        fill_employer(&mut form, SlotId::First, "romo corp", "2018-03-21", "2023-03-21");
        form.submit_and_settle().await.unwrap();
        assert_eq!(form.status(), SubmissionStatus::Rejected);

        form.handle(FormEvent::EditEmployer {
            slot: SlotId::First,
            field: EmployerField::StartDate,
            value: "2023-01-01".into(),
        });
        assert_eq!(form.submit().unwrap(), SubmitOutcome::Invalid);
        assert_eq!(form.status(), SubmissionStatus::Rejected);
        assert_eq!(form.result(), FormResult::ValidationError);
    }

    struct PanickingGateway;

    #[async_trait::async_trait]
    impl crate::domain::ports::SubmissionGateway for PanickingGateway {
        async fn submit(&self, _payload: WirePayload) -> Result<SubmissionReceipt> {
            panic!("gateway blew up");
        }
    }

    #[tokio::test]
    async fn test_task_without_result_settles_as_rejected() {
        let mut form = orchestrator(Arc::new(PanickingGateway));
        fill_employer(&mut form, SlotId::First, "romo corp", "2018-03-21", "2023-03-21");

        assert!(matches!(form.submit().unwrap(), SubmitOutcome::Dispatched(_)));
        assert_eq!(form.settle().await.unwrap(), SubmissionStatus::Rejected);
        assert_eq!(form.result(), FormResult::Failed);
    }

    #[tokio::test]
    async fn test_try_settle_task_without_result_settles_as_rejected() {
        let mut form = orchestrator(Arc::new(PanickingGateway));
        fill_employer(&mut form, SlotId::First, "romo corp", "2018-03-21", "2023-03-21");
        assert!(matches!(form.submit().unwrap(), SubmitOutcome::Dispatched(_)));

        let mut settled = None;
        for _ in 0..100 {
            settled = form.try_settle().unwrap();
            if settled.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(settled, Some(SubmissionStatus::Rejected));
        assert_eq!(form.result(), FormResult::Failed);
        assert_eq!(form.try_settle().unwrap(), Some(SubmissionStatus::Rejected));
    }

    #[tokio::test]
    async fn test_second_employer_makes_short_history_valid() {
        let gateway = InMemoryGateway::new();
        let mut form = orchestrator(Arc::new(gateway.clone()));
        fill_employer(&mut form, SlotId::First, "romo corp", "2023-01-01", "2023-07-20");
        assert!(form.should_offer_another_employer());

        form.handle(FormEvent::AddAnotherEmployer);
        assert!(!form.should_offer_another_employer());
        fill_employer(&mut form, SlotId::Second, "other corp", "2022-01-01", "2022-01-02");

        form.submit_and_settle().await.unwrap();
        assert_eq!(form.status(), SubmissionStatus::Resolved);
        assert_eq!(gateway.submissions().await[0].employer.len(), 2);
    }

    #[tokio::test]
    async fn test_try_settle_without_attempt_reports_status() {
        let mut form = orchestrator(Arc::new(InMemoryGateway::new()));
        assert_eq!(form.try_settle().unwrap(), Some(SubmissionStatus::Idle));
        assert_eq!(form.settle().await.unwrap(), SubmissionStatus::Idle);
    }
}
