use super::coverage::CoverageRule;
use super::dates::parse_date_input;
use super::employer::{EmployerField, EmployerRecord, SlotId};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Holds the at most two employer records disclosed in one form session.
///
/// Records are replaced whole on every edit (last write wins per slot) and are
/// never removed. The second slot only accepts records once it has been
/// revealed, and it stays revealed for the rest of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployerRegistry {
    slots: [Option<EmployerRecord>; 2],
    second_slot_revealed: bool,
}

impl EmployerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entry for `record.id`. Returns `false` when the record
    /// targets the second slot before it has been revealed.
    pub fn upsert(&mut self, record: EmployerRecord) -> bool {
        if record.id == SlotId::Second && !self.second_slot_revealed {
            warn!(slot = %record.id, "ignoring edit for a slot that is not revealed");
            return false;
        }
        debug!(slot = %record.id, "employer record updated");
        let index = record.id.index();
        self.slots[index] = Some(record);
        true
    }

    /// Applies one raw field edit to the in-progress record of `slot` and
    /// re-sends the full record. Malformed dates become unset.
    pub fn apply_field_edit(&mut self, slot: SlotId, field: EmployerField, raw: &str) -> bool {
        let mut record = self
            .record(slot)
            .cloned()
            .unwrap_or_else(|| EmployerRecord::empty(slot));
        match field {
            EmployerField::Name => record.name = (!raw.is_empty()).then(|| raw.to_string()),
            EmployerField::StartDate => record.start_date = parse_date_input(raw),
            EmployerField::EndDate => record.end_date = parse_date_input(raw),
        }
        self.upsert(record)
    }

    pub fn record(&self, slot: SlotId) -> Option<&EmployerRecord> {
        self.slots[slot.index()].as_ref()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populated records in slot order, or `None` if no slot was ever edited.
    pub fn snapshot(&self) -> Option<Vec<EmployerRecord>> {
        let records: Vec<EmployerRecord> = self.slots.iter().flatten().cloned().collect();
        (!records.is_empty()).then_some(records)
    }

    /// Reveals the second employer fieldset. Idempotent and one-way.
    pub fn reveal_second_slot(&mut self) {
        if !self.second_slot_revealed {
            debug!("second employer slot revealed");
        }
        self.second_slot_revealed = true;
    }

    pub fn is_second_slot_revealed(&self) -> bool {
        self.second_slot_revealed
    }

    /// Whether the "add another employer" action should be offered.
    ///
    /// True when exactly one slot is populated, the second slot is not yet
    /// revealed, and that employer has a known start date but spans less than
    /// the rule's minimum.
    pub fn should_offer_another_employer(&self, rule: &CoverageRule, today: NaiveDate) -> bool {
        if self.second_slot_revealed {
            return false;
        }
        match self.slots.iter().flatten().collect::<Vec<_>>().as_slice() {
            [only] => {
                only.start_date.is_some() && !rule.single_employer_sufficient(only, today)
            }
            _ => false,
        }
    }
}
