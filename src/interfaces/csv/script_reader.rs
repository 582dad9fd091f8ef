use crate::application::state::FormEvent;
use crate::domain::employer::SlotId;
use crate::error::{FormError, Result};
use serde::Deserialize;
use std::io::Read;

/// One step of a recorded form session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Edit(FormEvent),
    Submit,
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum StepKind {
    Personal,
    Employer,
    AddEmployer,
    Submit,
}

#[derive(Debug, Deserialize)]
struct ScriptRow {
    event: StepKind,
    slot: Option<String>,
    field: Option<String>,
    value: Option<String>,
}

impl TryFrom<ScriptRow> for ScriptStep {
    type Error = FormError;

    fn try_from(row: ScriptRow) -> Result<Self> {
        let value = row.value.unwrap_or_default();
        let step = match row.event {
            StepKind::Personal => ScriptStep::Edit(FormEvent::EditPersonal {
                field: required(row.field, "field")?
                    .parse()
                    .map_err(FormError::ScriptError)?,
                value,
            }),
            StepKind::Employer => ScriptStep::Edit(FormEvent::EditEmployer {
                slot: required(row.slot, "slot")?
                    .parse::<SlotId>()
                    .map_err(FormError::ScriptError)?,
                field: required(row.field, "field")?
                    .parse()
                    .map_err(FormError::ScriptError)?,
                value,
            }),
            StepKind::AddEmployer => ScriptStep::Edit(FormEvent::AddAnotherEmployer),
            StepKind::Submit => ScriptStep::Submit,
        };
        Ok(step)
    }
}

fn required(column: Option<String>, name: &str) -> Result<String> {
    column.ok_or_else(|| FormError::ScriptError(format!("Missing {name} column")))
}

/// Reads a form session recorded as CSV rows of `event,slot,field,value`.
///
/// Whitespace is trimmed and short rows are accepted, so `submit` and
/// `add_employer` rows may omit the trailing columns.
pub struct ScriptReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScriptReader<R> {
    /// Creates a new `ScriptReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields the steps; a malformed row yields an error and reading
    /// continues with the next one.
    pub fn steps(self) -> impl Iterator<Item = Result<ScriptStep>> {
        self.reader.into_deserialize().map(|row| {
            let row: ScriptRow = row?;
            ScriptStep::try_from(row)
        })
    }
}
