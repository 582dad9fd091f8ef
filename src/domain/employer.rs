use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two employer-entry positions in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotId {
    #[serde(rename = "employer-1")]
    First,
    #[serde(rename = "employer-2")]
    Second,
}

impl SlotId {
    pub const ALL: [SlotId; 2] = [SlotId::First, SlotId::Second];

    /// The stable identifier used by the presentation layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotId::First => "employer-1",
            SlotId::Second => "employer-2",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            SlotId::First => 0,
            SlotId::Second => 1,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "employer-1" => Ok(SlotId::First),
            "employer-2" => Ok(SlotId::Second),
            other => Err(format!("Unknown employer slot: {other}")),
        }
    }
}

/// Editable fields of an employer fieldset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployerField {
    Name,
    StartDate,
    EndDate,
}

impl FromStr for EmployerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(EmployerField::Name),
            "start_date" => Ok(EmployerField::StartDate),
            "end_date" => Ok(EmployerField::EndDate),
            other => Err(format!("Unknown employer field: {other}")),
        }
    }
}

/// A disclosed employer, as held by the form while the user types.
///
/// Every field is optional until the user fills it in; an unparseable date is
/// stored as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerRecord {
    pub id: SlotId,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EmployerRecord {
    /// An employer fieldset as it looks when first mounted.
    pub fn empty(id: SlotId) -> Self {
        Self {
            id,
            name: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_period(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }
}
