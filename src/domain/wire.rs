use super::employer::EmployerRecord;
use super::form::FormData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date rendering expected by the remote endpoint: calendar date, no separators.
pub const WIRE_DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePersonal {
    pub first_name: String,
    pub last_name: String,
    pub current_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEmployer {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

/// Normalized payload sent to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePayload {
    pub personal: WirePersonal,
    pub employer: Vec<WireEmployer>,
}

/// Renders a date as `YYYYMMDD`, or an empty string when unset.
pub fn wire_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(WIRE_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

impl From<&EmployerRecord> for WireEmployer {
    fn from(record: &EmployerRecord) -> Self {
        Self {
            name: record.name.clone().unwrap_or_default(),
            start_date: wire_date(record.start_date),
            end_date: wire_date(record.end_date),
        }
    }
}

impl From<&FormData> for WirePayload {
    fn from(form: &FormData) -> Self {
        let personal = &form.personal;
        Self {
            personal: WirePersonal {
                first_name: personal.first_name.clone().unwrap_or_default(),
                last_name: personal.last_name.clone().unwrap_or_default(),
                current_address: personal.current_address.clone().unwrap_or_default(),
            },
            employer: form
                .employers
                .iter()
                .flatten()
                .map(WireEmployer::from)
                .collect(),
        }
    }
}

/// Maps gathered form data to the wire shape. Never fails.
pub fn to_wire_payload(form: &FormData) -> WirePayload {
    WirePayload::from(form)
}
