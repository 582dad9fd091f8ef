use super::employer::EmployerRecord;
use std::str::FromStr;

/// Identity fields typed by the user. None of them is validated on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonalInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub current_address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    FirstName,
    LastName,
    CurrentAddress,
}

impl FromStr for PersonalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first_name" => Ok(PersonalField::FirstName),
            "last_name" => Ok(PersonalField::LastName),
            "current_address" => Ok(PersonalField::CurrentAddress),
            other => Err(format!("Unknown personal field: {other}")),
        }
    }
}

impl PersonalInfo {
    /// Stores a raw text value. Empty input clears the field.
    pub fn set(&mut self, field: PersonalField, value: &str) {
        let value = (!value.is_empty()).then(|| value.to_string());
        match field {
            PersonalField::FirstName => self.first_name = value,
            PersonalField::LastName => self.last_name = value,
            PersonalField::CurrentAddress => self.current_address = value,
        }
    }
}

/// Everything gathered from the form at submit time.
///
/// `employers` is `None` when the user never touched an employer fieldset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormData {
    pub personal: PersonalInfo,
    pub employers: Option<Vec<EmployerRecord>>,
}
