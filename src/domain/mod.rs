//! Pure model and rules of the referencing form, plus the ports it talks through.

pub mod coverage;
pub mod dates;
pub mod employer;
pub mod form;
pub mod ports;
pub mod registry;
pub mod result;
pub mod submission;
pub mod wire;
