//! Input formats that feed events into a form session.

pub mod csv;
