use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "event,slot,field,value";

/// Personal rows shared by every scenario.
pub const PERSONAL_ROWS: [&str; 3] = [
    "personal,,first_name,edu",
    "personal,,last_name,romo",
    "personal,,current_address,Madrid",
];

/// Writes a session script with the header followed by `rows`.
pub fn write_script(rows: &[&str]) -> Result<NamedTempFile, std::io::Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}

/// Rows for one employer fieldset.
pub fn employer_rows(slot: &str, name: &str, start: &str, end: &str) -> Vec<String> {
    vec![
        format!("employer,{slot},name,{name}"),
        format!("employer,{slot},start_date,{start}"),
        format!("employer,{slot},end_date,{end}"),
    ]
}
