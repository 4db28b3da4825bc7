use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Submission;

/// Byte-order mark so spreadsheet apps detect UTF-8
pub const UTF8_BOM: &str = "\u{FEFF}";

const HEADERS: [&str; 6] = [
    "Name",
    "Gender",
    "Target Gender",
    "Pickup Line/Feeling",
    "Class",
    "Submitted At",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render submissions as a BOM-prefixed CSV document
///
/// Every field is quoted and embedded quotes are doubled. Rows are separated
/// by `\n` with no trailing newline.
pub fn submissions_csv(submissions: &[Submission]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    for sub in submissions {
        let submitted_at = sub.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
        writer.write_record([
            sub.name.as_str(),
            sub.gender.as_str(),
            sub.target_gender.as_str(),
            sub.pickup_line.as_str(),
            sub.class.as_str(),
            submitted_at.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    let body = String::from_utf8(bytes)?;

    Ok(format!("{}{}", UTF8_BOM, body.trim_end_matches('\n')))
}

/// Download name for an export made on `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("tinker_hearts_{}.csv", date.format("%Y-%m-%d"))
}
