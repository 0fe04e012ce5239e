// src/export/model.rs

use crate::models::ConversionEntry;

/// Column headers shared by CSV, PDF and the CSV importer.
pub const HEADERS: [&str; 5] = [
    "Date",
    "From Amount",
    "To Amount",
    "Conversion Type",
    "Rate Used",
];

/// Title printed on top of the PDF report.
pub const REPORT_TITLE: &str = "Conversion History Report";

/// Base name of every exported file; the extension depends on the format.
pub const REPORT_BASENAME: &str = "conversion_history_report";

/// One entry as a table row: date, amounts, direction label, rate or `N/A`.
pub(crate) fn entry_to_row(e: &ConversionEntry) -> Vec<String> {
    vec![
        e.date_str(),
        e.from_amount_str(),
        e.to_amount_str(),
        e.direction.label().to_string(),
        e.rate_str(),
    ]
}

pub(crate) fn entries_to_table(entries: &[&ConversionEntry]) -> Vec<Vec<String>> {
    entries.iter().map(|e| entry_to_row(e)).collect()
}
