use crate::errors::{AppError, AppResult};
use crate::export::model::{HEADERS, entries_to_table};
use crate::models::ConversionEntry;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

fn csv_err(stage: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Export(format!("CSV {stage} error: {e}"))
}

/// Write the rows to any writer. Every non-numeric field (dates included)
/// is quoted; amounts and rates are left bare.
pub fn write_csv_to<W: Write>(out: W, entries: &[&ConversionEntry]) -> AppResult<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(out);

    wtr.write_record(HEADERS).map_err(|e| csv_err("write", e))?;

    for row in entries_to_table(entries) {
        wtr.write_record(&row).map_err(|e| csv_err("write", e))?;
    }

    wtr.flush().map_err(|e| csv_err("flush", e))?;
    Ok(())
}

pub fn to_csv_string(entries: &[&ConversionEntry]) -> AppResult<String> {
    let mut buf = Vec::new();
    write_csv_to(&mut buf, entries)?;
    String::from_utf8(buf).map_err(|e| csv_err("encoding", e))
}
