// src/export/import.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::HEADERS;
use crate::models::{ConversionEntry, Direction};
use crate::utils::date::parse_timestamp;
use crate::utils::formatting::{parse_amount, parse_rate};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// A data row that was not imported.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the file (the header is line 1).
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub entries: Vec<ConversionEntry>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.entries.len()
    }
}

fn check_header(header: &StringRecord) -> AppResult<()> {
    if header.iter().all(|h| h.is_empty()) {
        return Err(AppError::Import("file is empty".into()));
    }

    let found: Vec<&str> = header.iter().collect();
    if found.len() < HEADERS.len() || found[..HEADERS.len()] != HEADERS {
        return Err(AppError::Import(format!(
            "unexpected header [{}], expected [{}]",
            found.join(", "),
            HEADERS.join(", ")
        )));
    }
    Ok(())
}

fn parse_row(record: &StringRecord) -> Result<ConversionEntry, String> {
    let field = |i: usize| record.get(i).unwrap_or("");

    let timestamp =
        parse_timestamp(field(0)).ok_or_else(|| format!("invalid date '{}'", field(0)))?;
    let from = parse_amount(field(1)).ok_or_else(|| format!("invalid from amount '{}'", field(1)))?;
    let to = parse_amount(field(2)).ok_or_else(|| format!("invalid to amount '{}'", field(2)))?;
    let direction = Direction::from_label(field(3))
        .ok_or_else(|| format!("unknown conversion type '{}'", field(3)))?;

    let rate = parse_rate(field(4));
    if rate.is_none() {
        debug!(value = field(4), "rate not recoverable, importing as unknown");
    }

    Ok(ConversionEntry::new(timestamp, from, to, direction, rate))
}

/// Parse an exported CSV. The header must match the export header; rows that
/// fail are skipped and reported, the rest become fresh entries.
pub fn parse_csv<R: Read>(input: R) -> AppResult<ImportReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let header = rdr
        .headers()
        .map_err(|e| AppError::Import(format!("cannot read header: {e}")))?
        .clone();
    check_header(&header)?;

    let mut report = ImportReport::default();

    for (i, record) in rdr.records().enumerate() {
        // Quoted fields may span lines; prefer the reader's own position.
        let fallback = i as u64 + 2;
        let (line, outcome) = match record {
            Ok(r) => (
                r.position().map_or(fallback, |p| p.line()),
                parse_row(&r),
            ),
            Err(e) => (
                e.position().map_or(fallback, |p| p.line()),
                Err(format!("unreadable row: {e}")),
            ),
        };

        match outcome {
            Ok(entry) => report.entries.push(entry),
            Err(reason) => {
                warn!(line, %reason, "skipping import row");
                report.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    Ok(report)
}

pub fn parse_csv_file(path: &Path) -> AppResult<ImportReport> {
    let file = File::open(path).map_err(|e| {
        AppError::Import(format!("cannot open '{}': {e}", path.display()))
    })?;
    parse_csv(file)
}
