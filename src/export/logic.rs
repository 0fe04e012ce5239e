// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::csv_report::write_csv_to;
use crate::export::fs_utils::{ensure_dir, ensure_writable};
use crate::export::model::{HEADERS, REPORT_TITLE, entries_to_table};
use crate::export::pdf::PdfManager;
use crate::export::{ExportFormat, notify_export_success, report_path};
use crate::models::ConversionEntry;
use crate::ui::messages::{info, warning};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What an export call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing matched the current view; no file was produced.
    Empty,
}

/// Date and type columns are text, the rest numeric.
const LEFT_ALIGNED: [usize; 2] = [0, 3];

/// High-level export of the current history projection.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `entries` (already filtered and sorted) into
    /// `<dir>/conversion_history_report.<ext>`.
    ///
    /// An empty projection is reported to the user and produces no file.
    pub fn export(
        entries: &[&ConversionEntry],
        format: ExportFormat,
        dir: &Path,
        subtitle: &str,
        force: bool,
    ) -> AppResult<ExportOutcome> {
        if entries.is_empty() {
            warning("No conversion history to export.");
            return Ok(ExportOutcome::Empty);
        }

        ensure_dir(dir)?;
        let path = report_path(dir, format);
        ensure_writable(&path, force)?;

        info(format!(
            "Exporting {} entries to {}: {}",
            entries.len(),
            format.label(),
            path.display()
        ));

        match format {
            ExportFormat::Csv => export_csv(entries, &path)?,
            ExportFormat::Pdf => export_pdf(entries, &path, subtitle)?,
            ExportFormat::Json => export_json(entries, &path)?,
        }

        notify_export_success(format.label(), &path);
        Ok(ExportOutcome::Written {
            path,
            rows: entries.len(),
        })
    }
}

fn export_csv(entries: &[&ConversionEntry], path: &Path) -> AppResult<()> {
    let file = File::create(path)?;
    write_csv_to(BufWriter::new(file), entries)
}

fn export_pdf(entries: &[&ConversionEntry], path: &Path, subtitle: &str) -> AppResult<()> {
    let rows = entries_to_table(entries);

    let mut pdf = PdfManager::new();
    pdf.write_table(REPORT_TITLE, subtitle, &HEADERS, &rows, &LEFT_ALIGNED);
    debug!(pages = pdf.page_count(), "pdf laid out");

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))
}

/// Same record layout as the persisted history.
fn export_json(entries: &[&ConversionEntry], path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}
