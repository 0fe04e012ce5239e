// src/export/mod.rs

pub mod csv_report;
mod fs_utils;
pub mod import;
pub mod logic;
pub mod model;
pub mod pdf;

pub use import::{ImportReport, SkippedRow, parse_csv, parse_csv_file};
pub use logic::{ExportLogic, ExportOutcome};

use crate::ui::messages::success;
use clap::ValueEnum;
use model::REPORT_BASENAME;
use std::path::{Path, PathBuf};

/// Shared completion notice for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Pdf,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Json => "JSON",
        }
    }
}

/// Fixed report file name: repeated exports target the same file.
pub fn report_path(dir: &Path, format: ExportFormat) -> PathBuf {
    dir.join(format!("{REPORT_BASENAME}.{}", format.as_str()))
}
