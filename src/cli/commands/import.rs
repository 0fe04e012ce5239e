use super::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::parse_csv_file;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let path = expand_tilde(file);

        // Parse everything first: a file-level failure leaves the log untouched.
        let report = parse_csv_file(&path)?;

        let mut state = open_state(cfg)?;
        let skipped = report.skipped.len();
        let parsed = report.imported();
        let source = path.display().to_string();
        let count = state.import_entries(report.entries, &source)?;

        success(format!("Successfully imported {count} entries."));
        if count < parsed {
            warning(format!(
                "{} older rows dropped: the history keeps at most {} entries.",
                parsed - count,
                state.history().capacity()
            ));
        }
        if skipped > 0 {
            warning(format!("{skipped} rows skipped (run with -v for details)."));
        }

        state.unmount();
    }
    Ok(())
}
