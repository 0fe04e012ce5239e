use super::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::view::project;
use crate::db::KeyValueStore;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportOutcome};
use crate::utils::path::expand_tilde;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        dir,
        filter,
        force,
    } = cmd
    {
        let state = open_state(cfg)?;
        let out_dir = expand_tilde(dir.as_deref().unwrap_or(&cfg.export_dir));

        let view_filter = filter.unwrap_or(state.view().filter());
        let view_sort = state.view().sort();
        let subtitle = format!(
            "Filter: {view_filter} | Sort: {view_sort} | Generated {}",
            Local::now().format("%Y-%m-%d %H:%M")
        );

        let entries = project(state.history().entries(), view_filter, view_sort);
        let outcome = ExportLogic::export(&entries, *format, &out_dir, &subtitle, *force)?;

        if let ExportOutcome::Written { path, rows } = &outcome {
            state.storage().record(
                "export",
                format.as_str(),
                &format!("{rows} entries → {}", path.display()),
            );
        }

        state.unmount();
    }
    Ok(())
}
