use super::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id, date: date_str } = cmd {
        let d = date::parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.into()))?;

        let mut state = open_state(cfg)?;
        let entry_id = state.resolve_entry(id)?;

        if !state.edit_entry_date(entry_id, d)? {
            return Err(AppError::EntryNotFound(id.clone()));
        }

        if let Some(e) = state.history().get(entry_id) {
            success(format!("Entry {} now dated {}.", e.short_id(), e.date_str()));
        }

        state.unmount();
    }
    Ok(())
}
