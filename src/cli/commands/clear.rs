use super::{ask_confirmation, open_state};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { yes } = cmd {
        let mut state = open_state(cfg)?;

        if state.history().is_empty() {
            info("History is already empty.");
            return Ok(());
        }

        let prompt = format!(
            "Delete ALL {} history entries? This action is irreversible.",
            state.history().len()
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let count = state.clear_history()?;
        success(format!("Cleared {count} history entries."));

        state.unmount();
    }
    Ok(())
}
