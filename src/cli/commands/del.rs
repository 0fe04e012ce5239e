use super::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let mut state = open_state(cfg)?;
        let entry_id = state.resolve_entry(id)?;

        if state.delete_entry(entry_id)? {
            success(format!("Entry {id} has been deleted."));
        } else {
            warning(format!("Entry {id} was already gone."));
        }

        state.unmount();
    }
    Ok(())
}
