pub mod amount;
pub mod clear;
pub mod config;
pub mod convert;
pub mod del;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod rate;

use crate::config::Config;
use crate::core::ConverterState;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use std::io::{self, Write};

/// Mount the converter state on the configured database.
pub(crate) fn open_state(cfg: &Config) -> AppResult<ConverterState<SqliteStore>> {
    let storage = SqliteStore::open(&cfg.database)?;
    Ok(ConverterState::mount(storage, cfg.defaults()))
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    crate::ui::messages::warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
