use super::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Currency;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Amount {
        sar,
        sdg,
        clear_sar,
        clear_sdg,
    } = cmd
    {
        let mut state = open_state(cfg)?;

        for (field, value, clear) in [
            (Currency::Sar, sar, *clear_sar),
            (Currency::Sdg, sdg, *clear_sdg),
        ] {
            if clear {
                state.clear_amount(field)?;
                success(format!("{field} amount cleared."));
            } else if let Some(v) = value {
                state.set_amount(field, v.trim())?;
                success(format!("{field} amount set to '{}'.", v.trim()));
            }
        }

        for field in [Currency::Sar, Currency::Sdg] {
            let value = state.amount(field);
            println!(
                "{:<16} ({}) : {}",
                field.name(),
                field.code(),
                if value.is_empty() { "-" } else { value }
            );
        }

        state.unmount();
    }
    Ok(())
}
