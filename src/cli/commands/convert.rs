use super::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{emphasized, info, success};
use crate::utils::formatting::fmt_rate;
use chrono::Local;
use std::time::Instant;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Convert { direction, amount } = cmd {
        let mut state = open_state(cfg)?;
        let source = direction.source();
        let target = direction.target();

        if let Some(a) = amount {
            state.set_amount(source, a.trim())?;
        }

        match state.convert(*direction, Local::now(), Instant::now())? {
            None => {
                info(format!(
                    "Nothing converted: '{}' is not a valid {source} amount. {target} field cleared.",
                    state.amount(source)
                ));
            }
            Some(conversion) => {
                let shown = if state.is_emphasized(target, Instant::now()) {
                    emphasized(&conversion.counterpart)
                } else {
                    conversion.counterpart.clone()
                };

                println!(
                    "{} {source} = {shown} {target}  (rate {})",
                    conversion.entry.from_amount_str(),
                    fmt_rate(conversion.entry.rate_used)
                );
                success(format!(
                    "Conversion recorded as {}.",
                    conversion.entry.short_id()
                ));
            }
        }

        state.unmount();
    }
    Ok(())
}
