use super::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Direction;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::{fmt_rate, parse_rate};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Rate {
        sar_to_sdg,
        sdg_to_sar,
        calc,
        apply,
    } = cmd
    {
        let mut state = open_state(cfg)?;

        for (direction, value) in [
            (Direction::SarToSdg, sar_to_sdg),
            (Direction::SdgToSar, sdg_to_sar),
        ] {
            if let Some(raw) = value {
                let rate = parse_rate(raw).ok_or_else(|| AppError::InvalidRate(raw.clone()))?;
                state.set_rate(direction, rate)?;
                success(format!("{direction} rate set to {}", fmt_rate(Some(rate))));
            }
        }

        if let Some(direction) = calc {
            let (quote, applied) = if *apply {
                state.apply_calculated_rate(*direction)?
            } else {
                (state.calculate_rate(*direction), false)
            };

            info(format!("Implied {direction} rate: {quote}"));
            match (*apply, applied) {
                (true, true) => success(format!("{direction} rate updated.")),
                (true, false) => warning(format!(
                    "Implied rate {quote} is not a positive number, stored rate left unchanged."
                )),
                _ => {}
            }
        }

        for direction in Direction::ALL {
            println!(
                "{:<12}: {}",
                direction.label(),
                fmt_rate(Some(state.rate(direction)))
            );
        }

        state.unmount();
    }
    Ok(())
}
