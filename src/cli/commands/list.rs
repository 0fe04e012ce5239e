use super::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{ConversionEntry, SortSpec};
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        filter,
        sort,
        order,
    } = cmd
    {
        let mut state = open_state(cfg)?;

        if let Some(f) = filter {
            state.set_filter(*f)?;
        }
        match (sort, order) {
            (Some(key), Some(dir)) => state.set_sort(SortSpec::new(*key, *dir))?,
            (Some(key), None) => {
                state.toggle_sort(*key)?;
            }
            (None, Some(dir)) => {
                let key = state.view().sort().key;
                state.set_sort(SortSpec::new(key, *dir))?;
            }
            (None, None) => {}
        }

        let view_filter = state.view().filter();
        let view_sort = state.view().sort();
        let total = state.history().len();
        let rows = state.projection();

        header(format!(
            "Conversion History ({} of {total}) · filter: {view_filter} · sort: {view_sort}",
            rows.len()
        ));

        if rows.is_empty() {
            info("No conversions to show.");
        } else {
            print!("{}", render(&rows));
        }

        state.unmount();
    }
    Ok(())
}

fn render(rows: &[&ConversionEntry]) -> String {
    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("Date"),
        Column::right("From"),
        Column::right("To"),
        Column::left("Type"),
        Column::right("Rate"),
    ]);

    for e in rows {
        table.add_row(vec![
            e.short_id(),
            e.date_str(),
            e.from_amount_str(),
            e.to_amount_str(),
            e.direction.label().to_string(),
            e.rate_str(),
        ]);
    }

    table.render()
}
