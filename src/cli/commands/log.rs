use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    match ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()) {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Colour of the operation column
fn color_for_operation(op: &str) -> Colour {
    match op {
        "convert" => Colour::Green,
        "del" | "clear" => Colour::Red,
        "edit" => Colour::Yellow,
        "rate" => Colour::Cyan,
        "import" | "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)`, cut to `MAX_OP_WIDTH` visible characters, operation coloured.
fn op_cell(row: &LogRow) -> String {
    let plain = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    let visible = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&row.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {rest}", color.paint(op)),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;
        let rows = load_log(&pool.conn)?;

        if rows.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let cells: Vec<String> = rows.iter().map(op_cell).collect();
        let op_w = cells
            .iter()
            .map(|c| strip_ansi(c).chars().count())
            .max()
            .unwrap_or(10);
        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);

        info("Internal log:\n");

        for (row, cell) in rows.iter().zip(&cells) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(cell).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {cell}{padding} => {}",
                row.id, row.date, row.message,
            );
        }
    }

    Ok(())
}
