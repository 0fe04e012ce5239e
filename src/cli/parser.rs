use crate::export::ExportFormat;
use crate::models::{Direction, DirectionFilter, SortDirection, SortKey};
use clap::{ArgAction, Parser, Subcommand};

fn parse_filter(s: &str) -> Result<DirectionFilter, String> {
    DirectionFilter::from_code(s)
        .ok_or_else(|| format!("invalid filter '{s}' (expected all, sar-to-sdg or sdg-to-sar)"))
}

/// Command-line interface definition for rConverter
/// SAR ↔ SDG converter with a persisted conversion history
#[derive(Parser)]
#[command(
    name = "rconverter",
    version = env!("CARGO_PKG_VERSION"),
    about = "SAR ↔ SDG converter: editable rates, conversion history, CSV/PDF export and CSV import",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Diagnostic verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show or edit the SAR and SDG amount fields
    Amount {
        #[arg(long, allow_hyphen_values = true, help = "Set the SAR amount field")]
        sar: Option<String>,

        #[arg(long, allow_hyphen_values = true, help = "Set the SDG amount field")]
        sdg: Option<String>,

        #[arg(long = "clear-sar", conflicts_with = "sar", help = "Clear the SAR amount field")]
        clear_sar: bool,

        #[arg(long = "clear-sdg", conflicts_with = "sdg", help = "Clear the SDG amount field")]
        clear_sdg: bool,
    },

    /// Show, set or calculate the exchange rates
    Rate {
        #[arg(long = "sar-to-sdg", value_name = "RATE", allow_hyphen_values = true)]
        sar_to_sdg: Option<String>,

        #[arg(long = "sdg-to-sar", value_name = "RATE", allow_hyphen_values = true)]
        sdg_to_sar: Option<String>,

        /// Derive the rate implied by the two amount fields
        #[arg(long = "calc", value_enum, value_name = "DIRECTION")]
        calc: Option<Direction>,

        /// Store the calculated rate (only with --calc)
        #[arg(long = "apply", requires = "calc")]
        apply: bool,
    },

    /// Convert the source amount field with the stored rate
    Convert {
        #[arg(value_enum)]
        direction: Direction,

        /// Amount to convert; defaults to the current source field
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// List the conversion history
    List {
        #[arg(long, value_parser = parse_filter, help = "all, sar-to-sdg or sdg-to-sar")]
        filter: Option<DirectionFilter>,

        #[arg(
            long,
            value_enum,
            help = "Sort key; selecting the current key again flips the order"
        )]
        sort: Option<SortKey>,

        #[arg(long, value_enum, help = "Force ascending or descending order")]
        order: Option<SortDirection>,
    },

    /// Delete one history entry by id (or unique id prefix)
    Del { id: String },

    /// Change the calendar date of a history entry
    Edit {
        id: String,

        #[arg(long, help = "New date (YYYY-MM-DD)")]
        date: String,
    },

    /// Delete the whole conversion history
    Clear {
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Export the current history view
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "DIR", help = "Output directory (default from config)")]
        dir: Option<String>,

        #[arg(long, value_parser = parse_filter, help = "Override the view filter for this export")]
        filter: Option<DirectionFilter>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import history entries from an exported CSV file
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
