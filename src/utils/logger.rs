//! Diagnostic logging. User notices are printed by `ui::messages`; everything
//! here goes to stderr through `tracing`.

use tracing::Level;

/// Map the `-v` count to a level: warnings by default, then info, debug, trace.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn init_logger(verbosity: u8) {
    // A subscriber may already be installed (tests drive `run` in-process).
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
