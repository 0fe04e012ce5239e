//! rConverter main entrypoint.

use rconverter::run;
use rconverter::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
