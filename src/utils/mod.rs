pub mod date;
pub mod formatting;
pub mod logger;
pub mod path;
pub mod table;

pub use formatting::{fmt_amount, fmt_rate};
