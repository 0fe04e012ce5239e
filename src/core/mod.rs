pub mod convert;
pub mod emphasis;
pub mod history;
pub mod rate;
pub mod state;
pub mod view;

pub use history::HistoryStore;
pub use rate::{RateQuote, calculate_rate};
pub use state::{ConverterState, Defaults};
pub use view::{ViewState, project};
