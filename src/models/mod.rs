pub mod direction;
pub mod entry;
pub mod view;

pub use direction::{Currency, Direction};
pub use entry::ConversionEntry;
pub use view::{DirectionFilter, SortDirection, SortKey, SortSpec};
