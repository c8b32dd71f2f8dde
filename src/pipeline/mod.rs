pub mod aggregate;
pub mod export;
pub mod processing;
pub mod reference;

pub use aggregate::{aggregate, distinct_cuisines, distribution, filter, AggregateRow, Distribution};
pub use export::{export, export_recipes, import};
pub use processing::normalize::{normalize, to_table};
pub use reference::load_reference;
