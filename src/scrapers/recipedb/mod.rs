pub mod crawler;
pub mod parser;

pub use crawler::RecipeDbCollector;
pub use parser::parse_result_rows;
