// Base trait and utilities for source-specific normalizers
pub mod base;

pub mod recipedb;
pub mod tasty;

pub use base::{NormalizerUtils, SourceNormalizer};
pub use recipedb::RecipeDbNormalizer;
pub use tasty::TastyNormalizer;
