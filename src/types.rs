use crate::constants::{
    CUISINE_COLUMN, INGREDIENTS_COLUMN, LINK_COLUMN, NAME_COLUMN, RECIPEDB_NUTRIENT_COLUMNS,
    RECIPEDB_SOURCE, TASTY_NUTRIENT_COLUMNS, TASTY_SOURCE,
};
use std::fmt;

/// Raw recipe item as returned by the Tasty API
pub type RawTastyRecipe = serde_json::Value;

/// One result-table row scraped from a rendered RecipeDB page.
/// Nutrition cells are kept as rendered text; coercion happens at normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedRow {
    pub cuisine: String,
    pub name: String,
    pub link: String,
    pub calories: String,
    pub protein: String,
    pub fat: String,
}

/// Source-specific raw record, discarded once normalized
#[derive(Debug, Clone)]
pub enum RawRecipe {
    Tasty(RawTastyRecipe),
    RecipeDb(ScrapedRow),
}

impl RawRecipe {
    pub fn source_kind(&self) -> SourceKind {
        match self {
            RawRecipe::Tasty(_) => SourceKind::Tasty,
            RawRecipe::RecipeDb(_) => SourceKind::RecipeDb,
        }
    }
}

/// The two ingestion sources. Each has its own fixed table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SourceKind {
    Tasty,
    #[value(name = "recipedb")]
    RecipeDb,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Tasty => TASTY_SOURCE,
            SourceKind::RecipeDb => RECIPEDB_SOURCE,
        }
    }

    /// Nutrient columns carried by this source's normalized table
    pub fn nutrient_columns(&self) -> &'static [&'static str] {
        match self {
            SourceKind::Tasty => &TASTY_NUTRIENT_COLUMNS,
            SourceKind::RecipeDb => &RECIPEDB_NUTRIENT_COLUMNS,
        }
    }

    /// Full column layout of this source's normalized table
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::new();
        match self {
            SourceKind::Tasty => {
                columns.push(NAME_COLUMN);
                columns.push(INGREDIENTS_COLUMN);
                columns.extend_from_slice(&TASTY_NUTRIENT_COLUMNS);
                columns.push(CUISINE_COLUMN);
            }
            SourceKind::RecipeDb => {
                columns.push(CUISINE_COLUMN);
                columns.push(NAME_COLUMN);
                columns.extend_from_slice(&RECIPEDB_NUTRIENT_COLUMNS);
                columns.push(LINK_COLUMN);
            }
        }
        columns
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recipe in the common flat schema
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecipe {
    pub name: String,
    pub cuisine: String,
    /// (column, value) pairs in the source's column order. Values are always finite.
    pub nutrients: Vec<(String, f64)>,
    pub ingredients: Option<Vec<String>>,
    pub link: Option<String>,
}

impl NormalizedRecipe {
    pub fn nutrient(&self, column: &str) -> Option<f64> {
        self.nutrients
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| *value)
    }
}

/// Chart types offered by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PlotKind {
    #[default]
    Bar,
    Box,
    Violin,
    Pair,
}

impl PlotKind {
    pub fn label(&self) -> &'static str {
        match self {
            PlotKind::Bar => "Bar Plot",
            PlotKind::Box => "Box Plot",
            PlotKind::Violin => "Violin Plot",
            PlotKind::Pair => "Pair Plot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_contain_nutrients_and_cuisine() {
        for kind in [SourceKind::Tasty, SourceKind::RecipeDb] {
            let columns = kind.columns();
            assert!(columns.contains(&CUISINE_COLUMN));
            for nutrient in kind.nutrient_columns() {
                assert!(columns.contains(nutrient));
            }
        }
    }

    #[test]
    fn test_plot_kind_labels() {
        assert_eq!(PlotKind::Violin.label(), "Violin Plot");
        assert_eq!(PlotKind::default().label(), "Bar Plot");
    }
}
