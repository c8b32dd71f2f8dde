//! Maps raw source records into the flat per-source table layout.

pub mod normalizers;
pub mod registry;

pub use registry::NormalizationRegistry;

use crate::constants::{CUISINE_COLUMN, INGREDIENTS_COLUMN, LINK_COLUMN, NAME_COLUMN};
use crate::error::Result;
use crate::table::Table;
use crate::types::{NormalizedRecipe, RawRecipe, SourceKind};
use tracing::info;

/// Normalize every raw record as `kind`. Fails on the first record that
/// belongs to a different source.
pub fn normalize(raw_recipes: &[RawRecipe], kind: SourceKind) -> Result<Vec<NormalizedRecipe>> {
    let registry = NormalizationRegistry::new();
    let recipes = raw_recipes
        .iter()
        .map(|raw| registry.normalize(raw, kind))
        .collect::<Result<Vec<_>>>()?;
    info!(source = %kind, count = recipes.len(), "Normalized recipes");
    Ok(recipes)
}

/// Lay normalized recipes out in the table layout of `kind`
pub fn to_table(recipes: &[NormalizedRecipe], kind: SourceKind) -> Result<Table> {
    let columns = kind.columns();
    let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());

    for recipe in recipes {
        let row = columns
            .iter()
            .map(|column| cell(recipe, column))
            .collect::<Result<Vec<_>>>()?;
        table.push_row(row);
    }
    Ok(table)
}

fn cell(recipe: &NormalizedRecipe, column: &str) -> Result<String> {
    Ok(match column {
        NAME_COLUMN => recipe.name.clone(),
        CUISINE_COLUMN => recipe.cuisine.clone(),
        INGREDIENTS_COLUMN => serde_json::to_string(recipe.ingredients.as_deref().unwrap_or(&[]))?,
        LINK_COLUMN => recipe.link.clone().unwrap_or_default(),
        nutrient => recipe
            .nutrient(nutrient)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "0".to_string()),
    })
}
