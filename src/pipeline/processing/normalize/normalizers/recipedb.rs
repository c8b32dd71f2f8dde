use super::base::{NormalizerUtils, SourceNormalizer};
use crate::constants::{RECIPEDB_NUTRIENT_COLUMNS, UNCATEGORIZED_CUISINE};
use crate::error::{PipelineError, Result};
use crate::types::{NormalizedRecipe, RawRecipe, SourceKind};

/// Normalizer for rows scraped from RecipeDB result pages.
/// The cuisine is the one that was searched for.
#[derive(Default)]
pub struct RecipeDbNormalizer;

impl RecipeDbNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl SourceNormalizer for RecipeDbNormalizer {
    fn normalize(&self, raw: &RawRecipe) -> Result<NormalizedRecipe> {
        let row = match raw {
            RawRecipe::RecipeDb(row) => row,
            other => {
                return Err(PipelineError::SourceMismatch {
                    expected: SourceKind::RecipeDb.to_string(),
                    found: other.source_kind().to_string(),
                })
            }
        };

        let cells = [&row.calories, &row.protein, &row.fat];
        let nutrients = RECIPEDB_NUTRIENT_COLUMNS
            .iter()
            .zip(cells)
            .map(|(column, cell)| {
                let value = NormalizerUtils::finite_or_zero(NormalizerUtils::coerce_number(cell));
                (column.to_string(), value)
            })
            .collect();

        let cuisine = if row.cuisine.trim().is_empty() {
            UNCATEGORIZED_CUISINE.to_string()
        } else {
            row.cuisine.clone()
        };

        Ok(NormalizedRecipe {
            name: row.name.clone(),
            cuisine,
            nutrients,
            ingredients: None,
            link: Some(row.link.clone()),
        })
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::RecipeDb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScrapedRow;

    fn row(calories: &str, protein: &str, fat: &str) -> ScrapedRow {
        ScrapedRow {
            cuisine: "Italian".into(),
            name: "Risotto".into(),
            link: "https://cosylab.iiitd.edu.in/recipedb/search_recipeInfo/1".into(),
            calories: calories.into(),
            protein: protein.into(),
            fat: fat.into(),
        }
    }

    #[test]
    fn test_cells_become_numbers() {
        let recipe = RecipeDbNormalizer::new()
            .normalize(&RawRecipe::RecipeDb(row("431.25", " 12 ", "1,004.5")))
            .unwrap();

        assert_eq!(recipe.cuisine, "Italian");
        assert_eq!(recipe.nutrient("Calories (KCal)"), Some(431.25));
        assert_eq!(recipe.nutrient("Protein (g)"), Some(12.0));
        assert_eq!(recipe.nutrient("Fat (g)"), Some(1004.5));
        assert_eq!(recipe.ingredients, None);
        assert!(recipe.link.unwrap().ends_with("/1"));
    }

    #[test]
    fn test_unparseable_cells_default_to_zero() {
        let recipe = RecipeDbNormalizer::new()
            .normalize(&RawRecipe::RecipeDb(row("-", "", "NaN")))
            .unwrap();
        assert!(recipe.nutrients.iter().all(|(_, v)| *v == 0.0));
    }
}
