use serde_json::Value;

use super::base::{NormalizerUtils, SourceNormalizer};
use crate::constants::{NAME_NOT_AVAILABLE, TASTY_NUTRIENT_COLUMNS, UNCATEGORIZED_CUISINE};
use crate::error::{PipelineError, Result};
use crate::types::{NormalizedRecipe, RawRecipe, SourceKind};

/// API nutrition keys, aligned with `TASTY_NUTRIENT_COLUMNS`
const NUTRITION_KEYS: [&str; 6] = ["calories", "protein", "carbohydrates", "fat", "sugar", "fiber"];

const CUISINE_TAG_TYPE: &str = "cuisine";

/// Normalizer for Tasty API recipes
#[derive(Default)]
pub struct TastyNormalizer;

impl TastyNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Ingredient names across all sections and components, in source order
    fn ingredients(recipe: &Value) -> Vec<String> {
        recipe
            .get("sections")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|section| section.get("components").and_then(Value::as_array))
            .flatten()
            .filter_map(|component| component.get("ingredient")?.get("name")?.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Display name of the first cuisine-type tag
    fn cuisine(recipe: &Value) -> String {
        recipe
            .get("tags")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .find(|tag| tag.get("root_tag_type").and_then(Value::as_str) == Some(CUISINE_TAG_TYPE))
            .and_then(|tag| tag.get("display_name").and_then(Value::as_str))
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNCATEGORIZED_CUISINE)
            .to_string()
    }

    fn nutrients(recipe: &Value) -> Vec<(String, f64)> {
        let nutrition = recipe.get("nutrition");
        TASTY_NUTRIENT_COLUMNS
            .iter()
            .zip(NUTRITION_KEYS)
            .map(|(column, key)| {
                let value = NormalizerUtils::json_number_or_zero(nutrition.and_then(|n| n.get(key)));
                (column.to_string(), value)
            })
            .collect()
    }
}

impl SourceNormalizer for TastyNormalizer {
    fn normalize(&self, raw: &RawRecipe) -> Result<NormalizedRecipe> {
        let recipe = match raw {
            RawRecipe::Tasty(recipe) => recipe,
            other => {
                return Err(PipelineError::SourceMismatch {
                    expected: SourceKind::Tasty.to_string(),
                    found: other.source_kind().to_string(),
                })
            }
        };

        let name = recipe
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(NAME_NOT_AVAILABLE)
            .to_string();

        Ok(NormalizedRecipe {
            name,
            cuisine: Self::cuisine(recipe),
            nutrients: Self::nutrients(recipe),
            ingredients: Some(Self::ingredients(recipe)),
            link: None,
        })
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Tasty
    }
}
