/// Label given to any recipe whose source carries no cuisine information.
/// Shared by extraction and by filtering/grouping downstream.
pub const UNCATEGORIZED_CUISINE: &str = "Uncategorized Cuisine";

/// Fallback recipe name for API items without a `name` field
pub const NAME_NOT_AVAILABLE: &str = "Name not available";

// Source identifiers (used in CLI and logs)
pub const TASTY_SOURCE: &str = "tasty";
pub const RECIPEDB_SOURCE: &str = "recipedb";

// Shared column names
pub const NAME_COLUMN: &str = "Name";
pub const CUISINE_COLUMN: &str = "Cuisine";
pub const INGREDIENTS_COLUMN: &str = "Ingredients";
pub const LINK_COLUMN: &str = "Link";

// Tasty nutrient columns, in table order
pub const TASTY_NUTRIENT_COLUMNS: [&str; 6] = [
    "Calories",
    "Protein (g)",
    "Carbs (g)",
    "Fat (g)",
    "Sugar (g)",
    "Fiber (g)",
];

// RecipeDB nutrient columns, in table order
pub const RECIPEDB_NUTRIENT_COLUMNS: [&str; 3] = ["Calories (KCal)", "Protein (g)", "Fat (g)"];

/// Default cuisines searched on RecipeDB
pub const DEFAULT_RECIPEDB_CUISINES: [&str; 9] = [
    "Chinese", "Italian", "US", "French", "Indian", "Mexican", "Japanese", "Thai", "Russian",
];

/// Namespace prefix carried by every nutrition reference column
pub const REFERENCE_NAMESPACE_PREFIX: &str = "Data.";

/// Reference columns not useful for comparing cuisines (micronutrients,
/// household weights and other descriptive fields). Names are post-prefix-strip.
pub const EXCLUDED_REFERENCE_COLUMNS: [&str; 22] = [
    "Alpha Carotene",
    "Beta Carotene",
    "Beta Cryptoxanthin",
    "Ash",
    "Choline",
    "Lutein and Zeaxanthin",
    "Lycopene",
    "Manganese",
    "Niacin",
    "Pantothenic Acid",
    "Refuse Percentage",
    "Retinol",
    "Riboflavin",
    "Selenium",
    "Thiamin",
    "Vitamins.Vitamin A - IU",
    "Household Weights.1st Household Weight Description",
    "Household Weights.2nd Household Weight",
    "Household Weights.2nd Household Weight Description",
    "Major Minerals.Copper",
    "Major Minerals.Phosphorus",
    "Vitamins.Vitamin K",
];
