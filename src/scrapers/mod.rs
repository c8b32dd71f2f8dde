pub mod recipedb;
