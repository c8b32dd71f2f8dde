//! End-to-end ingestion runs wiring sources, normalization and export.

use crate::apis::tasty::TastyFetcher;
use crate::app::ports::{BrowserSession, RecipePageClient};
use crate::config::Config;
use crate::error::Result;
use crate::infra::chromium::ChromiumSession;
use crate::infra::http_client::ReqwestRecipeClient;
use crate::pipeline::{export, export_recipes, load_reference, normalize};
use crate::scrapers::recipedb::RecipeDbCollector;
use crate::types::{RawRecipe, SourceKind};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct IngestResult {
    pub source: SourceKind,
    pub recipes: usize,
    pub output_file: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct TastyParams {
    pub max_recipes: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeDbParams {
    pub cuisines: Option<Vec<String>>,
    pub page_limit: Option<usize>,
}

/// Fetch from the Tasty API with the configured client, then normalize and export
pub async fn ingest_tasty(config: &Config, params: TastyParams) -> Result<IngestResult> {
    let client = ReqwestRecipeClient::from_config(&config.tasty)?;
    ingest_tasty_with(config, params, Box::new(client)).await
}

pub async fn ingest_tasty_with(
    config: &Config,
    params: TastyParams,
    client: Box<dyn RecipePageClient>,
) -> Result<IngestResult> {
    let max_recipes = params.max_recipes.unwrap_or(config.tasty.max_recipes);
    let page_size = params.page_size.unwrap_or(config.tasty.page_size);

    let raw = TastyFetcher::new(client).fetch(max_recipes, page_size).await;
    finish(config, SourceKind::Tasty, &raw)
}

/// Launch Chromium, collect RecipeDB result pages, then normalize and export
pub async fn ingest_recipedb(config: &Config, params: RecipeDbParams) -> Result<IngestResult> {
    let session = ChromiumSession::launch(config.recipedb.chrome_path.as_deref()).await?;
    ingest_recipedb_with(config, params, Box::new(session)).await
}

pub async fn ingest_recipedb_with(
    config: &Config,
    params: RecipeDbParams,
    session: Box<dyn BrowserSession>,
) -> Result<IngestResult> {
    let cuisines = params
        .cuisines
        .unwrap_or_else(|| config.recipedb.cuisines.clone());
    let page_limit = params.page_limit.unwrap_or(config.recipedb.page_limit);

    let collector = RecipeDbCollector::from_config(&config.recipedb);
    let raw = collector.collect(session, &cuisines, page_limit).await?;
    finish(config, SourceKind::RecipeDb, &raw)
}

fn finish(config: &Config, kind: SourceKind, raw: &[RawRecipe]) -> Result<IngestResult> {
    let recipes = normalize(raw, kind)?;
    let output_file = config.output.table_path(kind);
    export_recipes(&recipes, kind, &output_file)?;
    info!(source = %kind, recipes = recipes.len(), path = %output_file.display(), "Ingestion finished");

    Ok(IngestResult {
        source: kind,
        recipes: recipes.len(),
        output_file,
    })
}

/// Load and clean the nutrition reference, writing the cleaned copy next to
/// the recipe tables
pub fn build_reference(config: &Config, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<PathBuf> {
    let input = input.unwrap_or_else(|| config.output.reference_csv.clone());
    let output = output.unwrap_or_else(|| config.output.dir.join(&config.output.reference_out_csv));

    let table = load_reference(&input)?;
    export(&table, &output)?;
    Ok(output)
}
