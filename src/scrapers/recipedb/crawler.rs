use crate::app::ports::BrowserSession;
use crate::config::RecipeDbConfig;
use crate::constants::RECIPEDB_SOURCE;
use crate::error::Result;
use crate::metrics::IngestMetrics;
use crate::scrapers::recipedb::parser::parse_result_rows;
use crate::types::RawRecipe;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn, Instrument};

/// Walks RecipeDB's per-cuisine search results through a browser session
pub struct RecipeDbCollector {
    base_url: String,
    settle: Duration,
    next_page_timeout: Duration,
    next_page_id: String,
}

impl RecipeDbCollector {
    pub fn new(
        base_url: impl Into<String>,
        settle: Duration,
        next_page_timeout: Duration,
        next_page_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            settle,
            next_page_timeout,
            next_page_id: next_page_id.into(),
        }
    }

    pub fn from_config(config: &RecipeDbConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_millis(config.settle_ms),
            Duration::from_secs(config.next_page_timeout_secs),
            config.next_page_id.clone(),
        )
    }

    pub fn search_url(&self, cuisine: &str) -> String {
        format!("{}/recipedb/search_region/{}", self.base_url, cuisine)
    }

    /// Collect up to `page_limit` result pages for every cuisine.
    ///
    /// The session is consumed and quit exactly once, whether collection
    /// finishes or fails partway. A collection error wins over a quit error.
    #[instrument(skip(self, session))]
    pub async fn collect(
        &self,
        mut session: Box<dyn BrowserSession>,
        cuisines: &[String],
        page_limit: usize,
    ) -> Result<Vec<RawRecipe>> {
        let outcome = self.collect_all(session.as_mut(), cuisines, page_limit).await;
        let released = session.quit().await;

        match (outcome, released) {
            (Ok(recipes), Ok(())) => {
                info!("Collected {} recipes from RecipeDB", recipes.len());
                Ok(recipes)
            }
            (Ok(_), Err(e)) => {
                error!("Failed to release browser session: {}", e);
                Err(e)
            }
            (Err(e), Ok(())) => {
                error!("RecipeDB collection failed: {}", e);
                Err(e)
            }
            (Err(e), Err(quit_err)) => {
                warn!("Failed to release browser session: {}", quit_err);
                error!("RecipeDB collection failed: {}", e);
                Err(e)
            }
        }
    }

    async fn collect_all(
        &self,
        session: &mut dyn BrowserSession,
        cuisines: &[String],
        page_limit: usize,
    ) -> Result<Vec<RawRecipe>> {
        let mut recipes = Vec::new();
        for cuisine in cuisines {
            let span = tracing::info_span!("Collecting cuisine", cuisine = %cuisine);
            let rows = self
                .collect_cuisine(session, cuisine, page_limit)
                .instrument(span)
                .await?;
            recipes.extend(rows);
        }
        Ok(recipes)
    }

    async fn collect_cuisine(
        &self,
        session: &mut dyn BrowserSession,
        cuisine: &str,
        page_limit: usize,
    ) -> Result<Vec<RawRecipe>> {
        session.navigate(&self.search_url(cuisine)).await?;
        tokio::time::sleep(self.settle).await;

        let mut recipes = Vec::new();
        for page in 0..page_limit {
            let html = session.page_source().await?;
            let rows = parse_result_rows(&html, cuisine, &self.base_url)?;
            debug!(page, rows = rows.len(), "Scraped result page");
            IngestMetrics::record_page_scraped(RECIPEDB_SOURCE, rows.len());
            recipes.extend(rows.into_iter().map(RawRecipe::RecipeDb));

            if page + 1 < page_limit {
                session
                    .click_when_visible(&self.next_page_id, self.next_page_timeout)
                    .await?;
            }
        }

        info!("Collected {} recipes", recipes.len());
        Ok(recipes)
    }
}
