use crate::app::ports::RecipePageClient;
use crate::constants::TASTY_SOURCE;
use crate::metrics::IngestMetrics;
use crate::types::{RawRecipe, RawTastyRecipe};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Success body of the recipe listing endpoint
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<RawTastyRecipe>,
}

/// Paginates the Tasty recipe listing
pub struct TastyFetcher {
    client: Box<dyn RecipePageClient>,
}

impl TastyFetcher {
    pub fn new(client: Box<dyn RecipePageClient>) -> Self {
        Self { client }
    }

    /// Fetch up to `max_count` recipes, `page_size` at a time.
    ///
    /// Stops early when a page comes back empty or a request fails; a failure
    /// is logged and whatever was already collected is returned.
    #[instrument(skip(self))]
    pub async fn fetch(&self, max_count: usize, page_size: usize) -> Vec<RawRecipe> {
        let mut recipes: Vec<RawTastyRecipe> = Vec::new();

        if page_size == 0 {
            warn!("Page size is zero, nothing to fetch");
            return Vec::new();
        }

        let mut offset = 0;
        while recipes.len() < max_count {
            IngestMetrics::record_page_requested(TASTY_SOURCE);

            let response = match self.client.get_page(offset, page_size).await {
                Ok(response) => response,
                Err(e) => {
                    IngestMetrics::record_request_failure(TASTY_SOURCE);
                    warn!(offset, "Failed to retrieve recipes: {}", e);
                    break;
                }
            };

            if !response.is_success() {
                IngestMetrics::record_request_failure(TASTY_SOURCE);
                warn!(
                    offset,
                    status = response.status,
                    "Failed to retrieve recipes. Status code: {}",
                    response.status
                );
                break;
            }

            let page: ListResponse = match serde_json::from_slice(&response.body) {
                Ok(page) => page,
                Err(e) => {
                    IngestMetrics::record_request_failure(TASTY_SOURCE);
                    warn!(offset, "Undecodable recipe page: {}", e);
                    break;
                }
            };

            if page.results.is_empty() {
                debug!(offset, "Source exhausted");
                break;
            }

            debug!(offset, count = page.results.len(), "Fetched recipe page");
            recipes.extend(page.results);
            offset += page_size;
        }

        recipes.truncate(max_count);
        IngestMetrics::record_recipes_fetched(TASTY_SOURCE, recipes.len());
        info!("Fetched {} recipes from Tasty", recipes.len());

        recipes.into_iter().map(RawRecipe::Tasty).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::PageResponse;
    use crate::error::{PipelineError, Result};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Serves `total` numbered recipes, optionally failing from a given offset
    struct FakeListing {
        total: usize,
        fail_from: Option<usize>,
        status_on_fail: u16,
        calls: Arc<Mutex<Vec<(usize, usize)>>>,
    }

    impl FakeListing {
        fn new(total: usize) -> Self {
            Self {
                total,
                fail_from: None,
                status_on_fail: 500,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl RecipePageClient for FakeListing {
        async fn get_page(&self, from: usize, size: usize) -> Result<PageResponse> {
            self.calls.lock().unwrap().push((from, size));
            if let Some(fail_from) = self.fail_from {
                if from >= fail_from {
                    if self.status_on_fail == 0 {
                        return Err(PipelineError::Io(std::io::Error::new(
                            std::io::ErrorKind::ConnectionReset,
                            "connection reset",
                        )));
                    }
                    return Ok(PageResponse {
                        status: self.status_on_fail,
                        body: b"{}".to_vec(),
                    });
                }
            }
            let end = (from + size).min(self.total);
            let results: Vec<_> = (from.min(end)..end).map(|i| json!({ "id": i })).collect();
            Ok(PageResponse {
                status: 200,
                body: serde_json::to_vec(&json!({ "count": self.total, "results": results }))
                    .unwrap(),
            })
        }
    }

    fn ids(recipes: &[RawRecipe]) -> Vec<u64> {
        recipes
            .iter()
            .map(|r| match r {
                RawRecipe::Tasty(v) => v["id"].as_u64().unwrap(),
                RawRecipe::RecipeDb(_) => panic!("unexpected scraped row"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_stops_at_max_count() {
        let fetcher = TastyFetcher::new(Box::new(FakeListing::new(1000)));
        let recipes = fetcher.fetch(280, 100).await;
        assert_eq!(recipes.len(), 280);
        assert_eq!(ids(&recipes), (0..280).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_offsets_advance_by_page_size() {
        let listing = FakeListing::new(1000);
        let calls = Arc::clone(&listing.calls);
        let fetcher = TastyFetcher::new(Box::new(listing));
        let recipes = fetcher.fetch(250, 100).await;

        assert_eq!(recipes.len(), 250);
        assert_eq!(*calls.lock().unwrap(), vec![(0, 100), (100, 100), (200, 100)]);
    }

    #[tokio::test]
    async fn test_stops_when_source_exhausted() {
        let fetcher = TastyFetcher::new(Box::new(FakeListing::new(130)));
        let recipes = fetcher.fetch(500, 50).await;
        assert_eq!(recipes.len(), 130);
    }

    #[tokio::test]
    async fn test_failure_keeps_partial_results() {
        let mut listing = FakeListing::new(1000);
        listing.fail_from = Some(200);
        let fetcher = TastyFetcher::new(Box::new(listing));
        let recipes = fetcher.fetch(500, 100).await;
        assert_eq!(recipes.len(), 200);
    }

    #[tokio::test]
    async fn test_transport_error_keeps_partial_results() {
        let mut listing = FakeListing::new(1000);
        listing.fail_from = Some(100);
        listing.status_on_fail = 0;
        let fetcher = TastyFetcher::new(Box::new(listing));
        let recipes = fetcher.fetch(500, 100).await;
        assert_eq!(recipes.len(), 100);
    }

    #[tokio::test]
    async fn test_zero_max_or_page_size_fetches_nothing() {
        let fetcher = TastyFetcher::new(Box::new(FakeListing::new(10)));
        assert!(fetcher.fetch(0, 100).await.is_empty());
        assert!(fetcher.fetch(10, 0).await.is_empty());
    }
}
