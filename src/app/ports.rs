use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

// Ingest-side ports

/// One page request against the paginated recipe listing
#[async_trait]
pub trait RecipePageClient: Send + Sync {
    async fn get_page(&self, from: usize, size: usize) -> Result<PageResponse>;
}

#[derive(Clone, Debug)]
pub struct PageResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The narrow surface the RecipeDB collector needs from a browser.
///
/// Everything that depends on how the remote page is built (selectors,
/// cell positions) stays out of this trait and lives in the page parser.
#[async_trait]
pub trait BrowserSession: Send {
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Current rendered DOM as HTML
    async fn page_source(&self) -> Result<String>;

    /// Wait until the element with `element_id` is visible, then click it.
    /// Fails with `PipelineError::Timeout` if it never shows up within `timeout`.
    async fn click_when_visible(&mut self, element_id: &str, timeout: Duration) -> Result<()>;

    /// Release the session. Called exactly once per collection run.
    async fn quit(self: Box<Self>) -> Result<()>;
}
