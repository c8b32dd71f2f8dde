//! Headless Chromium session using chromiumoxide.

use crate::app::ports::BrowserSession;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Script evaluating to whether the element is displayed with a non-empty box.
/// Fixed-position elements have no `offsetParent`, so layout size is checked instead.
fn visibility_script(element_id: &str) -> Result<String> {
    let id_literal = serde_json::to_string(element_id)?;
    Ok(format!(
        "(() => {{ const el = document.getElementById({id_literal}); \
         if (!el) return false; \
         const style = window.getComputedStyle(el); \
         if (style.display === 'none' || style.visibility === 'hidden' || style.visibility === 'collapse') return false; \
         const rect = el.getBoundingClientRect(); \
         return rect.width > 0 && rect.height > 0; }})()"
    ))
}

fn browser_err(e: impl std::fmt::Display) -> PipelineError {
    PipelineError::Browser(e.to_string())
}

pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumSession {
    /// Launch a headless Chromium and open a blank tab.
    pub async fn launch(chrome_path: Option<&Path>) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if let Some(path) = chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| PipelineError::Browser(format!("failed to build browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(browser_err)?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(browser_err(e));
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    async fn is_visible(&self, element_id: &str) -> Result<bool> {
        let script = visibility_script(element_id)?;
        let result = self.page.evaluate(script).await.map_err(browser_err)?;
        Ok(result.into_value::<bool>().unwrap_or(false))
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        debug!(url, "Navigating");
        self.page.goto(url).await.map_err(browser_err)?;
        Ok(())
    }

    async fn page_source(&self) -> Result<String> {
        self.page.content().await.map_err(browser_err)
    }

    async fn click_when_visible(&mut self, element_id: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while !self.is_visible(element_id).await? {
            if Instant::now() >= deadline {
                return Err(PipelineError::Timeout {
                    what: format!("#{}", element_id),
                    seconds: timeout.as_secs(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        let element = self
            .page
            .find_element(format!("#{}", element_id))
            .await
            .map_err(browser_err)?;
        element.click().await.map_err(browser_err)?;
        Ok(())
    }

    async fn quit(self: Box<Self>) -> Result<()> {
        let ChromiumSession {
            mut browser,
            page: _,
            handler,
        } = *self;

        let closed = browser.close().await.map_err(browser_err);
        if let Err(e) = browser.wait().await {
            warn!("Browser process did not exit cleanly: {}", e);
        }
        handler.abort();
        closed.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_uses_layout_box_not_offset_parent() {
        let script = visibility_script("nextpage").unwrap();
        assert!(script.contains(r#"getElementById("nextpage")"#));
        assert!(script.contains("getBoundingClientRect()"));
        assert!(script.contains("getComputedStyle(el)"));
        assert!(!script.contains("offsetParent !=="));
    }

    #[test]
    fn test_visibility_script_escapes_element_id() {
        let script = visibility_script(r#"a"); alert("x"#).unwrap();
        assert!(script.contains(r#"getElementById("a\"); alert(\"x")"#));
    }
}
