use crate::app::ports::{PageResponse, RecipePageClient};
use crate::config::TastyConfig;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// reqwest-backed page client for the RapidAPI recipe listing
pub struct ReqwestRecipeClient {
    client: reqwest::Client,
    url: String,
}

impl ReqwestRecipeClient {
    pub fn new(url: impl Into<String>, api_key: &str, host: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(api_key).map_err(|e| {
                PipelineError::Config(format!("invalid API key header: {}", e))
            })?,
        );
        headers.insert(
            API_HOST_HEADER,
            HeaderValue::from_str(host).map_err(|e| {
                PipelineError::Config(format!("invalid API host header: {}", e))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &TastyConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        Self::new(
            config.url.clone(),
            &api_key,
            &config.host,
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

#[async_trait]
impl RecipePageClient for ReqwestRecipeClient {
    async fn get_page(&self, from: usize, size: usize) -> Result<PageResponse> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("from", from.to_string()), ("size", size.to_string())])
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        Ok(PageResponse { status, body })
    }
}
