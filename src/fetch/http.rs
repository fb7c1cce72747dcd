use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{DianpingFetcher, SearchQuery, XiaohongshuFetcher};
use crate::records::{DianpingRestaurant, XiaohongshuPost};

/// Client for an external fetch service that has already done the scraping
/// and serves structured records as a JSON array. The endpoint receives the
/// query as `?location=..&cuisine=..`.
#[derive(Debug, Clone)]
pub struct JsonEndpoint {
    client: Client,
    base_url: String,
}

impl JsonEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, query: &SearchQuery) -> Result<Vec<T>> {
        debug!(url = %self.base_url, location = %query.location, cuisine = %query.cuisine, "fetching records");
        let records: Vec<T> = self
            .client
            .get(&self.base_url)
            .query(&[("location", &query.location), ("cuisine", &query.cuisine)])
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.base_url))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", self.base_url))?
            .json()
            .await
            .with_context(|| format!("{} returned malformed records", self.base_url))?;
        Ok(records)
    }
}

/// Dianping records served by an external collaborator endpoint.
#[derive(Debug, Clone)]
pub struct DianpingEndpoint(pub JsonEndpoint);

#[async_trait]
impl DianpingFetcher for DianpingEndpoint {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DianpingRestaurant>> {
        self.0.fetch(query).await
    }
}

/// Xiaohongshu records served by an external collaborator endpoint.
#[derive(Debug, Clone)]
pub struct XiaohongshuEndpoint(pub JsonEndpoint);

#[async_trait]
impl XiaohongshuFetcher for XiaohongshuEndpoint {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<XiaohongshuPost>> {
        self.0.fetch(query).await
    }
}
