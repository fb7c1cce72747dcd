pub mod http;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::records::{DianpingRestaurant, XiaohongshuPost};

/// Query sent to both platform fetchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub location: String,
    pub cuisine: String,
}

impl SearchQuery {
    pub fn new(location: impl Into<String>, cuisine: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            cuisine: cuisine.into(),
        }
    }
}

/// Source of Dianping listings. Real scraping lives behind this seam in an
/// external collaborator; this crate ships an HTTP-endpoint client and a
/// mock for offline runs.
#[async_trait]
pub trait DianpingFetcher: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DianpingRestaurant>>;
}

/// Source of aggregated Xiaohongshu posts.
#[async_trait]
pub trait XiaohongshuFetcher: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<XiaohongshuPost>>;
}

/// Fan out to both platforms concurrently and wait for both. A failure on
/// either side is downgraded to an empty list so the other platform's data
/// still reaches the caller; the matcher then reports insufficient data
/// instead of aborting the run.
pub async fn fetch_both(
    dianping: &dyn DianpingFetcher,
    xiaohongshu: &dyn XiaohongshuFetcher,
    query: &SearchQuery,
) -> (Vec<DianpingRestaurant>, Vec<XiaohongshuPost>) {
    let (dp, xhs) = futures::join!(dianping.search(query), xiaohongshu.search(query));

    let dp = dp.unwrap_or_else(|err| {
        warn!(platform = "dianping", error = %err, "fetch failed; continuing with empty list");
        Vec::new()
    });
    let xhs = xhs.unwrap_or_else(|err| {
        warn!(platform = "xiaohongshu", error = %err, "fetch failed; continuing with empty list");
        Vec::new()
    });

    (dp, xhs)
}

#[cfg(test)]
mod tests {
    use super::mock::{MockDianpingFetcher, MockXiaohongshuFetcher};
    use super::*;
    use anyhow::bail;

    struct FailingDianping;

    #[async_trait]
    impl DianpingFetcher for FailingDianping {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<DianpingRestaurant>> {
            bail!("session expired")
        }
    }

    #[tokio::test]
    async fn fan_out_returns_both_lists() {
        let query = SearchQuery::new("上海静安区", "火锅");
        let (dp, xhs) = fetch_both(
            &MockDianpingFetcher::default(),
            &MockXiaohongshuFetcher::default(),
            &query,
        )
        .await;
        assert!(!dp.is_empty());
        assert!(!xhs.is_empty());
    }

    #[tokio::test]
    async fn one_failed_fetch_does_not_sink_the_other() {
        let query = SearchQuery::new("上海静安区", "火锅");
        let (dp, xhs) = fetch_both(
            &FailingDianping,
            &MockXiaohongshuFetcher::default(),
            &query,
        )
        .await;
        assert!(dp.is_empty());
        assert!(!xhs.is_empty());
    }
}
