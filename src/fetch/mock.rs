use anyhow::Result;
use async_trait::async_trait;

use super::{DianpingFetcher, SearchQuery, XiaohongshuFetcher};
use crate::records::{DianpingRestaurant, XiaohongshuPost};

/// Deterministic Dianping data for environments without the external fetch
/// service. Names are derived from the query so they still exercise the
/// matcher end to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDianpingFetcher;

#[async_trait]
impl DianpingFetcher for MockDianpingFetcher {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DianpingRestaurant>> {
        let SearchQuery { location, cuisine } = query;
        Ok(vec![
            DianpingRestaurant {
                name: format!("{cuisine}推荐店A"),
                rating: 4.7,
                review_count: 1800,
                price_range: "¥180-250".into(),
                address: format!("{location}某某路88号"),
                tags: vec!["美味".into(), "环境好".into(), "服务热情".into()],
                url: "https://www.dianping.com/shop/111".into(),
            },
            DianpingRestaurant {
                name: format!("{cuisine}推荐店B"),
                rating: 4.4,
                review_count: 900,
                price_range: "¥120-180".into(),
                address: format!("{location}某某路168号"),
                tags: vec!["性价比高".into(), "分量足".into(), "实惠".into()],
                url: "https://www.dianping.com/shop/222".into(),
            },
            DianpingRestaurant {
                name: format!("{cuisine}特色店C"),
                rating: 4.2,
                review_count: 600,
                price_range: "¥100-150".into(),
                address: format!("{location}某某路258号"),
                tags: vec!["特色".into(), "正宗".into(), "值得一试".into()],
                url: "https://www.dianping.com/shop/333".into(),
            },
        ])
    }
}

/// Deterministic Xiaohongshu data matching the mock Dianping names.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockXiaohongshuFetcher;

#[async_trait]
impl XiaohongshuFetcher for MockXiaohongshuFetcher {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<XiaohongshuPost>> {
        let cuisine = &query.cuisine;
        Ok(vec![
            XiaohongshuPost {
                restaurant_name: format!("{cuisine}推荐店A"),
                likes: 300,
                saves: 80,
                comments: 45,
                sentiment_score: 0.75,
                keywords: vec!["好吃".into(), "推荐".into(), "环境".into()],
                url: "https://www.xiaohongshu.com/explore/111".into(),
            },
            XiaohongshuPost {
                restaurant_name: format!("{cuisine}推荐店B"),
                likes: 150,
                saves: 40,
                comments: 22,
                sentiment_score: 0.60,
                keywords: vec!["性价比".into(), "实惠".into()],
                url: "https://www.xiaohongshu.com/explore/222".into(),
            },
            XiaohongshuPost {
                restaurant_name: format!("{cuisine}特色店C"),
                likes: 100,
                saves: 30,
                comments: 15,
                sentiment_score: 0.50,
                keywords: vec!["特色".into(), "正宗".into()],
                url: "https://www.xiaohongshu.com/explore/333".into(),
            },
        ])
    }
}
