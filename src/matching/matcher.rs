use tracing::debug;

use crate::config::MatchConfig;
use crate::matching::similarity::SimilarityScorer;
use crate::normalization::NameNormalizer;
use crate::records::{DianpingRestaurant, MatchedRestaurant, XiaohongshuPost};

/// Greedy one-to-one matcher between Dianping listings and Xiaohongshu
/// posts.
///
/// Dianping records are visited in input order; each one takes the
/// strictly-best unused post at or above the similarity threshold. Ties go
/// to the post encountered first, so output is deterministic for a stable
/// input order. Greedy assignment is intentional: result sets are tens of
/// records, and the fuzzy threshold already absorbs minor mismatches, so
/// optimal bipartite assignment would only change behavior on ambiguous
/// inputs without making it better.
#[derive(Debug, Clone)]
pub struct RestaurantMatcher {
    scorer: SimilarityScorer,
    threshold: f64,
}

impl RestaurantMatcher {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            scorer: SimilarityScorer::new(NameNormalizer::new(&config.districts)),
            threshold: config.similarity_threshold,
        }
    }

    /// O(|dianping| x |posts|). Empty inputs yield an empty output; records
    /// with no candidate above the threshold are dropped, never emitted as
    /// partial pairs. Consistency scores are attached later by the ranker.
    pub fn match_records(
        &self,
        dianping: &[DianpingRestaurant],
        posts: &[XiaohongshuPost],
    ) -> Vec<MatchedRestaurant> {
        let mut matches = Vec::new();
        let mut used = vec![false; posts.len()];

        for dp in dianping {
            let mut best: Option<(usize, f64)> = None;
            for (idx, post) in posts.iter().enumerate() {
                if used[idx] {
                    continue;
                }
                let score = self.scorer.score(&dp.name, &post.restaurant_name);
                if score < self.threshold {
                    continue;
                }
                // Strictly greater keeps the first candidate on ties.
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((idx, score));
                }
            }

            if let Some((idx, score)) = best {
                used[idx] = true;
                debug!(
                    name = %dp.name,
                    matched = %posts[idx].restaurant_name,
                    score,
                    "matched pair"
                );
                matches.push(MatchedRestaurant {
                    name: dp.name.clone(),
                    dianping: dp.clone(),
                    xiaohongshu: posts[idx].clone(),
                    similarity_score: score,
                    consistency_score: 0.0,
                });
            }
        }

        matches
    }
}

impl Default for RestaurantMatcher {
    fn default() -> Self {
        Self::new(&MatchConfig::default())
    }
}
