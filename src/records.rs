use serde::{Deserialize, Serialize};

/// One restaurant listing from Dianping. Carries an explicit 0-5 star rating
/// plus the display fields the report surfaces. Missing fields default at
/// the serde boundary so scoring never sees an absent value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DianpingRestaurant {
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// One aggregated post cluster from Xiaohongshu for a single restaurant.
/// No explicit rating exists; engagement counts stand in as the quality
/// proxy. `sentiment_score` is computed upstream and defaults to neutral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XiaohongshuPost {
    pub restaurant_name: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub saves: u64,
    #[serde(default)]
    pub comments: u64,
    /// -1..1, externally computed text sentiment.
    #[serde(default)]
    pub sentiment_score: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// A restaurant identified on both platforms. Only exists when the
/// similarity score cleared the matcher's threshold, and each source record
/// participates in at most one of these per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRestaurant {
    pub name: String,
    pub dianping: DianpingRestaurant,
    pub xiaohongshu: XiaohongshuPost,
    /// 0-1 confidence that both records denote the same restaurant.
    pub similarity_score: f64,
    /// 0-1 agreement between the two platforms' quality signals.
    pub consistency_score: f64,
}

/// Result of one matching run. Callers need to tell "no data" apart from
/// "data but nothing cleared the threshold" apart from "matches found".
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// One or both input lists were empty (typically a failed fetch).
    InsufficientData {
        dianping_empty: bool,
        xiaohongshu_empty: bool,
    },
    /// Both platforms returned data but no pair cleared the threshold.
    NoMatches,
    Matches(Vec<MatchedRestaurant>),
}

impl MatchOutcome {
    pub fn matches(&self) -> &[MatchedRestaurant] {
        match self {
            MatchOutcome::Matches(list) => list,
            _ => &[],
        }
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, MatchOutcome::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_default_missing_fields() {
        let post: XiaohongshuPost =
            serde_json::from_str(r#"{"restaurant_name":"鼎泰丰","likes":12}"#)
                .expect("partial payload deserializes");
        assert_eq!(post.likes, 12);
        assert_eq!(post.saves, 0);
        assert_eq!(post.sentiment_score, 0.0);
        assert!(post.keywords.is_empty());

        let dp: DianpingRestaurant =
            serde_json::from_str(r#"{"name":"鼎泰丰"}"#).expect("name-only payload");
        assert_eq!(dp.rating, 0.0);
    }

    #[test]
    fn outcome_accessors() {
        let outcome = MatchOutcome::InsufficientData {
            dianping_empty: true,
            xiaohongshu_empty: false,
        };
        assert!(outcome.is_insufficient_data());
        assert!(outcome.matches().is_empty());
        assert!(MatchOutcome::NoMatches.matches().is_empty());
    }
}
