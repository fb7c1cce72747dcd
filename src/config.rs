use serde::{Deserialize, Serialize};

use crate::util::env::env_parse;

/// Minimum similarity a candidate pair must reach before it can become a match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Engagement count of a "very popular" post; anchors the log scale so that
/// a weighted engagement of 5000 maps to roughly the top of the 0-5 range.
pub const DEFAULT_LOG_CALIBRATION: f64 = 5000.0;

/// District tokens that show up as branch suffixes in scraped names
/// ("海底捞静安店" and "海底捞" are the same restaurant).
pub const DEFAULT_DISTRICTS: [&str; 10] = [
    "静安", "徐汇", "浦东", "朝阳", "海淀", "南山", "福田", "天河", "武侯", "锦江",
];

/// Relative weight of each raw engagement signal. Saves are the strongest
/// implicit "I want to go here" signal; comments beat likes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementWeights {
    pub likes: f64,
    pub saves: f64,
    pub comments: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            likes: 1.0,
            saves: 2.0,
            comments: 1.5,
        }
    }
}

/// Blend weights for the final 0-10 recommendation score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub dianping_rating: f64,
    pub xhs_engagement: f64,
    pub consistency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        // Sums to 1.0 so a perfect 5/5/1.0 run lands exactly on 10.0
        // after the x2 scale in build_report.
        Self {
            dianping_rating: 0.4,
            xhs_engagement: 0.3,
            consistency: 0.3,
        }
    }
}

/// Immutable configuration for one matching run. Constructed by the caller
/// and passed into the matcher/scorers; there is no process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub similarity_threshold: f64,
    pub engagement_weights: EngagementWeights,
    pub log_calibration: f64,
    pub scoring_weights: ScoringWeights,
    pub districts: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            engagement_weights: EngagementWeights::default(),
            log_calibration: DEFAULT_LOG_CALIBRATION,
            scoring_weights: ScoringWeights::default(),
            districts: DEFAULT_DISTRICTS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl MatchConfig {
    /// Defaults with env overrides applied.
    /// Env: RC_SIMILARITY_THRESHOLD, RC_LOG_CALIBRATION
    pub fn from_env() -> Self {
        Self::default()
            .with_threshold(env_parse(
                "RC_SIMILARITY_THRESHOLD",
                DEFAULT_SIMILARITY_THRESHOLD,
            ))
            .with_log_calibration(env_parse("RC_LOG_CALIBRATION", DEFAULT_LOG_CALIBRATION))
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_log_calibration(mut self, calibration: f64) -> Self {
        self.log_calibration = calibration;
        self
    }

    pub fn with_districts<I, S>(mut self, districts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.districts = districts.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.similarity_threshold, 0.6);
        assert_eq!(cfg.log_calibration, 5000.0);
        assert_eq!(cfg.engagement_weights.saves, 2.0);
        assert_eq!(cfg.districts.len(), 10);
    }

    #[test]
    fn builder_overrides() {
        let cfg = MatchConfig::default()
            .with_threshold(0.8)
            .with_districts(["虹口"]);
        assert_eq!(cfg.similarity_threshold, 0.8);
        assert_eq!(cfg.districts, vec!["虹口".to_string()]);
    }
}
