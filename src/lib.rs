pub mod config;
pub mod fetch;
pub mod matching;
pub mod normalization;
pub mod ranking;
pub mod records;
pub mod telemetry;

pub mod util {
    pub mod env;
}

pub use config::{EngagementWeights, MatchConfig, ScoringWeights};
pub use matching::matcher::RestaurantMatcher;
pub use ranking::{build_report, match_and_score, ConsistencyLevel, Recommendation};
pub use records::{DianpingRestaurant, MatchOutcome, MatchedRestaurant, XiaohongshuPost};
