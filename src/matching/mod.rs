pub mod consistency;
pub mod matcher;
pub mod similarity;

pub use consistency::consistency_score;
pub use matcher::RestaurantMatcher;
pub use similarity::SimilarityScorer;
