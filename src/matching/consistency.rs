/// A rating gap of half the 0-5 scale (or more) means zero correlation.
pub const RATING_DIFF_TOLERANCE: f64 = 2.5;
/// Rating agreement dominates the blend; sentiment is a noisier derived
/// signal and contributes less.
pub const RATING_WEIGHT: f64 = 0.6;
pub const SENTIMENT_WEIGHT: f64 = 0.4;

/// Cross-platform trust score in [0, 1]: how well Dianping's explicit
/// rating agrees with Xiaohongshu's engagement pseudo-rating and sentiment
/// for the same restaurant.
///
/// Inputs are clamped to their expected domains first (rating and
/// engagement to [0, 5], sentiment to [-1, 1]); callers are not trusted to
/// pre-clamp.
pub fn consistency_score(dp_rating: f64, xhs_engagement: f64, xhs_sentiment: f64) -> f64 {
    let rating = dp_rating.clamp(0.0, 5.0);
    let engagement = xhs_engagement.clamp(0.0, 5.0);
    let sentiment = xhs_sentiment.clamp(-1.0, 1.0);

    let rating_correlation = (1.0 - (rating - engagement).abs() / RATING_DIFF_TOLERANCE).max(0.0);
    let sentiment_alignment = (sentiment + 1.0) / 2.0;

    (rating_correlation * RATING_WEIGHT + sentiment_alignment * SENTIMENT_WEIGHT).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_agreement_positive_sentiment() {
        assert!((consistency_score(4.5, 4.5, 1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn half_scale_gap_zeroes_rating_correlation() {
        // Correlation term is 0; only sentiment contributes.
        let s = consistency_score(5.0, 2.5, 0.0);
        assert!((s - 0.2).abs() < 1e-9);
    }

    #[test]
    fn linear_degradation_with_rating_gap() {
        let close = consistency_score(4.0, 3.5, 0.0);
        let far = consistency_score(4.0, 2.0, 0.0);
        assert!(close > far);
    }

    #[test]
    fn clamps_out_of_range_inputs() {
        for (r, e, s) in [
            (99.0, -7.0, 42.0),
            (-1.0, 12.0, -5.0),
            (f64::MAX, f64::MIN, 0.0),
        ] {
            let score = consistency_score(r, e, s);
            assert!((0.0..=1.0).contains(&score), "out of range: {score}");
        }
    }

    #[test]
    fn neutral_sentiment_maps_to_half_alignment() {
        // Equal ratings, neutral sentiment: 0.6*1.0 + 0.4*0.5.
        let s = consistency_score(4.0, 4.0, 0.0);
        assert!((s - 0.8).abs() < 1e-9);
    }
}
