use crate::config::{EngagementWeights, MatchConfig};
use crate::records::XiaohongshuPost;

/// Converts raw Xiaohongshu engagement counts into a pseudo-rating on the
/// same 0-5 scale Dianping uses, so the two platforms become comparable.
///
/// Two modes:
/// - batch-relative: scale against the largest weighted engagement in the
///   batch (scale-invariant within one fetch's result set)
/// - log: `ln_1p(e) / ln_1p(calibration) * 5` against a fixed "very popular
///   post" reference point, so a handful of viral outliers cannot dominate
#[derive(Debug, Clone)]
pub struct EngagementNormalizer {
    weights: EngagementWeights,
    log_calibration: f64,
}

impl EngagementNormalizer {
    pub fn new(weights: EngagementWeights, log_calibration: f64) -> Self {
        Self {
            weights,
            log_calibration,
        }
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(config.engagement_weights, config.log_calibration)
    }

    /// Weighted engagement: likes, saves and comments collapsed to one number.
    pub fn weighted(&self, post: &XiaohongshuPost) -> f64 {
        post.likes as f64 * self.weights.likes
            + post.saves as f64 * self.weights.saves
            + post.comments as f64 * self.weights.comments
    }

    /// Normalize to 0-5. Batch-relative when `batch` holds more than one
    /// post, log mode otherwise. Always clamped to [0, 5].
    pub fn normalize(&self, post: &XiaohongshuPost, batch: Option<&[XiaohongshuPost]>) -> f64 {
        let engagement = self.weighted(post);

        let normalized = match batch {
            Some(batch) if batch.len() > 1 => {
                let max = batch
                    .iter()
                    .map(|p| self.weighted(p))
                    .fold(0.0_f64, f64::max);
                if max > 0.0 {
                    engagement / max * 5.0
                } else {
                    0.0
                }
            }
            _ => {
                if engagement <= 0.0 {
                    0.0
                } else {
                    engagement.ln_1p() / self.log_calibration.ln_1p() * 5.0
                }
            }
        };

        normalized.clamp(0.0, 5.0)
    }
}

impl Default for EngagementNormalizer {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(likes: u64, saves: u64, comments: u64) -> XiaohongshuPost {
        XiaohongshuPost {
            restaurant_name: "店".into(),
            likes,
            saves,
            comments,
            ..Default::default()
        }
    }

    #[test]
    fn weighted_engagement_favors_saves() {
        let n = EngagementNormalizer::default();
        assert_eq!(n.weighted(&post(10, 10, 10)), 10.0 + 20.0 + 15.0);
    }

    #[test]
    fn log_mode_hits_top_of_scale_at_calibration() {
        let n = EngagementNormalizer::default();
        // likes*1.0 == 5000 == calibration constant
        let r = n.normalize(&post(5000, 0, 0), None);
        assert!((r - 5.0).abs() < 1e-9);
    }

    #[test]
    fn log_mode_zero_engagement_is_zero() {
        let n = EngagementNormalizer::default();
        assert_eq!(n.normalize(&post(0, 0, 0), None), 0.0);
    }

    #[test]
    fn batch_mode_scales_against_max() {
        let n = EngagementNormalizer::default();
        let batch = vec![post(100, 0, 0), post(50, 0, 0)];
        assert!((n.normalize(&batch[0], Some(&batch)) - 5.0).abs() < 1e-9);
        assert!((n.normalize(&batch[1], Some(&batch)) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn batch_mode_all_zero_is_zero() {
        let n = EngagementNormalizer::default();
        let batch = vec![post(0, 0, 0), post(0, 0, 0)];
        assert_eq!(n.normalize(&batch[0], Some(&batch)), 0.0);
    }

    #[test]
    fn single_element_batch_falls_back_to_log_mode() {
        let n = EngagementNormalizer::default();
        let batch = vec![post(100, 0, 0)];
        assert_eq!(
            n.normalize(&batch[0], Some(&batch)),
            n.normalize(&batch[0], None)
        );
    }

    #[test]
    fn always_clamped_to_zero_five() {
        let n = EngagementNormalizer::default();
        for p in [
            post(0, 0, 0),
            post(1, 2, 3),
            post(u64::MAX / 4, 1_000_000, 999),
        ] {
            let r = n.normalize(&p, None);
            assert!((0.0..=5.0).contains(&r), "out of range: {r}");
        }
    }
}
