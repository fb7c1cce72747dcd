use std::cmp::Ordering;

use serde::Serialize;
use tracing::info;

use crate::config::MatchConfig;
use crate::matching::consistency::consistency_score;
use crate::matching::matcher::RestaurantMatcher;
use crate::normalization::EngagementNormalizer;
use crate::records::{DianpingRestaurant, MatchOutcome, MatchedRestaurant, XiaohongshuPost};

/// Banding of the 0-1 consistency score for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyLevel {
    High,
    Medium,
    Low,
}

impl ConsistencyLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            ConsistencyLevel::High
        } else if score >= 0.5 {
            ConsistencyLevel::Medium
        } else {
            ConsistencyLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsistencyLevel::High => "高",
            ConsistencyLevel::Medium => "中",
            ConsistencyLevel::Low => "低",
        }
    }
}

/// One row of the final ranked report.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub name: String,
    /// 0-10 blended recommendation score, one decimal.
    pub recommendation_score: f64,
    pub dianping_rating: f64,
    pub dianping_reviews: u32,
    pub dianping_address: String,
    pub dianping_price: String,
    pub dianping_tags: Vec<String>,
    /// Engagement pseudo-rating on the 0-5 scale.
    pub xhs_rating: f64,
    pub xhs_engagement_display: String,
    pub xhs_keywords: Vec<String>,
    pub consistency_level: ConsistencyLevel,
    pub consistency_score: f64,
    pub similarity_score: f64,
}

/// Run the full core pipeline: match the two lists, then attach engagement
/// and consistency scores to every pair.
///
/// Empty input on either side is reported as `InsufficientData` (a normal
/// outcome, typically a failed or empty fetch), distinct from `NoMatches`
/// where both platforms had data but nothing cleared the threshold.
pub fn match_and_score(
    dianping: &[DianpingRestaurant],
    posts: &[XiaohongshuPost],
    config: &MatchConfig,
) -> MatchOutcome {
    if dianping.is_empty() || posts.is_empty() {
        return MatchOutcome::InsufficientData {
            dianping_empty: dianping.is_empty(),
            xiaohongshu_empty: posts.is_empty(),
        };
    }

    let matcher = RestaurantMatcher::new(config);
    let mut matches = matcher.match_records(dianping, posts);
    if matches.is_empty() {
        return MatchOutcome::NoMatches;
    }

    let normalizer = EngagementNormalizer::from_config(config);
    for m in &mut matches {
        let engagement = normalizer.normalize(&m.xiaohongshu, None);
        m.consistency_score =
            consistency_score(m.dianping.rating, engagement, m.xiaohongshu.sentiment_score);
    }

    info!(
        dianping = dianping.len(),
        xiaohongshu = posts.len(),
        matched = matches.len(),
        "matching run complete"
    );
    MatchOutcome::Matches(matches)
}

/// Convert matched pairs into ranked report rows, sorted by recommendation
/// score descending. Scores arrive fully computed on the pairs; this stage
/// only blends and formats.
pub fn build_report(matches: &[MatchedRestaurant], config: &MatchConfig) -> Vec<Recommendation> {
    let normalizer = EngagementNormalizer::from_config(config);
    let weights = &config.scoring_weights;

    let mut rows: Vec<Recommendation> = matches
        .iter()
        .map(|m| {
            let xhs_rating = normalizer.normalize(&m.xiaohongshu, None);
            let raw = (m.dianping.rating * weights.dianping_rating
                + xhs_rating * weights.xhs_engagement
                + m.consistency_score * 5.0 * weights.consistency)
                * 2.0;
            let recommendation_score = round_to(raw.clamp(0.0, 10.0), 1);

            Recommendation {
                name: m.dianping.name.clone(),
                recommendation_score,
                dianping_rating: m.dianping.rating,
                dianping_reviews: m.dianping.review_count,
                dianping_address: m.dianping.address.clone(),
                dianping_price: m.dianping.price_range.clone(),
                dianping_tags: m.dianping.tags.clone(),
                xhs_rating,
                xhs_engagement_display: format!(
                    "{xhs_rating:.1}⭐ ({}赞/{}收藏)",
                    m.xiaohongshu.likes, m.xiaohongshu.saves
                ),
                xhs_keywords: m.xiaohongshu.keywords.clone(),
                consistency_level: ConsistencyLevel::from_score(m.consistency_score),
                consistency_score: round_to(m.consistency_score, 2),
                similarity_score: round_to(m.similarity_score, 2),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.recommendation_score
            .partial_cmp(&a.recommendation_score)
            .unwrap_or(Ordering::Equal)
    });
    rows
}

/// Render the report the way the CLI presents it.
pub fn format_report(
    rows: &[Recommendation],
    location: &str,
    cuisine: &str,
    limit: usize,
) -> String {
    if rows.is_empty() {
        return format!("❌ 未找到符合条件的餐厅: {location} - {cuisine}");
    }

    let mut out = Vec::new();
    out.push(format!("📍 {location} {cuisine} 餐厅推荐\n"));
    out.push(format!("{}\n", "=".repeat(60)));

    for (i, r) in rows.iter().take(limit).enumerate() {
        out.push(format!("{}. {}", i + 1, r.name));
        out.push(format!("   🏆 推荐指数: {}/10", r.recommendation_score));
        out.push(format!(
            "   ⭐ 大众点评: {}⭐ ({}评价)",
            r.dianping_rating, r.dianping_reviews
        ));
        out.push(format!("   💬 小红书: {}", r.xhs_engagement_display));
        out.push(format!("   📍 地址: {}", r.dianping_address));
        out.push(format!("   💰 人均: {}", r.dianping_price));
        out.push(format!(
            "   ✅ 一致性: {} ({:.2})",
            r.consistency_level.label(),
            r.consistency_score
        ));
        if !r.dianping_tags.is_empty() {
            out.push(format!(
                "   - 大众点评标签: {}",
                r.dianping_tags.join(", ")
            ));
        }
        if !r.xhs_keywords.is_empty() {
            out.push(format!("   - 小红书热词: {}", r.xhs_keywords.join(", ")));
        }
        if r.consistency_level == ConsistencyLevel::Low {
            out.push("   ⚠️ 注意: 两平台评价差异较大，建议进一步了解".to_string());
        }
        out.push(String::new());
    }

    out.join("\n")
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dp(name: &str, rating: f64) -> DianpingRestaurant {
        DianpingRestaurant {
            name: name.into(),
            rating,
            review_count: 100,
            ..Default::default()
        }
    }

    fn xhs(name: &str, likes: u64, saves: u64, comments: u64, sentiment: f64) -> XiaohongshuPost {
        XiaohongshuPost {
            restaurant_name: name.into(),
            likes,
            saves,
            comments,
            sentiment_score: sentiment,
            ..Default::default()
        }
    }

    #[test]
    fn end_to_end_single_match() {
        let config = MatchConfig::default();
        let dianping = vec![dp("鼎泰丰(浦东店)", 4.5)];
        let posts = vec![xhs("鼎泰丰", 800, 300, 150, 0.6)];

        let outcome = match_and_score(&dianping, &posts, &config);
        let matches = match &outcome {
            MatchOutcome::Matches(m) => m,
            other => panic!("expected matches, got {other:?}"),
        };
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].similarity_score, 1.0);
        assert!((0.0..=1.0).contains(&matches[0].consistency_score));
    }

    #[test]
    fn empty_inputs_are_insufficient_data() {
        let config = MatchConfig::default();
        assert_eq!(
            match_and_score(&[], &[xhs("鼎泰丰", 1, 1, 1, 0.0)], &config),
            MatchOutcome::InsufficientData {
                dianping_empty: true,
                xiaohongshu_empty: false,
            }
        );
        assert_eq!(
            match_and_score(&[dp("鼎泰丰", 4.0)], &[], &config),
            MatchOutcome::InsufficientData {
                dianping_empty: false,
                xiaohongshu_empty: true,
            }
        );
    }

    #[test]
    fn dissimilar_data_is_no_matches_not_no_data() {
        let config = MatchConfig::default();
        let outcome = match_and_score(
            &[dp("肯德基", 4.0)],
            &[xhs("麦当劳", 100, 10, 5, 0.2)],
            &config,
        );
        assert_eq!(outcome, MatchOutcome::NoMatches);
    }

    #[test]
    fn report_is_sorted_descending_and_clamped() {
        let config = MatchConfig::default();
        let dianping = vec![dp("海底捞", 3.2), dp("鼎泰丰", 4.9)];
        let posts = vec![
            xhs("海底捞", 50, 5, 2, -0.2),
            xhs("鼎泰丰", 4000, 900, 400, 0.9),
        ];

        let outcome = match_and_score(&dianping, &posts, &config);
        let rows = build_report(outcome.matches(), &config);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "鼎泰丰");
        assert!(rows[0].recommendation_score >= rows[1].recommendation_score);
        for r in &rows {
            assert!((0.0..=10.0).contains(&r.recommendation_score));
            assert!((0.0..=1.0).contains(&r.consistency_score));
        }
    }

    #[test]
    fn perfect_run_scores_ten() {
        // Rating 5, engagement saturating the log scale, perfectly aligned
        // sentiment: blend must land exactly on 10.0.
        let m = MatchedRestaurant {
            name: "满分店".into(),
            dianping: dp("满分店", 5.0),
            xiaohongshu: xhs("满分店", 100_000, 50_000, 10_000, 1.0),
            similarity_score: 1.0,
            consistency_score: 1.0,
        };
        let rows = build_report(&[m], &MatchConfig::default());
        assert_eq!(rows[0].recommendation_score, 10.0);
    }

    #[test]
    fn consistency_levels_band_correctly() {
        assert_eq!(ConsistencyLevel::from_score(0.71), ConsistencyLevel::High);
        assert_eq!(ConsistencyLevel::from_score(0.7), ConsistencyLevel::High);
        assert_eq!(ConsistencyLevel::from_score(0.69), ConsistencyLevel::Medium);
        assert_eq!(ConsistencyLevel::from_score(0.5), ConsistencyLevel::Medium);
        assert_eq!(ConsistencyLevel::from_score(0.49), ConsistencyLevel::Low);
    }

    #[test]
    fn format_report_mentions_no_results() {
        let s = format_report(&[], "上海静安区", "火锅", 10);
        assert!(s.contains("未找到"));
    }
}
