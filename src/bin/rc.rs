use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use resto_compare::fetch::http::{DianpingEndpoint, JsonEndpoint, XiaohongshuEndpoint};
use resto_compare::fetch::mock::{MockDianpingFetcher, MockXiaohongshuFetcher};
use resto_compare::fetch::{fetch_both, DianpingFetcher, SearchQuery, XiaohongshuFetcher};
use resto_compare::matching::consistency::consistency_score;
use resto_compare::normalization::EngagementNormalizer;
use resto_compare::ranking::{build_report, format_report, match_and_score};
use resto_compare::records::{MatchOutcome, XiaohongshuPost};
use resto_compare::util::env::env_opt;
use resto_compare::MatchConfig;

#[derive(Parser, Debug)]
#[command(name = "rc", version, about = "RestoCompare cross-platform restaurant recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Cross-check restaurants across Dianping and Xiaohongshu and print a
    /// ranked recommendation list
    Crosscheck {
        /// Geographic area, e.g. "上海静安区"
        location: String,
        /// Cuisine type, e.g. "日式料理"
        cuisine: String,
        /// Override the similarity threshold (default 0.6, env RC_SIMILARITY_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,
        /// Maximum number of restaurants to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Emit the report rows as JSON instead of formatted text
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Base URL of the external Dianping fetch service (env RC_DIANPING_URL);
        /// mock data when absent
        #[arg(long)]
        dianping_url: Option<String>,
        /// Base URL of the external Xiaohongshu fetch service (env RC_XIAOHONGSHU_URL);
        /// mock data when absent
        #[arg(long)]
        xiaohongshu_url: Option<String>,
    },
    /// Probe engagement normalization (and consistency, when a rating is
    /// given) for a single hypothetical post
    Score {
        #[arg(long, default_value_t = 0)]
        likes: u64,
        #[arg(long, default_value_t = 0)]
        saves: u64,
        #[arg(long, default_value_t = 0)]
        comments: u64,
        /// Text sentiment in -1..1
        #[arg(long, default_value_t = 0.0)]
        sentiment: f64,
        /// Dianping rating to compare against (enables consistency output)
        #[arg(long)]
        rating: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    resto_compare::util::env::init_env();
    resto_compare::telemetry::init_tracing("info")?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Crosscheck {
            location,
            cuisine,
            threshold,
            limit,
            json,
            dianping_url,
            xiaohongshu_url,
        } => {
            let mut config = MatchConfig::from_env();
            if let Some(t) = threshold {
                config = config.with_threshold(t);
            }

            let query = SearchQuery::new(location.clone(), cuisine.clone());
            let dianping: Box<dyn DianpingFetcher> =
                match dianping_url.or_else(|| env_opt("RC_DIANPING_URL")) {
                    Some(url) => Box::new(DianpingEndpoint(JsonEndpoint::new(url))),
                    None => {
                        info!("no Dianping endpoint configured; using mock data");
                        Box::new(MockDianpingFetcher)
                    }
                };
            let xiaohongshu: Box<dyn XiaohongshuFetcher> =
                match xiaohongshu_url.or_else(|| env_opt("RC_XIAOHONGSHU_URL")) {
                    Some(url) => Box::new(XiaohongshuEndpoint(JsonEndpoint::new(url))),
                    None => {
                        info!("no Xiaohongshu endpoint configured; using mock data");
                        Box::new(MockXiaohongshuFetcher)
                    }
                };

            let (dp_records, xhs_records) =
                fetch_both(dianping.as_ref(), xiaohongshu.as_ref(), &query).await;

            match match_and_score(&dp_records, &xhs_records, &config) {
                MatchOutcome::InsufficientData {
                    dianping_empty,
                    xiaohongshu_empty,
                } => {
                    println!("❌ 数据不足: {location} - {cuisine}");
                    if dianping_empty {
                        println!("   大众点评无结果，请检查网络/凭证/查询词");
                    }
                    if xiaohongshu_empty {
                        println!("   小红书无结果，请检查网络/凭证/查询词");
                    }
                }
                MatchOutcome::NoMatches => {
                    println!("❌ 两个平台均有数据，但没有可信的同店匹配: {location} - {cuisine}");
                }
                MatchOutcome::Matches(matches) => {
                    let rows = build_report(&matches, &config);
                    if json {
                        println!("{}", serde_json::to_string_pretty(&rows)?);
                    } else {
                        println!("{}", format_report(&rows, &location, &cuisine, limit));
                    }
                }
            }
        }
        Commands::Score {
            likes,
            saves,
            comments,
            sentiment,
            rating,
        } => {
            let config = MatchConfig::from_env();
            let post = XiaohongshuPost {
                restaurant_name: "probe".into(),
                likes,
                saves,
                comments,
                sentiment_score: sentiment,
                ..Default::default()
            };
            let normalizer = EngagementNormalizer::from_config(&config);
            let engagement = normalizer.normalize(&post, None);
            println!("engagement (0-5): {engagement:.2}");
            if let Some(rating) = rating {
                let consistency = consistency_score(rating, engagement, sentiment);
                println!("consistency (0-1): {consistency:.2}");
            }
        }
    }

    Ok(())
}
