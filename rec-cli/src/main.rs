//! Thin command-line front end for the recommendation pipeline (§1, AMBIENT).
//! Drives the same in-process [`rec_core::Orchestrator`] the HTTP service
//! wraps, persisting session state to the same redb-backed store so a
//! `start` and a later `answer` can be run as separate invocations.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rec_core::analytics::{AnalyticsWriter, NullAnalyticsSink};
use rec_core::catalog::CachedCatalog;
use rec_core::orchestrator::{all_quick_adjustments, AnswerOutcome};
use rec_core::refine::{ReactionInput, RefinementRequest};
use rec_core::types::{Domain, FlowName, Reaction, RequestContext};
use rec_core::{Orchestrator, RecommenderConfig};
use rec_service::demo::{DemoCatalogPool, DemoCatalogProvider, DemoVectorIndex};
use rec_service::dto::{
    AdjustResponse, AnswerResponse, NextQuestionBody, Progress, RecommendationsBody,
    RefineResponse, StartResponse,
};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

mod output;

use output::OutputFormat;

const DEFAULT_DB_PATH: &str = "./rec-cli.redb";

#[derive(Parser)]
#[command(name = "rec-cli")]
#[command(about = "Drive the recommendation pipeline from the command line")]
#[command(version, long_about = None)]
struct Cli {
    /// Path to the session database (redb)
    #[arg(long, value_name = "FILE")]
    db_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new session and receive the first question
    Start {
        /// One of "movies", "tv-series", "documentaries"
        #[arg(long, default_value = "movies")]
        domain: String,
        /// One of "standard", "quick", "deep", "surprise", "visual"
        #[arg(long)]
        flow: Option<String>,
    },
    /// Answer the current question in a session
    Answer {
        session_id: Uuid,
        question_id: String,
        option_id: String,
        #[arg(long)]
        response_time_ms: Option<u64>,
    },
    /// Submit reactions to recommendations and get a refined set
    Refine {
        session_id: Uuid,
        /// One or more "itemId:reaction" pairs, e.g. m1:love m2:dislike
        #[arg(long = "reaction", value_parser = parse_reaction, required = true)]
        reactions: Vec<(String, Reaction)>,
    },
    /// Apply a quick adjustment (lighter, deeper, weirder, safer, shorter, longer)
    Adjust {
        session_id: Uuid,
        adjustment_type: String,
    },
}

fn parse_reaction(input: &str) -> Result<(String, Reaction), String> {
    let (item_id, reaction) = input
        .split_once(':')
        .ok_or_else(|| format!("expected itemId:reaction, got '{input}'"))?;
    let reaction = match reaction {
        "love" => Reaction::Love,
        "like" => Reaction::Like,
        "neutral" => Reaction::Neutral,
        "dislike" => Reaction::Dislike,
        "hate" => Reaction::Hate,
        other => return Err(format!("unknown reaction '{other}'")),
    };
    Ok((item_id.to_string(), reaction))
}

async fn build_orchestrator(db_path: &PathBuf) -> anyhow::Result<Orchestrator> {
    let config = RecommenderConfig::default();
    let session_store = rec_storage_redb::RedbStore::open_with_ttl(db_path, config.session.ttl)
        .await
        .context("failed to open session store")?;
    let catalog = CachedCatalog::builtin_only(config.cache.catalog_ttl);
    let analytics = AnalyticsWriter::new(
        Arc::new(NullAnalyticsSink),
        config.analytics.worker_count,
        config.analytics.max_queue_size,
    );

    Ok(Orchestrator::new(
        config,
        Arc::new(session_store),
        Arc::new(catalog),
        Arc::new(DemoVectorIndex),
        Arc::new(DemoCatalogPool),
        Arc::new(DemoCatalogProvider::default()),
        None,
        Arc::new(analytics),
        "https://image.example/".to_string(),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    let db_path = cli.db_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
    let orchestrator = build_orchestrator(&db_path).await?;

    match cli.command {
        Commands::Start { domain, flow } => {
            let domain = Domain::from_str(&domain).unwrap_or_default();
            let flow_name = flow.as_deref().map(FlowName::parse_or_standard).unwrap_or(FlowName::Standard);
            let outcome = orchestrator.start(domain, flow_name, RequestContext::default()).await?;
            cli.format.print(&StartResponse {
                session_id: outcome.session_id,
                domain: outcome.domain,
                greeting: outcome.greeting,
                question: outcome.question,
                progress: Progress::from(outcome.progress),
                flow_type: outcome.flow_type,
                context: outcome.context,
            })?;
        }
        Commands::Answer { session_id, question_id, option_id, response_time_ms } => {
            let outcome = orchestrator
                .answer(session_id, question_id, option_id, response_time_ms)
                .await?;
            let response = match outcome {
                AnswerOutcome::NextQuestion { question, progress } => {
                    AnswerResponse::NextQuestion(NextQuestionBody { question, progress: Progress::from(progress) })
                }
                AnswerOutcome::Recommendations(result) => AnswerResponse::Recommendations(RecommendationsBody {
                    kind: "recommendations",
                    recommendations: result.items,
                    moment: result.moment,
                    validation: result.validation,
                    can_refine: result.can_refine,
                    quick_adjustments: result.quick_adjustments,
                }),
            };
            cli.format.print(&response)?;
        }
        Commands::Refine { session_id, reactions } => {
            let request = RefinementRequest {
                reactions: reactions
                    .into_iter()
                    .map(|(item_id, reaction)| ReactionInput { item_id, reaction, tags: Vec::new(), text: None })
                    .collect(),
                action: None,
            };
            let outcome = orchestrator.refine(session_id, request).await?;
            cli.format.print(&RefineResponse {
                kind: "refined_recommendations",
                recommendations: outcome.items,
                strategy: outcome.strategy,
                confidence: outcome.confidence,
                explanation: outcome.explanation,
                adjustments: all_quick_adjustments(),
                validation: outcome.validation,
            })?;
        }
        Commands::Adjust { session_id, adjustment_type } => {
            let outcome = orchestrator.adjust(session_id, &adjustment_type).await?;
            let delta = rec_core::adjust::adjustment_for(&adjustment_type)?;
            let adjustment_applied = match delta.query_suffix {
                Some(suffix) => format!("{adjustment_type}: {suffix}"),
                None => adjustment_type.clone(),
            };
            cli.format.print(&AdjustResponse {
                kind: "adjusted_recommendations",
                adjustment: outcome.adjustment,
                recommendations: outcome.items,
                adjustment_applied,
            })?;
        }
    }

    Ok(())
}
