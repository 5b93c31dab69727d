//! Flow Planner (C2, §4.2).
//!
//! Produces a [`QuestionFlow`] from a domain, a requested flow name, and a
//! resolved context. Question identifiers are always taken verbatim from the
//! catalog so answers stay comparable across flow variants; only prompts are
//! ever rewritten, and only by context.

mod rewrite;

pub use rewrite::rewrite_prompt;

use crate::catalog::QuestionCatalog;
use crate::error::Result;
use crate::types::{Context, Domain, FlowName, Question, QuestionFlow};
use std::sync::Arc;
use tracing::instrument;

/// Plans a [`QuestionFlow`] for a session, drawing its question pool from a
/// [`QuestionCatalog`] (C1). Holds an owned `Arc` rather than a borrow so the
/// Orchestrator can keep one planner alive for the life of the process.
pub struct FlowPlanner {
    catalog: Arc<dyn QuestionCatalog>,
}

impl FlowPlanner {
    #[must_use]
    pub fn new(catalog: Arc<dyn QuestionCatalog>) -> Self {
        Self { catalog }
    }

    #[instrument(skip(self))]
    pub async fn plan(
        &self,
        domain: Domain,
        flow_name: FlowName,
        context: Context,
    ) -> Result<QuestionFlow> {
        let catalog_questions = self.catalog.get_questions(domain).await?;
        let questions = select_and_rewrite(&catalog_questions, flow_name, &context);

        Ok(QuestionFlow {
            greeting: greeting_for(domain, flow_name),
            questions,
            context,
            flow_type: flow_name,
        })
    }
}

/// Subsets the catalog's full question set down to the flow's target count
/// (identifiers unchanged), then rewrites each prompt by context (§4.2).
fn select_and_rewrite(catalog_questions: &[Question], flow_name: FlowName, context: &Context) -> Vec<Question> {
    let target = flow_name.target_question_count().min(catalog_questions.len().max(1));

    catalog_questions
        .iter()
        .take(target)
        .map(|q| {
            let mut rewritten = q.clone();
            rewritten.prompt = rewrite_prompt(q, context).into_owned();
            rewritten
        })
        .collect()
}

fn greeting_for(domain: Domain, flow_name: FlowName) -> String {
    let subject = match domain {
        Domain::Movies => "a movie",
        Domain::TvSeries => "a show",
        Domain::Documentaries => "a documentary",
    };
    match flow_name {
        FlowName::Standard => format!("Let's find {subject} for you."),
        FlowName::Quick => format!("Quick picks — a couple of questions and we'll find {subject}."),
        FlowName::Deep => format!("Let's really dig in and find {subject} worth your time."),
        FlowName::Surprise => "Close your eyes — let's see where this takes us.".to_string(),
        FlowName::Visual => "Pick the mood that looks right.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CachedCatalog;
    use crate::types::{DayClass, RequestContext, Season, TimeOfDay};
    use std::sync::Arc;
    use std::time::Duration;

    fn noon_context() -> Context {
        Context {
            time_of_day: TimeOfDay::Afternoon,
            day_class: DayClass::Weekday,
            season: Season::Summer,
            timezone: "UTC".to_string(),
            attention_level: None,
            discovery_mode: None,
            personal_context: None,
        }
    }

    #[tokio::test]
    async fn unknown_flow_name_yields_standard_shape() {
        let catalog: Arc<dyn QuestionCatalog> = Arc::new(CachedCatalog::builtin_only(Duration::from_secs(60)));
        let planner = FlowPlanner::new(catalog);
        let flow = planner
            .plan(Domain::Movies, FlowName::parse_or_standard("nonsense"), noon_context())
            .await
            .unwrap();
        assert_eq!(flow.flow_type, FlowName::Standard);
        assert_eq!(flow.questions.len(), 5);
    }

    #[tokio::test]
    async fn quick_flow_subsets_but_keeps_identifiers_stable() {
        let catalog: Arc<dyn QuestionCatalog> = Arc::new(CachedCatalog::builtin_only(Duration::from_secs(60)));
        let planner = FlowPlanner::new(catalog);
        let standard = planner
            .plan(Domain::Movies, FlowName::Standard, noon_context())
            .await
            .unwrap();
        let quick = planner
            .plan(Domain::Movies, FlowName::Quick, noon_context())
            .await
            .unwrap();
        assert_eq!(quick.questions.len(), 3);
        for q in &quick.questions {
            assert!(standard.questions.iter().any(|sq| sq.id == q.id));
        }
    }

    #[test]
    fn request_context_defaults_round_trip_into_flow_context() {
        let req = RequestContext::default();
        let now = chrono::DateTime::parse_from_rfc3339("2026-07-28T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let ctx = Context::resolve(&req, now);
        assert_eq!(ctx.season, Season::Summer);
    }
}
