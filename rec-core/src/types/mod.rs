//! Common types shared across the recommendation core (§3).

pub mod candidate;
pub mod config;
pub mod constants;
pub mod context;
pub mod domain;
pub mod filter;
pub mod question;
pub mod session;

pub use candidate::{Candidate, RecommendationItem};
pub use config::{AnalyticsConfig, CacheConfig, RecommenderConfig, RetrievalConfig, SessionConfig, SurpriseConfig};
pub use context::{Context, RequestContext};
pub use domain::{
    AdjustmentType, AttentionLevel, DayClass, Domain, Energy, FlowName, Focus, Mood,
    PersonalContext, Reaction, RefinementAction, RefinementStrategy, Season, SurpriseKind,
    SurpriseStrategy, TimeOfDay, DiscoveryMode, Openness,
};
pub use filter::{FilterPredicate, QueryKey};
pub use profile::{EmotionalProfile, MomentSummary, RadarPayload};
pub use question::{AnsweredQuestion, OptionFilterHints, Question, QuestionOption};
pub use session::{QuestionFlow, RefinementRecord, Session};

pub mod profile;
