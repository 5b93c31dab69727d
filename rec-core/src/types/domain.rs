//! Closed-set enums shared across the data model (§3).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content domain a session operates over (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Movies,
    TvSeries,
    Documentaries,
}

impl Domain {
    #[must_use]
    pub fn all() -> &'static [Domain] {
        &[Domain::Movies, Domain::TvSeries, Domain::Documentaries]
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Movies => "movies",
            Domain::TvSeries => "tv-series",
            Domain::Documentaries => "documentaries",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movies" => Ok(Domain::Movies),
            "tv-series" | "tv_series" | "tv" => Ok(Domain::TvSeries),
            "documentaries" => Ok(Domain::Documentaries),
            _ => Err(()),
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::Movies
    }
}

/// Named questionnaire flow variants (§4.2). Unknown names map to `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowName {
    Standard,
    Quick,
    Deep,
    Surprise,
    Visual,
}

impl FlowName {
    /// Parse a flow name, defaulting to `Standard` for anything unrecognized
    /// (§4.2: "Unknown names map to `standard`").
    #[must_use]
    pub fn parse_or_standard(s: &str) -> Self {
        match s {
            "quick" => FlowName::Quick,
            "deep" => FlowName::Deep,
            "surprise" => FlowName::Surprise,
            "visual" => FlowName::Visual,
            "standard" => FlowName::Standard,
            _ => FlowName::Standard,
        }
    }

    /// Target question count for this flow shape (§4.2).
    #[must_use]
    pub fn target_question_count(self) -> usize {
        match self {
            FlowName::Standard => 5,
            FlowName::Quick => 3,
            FlowName::Deep => 7,
            FlowName::Surprise => 4,
            FlowName::Visual => 1,
        }
    }
}

/// Time-of-day bucket, one axis of captured session context (§3, §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
    LateNight,
}

impl TimeOfDay {
    /// Derive the bucket from an hour-of-day in `0..24`.
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=8 => TimeOfDay::EarlyMorning,
            9..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::LateNight,
        }
    }
}

/// Day-of-week class (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClass {
    Weekday,
    Weekend,
}

impl DayClass {
    #[must_use]
    pub fn from_weekday(weekday: chrono::Weekday) -> Self {
        use chrono::Weekday::{Sat, Sun};
        match weekday {
            Sat | Sun => DayClass::Weekend,
            _ => DayClass::Weekday,
        }
    }
}

/// Season (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    #[must_use]
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

/// How much attention the viewer can give right now (§4.4 context rule input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionLevel {
    Background,
    Casual,
    FullFocus,
}

/// How willing the viewer is to be surprised (§4.4, §4.9 strategy input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    Reliable,
    Balanced,
    Surprise,
}

/// The viewer's personal situation right now (§4.4 context rule input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalContext {
    Escaping,
    Connecting,
    Unwinding,
    Focused,
}

/// Energy axis of the Emotional Profile (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    Drained,
    Neutral,
    Energized,
}

/// Mood axis of the Emotional Profile (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Melancholic,
    Content,
    Adventurous,
}

/// Openness axis of the Emotional Profile (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Openness {
    ComfortZone,
    Exploring,
    Experimental,
}

/// Focus axis of the Emotional Profile (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Scattered,
    Present,
    Immersed,
}

/// Surprise strategy (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurpriseStrategy {
    Safe,
    Adventurous,
    MoodShifter,
}

/// Surprise kind (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurpriseKind {
    HiddenGem,
    AdjacentDiscovery,
    Wildcard,
    TimeCapsule,
    ForeignSurprise,
    GenreBending,
}

impl SurpriseKind {
    #[must_use]
    pub fn all() -> &'static [SurpriseKind] {
        &[
            SurpriseKind::HiddenGem,
            SurpriseKind::AdjacentDiscovery,
            SurpriseKind::Wildcard,
            SurpriseKind::TimeCapsule,
            SurpriseKind::ForeignSurprise,
            SurpriseKind::GenreBending,
        ]
    }
}

/// A single per-item reaction reported to the Refinement Engine (§4.11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Love,
    Like,
    Neutral,
    Dislike,
    Hate,
}

impl Reaction {
    /// Coarse like/dislike leaning used for the default strategy rule (§4.11).
    #[must_use]
    pub fn leaning(self) -> i8 {
        match self {
            Reaction::Love => 2,
            Reaction::Like => 1,
            Reaction::Neutral => 0,
            Reaction::Dislike => -1,
            Reaction::Hate => -2,
        }
    }
}

/// Named refinement action, when the client supplies one explicitly (§4.11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinementAction {
    MoreLikeThis,
    TryDifferent,
    TooIntense,
    TooLight,
}

/// Refinement strategy (§4.11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefinementStrategy {
    TooIntense,
    NotIntenseEnough,
    WrongEnergy,
    GenreMismatch,
    HiddenDesire,
    NeedVariety,
}

/// Named quick adjustment (§4.12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    Lighter,
    Deeper,
    Weirder,
    Safer,
    Shorter,
    Longer,
}

impl FromStr for AdjustmentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lighter" => Ok(Self::Lighter),
            "deeper" => Ok(Self::Deeper),
            "weirder" => Ok(Self::Weirder),
            "safer" => Ok(Self::Safer),
            "shorter" => Ok(Self::Shorter),
            "longer" => Ok(Self::Longer),
            _ => Err(()),
        }
    }
}
