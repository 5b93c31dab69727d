//! Captured session context (§3) and the client-supplied request shape it's
//! resolved from.

use super::domain::{AttentionLevel, DayClass, DiscoveryMode, PersonalContext, Season, TimeOfDay};
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Context as captured on the Session (§3): derived buckets plus the optional
/// situational hints the Preference Mapper's context rules key off (§4.4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub time_of_day: TimeOfDay,
    pub day_class: DayClass,
    pub season: Season,
    pub timezone: String,
    pub attention_level: Option<AttentionLevel>,
    pub discovery_mode: Option<DiscoveryMode>,
    pub personal_context: Option<PersonalContext>,
}

impl Context {
    /// Resolve a client-supplied, partially-filled request context into the
    /// fully-populated session context. Missing fields fall back to the
    /// current instant in the supplied timezone's offset-naive default (UTC),
    /// matching the Preference Mapper's "total function" requirement (§4.4).
    #[must_use]
    pub fn resolve(input: &RequestContext, now: DateTime<Utc>) -> Self {
        let time_of_day = input
            .time_of_day
            .unwrap_or_else(|| TimeOfDay::from_hour(now.hour()));
        let day_class = input
            .day_class
            .unwrap_or_else(|| DayClass::from_weekday(now.weekday()));
        let season = input.season.unwrap_or_else(|| Season::from_month(now.month()));
        let timezone = input.timezone.clone().unwrap_or_else(|| "UTC".to_string());

        Self {
            time_of_day,
            day_class,
            season,
            timezone,
            attention_level: input.attention_level,
            discovery_mode: input.discovery_mode,
            personal_context: input.personal_context,
        }
    }
}

/// The optional `context` object a client may supply on `/start` (§6).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub time_of_day: Option<TimeOfDay>,
    pub day_class: Option<DayClass>,
    pub season: Option<Season>,
    pub timezone: Option<String>,
    pub attention_level: Option<AttentionLevel>,
    pub discovery_mode: Option<DiscoveryMode>,
    pub personal_context: Option<PersonalContext>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fills_missing_fields_deterministically() {
        let now = DateTime::parse_from_rfc3339("2026-07-28T23:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ctx = Context::resolve(&RequestContext::default(), now);
        assert_eq!(ctx.time_of_day, TimeOfDay::LateNight);
        assert_eq!(ctx.timezone, "UTC");
    }

    #[test]
    fn resolve_prefers_explicit_fields() {
        let now = DateTime::parse_from_rfc3339("2026-07-28T23:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let input = RequestContext {
            time_of_day: Some(TimeOfDay::Morning),
            ..Default::default()
        };
        let ctx = Context::resolve(&input, now);
        assert_eq!(ctx.time_of_day, TimeOfDay::Morning);
    }
}
