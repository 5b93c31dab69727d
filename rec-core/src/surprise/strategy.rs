//! Strategy selection (§4.9): a fixed-precedence rule chain, with a single
//! seeded coin flip for the one genuinely randomized case.

use crate::types::{Context, DayClass, EmotionalProfile, Energy, Openness, SurpriseStrategy, TimeOfDay};
use rand::rngs::StdRng;
use rand::Rng;

/// Select a surprise strategy by precedence (§4.9):
/// `openness=experimental` -> adventurous; `energy=drained` -> safe;
/// `time_of_day=late_night` -> 50/50 `mood_shifter`/adventurous;
/// `day_class=weekend` -> adventurous; otherwise safe.
#[must_use]
pub fn select_strategy(profile: &EmotionalProfile, context: &Context, rng: &mut StdRng) -> SurpriseStrategy {
    if profile.openness == Openness::Experimental {
        return SurpriseStrategy::Adventurous;
    }
    if profile.energy == Energy::Drained {
        return SurpriseStrategy::Safe;
    }
    if context.time_of_day == TimeOfDay::LateNight {
        return if rng.gen_bool(0.5) {
            SurpriseStrategy::MoodShifter
        } else {
            SurpriseStrategy::Adventurous
        };
    }
    if context.day_class == DayClass::Weekend {
        return SurpriseStrategy::Adventurous;
    }
    SurpriseStrategy::Safe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Focus, Mood, Season};
    use rand::SeedableRng;

    fn context(time_of_day: TimeOfDay, day_class: DayClass) -> Context {
        Context {
            time_of_day,
            day_class,
            season: Season::Summer,
            timezone: "UTC".to_string(),
            attention_level: None,
            discovery_mode: None,
            personal_context: None,
        }
    }

    fn profile(energy: Energy, openness: Openness) -> EmotionalProfile {
        EmotionalProfile {
            energy,
            mood: Mood::Content,
            openness,
            focus: Focus::Present,
        }
    }

    #[test]
    fn experimental_openness_takes_precedence() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = profile(Energy::Drained, Openness::Experimental);
        let ctx = context(TimeOfDay::Afternoon, DayClass::Weekday);
        assert_eq!(select_strategy(&p, &ctx, &mut rng), SurpriseStrategy::Adventurous);
    }

    #[test]
    fn drained_energy_is_safe() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = profile(Energy::Drained, Openness::Exploring);
        let ctx = context(TimeOfDay::Afternoon, DayClass::Weekend);
        assert_eq!(select_strategy(&p, &ctx, &mut rng), SurpriseStrategy::Safe);
    }

    #[test]
    fn weekend_defaults_to_adventurous() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = profile(Energy::Neutral, Openness::ComfortZone);
        let ctx = context(TimeOfDay::Afternoon, DayClass::Weekend);
        assert_eq!(select_strategy(&p, &ctx, &mut rng), SurpriseStrategy::Adventurous);
    }

    #[test]
    fn otherwise_defaults_to_safe() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = profile(Energy::Neutral, Openness::ComfortZone);
        let ctx = context(TimeOfDay::Afternoon, DayClass::Weekday);
        assert_eq!(select_strategy(&p, &ctx, &mut rng), SurpriseStrategy::Safe);
    }

    #[test]
    fn late_night_picks_one_of_two_strategies() {
        let mut rng = StdRng::seed_from_u64(99);
        let p = profile(Energy::Neutral, Openness::ComfortZone);
        let ctx = context(TimeOfDay::LateNight, DayClass::Weekday);
        let strategy = select_strategy(&p, &ctx, &mut rng);
        assert!(matches!(strategy, SurpriseStrategy::MoodShifter | SurpriseStrategy::Adventurous));
    }
}
