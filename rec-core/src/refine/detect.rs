//! Pattern detection and strategy selection (§4.11).

use crate::types::{Reaction, RefinementAction, RefinementStrategy};

/// A single per-item reaction, with the optional tags/free text pattern
/// detection scans.
#[derive(Debug, Clone)]
pub struct ReactionInput {
    pub item_id: String,
    pub reaction: Reaction,
    pub tags: Vec<String>,
    pub text: Option<String>,
}

/// The full refinement request: reactions plus an optional explicit action.
#[derive(Debug, Clone, Default)]
pub struct RefinementRequest {
    pub reactions: Vec<ReactionInput>,
    pub action: Option<RefinementAction>,
}

/// Closed keyword vocabulary scanned against tags/free text, checked in this
/// precedence order (§4.11: "extract dominant themes ... closed vocabulary").
const TRIGGER_TABLE: &[(&[&str], RefinementStrategy)] = &[
    (&["too intense", "too much", "overwhelming", "intense"], RefinementStrategy::TooIntense),
    (&["boring", "dull", "too slow", "not enough"], RefinementStrategy::NotIntenseEnough),
    (&["wrong mood", "wrong energy", "not my energy"], RefinementStrategy::WrongEnergy),
    (&["wrong genre", "not my genre", "different genre"], RefinementStrategy::GenreMismatch),
];

/// Select a strategy for this request (§4.11): named action wins; else a
/// keyword trigger match; else the like/dislike balance default.
#[must_use]
pub fn detect_strategy(request: &RefinementRequest) -> RefinementStrategy {
    if let Some(action) = request.action {
        return strategy_for_action(action);
    }

    if let Some(strategy) = strategy_from_triggers(request) {
        return strategy;
    }

    strategy_from_balance(request)
}

fn strategy_for_action(action: RefinementAction) -> RefinementStrategy {
    match action {
        RefinementAction::TooIntense => RefinementStrategy::TooIntense,
        RefinementAction::TooLight => RefinementStrategy::NotIntenseEnough,
        RefinementAction::MoreLikeThis => RefinementStrategy::HiddenDesire,
        RefinementAction::TryDifferent => RefinementStrategy::NeedVariety,
    }
}

fn strategy_from_triggers(request: &RefinementRequest) -> Option<RefinementStrategy> {
    let haystack: String = request
        .reactions
        .iter()
        .flat_map(|r| r.tags.iter().cloned().chain(r.text.clone()))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    TRIGGER_TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(_, strategy)| *strategy)
}

fn strategy_from_balance(request: &RefinementRequest) -> RefinementStrategy {
    let balance: i32 = request.reactions.iter().map(|r| i32::from(r.reaction.leaning())).sum();
    match balance.cmp(&0) {
        std::cmp::Ordering::Greater => RefinementStrategy::HiddenDesire,
        std::cmp::Ordering::Less => RefinementStrategy::GenreMismatch,
        std::cmp::Ordering::Equal => RefinementStrategy::NeedVariety,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reaction(reaction: Reaction) -> ReactionInput {
        ReactionInput {
            item_id: "1".to_string(),
            reaction,
            tags: vec![],
            text: None,
        }
    }

    #[test]
    fn named_action_always_wins() {
        let request = RefinementRequest {
            reactions: vec![reaction(Reaction::Hate)],
            action: Some(RefinementAction::MoreLikeThis),
        };
        assert_eq!(detect_strategy(&request), RefinementStrategy::HiddenDesire);
    }

    #[test]
    fn keyword_trigger_beats_balance_default() {
        let mut r = reaction(Reaction::Like);
        r.tags = vec!["too intense".to_string()];
        let request = RefinementRequest { reactions: vec![r], action: None };
        assert_eq!(detect_strategy(&request), RefinementStrategy::TooIntense);
    }

    #[test]
    fn more_likes_than_dislikes_defaults_to_hidden_desire() {
        let request = RefinementRequest {
            reactions: vec![reaction(Reaction::Love), reaction(Reaction::Dislike)],
            action: None,
        };
        assert_eq!(detect_strategy(&request), RefinementStrategy::HiddenDesire);
    }

    #[test]
    fn more_dislikes_defaults_to_genre_mismatch() {
        let request = RefinementRequest {
            reactions: vec![reaction(Reaction::Dislike), reaction(Reaction::Dislike), reaction(Reaction::Like)],
            action: None,
        };
        assert_eq!(detect_strategy(&request), RefinementStrategy::GenreMismatch);
    }

    #[test]
    fn balanced_reactions_default_to_need_variety() {
        let request = RefinementRequest {
            reactions: vec![reaction(Reaction::Like), reaction(Reaction::Dislike)],
            action: None,
        };
        assert_eq!(detect_strategy(&request), RefinementStrategy::NeedVariety);
    }
}
