use crate::action::Action;
use crate::bot::Bot;
use crate::card::{Card, Face, Rank, WildKind};
use crate::score::card_points;
use crate::state::GameStateView;

/// Rule-based bot that plays "sensible" moves without search.
///
/// In plain English:
/// - While a penalty is pending, pass it on with a draw-two, or a wild-draw-four if that is all
///   there is, instead of absorbing it.
/// - Otherwise shed colored cards first, preferring high point values and the color the hand
///   holds most of, so later turns keep a matching card.
/// - Keep wilds as a last resort before picking up.
#[derive(Default)]
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }

    fn score_play(state: &GameStateView, card: Card) -> i32 {
        let pending = state.pending_penalty > 0;
        match card.face() {
            Face::Wild(kind) => {
                let chain_bonus = if pending && kind == WildKind::WildDrawFour {
                    500
                } else {
                    0
                };
                chain_bonus + 10
            }
            Face::Colored { color, rank } => {
                let chain_bonus = if pending && rank == Rank::DrawTwo {
                    1_000
                } else {
                    0
                };
                let same_color = state
                    .hand
                    .iter()
                    .filter(|held| held.color() == Some(color))
                    .count() as i32;
                chain_bonus + 100 + card_points(card) as i32 + 5 * same_color
            }
        }
    }
}

impl Bot for HeuristicBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        legal_actions
            .iter()
            .filter_map(|action| action.card().map(|card| (Self::score_play(state, card), *action)))
            .max_by_key(|(score, _)| *score)
            .map(|(_, action)| action)
            .unwrap_or(Action::Pickup)
    }
}
