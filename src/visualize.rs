use std::fmt::Write;

use crate::action::Action;
use crate::card::{Card, Face, Rank, WildKind};
use crate::state::{Direction, GameStateView, GameStatus};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_hand: bool,
    pub show_opponents: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_hand: true,
            show_opponents: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Waiting => String::from("Waiting for players"),
        GameStatus::InProgress => String::from("In progress"),
        GameStatus::MatchComplete => format!("Match complete (winners: {})", state.winners.join(", ")),
    };
    let _ = writeln!(out, "Game status: {status}");
    let direction = match state.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(
        out,
        "Current player: {}{}  |  Direction: {direction}",
        state.current_player.as_deref().unwrap_or("--"),
        if state.is_my_turn() { " (You)" } else { "" }
    );
    let top = state
        .discard_top
        .map(|card| card.to_string())
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(
        out,
        "Discard top: {top}  |  Draw pile: {}  |  Discards: {}",
        state.draw_pile_count, state.discard_pile_count
    );
    if state.pending_penalty > 0 {
        let _ = writeln!(out, "Pending penalty: +{}", state.pending_penalty);
    }
    if options.show_opponents {
        let _ = writeln!(out, "Players:");
        for player in &state.players {
            let label_you = if player.name == state.self_player {
                " (You)"
            } else {
                ""
            };
            let current_tag = if player.is_current { " <- current" } else { "" };
            let won_tag = if player.has_won { " [won]" } else { "" };
            let _ = writeln!(
                out,
                "  {}{label_you} - {} cards{won_tag}{current_tag}",
                player.name, player.hand_size
            );
        }
    }
    if options.show_hand {
        if state.hand.is_empty() {
            let _ = writeln!(out, "Hand: (empty)");
        } else {
            let hand_display = state
                .hand
                .iter()
                .map(Card::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(out, "Hand: {hand_display}");
        }
    }
    out
}

pub fn describe_action(action: &Action) -> String {
    match action {
        Action::Pickup => String::from("Pick up"),
        Action::Play(card) => format!("Play {card} ({})", describe_card(*card)),
    }
}

fn describe_card(card: Card) -> String {
    match card.face() {
        Face::Wild(WildKind::Wild) => String::from("wild"),
        Face::Wild(WildKind::WildDrawFour) => String::from("wild draw four"),
        Face::Colored { color, rank } => {
            let color = format!("{color:?}").to_ascii_lowercase();
            match rank {
                Rank::Number(value) => format!("{color} {value}"),
                Rank::Reverse => format!("{color} reverse"),
                Rank::Skip => format!("{color} skip"),
                Rank::DrawTwo => format!("{color} draw two"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let mut game = GameBuilder::new().with_seed(3).build().expect("game");
        game.join("ada").expect("join");
        game.join("bob").expect("join");
        game.start().expect("start");
        let view = game.state_view("ada").expect("state view");
        let text = render_state(&view);
        assert!(text.contains("ada (You) - 7 cards <- current"));
        assert!(text.contains("bob - 7 cards"));
        assert!(text.contains("Hand:"));

        assert_eq!(describe_action(&Action::Pickup), "Pick up");
        let play = Action::Play("y+2".parse().expect("card"));
        assert_eq!(describe_action(&play), "Play y+2 (yellow draw two)");
        let wild = Action::Play("w+4".parse().expect("card"));
        assert_eq!(describe_action(&wild), "Play w+4 (wild draw four)");
    }
}
