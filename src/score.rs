//! Scoring utilities for finished UNO matches.
//!
//! Standard point values:
//!   number cards score their face value,
//!   reverse, skip and draw-two score 20,
//!   wild and wild-draw-four score 50.
//! The first player to go out collects the points left in every hand that is
//! still in the rotation.

use crate::card::{Card, Face, Rank};
use crate::game::Game;

pub const ACTION_POINTS: usize = 20;
pub const WILD_POINTS: usize = 50;

pub fn card_points(card: Card) -> usize {
    match card.face() {
        Face::Colored {
            rank: Rank::Number(value),
            ..
        } => value as usize,
        Face::Colored { .. } => ACTION_POINTS,
        Face::Wild(_) => WILD_POINTS,
    }
}

pub fn hand_points(hand: &[Card]) -> usize {
    hand.iter().copied().map(card_points).sum()
}

/// Total of the hands still in the rotation. Taken right after the first
/// player goes out this is their score; once the match is complete only the
/// last player's hand is left.
pub fn winner_points(game: &Game) -> usize {
    game.turn_order()
        .iter()
        .filter_map(|player| game.hand(player))
        .map(hand_points)
        .sum()
}
