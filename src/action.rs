use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::GameError;

/// Token that requests a pickup instead of a play.
pub const PICKUP_TOKEN: &str = "pickup";

/// Action available to a player during their turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw one card plus any pending penalty and pass the turn.
    Pickup,
    /// Play a card from the hand onto the discard stack.
    Play(Card),
}

impl Action {
    /// Returns the card if the action is a play.
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::Play(card) => Some(*card),
            Action::Pickup => None,
        }
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.trim() == PICKUP_TOKEN {
            return Ok(Action::Pickup);
        }
        token.parse().map(Action::Play)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pickup => f.write_str(PICKUP_TOKEN),
            Action::Play(card) => write!(f, "{card}"),
        }
    }
}
