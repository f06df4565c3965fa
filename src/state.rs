use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    /// Players may still join.
    Waiting,
    InProgress,
    /// At most one player is left in the rotation.
    MatchComplete,
}

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Signed seat offset for a single step.
    #[inline]
    pub fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub name: String,
    pub hand_size: usize,
    pub is_current: bool,
    pub has_won: bool,
}

/// Game state snapshot from one player's point of view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub status: GameStatus,
    pub direction: Direction,
    pub pending_penalty: usize,
    pub self_player: String,
    pub current_player: Option<String>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub discard_top: Option<Card>,
    /// Every joined player in seating order, winners included.
    pub players: Vec<PlayerPublicState>,
    /// Winners in the order they emptied their hands.
    pub winners: Vec<String>,
    pub hand: Vec<Card>,
}

impl GameStateView {
    pub fn is_my_turn(&self) -> bool {
        self.current_player.as_deref() == Some(self.self_player.as_str())
    }
}
