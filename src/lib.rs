//! UNO rules engine: packed card codec, deck building, dealing and the turn
//! state machine with reverse, skip and stacked draw penalties.
//!
//! The engine is synchronous and owns no I/O. Notices and rejected actions are
//! reported through the `log` facade.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod score;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, PICKUP_TOKEN};
pub use crate::bot::Bot;
pub use crate::bots::{HeuristicBot, RandomBot, create_bot_from_spec, label_for_spec};
pub use crate::card::{Card, Color, Face, Rank, WildKind};
pub use crate::deck::{full_deck, shuffled_deck};
pub use crate::error::GameError;
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::score::{card_points, hand_points, winner_points};
pub use crate::state::{Direction, GameStateView, GameStatus, PlayerPublicState};
pub use crate::visualize::{VisualOptions, describe_action, render_state};
