use std::collections::HashMap;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::Action;
use crate::card::{Card, DECK_SIZE, DEFAULT_INITIAL_CARDS, Rank};
use crate::deck;
use crate::error::GameError;
use crate::state::{Direction, GameStateView, GameStatus, PlayerPublicState};

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    /// Cards dealt to every player on start.
    pub initial_cards: usize,
    /// Seed for shuffling; fresh entropy when `None`.
    pub seed: Option<u64>,
    /// Shuffle the discard stack (minus its top) back into the draw pile when
    /// a draw cannot be covered.
    pub recycle_discards: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_cards: DEFAULT_INITIAL_CARDS,
            seed: None,
            recycle_discards: true,
        }
    }
}

/// Builder that enables deterministic deck injection for testing and embedding.
#[derive(Default)]
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_cards(mut self, initial_cards: usize) -> Self {
        self.config.initial_cards = initial_cards;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Use `deck` as the draw pile instead of a shuffled full deck. Cards are
    /// drawn from the end.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_recycle_discards(mut self, recycle: bool) -> Self {
        self.config.recycle_discards = recycle;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Core UNO rules engine for a single match.
pub struct Game {
    config: GameConfig,
    status: GameStatus,
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    /// Join order; never shrinks.
    seating: Vec<String>,
    /// Players still in the rotation.
    turn_order: Vec<String>,
    hands: HashMap<String, Vec<Card>>,
    winners: Vec<String>,
    current: isize,
    direction: Direction,
    pending_penalty: usize,
    rigged_deck: Option<Vec<Card>>,
    rng: StdRng,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::MatchComplete)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_penalty(&self) -> usize {
        self.pending_penalty
    }

    /// Raw turn counter; the current seat is this value modulo the rotation size.
    pub fn turn_counter(&self) -> isize {
        self.current
    }

    /// Name of the player expected to act, while the match is in progress.
    pub fn current_player(&self) -> Option<&str> {
        if self.status != GameStatus::InProgress {
            return None;
        }
        self.index().map(|index| self.turn_order[index].as_str())
    }

    pub fn discard_top(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_count(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn hand(&self, player: &str) -> Option<&[Card]> {
        self.hands.get(player).map(Vec::as_slice)
    }

    /// Every joined player in join order.
    pub fn players(&self) -> &[String] {
        &self.seating
    }

    pub fn turn_order(&self) -> &[String] {
        &self.turn_order
    }

    pub fn winners(&self) -> &[String] {
        &self.winners
    }

    pub fn join(&mut self, player: impl Into<String>) -> Result<(), GameError> {
        let player = player.into();
        self.try_join(&player)
            .inspect_err(|err| warn!("{player}: {err}"))
    }

    /// Builds and deals the deck, then opens the match for actions.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.try_start().inspect_err(|err| warn!("{err}"))
    }

    /// Applies a textual action: `"pickup"` or a card token such as `"r5"`.
    pub fn next(&mut self, player: &str, token: &str) -> Result<(), GameError> {
        self.try_next(player, token)
            .inspect_err(|err| warn!("{player}: {err}"))
    }

    /// Typed equivalent of [`Game::next`].
    pub fn apply_action(&mut self, player: &str, action: Action) -> Result<(), GameError> {
        self.ensure_turn(player)
            .and_then(|()| self.execute(player, action))
            .inspect_err(|err| warn!("{player}: {err}"))
    }

    /// Pickup plus every distinct card in the player's hand that may be played.
    pub fn legal_actions(&self, player: &str) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        self.ensure_turn(player)?;
        let hand = self.hands.get(player).ok_or(GameError::UnknownPlayer)?;
        let top = self.discard_top();
        let mut actions: Vec<Action> = Vec::new();
        for card in hand {
            let playable = top.is_none_or(|top| card.can_play_on(top));
            let duplicate = actions
                .iter()
                .any(|action| action.card().is_some_and(|seen| seen.matches(*card)));
            if playable && !duplicate {
                actions.push(Action::Play(*card));
            }
        }
        actions.push(Action::Pickup);
        Ok(actions)
    }

    pub fn state_view(&self, perspective: &str) -> Result<GameStateView, GameError> {
        let hand = self.hands.get(perspective).ok_or(GameError::UnknownPlayer)?;
        let current = self.current_player();
        let players = self
            .seating
            .iter()
            .map(|name| PlayerPublicState {
                name: name.clone(),
                hand_size: self.hands.get(name).map_or(0, Vec::len),
                is_current: current == Some(name.as_str()),
                has_won: self.winners.contains(name),
            })
            .collect();

        Ok(GameStateView {
            status: self.status,
            direction: self.direction,
            pending_penalty: self.pending_penalty,
            self_player: perspective.to_string(),
            current_player: current.map(str::to_string),
            draw_pile_count: self.draw_pile.len(),
            discard_pile_count: self.discard_pile.len(),
            discard_top: self.discard_top(),
            players,
            winners: self.winners.clone(),
            hand: hand.clone(),
        })
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        if config.initial_cards == 0 {
            return Err(GameError::InvalidConfiguration(
                "initial cards must be positive",
            ));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Game {
            config,
            status: GameStatus::Waiting,
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            seating: Vec::new(),
            turn_order: Vec::new(),
            hands: HashMap::new(),
            winners: Vec::new(),
            current: 0,
            direction: Direction::Clockwise,
            pending_penalty: 0,
            rigged_deck: deck,
            rng,
        })
    }

    fn try_join(&mut self, player: &str) -> Result<(), GameError> {
        if self.status != GameStatus::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        if self.hands.contains_key(player) {
            return Err(GameError::AlreadyJoined);
        }
        self.seating.push(player.to_string());
        self.turn_order.push(player.to_string());
        self.hands.insert(player.to_string(), Vec::new());
        debug!("{player} joined");
        Ok(())
    }

    fn try_start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        if self.turn_order.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "at least one player must join before starting",
            ));
        }
        let per_player = self.config.initial_cards;
        let available = self.rigged_deck.as_ref().map_or(DECK_SIZE, Vec::len);
        let required = per_player.checked_mul(self.turn_order.len());
        match required {
            Some(required) if required <= available => {}
            _ => {
                return Err(GameError::InsufficientDeck {
                    required: required.unwrap_or(usize::MAX),
                    available,
                });
            }
        }

        let mut deck = match self.rigged_deck.take() {
            Some(deck) => deck,
            None => deck::shuffled_deck(&mut self.rng),
        };
        for player in &self.turn_order {
            let dealt = deck.split_off(deck.len() - per_player);
            if let Some(hand) = self.hands.get_mut(player) {
                hand.extend(dealt);
            }
        }
        debug!(
            "dealt {per_player} cards to {} players, {} left in the draw pile",
            self.turn_order.len(),
            deck.len()
        );
        self.draw_pile = deck;
        self.status = GameStatus::InProgress;
        Ok(())
    }

    fn try_next(&mut self, player: &str, token: &str) -> Result<(), GameError> {
        self.ensure_turn(player)?;
        let action = token.parse::<Action>()?;
        self.execute(player, action)
    }

    fn ensure_turn(&self, player: &str) -> Result<(), GameError> {
        match self.status {
            GameStatus::Waiting => return Err(GameError::NotStarted),
            GameStatus::MatchComplete => return Err(GameError::MatchComplete),
            GameStatus::InProgress => {}
        }
        if !self.hands.contains_key(player) {
            return Err(GameError::UnknownPlayer);
        }
        if self.current_player() != Some(player) {
            return Err(GameError::NotCurrentPlayer);
        }
        Ok(())
    }

    fn execute(&mut self, player: &str, action: Action) -> Result<(), GameError> {
        match action {
            Action::Pickup => self.pickup(player),
            Action::Play(card) => self.play(player, card)?,
        }
        Ok(())
    }

    fn pickup(&mut self, player: &str) {
        let drawn = self.draw_into(player, 1 + self.pending_penalty);
        debug!("{player} picked up {drawn} cards");
        self.pending_penalty = 0;
        self.current += self.direction.step();
        self.announce(Action::Pickup);
    }

    fn play(&mut self, player: &str, requested: Card) -> Result<(), GameError> {
        let seat = self.index().ok_or(GameError::NotCurrentPlayer)?;
        let hand = self.hands.get_mut(player).ok_or(GameError::UnknownPlayer)?;
        let position = hand
            .iter()
            .position(|held| held.matches(requested))
            .ok_or(GameError::CardNotInHand)?;
        let card = hand[position];
        if let Some(top) = self.discard_pile.last() {
            if !card.can_play_on(*top) {
                return Err(GameError::InvalidPlay);
            }
        }

        hand.remove(position);
        let emptied = hand.is_empty();
        self.discard_pile.push(card);
        if emptied {
            self.retire(seat);
        }

        if card.rank() == Some(Rank::Reverse) {
            self.direction = self.direction.reversed();
        }
        let added = card.draw_penalty();
        if self.pending_penalty > 0 && added == 0 {
            // Absorbed even when this was the winning card.
            let absorbed = self.draw_into(player, self.pending_penalty);
            debug!("{player} absorbed {absorbed} penalty cards");
            self.pending_penalty = 0;
        }
        self.pending_penalty += added;

        let mut step = self.direction.step();
        if card.rank() == Some(Rank::Skip) {
            step *= 2;
        }
        // The vacated seat is already occupied by the next clockwise player.
        if emptied && self.direction == Direction::Clockwise {
            step -= 1;
        }
        self.current += step;

        if emptied && self.turn_order.len() <= 1 {
            self.finish();
        } else {
            self.announce(Action::Play(card));
        }
        Ok(())
    }

    fn retire(&mut self, seat: usize) {
        let winner = self.turn_order.remove(seat);
        info!("{winner} won");
        self.winners.push(winner);
        self.current = seat as isize;
    }

    fn finish(&mut self) {
        self.status = GameStatus::MatchComplete;
        match self.turn_order.first() {
            Some(last) => info!("match complete, {last} is left holding cards"),
            None => info!("match complete"),
        }
    }

    fn announce(&self, action: Action) {
        if let Some(next) = self.current_player() {
            info!("[{action}] {next} is the next player");
        }
    }

    /// Moves up to `count` cards from the draw pile into the player's hand and
    /// returns how many were drawn.
    fn draw_into(&mut self, player: &str, count: usize) -> usize {
        if self.draw_pile.len() < count && self.config.recycle_discards {
            self.recycle_discards();
        }
        let take = count.min(self.draw_pile.len());
        let drawn = self.draw_pile.split_off(self.draw_pile.len() - take);
        if let Some(hand) = self.hands.get_mut(player) {
            hand.extend(drawn);
        }
        take
    }

    fn recycle_discards(&mut self) {
        let Some(top) = self.discard_pile.pop() else {
            return;
        };
        let recycled = std::mem::replace(&mut self.discard_pile, vec![top]);
        if recycled.is_empty() {
            return;
        }
        debug!("recycling {} discards into the draw pile", recycled.len());
        let mut pile = deck::shuffle(recycled, &mut self.rng);
        pile.append(&mut self.draw_pile);
        self.draw_pile = pile;
    }

    fn index(&self) -> Option<usize> {
        let len = self.turn_order.len() as isize;
        (len > 0).then(|| self.current.rem_euclid(len) as usize)
    }
}
