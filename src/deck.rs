use log::debug;
use rand::Rng;

use crate::card::{COPIES_PER_CARD, Card, Color, DECK_SIZE, Rank, WILDS_PER_KIND, WildKind};

/// Builds the full 108-card deck in deterministic order (unshuffled): every
/// rank in code order, each color twice, followed by the wild cards.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for rank in Rank::all() {
        for color in Color::ALL {
            for _ in 0..COPIES_PER_CARD {
                deck.extend(Card::colored(color, rank));
            }
        }
    }
    for _ in 0..WILDS_PER_KIND {
        deck.push(Card::wild(WildKind::Wild));
        deck.push(Card::wild(WildKind::WildDrawFour));
    }
    deck
}

/// Builds a full deck and shuffles it with `rng`.
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let deck = shuffle(full_deck(), rng);
    debug!("built shuffled deck of {} cards", deck.len());
    deck
}

/// Draw-without-replacement shuffle: repeatedly moves a uniformly chosen
/// remaining card to the output.
pub fn shuffle<R: Rng + ?Sized>(mut cards: Vec<Card>, rng: &mut R) -> Vec<Card> {
    let mut shuffled = Vec::with_capacity(cards.len());
    while !cards.is_empty() {
        let pick = rng.gen_range(0..cards.len());
        shuffled.push(cards.swap_remove(pick));
    }
    shuffled
}
