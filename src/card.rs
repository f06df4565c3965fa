//! Packed card representation and the token grammar used to name cards.
//!
//! A card fits in a single byte:
//!
//! ```text
//!  7 6 5 4 3 2 1 0
//! [ext][col][ rank ]
//! ```
//!
//! `rank` holds 0-9 for number cards, 10 for reverse, 11 for skip and 12 for
//! draw-two. `col` holds the color. `ext` is `00` for colored cards, `10` for a
//! plain wild and `11` for wild-draw-four; bit 7 doubles as the wild flag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

const RANK_MASK: u8 = 0b0000_1111;
const COLOR_MASK: u8 = 0b0011_0000;
const WILD_MASK: u8 = 0b1000_0000;
const COLOR_SHIFT: u32 = 4;
const EXT_SHIFT: u32 = 6;

const EXT_NONE: u8 = 0b00;
const EXT_WILD: u8 = 0b10;
const EXT_WILD_DRAW_FOUR: u8 = 0b11;

const REVERSE_CODE: u8 = 10;
const SKIP_CODE: u8 = 11;
const DRAW_TWO_CODE: u8 = 12;

/// Number of distinct ranks per color (0-9, reverse, skip, draw-two).
pub const RANK_COUNT: u8 = 13;
/// Copies of every colored card in a full deck.
pub const COPIES_PER_CARD: usize = 2;
/// Copies of each wild kind in a full deck.
pub const WILDS_PER_KIND: usize = 4;
pub const DECK_SIZE: usize = 108;
pub const DEFAULT_INITIAL_CARDS: usize = 7;

const COLOR_TOKENS: [(char, Color); 4] = [
    ('r', Color::Red),
    ('g', Color::Green),
    ('b', Color::Blue),
    ('y', Color::Yellow),
];

const ACTION_TOKENS: [(&str, Rank); 3] = [
    ("r", Rank::Reverse),
    ("s", Rank::Skip),
    ("+2", Rank::DrawTwo),
];

const WILD_TOKENS: [(&str, WildKind); 2] =
    [("w", WildKind::Wild), ("w+4", WildKind::WildDrawFour)];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => Color::Red,
            1 => Color::Green,
            2 => Color::Blue,
            _ => Color::Yellow,
        }
    }

    /// Single-character token used in card names.
    pub fn token(self) -> char {
        COLOR_TOKENS[self as usize].0
    }
}

/// Face value of a colored card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Number card between 0 and 9.
    Number(u8),
    Reverse,
    Skip,
    DrawTwo,
}

impl Rank {
    /// Packed 4-bit code of the rank.
    pub fn code(self) -> u8 {
        match self {
            Rank::Number(value) => value,
            Rank::Reverse => REVERSE_CODE,
            Rank::Skip => SKIP_CODE,
            Rank::DrawTwo => DRAW_TWO_CODE,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        (code < RANK_COUNT).then(|| Self::decode(code))
    }

    /// Number rank, or `None` outside 0-9.
    pub fn number(value: u8) -> Option<Self> {
        (value < REVERSE_CODE).then_some(Rank::Number(value))
    }

    /// Every rank in code order.
    pub fn all() -> impl Iterator<Item = Rank> {
        (0..RANK_COUNT).map(Self::decode)
    }

    #[inline]
    pub fn is_action(self) -> bool {
        !matches!(self, Rank::Number(_))
    }

    fn decode(code: u8) -> Self {
        match code {
            REVERSE_CODE => Rank::Reverse,
            SKIP_CODE => Rank::Skip,
            DRAW_TWO_CODE => Rank::DrawTwo,
            value => Rank::Number(value),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Number(value) => write!(f, "{value}"),
            action => {
                let token = ACTION_TOKENS
                    .iter()
                    .find(|(_, rank)| rank == action)
                    .map(|(token, _)| *token)
                    .unwrap_or("?");
                f.write_str(token)
            }
        }
    }
}

/// Sub-kind of a wild card, stored in the extended-action field.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WildKind {
    Wild,
    WildDrawFour,
}

impl WildKind {
    fn ext(self) -> u8 {
        match self {
            WildKind::Wild => EXT_WILD,
            WildKind::WildDrawFour => EXT_WILD_DRAW_FOUR,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            WildKind::Wild => WILD_TOKENS[0].0,
            WildKind::WildDrawFour => WILD_TOKENS[1].0,
        }
    }
}

/// A card decoded into its named fields.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Colored { color: Color, rank: Rank },
    Wild(WildKind),
}

/// An UNO card packed into a single byte.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// `None` when a number rank lies outside 0-9.
    pub fn colored(color: Color, rank: Rank) -> Option<Self> {
        if let Rank::Number(value) = rank {
            Rank::number(value)?;
        }
        Some(Card(((color as u8) << COLOR_SHIFT) | rank.code()))
    }

    pub fn wild(kind: WildKind) -> Self {
        Card(kind.ext() << EXT_SHIFT)
    }

    /// Validates a raw packed value. Color and rank bits of wild cards are
    /// carried through untouched.
    pub fn from_bits(bits: u8) -> Result<Self, GameError> {
        match bits >> EXT_SHIFT {
            EXT_NONE if bits & RANK_MASK < RANK_COUNT => Ok(Card(bits)),
            EXT_WILD | EXT_WILD_DRAW_FOUR => Ok(Card(bits)),
            _ => Err(GameError::InvalidToken(format!("{bits:#010b}"))),
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_wild(self) -> bool {
        self.0 & WILD_MASK != 0
    }

    pub fn face(self) -> Face {
        match self.0 >> EXT_SHIFT {
            EXT_WILD_DRAW_FOUR => Face::Wild(WildKind::WildDrawFour),
            EXT_WILD => Face::Wild(WildKind::Wild),
            _ => Face::Colored {
                color: Color::from_code((self.0 & COLOR_MASK) >> COLOR_SHIFT),
                rank: Rank::decode(self.0 & RANK_MASK),
            },
        }
    }

    pub fn color(self) -> Option<Color> {
        match self.face() {
            Face::Colored { color, .. } => Some(color),
            Face::Wild(_) => None,
        }
    }

    pub fn rank(self) -> Option<Rank> {
        match self.face() {
            Face::Colored { rank, .. } => Some(rank),
            Face::Wild(_) => None,
        }
    }

    pub fn wild_kind(self) -> Option<WildKind> {
        match self.face() {
            Face::Wild(kind) => Some(kind),
            Face::Colored { .. } => None,
        }
    }

    /// Cards added to the pending penalty when this card is played.
    pub fn draw_penalty(self) -> usize {
        match self.face() {
            Face::Colored { rank: Rank::DrawTwo, .. } => 2,
            Face::Wild(WildKind::WildDrawFour) => 4,
            _ => 0,
        }
    }

    /// Whether `other` can stand in for this card when searching a hand.
    /// Any two wilds of the same kind match regardless of leftover bits.
    /// Colored cards must be identical: equal extended-action bits alone are
    /// not enough, since every colored card carries `00` there.
    pub fn matches(self, other: Card) -> bool {
        self == other
            || (self.is_wild() && other.is_wild() && self.wild_kind() == other.wild_kind())
    }

    /// Whether this card may be played on top of `top`.
    pub fn can_play_on(self, top: Card) -> bool {
        match (self.face(), top.face()) {
            (Face::Wild(_), _) => true,
            (_, Face::Wild(_)) => true,
            (
                Face::Colored { color, rank },
                Face::Colored {
                    color: top_color,
                    rank: top_rank,
                },
            ) => color == top_color || rank == top_rank,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.face() {
            Face::Wild(kind) => f.write_str(kind.token()),
            Face::Colored { color, rank } => write!(f, "{}{rank}", color.token()),
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({self})")
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidToken(token.to_string());
        let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
        if let Some((_, kind)) = WILD_TOKENS.iter().find(|(name, _)| *name == compact) {
            return Ok(Card::wild(*kind));
        }
        let mut chars = compact.chars();
        let color_char = chars.next().ok_or_else(invalid)?;
        let color = COLOR_TOKENS
            .iter()
            .find(|(name, _)| *name == color_char)
            .map(|(_, color)| *color)
            .ok_or_else(invalid)?;
        let rank = parse_rank(chars.as_str()).ok_or_else(invalid)?;
        Card::colored(color, rank).ok_or_else(invalid)
    }
}

fn parse_rank(text: &str) -> Option<Rank> {
    if let Some((_, rank)) = ACTION_TOKENS.iter().find(|(name, _)| *name == text) {
        return Some(*rank);
    }
    match text.as_bytes() {
        [digit @ b'0'..=b'9'] => Some(Rank::Number(digit - b'0')),
        _ => None,
    }
}

impl TryFrom<u8> for Card {
    type Error = GameError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Card::from_bits(bits)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}
