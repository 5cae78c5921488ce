use std::fmt;

use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use serde::Serialize;
use tracing::trace;

use crate::error::GameError;

pub const SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

pub const RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// Hard value of the rank; an ace counts 1 here and is promoted by the hand total.
    pub fn value(self) -> u32 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
        })
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    suit: Suit,
    rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn value(&self) -> u32 {
        self.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// A single 52-card deck. Cards are drawn from the end of the sequence.
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(seed: u64) -> Self {
        Self::shuffled(&mut SmallRng::seed_from_u64(seed))
    }

    pub fn shuffled(rng: &mut SmallRng) -> Self {
        let mut cards = Self::ordered_cards();
        cards.shuffle(rng);
        Deck { cards }
    }

    /// Builds a deck that hands out `cards` in the given order.
    ///
    /// Used to stack the deck for scripted rounds; the usual uniqueness of a
    /// fresh deck is not enforced here.
    pub fn from_draw_order(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Deck { cards }
    }

    fn ordered_cards() -> Vec<Card> {
        let mut cards = Vec::with_capacity(SUITS.len() * RANKS.len());
        for suit in SUITS {
            for rank in RANKS {
                cards.push(Card::new(suit, rank));
            }
        }
        cards
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let card = self.cards.pop().ok_or(GameError::DeckExhausted)?;
        trace!(%card, remaining = self.cards.len(), "card drawn");
        Ok(card)
    }

    pub fn remaining_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn fresh_deck_has_52_unique_cards() {
        let deck = Deck::new(7);
        assert_eq!(deck.remaining_cards(), 52);
        let unique: HashSet<Card> = deck.cards.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn draws_shrink_deck_and_never_repeat() {
        let mut deck = Deck::new(42);
        let mut seen = HashSet::new();
        for n in 1..=52 {
            let card = deck.draw().unwrap();
            assert!(seen.insert(card), "{card} drawn twice");
            assert_eq!(deck.remaining_cards(), 52 - n);
        }
        assert!(deck.is_empty());
    }

    #[test]
    fn empty_deck_reports_exhaustion() {
        let mut deck = Deck::from_draw_order(vec![Card::new(Suit::Clubs, Rank::Two)]);
        assert!(deck.draw().is_ok());
        assert!(matches!(deck.draw(), Err(GameError::DeckExhausted)));
        assert!(matches!(deck.draw(), Err(GameError::DeckExhausted)));
    }

    #[test]
    fn same_seed_gives_same_order() {
        let mut a = Deck::new(2024);
        let mut b = Deck::new(2024);
        for _ in 0..52 {
            assert_eq!(a.draw().unwrap(), b.draw().unwrap());
        }
    }

    #[test]
    fn shuffle_moves_cards() {
        let deck = Deck::new(1);
        assert_ne!(deck.cards, Deck::ordered_cards());
    }

    #[test]
    fn stacked_deck_draws_in_given_order() {
        let first = Card::new(Suit::Spades, Rank::Ace);
        let second = Card::new(Suit::Hearts, Rank::King);
        let mut deck = Deck::from_draw_order(vec![first, second]);
        assert_eq!(deck.draw().unwrap(), first);
        assert_eq!(deck.draw().unwrap(), second);
    }

    #[test]
    fn card_display_matches_console_format() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Ten).to_string(), "10 of Hearts");
        assert_eq!(Card::new(Suit::Spades, Rank::Ace).to_string(), "A of Spades");
        assert_eq!(Card::new(Suit::Clubs, Rank::Queen).value(), 10);
    }
}
