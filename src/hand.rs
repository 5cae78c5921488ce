use serde::Serialize;

use crate::deck::{Card, Rank};

pub const BLACKJACK: u32 = 21;

/// Best total for `cards`: aces count 1, and a single ace is promoted to 11
/// when that does not bust the hand. Hands with several aces never get a
/// second promotion.
pub fn total(cards: &[Card]) -> u32 {
    let mut total = 0;
    let mut has_ace = false;

    for card in cards {
        if card.rank() == Rank::Ace {
            has_ace = true;
        }
        total += card.value();
    }

    if has_ace && total <= 11 {
        total += 10;
    }
    total
}

pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && total(cards) == BLACKJACK
}

pub fn is_bust(cards: &[Card]) -> bool {
    total(cards) > BLACKJACK
}

/// Cards held by one participant, in the order they were received.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total(&self) -> u32 {
        total(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

    use super::*;
    use crate::deck::{Suit, RANKS};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&rank| Card::new(Suit::Spades, rank)).collect()
    }

    #[test]
    fn ace_king_is_21() {
        assert_eq!(total(&cards(&[Rank::Ace, Rank::King])), 21);
        assert!(is_blackjack(&cards(&[Rank::King, Rank::Ace])));
    }

    #[test]
    fn only_one_ace_is_promoted() {
        assert_eq!(total(&cards(&[Rank::Ace, Rank::Ace, Rank::Nine])), 21);
        assert_eq!(total(&[Card::new(Suit::Hearts, Rank::Ace); 11]), 21);
        assert_eq!(total(&cards(&[Rank::Ace, Rank::Ace])), 12);
    }

    #[test]
    fn ace_stays_hard_when_promotion_would_bust() {
        assert_eq!(total(&cards(&[Rank::Ace, Rank::Six, Rank::Nine])), 16);
        assert_eq!(total(&cards(&[Rank::Ace, Rank::King, Rank::Queen])), 21);
    }

    #[test]
    fn no_aces_is_plain_sum() {
        for (i, a) in RANKS.iter().enumerate().skip(1) {
            for b in RANKS.iter().skip(i) {
                let hand = cards(&[*a, *b]);
                assert_eq!(total(&hand), a.value() + b.value());
            }
        }
        assert_eq!(total(&cards(&[Rank::Jack, Rank::Queen, Rank::King])), 30);
    }

    #[test]
    fn total_ignores_card_order() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut hand = cards(&[Rank::Ace, Rank::Three, Rank::Ace, Rank::Five, Rank::Two]);
        let expected = total(&hand);
        for _ in 0..20 {
            hand.shuffle(&mut rng);
            assert_eq!(total(&hand), expected);
        }
    }

    #[test]
    fn three_card_21_is_not_a_natural() {
        let hand = cards(&[Rank::Seven, Rank::Seven, Rank::Seven]);
        assert_eq!(total(&hand), 21);
        assert!(!is_blackjack(&hand));
    }

    #[test]
    fn hand_tracks_bust() {
        let mut hand = Hand::new();
        for rank in [Rank::King, Rank::Five, Rank::Seven] {
            hand.push(Card::new(Suit::Diamonds, rank));
        }
        assert_eq!(hand.len(), 3);
        assert!(hand.is_bust());
    }
}
