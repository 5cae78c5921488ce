use tracing::debug;

use crate::{
    decision::{Action, Decide, DealerDecision},
    deck::{Card, Deck},
    error::GameError,
    hand::Hand,
};

/// Anything a player can ask for a card.
pub trait CardSource {
    fn give_card(&mut self) -> Result<Card, GameError>;
}

pub struct Dealer {
    hand: Hand,
    deck: Deck,
    decision: DealerDecision,
}

impl Dealer {
    pub fn new(deck: Deck, decision: DealerDecision) -> Self {
        Dealer { hand: Hand::new(), deck, decision }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn remaining_cards(&self) -> usize {
        self.deck.remaining_cards()
    }

    pub fn hit(&mut self) -> Result<(), GameError> {
        let card = self.give_card()?;
        debug!(%card, "dealer takes a card");
        self.hand.push(card);
        Ok(())
    }

    pub fn decide(&mut self) -> Result<Action, GameError> {
        self.decision.decide(&self.hand)
    }

    /// Opening deal: player, dealer, player, dealer.
    pub fn deal_cards<D: Decide>(&mut self, player: &mut Player<D>) -> Result<(), GameError> {
        for _ in 0..2 {
            player.hit(self)?;
            self.hit()?;
        }
        Ok(())
    }
}

impl CardSource for Dealer {
    fn give_card(&mut self) -> Result<Card, GameError> {
        self.deck.draw()
    }
}

pub struct Player<D> {
    hand: Hand,
    decision: D,
}

impl<D: Decide> Player<D> {
    pub fn new(decision: D) -> Self {
        Player { hand: Hand::new(), decision }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hit(&mut self, source: &mut impl CardSource) -> Result<(), GameError> {
        let card = source.give_card()?;
        debug!(%card, "player receives a card");
        self.hand.push(card);
        Ok(())
    }

    pub fn decide(&mut self) -> Result<Action, GameError> {
        self.decision.decide(&self.hand)
    }
}
