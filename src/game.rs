use serde::Serialize;
use tracing::{debug, info};

use crate::{
    decision::{Action, Decide, DealerDecision, DEALER_STANDS_ON},
    deck::{Card, Deck},
    error::GameError,
    hand::Hand,
    participant::{Dealer, Player},
    table::{Table, TableView},
};

#[derive(Clone, Debug)]
pub struct GameRules {
    pub dealer_stands_on: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        GameRules { dealer_stands_on: DEALER_STANDS_ON }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    PlayerWin,
    DealerWin,
    Tie,
}

/// Why the round ended the way it did.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Reason {
    BothBlackjack,
    DealerBlackjack,
    PlayerBlackjack,
    PlayerBust,
    DealerBust,
    HigherTotal(Outcome),
    EqualTotals,
}

impl Reason {
    pub fn outcome(self) -> Outcome {
        match self {
            Reason::BothBlackjack | Reason::EqualTotals => Outcome::Tie,
            Reason::DealerBlackjack | Reason::PlayerBust => Outcome::DealerWin,
            Reason::PlayerBlackjack | Reason::DealerBust => Outcome::PlayerWin,
            Reason::HigherTotal(outcome) => outcome,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Reason::PlayerBust => "You're bust, dealer won.",
            Reason::DealerBust => "Dealer's bust, you won.",
            _ => match self.outcome() {
                Outcome::Tie => "Tie.",
                Outcome::DealerWin => "Dealer won.",
                Outcome::PlayerWin => "Player won.",
            },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub outcome: Outcome,
    pub reason: Reason,
    pub message: String,
    pub player_actions: Vec<Action>,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_total: u32,
    pub dealer_total: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Dealing,
    PlayerTurn,
    DealerTurn,
    Resolution,
    Done(Reason),
}

/// One round between a single player and the dealer.
pub struct BlackjackGame<D, T> {
    dealer: Dealer,
    player: Player<D>,
    table: T,
    player_actions: Vec<Action>,
}

impl<D: Decide, T: Table> BlackjackGame<D, T> {
    pub fn new(deck: Deck, rules: &GameRules, decision: D, table: T) -> Self {
        let dealer = Dealer::new(deck, DealerDecision::new(rules.dealer_stands_on));
        BlackjackGame { dealer, player: Player::new(decision), table, player_actions: Vec::new() }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn into_table(self) -> T {
        self.table
    }

    /// Runs the round to completion; a deck running dry aborts it.
    pub fn play_round(&mut self) -> Result<RoundResult, GameError> {
        let mut phase = Phase::Dealing;
        loop {
            phase = match phase {
                Phase::Dealing => self.deal()?,
                Phase::PlayerTurn => self.player_turn()?,
                Phase::DealerTurn => self.dealer_turn()?,
                Phase::Resolution => Phase::Done(self.resolve()),
                Phase::Done(reason) => return Ok(self.finish(reason)),
            };
            debug!(?phase, "phase entered");
        }
    }

    fn deal(&mut self) -> Result<Phase, GameError> {
        self.dealer.deal_cards(&mut self.player)?;
        self.show(true);

        let dealer_natural = self.dealer.hand().is_blackjack();
        let player_natural = self.player.hand().is_blackjack();
        Ok(match (player_natural, dealer_natural) {
            (true, true) => Phase::Done(Reason::BothBlackjack),
            (false, true) => Phase::Done(Reason::DealerBlackjack),
            (true, false) => Phase::Done(Reason::PlayerBlackjack),
            (false, false) => Phase::PlayerTurn,
        })
    }

    fn player_turn(&mut self) -> Result<Phase, GameError> {
        loop {
            let action = self.player.decide()?;
            self.player_actions.push(action);
            debug!(?action, total = self.player.hand().total(), "player decided");
            if action == Action::Hit {
                self.player.hit(&mut self.dealer)?;
            }
            self.show(true);
            if self.player.hand().is_bust() {
                return Ok(Phase::Done(Reason::PlayerBust));
            }
            if action == Action::Stand {
                return Ok(Phase::DealerTurn);
            }
        }
    }

    fn dealer_turn(&mut self) -> Result<Phase, GameError> {
        loop {
            let action = self.dealer.decide()?;
            debug!(?action, total = self.dealer.hand().total(), "dealer decided");
            if action == Action::Hit {
                self.dealer.hit()?;
            }
            self.show(false);
            if self.dealer.hand().is_bust() {
                return Ok(Phase::Done(Reason::DealerBust));
            }
            if action == Action::Stand {
                return Ok(Phase::Resolution);
            }
        }
    }

    fn resolve(&self) -> Reason {
        let player = self.player.hand().total();
        let dealer = self.dealer.hand().total();
        if player == dealer {
            Reason::EqualTotals
        } else if dealer > player {
            Reason::HigherTotal(Outcome::DealerWin)
        } else {
            Reason::HigherTotal(Outcome::PlayerWin)
        }
    }

    fn finish(&mut self, reason: Reason) -> RoundResult {
        let outcome = reason.outcome();
        let view = view(self.player.hand(), self.dealer.hand(), false);
        self.table.announce(view, outcome, reason);

        let result = RoundResult {
            outcome,
            reason,
            message: reason.message().to_string(),
            player_actions: self.player_actions.clone(),
            player_cards: self.player.hand().cards().to_vec(),
            dealer_cards: self.dealer.hand().cards().to_vec(),
            player_total: self.player.hand().total(),
            dealer_total: self.dealer.hand().total(),
        };
        info!(
            ?outcome,
            ?reason,
            player_total = result.player_total,
            dealer_total = result.dealer_total,
            "round finished"
        );
        result
    }

    fn show(&mut self, hide_dealer_card: bool) {
        let view = view(self.player.hand(), self.dealer.hand(), hide_dealer_card);
        self.table.show(view);
    }
}

fn view<'a>(player: &'a Hand, dealer: &'a Hand, hide_dealer_card: bool) -> TableView<'a> {
    TableView { player, dealer, hide_dealer_card }
}
