use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::{error::GameError, hand::Hand};

pub const DEALER_STANDS_ON: u32 = 17;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    Hit,
    Stand,
}

impl Action {
    /// Parses the one-letter console answer, ignoring case and the line ending.
    pub fn from_code(code: &str) -> Option<Action> {
        match code.trim_end_matches(&['\r', '\n'][..]).to_ascii_lowercase().as_str() {
            "h" => Some(Action::Hit),
            "s" => Some(Action::Stand),
            _ => None,
        }
    }
}

/// "Hit or stand" given the hand a participant currently holds.
pub trait Decide {
    fn decide(&mut self, hand: &Hand) -> Result<Action, GameError>;
}

/// Source of the player's raw answers.
pub trait Prompt {
    fn ask(&mut self) -> Result<String, GameError>;
}

pub struct PlayerDecision<P> {
    prompt: P,
}

impl<P: Prompt> PlayerDecision<P> {
    pub fn new(prompt: P) -> Self {
        PlayerDecision { prompt }
    }
}

impl<P: Prompt> Decide for PlayerDecision<P> {
    fn decide(&mut self, _hand: &Hand) -> Result<Action, GameError> {
        loop {
            let answer = self.prompt.ask()?;
            if let Some(action) = Action::from_code(&answer) {
                return Ok(action);
            }
            debug!(answer = answer.trim_end(), "ignoring unrecognised answer");
        }
    }
}

pub struct DealerDecision {
    stands_on: u32,
}

impl DealerDecision {
    pub fn new(stands_on: u32) -> Self {
        DealerDecision { stands_on }
    }

    pub fn action_for(&self, hand: &Hand) -> Action {
        if hand.total() < self.stands_on {
            Action::Hit
        } else {
            Action::Stand
        }
    }
}

impl Default for DealerDecision {
    fn default() -> Self {
        DealerDecision::new(DEALER_STANDS_ON)
    }
}

impl Decide for DealerDecision {
    fn decide(&mut self, hand: &Hand) -> Result<Action, GameError> {
        Ok(self.action_for(hand))
    }
}

/// Replays a fixed list of answers, then stands.
#[derive(Debug, Default)]
pub struct ScriptedDecision {
    actions: VecDeque<Action>,
}

impl ScriptedDecision {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        ScriptedDecision { actions: actions.into_iter().collect() }
    }

    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self, GameError> {
        let actions = codes
            .iter()
            .map(|code| {
                Action::from_code(code.as_ref()).ok_or_else(|| {
                    GameError::InvalidConfig(format!("unknown player action {:?}", code.as_ref()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScriptedDecision::new(actions))
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl Decide for ScriptedDecision {
    fn decide(&mut self, _hand: &Hand) -> Result<Action, GameError> {
        Ok(self.actions.pop_front().unwrap_or(Action::Stand))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::deck::{Card, Rank, Suit};

    struct Answers(Vec<&'static str>);

    impl Prompt for Answers {
        fn ask(&mut self) -> Result<String, GameError> {
            if self.0.is_empty() {
                return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
            }
            Ok(self.0.remove(0).to_string())
        }
    }

    fn hand(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.push(Card::new(Suit::Clubs, rank));
        }
        hand
    }

    #[test]
    fn player_reasks_until_valid_answer() {
        let mut decision = PlayerDecision::new(Answers(vec!["x", "", "hit", " s", "S\r\n"]));
        assert_eq!(decision.decide(&Hand::new()).unwrap(), Action::Stand);
        assert!(decision.prompt.0.is_empty());
    }

    #[test]
    fn player_answer_is_case_insensitive() {
        let mut decision = PlayerDecision::new(Answers(vec!["H", "h"]));
        assert_eq!(decision.decide(&Hand::new()).unwrap(), Action::Hit);
        assert_eq!(decision.decide(&Hand::new()).unwrap(), Action::Hit);
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut decision = PlayerDecision::new(Answers(vec!["q"]));
        assert!(matches!(decision.decide(&Hand::new()), Err(GameError::Input(_))));
    }

    #[test]
    fn dealer_hits_below_17() {
        let mut dealer = DealerDecision::default();
        assert_eq!(dealer.decide(&hand(&[Rank::Ten, Rank::Six])).unwrap(), Action::Hit);
        assert_eq!(dealer.decide(&hand(&[Rank::Ten, Rank::Seven])).unwrap(), Action::Stand);
        assert_eq!(dealer.decide(&hand(&[Rank::Ace, Rank::Six])).unwrap(), Action::Stand);
        assert_eq!(dealer.decide(&hand(&[Rank::Two, Rank::Three])).unwrap(), Action::Hit);
    }

    #[test]
    fn dealer_threshold_is_configurable() {
        let dealer = DealerDecision::new(19);
        assert_eq!(dealer.action_for(&hand(&[Rank::Ten, Rank::Eight])), Action::Hit);
        assert_eq!(dealer.action_for(&hand(&[Rank::Ten, Rank::Nine])), Action::Stand);
    }

    #[test]
    fn script_stands_when_exhausted() {
        let mut script = ScriptedDecision::from_codes(&["h", "S"]).unwrap();
        assert_eq!(script.decide(&Hand::new()).unwrap(), Action::Hit);
        assert_eq!(script.decide(&Hand::new()).unwrap(), Action::Stand);
        assert_eq!(script.remaining(), 0);
        assert_eq!(script.decide(&Hand::new()).unwrap(), Action::Stand);
    }

    #[test]
    fn script_rejects_unknown_codes() {
        assert!(matches!(
            ScriptedDecision::from_codes(&["h", "double"]),
            Err(GameError::InvalidConfig(_))
        ));
    }
}
