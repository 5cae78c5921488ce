use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("the deck has no cards left to draw")]
    DeckExhausted,

    #[error("could not read player input: {0}")]
    Input(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
