use js_sys::Function;
use serde::Serialize;
use tracing::info;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod console;
pub mod decision;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod participant;
pub mod table;

use config::RoundInput;
use decision::{Decide, ScriptedDecision};
use deck::Deck;
use error::GameError;
use game::{BlackjackGame, RoundResult};
use table::{RecordingTable, Table, TableSnapshot};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptedRound {
    pub seed: u64,
    pub result: RoundResult,
    pub frames: Vec<TableSnapshot>,
}

/// Shuffles a fresh deck for `seed`, or for a random seed that gets logged.
pub fn deck_for(seed: Option<u64>) -> (Deck, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "shuffling deck");
    (Deck::new(seed), seed)
}

/// Plays one round with the given decision procedure and table.
pub fn run_round<D: Decide, T: Table>(
    input: &RoundInput,
    decision: D,
    table: T,
) -> Result<(RoundResult, T, u64), GameError> {
    let rules = config::to_game_rules(&input.rules)?;
    let (deck, seed) = deck_for(input.seed);
    let mut game = BlackjackGame::new(deck, &rules, decision, table);
    let result = game.play_round()?;
    Ok((result, game.into_table(), seed))
}

/// Plays one round replaying `input.player_actions`, keeping every rendered frame.
pub fn play_scripted<'a>(
    input: &RoundInput,
    table: RecordingTable<'a>,
) -> Result<ScriptedRound, GameError> {
    let decision = ScriptedDecision::from_codes(&input.player_actions)?;
    let (result, table, seed) = run_round(input, decision, table)?;
    Ok(ScriptedRound { seed, result, frames: table.into_snapshots() })
}

#[wasm_bindgen]
pub fn play_round(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: RoundInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let round = play_scripted(&input, RecordingTable::new())
        .map_err(|err| JsValue::from_str(&format!("Round failed: {err}")))?;

    serde_wasm_bindgen::to_value(&round)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen]
pub fn play_round_with_events(
    params: &JsValue,
    on_frame: &Function,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: RoundInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let table = RecordingTable::with_listener(|frame: &TableSnapshot| {
        if let Ok(value) = serde_wasm_bindgen::to_value(frame) {
            let _ = on_frame.call1(&JsValue::NULL, &value);
        }
    });
    let round = play_scripted(&input, table)
        .map_err(|err| JsValue::from_str(&format!("Round failed: {err}")))?;

    serde_wasm_bindgen::to_value(&round)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}
