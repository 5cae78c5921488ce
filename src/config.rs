use std::{fs, path::Path};

use serde::Deserialize;

use crate::{decision::DEALER_STANDS_ON, error::GameError, game::GameRules};

const STANDS_ON_RANGE: std::ops::RangeInclusive<u8> = 12..=21;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RulesInput {
    #[serde(default)]
    pub dealer_stands_on: Option<u8>,
}

/// Settings for one round, shared by the console binary and the wasm entry points.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RoundInput {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rules: RulesInput,
    /// Answers replayed in place of an interactive player ("h" / "s").
    #[serde(default)]
    pub player_actions: Vec<String>,
}

impl RoundInput {
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        serde_json::from_str(text)
            .map_err(|err| GameError::InvalidConfig(format!("bad round config: {err}")))
    }

    pub fn from_file(path: &Path) -> Result<Self, GameError> {
        let text = fs::read_to_string(path).map_err(|err| {
            GameError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json(&text)
    }
}

pub fn to_game_rules(rules: &RulesInput) -> Result<GameRules, GameError> {
    let stands_on = match rules.dealer_stands_on {
        Some(value) if !STANDS_ON_RANGE.contains(&value) => {
            return Err(GameError::InvalidConfig(format!(
                "dealer_stands_on must be between {} and {}, got {value}",
                STANDS_ON_RANGE.start(),
                STANDS_ON_RANGE.end()
            )));
        }
        Some(value) => u32::from(value),
        None => DEALER_STANDS_ON,
    };
    Ok(GameRules { dealer_stands_on: stands_on })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let input = RoundInput::from_json("{}").unwrap();
        assert!(input.seed.is_none());
        assert!(input.player_actions.is_empty());
        assert_eq!(to_game_rules(&input.rules).unwrap().dealer_stands_on, 17);
    }

    #[test]
    fn reads_all_fields() {
        let input = RoundInput::from_json(
            r#"{"seed": 9, "rules": {"dealer_stands_on": 18}, "player_actions": ["h", "s"]}"#,
        )
        .unwrap();
        assert_eq!(input.seed, Some(9));
        assert_eq!(input.player_actions, vec!["h", "s"]);
        assert_eq!(to_game_rules(&input.rules).unwrap().dealer_stands_on, 18);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let rules = RulesInput { dealer_stands_on: Some(25) };
        assert!(matches!(to_game_rules(&rules), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        let parsed = RoundInput::from_json(r#"{"seed": "x"}"#);
        assert!(matches!(parsed, Err(GameError::InvalidConfig(_))));
    }
}
