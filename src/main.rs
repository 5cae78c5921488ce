//! blackjack: play one round against the dealer in the terminal.

use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use tracing::error;
use tracing_subscriber::EnvFilter;

use blackjack_console::{
    config::RoundInput,
    console::{ConsoleTable, LinePrompt},
    decision::{PlayerDecision, ScriptedDecision},
    error::GameError,
    run_round,
};

const USAGE: &str = r#"blackjack

USAGE:
    blackjack [--seed N] [--dealer-stands-on N] [--config FILE]

OPTIONS:
    --seed N               Shuffle the deck with a fixed seed
    --dealer-stands-on N   Lowest total the dealer stands on (12-21, default 17)
    --config FILE          JSON round settings; other flags override it
    -h, --help             Print this help
"#;

fn parse_args(args: &[String]) -> Result<Option<RoundInput>, String> {
    let mut seed = None;
    let mut stands_on = None;
    let mut config = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(None),
            "--seed" => {
                let value = args.get(i + 1).ok_or("--seed needs a value")?;
                seed = Some(value.parse().map_err(|_| format!("invalid seed {value:?}"))?);
                i += 2;
            }
            "--dealer-stands-on" => {
                let value = args.get(i + 1).ok_or("--dealer-stands-on needs a value")?;
                stands_on = Some(value.parse().map_err(|_| format!("invalid total {value:?}"))?);
                i += 2;
            }
            "--config" => {
                config = Some(PathBuf::from(args.get(i + 1).ok_or("--config needs a file")?));
                i += 2;
            }
            other => return Err(format!("unknown argument {other:?}")),
        }
    }

    // Flags win over the config file wherever they appear.
    let mut input = match config {
        Some(path) => RoundInput::from_file(&path).map_err(|err| err.to_string())?,
        None => RoundInput::default(),
    };
    if seed.is_some() {
        input.seed = seed;
    }
    if stands_on.is_some() {
        input.rules.dealer_stands_on = stands_on;
    }
    Ok(Some(input))
}

fn run(input: &RoundInput) -> Result<(), GameError> {
    let stdout = io::stdout();
    let table = if stdout.is_terminal() {
        ConsoleTable::new(stdout)
    } else {
        ConsoleTable::without_clearing(stdout)
    };

    if input.player_actions.is_empty() {
        let prompt = LinePrompt::new(io::stdin().lock(), io::stdout());
        run_round(input, PlayerDecision::new(prompt), table)?;
    } else {
        let script = ScriptedDecision::from_codes(&input.player_actions)?;
        run_round(input, script, table)?;
    }
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let input = match parse_args(&args) {
        Ok(Some(input)) => input,
        Ok(None) => {
            print!("{USAGE}");
            return;
        }
        Err(msg) => {
            eprintln!("error: {msg}\n\n{USAGE}");
            process::exit(1);
        }
    };

    if let Err(err) = run(&input) {
        error!(%err, "round aborted");
        eprintln!("error: {err}");
        process::exit(1);
    }
}
