//! Terminal front-end: renders the table as plain text and reads the
//! player's answers line by line.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::{
    decision::Prompt,
    error::GameError,
    game::{Outcome, Reason},
    table::{Table, TableView},
};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
const HIDDEN_CARD: &str = "XXXXXXXXXXX";
const QUESTION: &str = "(H)it or (S)tand?";

pub struct ConsoleTable<W> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> ConsoleTable<W> {
    pub fn new(out: W) -> Self {
        ConsoleTable { out, clear_screen: true }
    }

    /// Keeps earlier frames on screen; used when output is not a terminal.
    pub fn without_clearing(out: W) -> Self {
        ConsoleTable { out, clear_screen: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, view: &TableView<'_>) -> io::Result<()> {
        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        let dealer = render_dealer_cards(view);
        self.out.write_all(dealer.as_bytes())?;
        let user = render_player_cards(view);
        self.out.write_all(user.as_bytes())?;
        self.out.flush()
    }
}

fn render_dealer_cards(view: &TableView<'_>) -> String {
    let cards: Vec<String> = view
        .visible_dealer_cards()
        .into_iter()
        .map(|card| card.map_or_else(|| HIDDEN_CARD.to_string(), |card| card.to_string()))
        .collect();
    let mut line = format!("Dealer cards: {}", cards.join(", "));
    if let Some(total) = view.visible_dealer_total() {
        line.push_str(&format!("\t Total: {total}"));
    }
    line.push_str("\n\n");
    line
}

fn render_player_cards(view: &TableView<'_>) -> String {
    let cards: Vec<String> = view.player.cards().iter().map(|card| card.to_string()).collect();
    format!("User cards: {}\t Total: {}\n\n", cards.join(", "), view.player.total())
}

impl<W: Write> Table for ConsoleTable<W> {
    fn show(&mut self, view: TableView<'_>) {
        if let Err(err) = self.render(&view) {
            warn!(%err, "failed to draw the table");
        }
    }

    fn announce(&mut self, view: TableView<'_>, _outcome: Outcome, reason: Reason) {
        let written = self
            .render(&view)
            .and_then(|_| writeln!(self.out, "{}", reason.message()))
            .and_then(|_| self.out.flush());
        if let Err(err) = written {
            warn!(%err, "failed to announce the outcome");
        }
    }
}

/// Asks the question on `out` and reads one line from `input`.
pub struct LinePrompt<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, out: W) -> Self {
        LinePrompt { input, out }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self) -> Result<String, GameError> {
        writeln!(self.out, "{QUESTION}")?;
        self.out.flush()?;

        // Undecodable bytes still count as an answer; only EOF ends the prompt.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}
