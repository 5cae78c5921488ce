use serde::Serialize;

use crate::{
    deck::Card,
    game::{Outcome, Reason},
    hand::Hand,
};

/// What is visible on the table at one moment.
#[derive(Clone, Copy, Debug)]
pub struct TableView<'a> {
    pub player: &'a Hand,
    pub dealer: &'a Hand,
    pub hide_dealer_card: bool,
}

impl<'a> TableView<'a> {
    /// Dealer cards as the player sees them; the hole card is `None` while hidden.
    pub fn visible_dealer_cards(&self) -> Vec<Option<Card>> {
        self.dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(i, card)| if i == 0 && self.hide_dealer_card { None } else { Some(*card) })
            .collect()
    }

    pub fn visible_dealer_total(&self) -> Option<u32> {
        (!self.hide_dealer_card).then(|| self.dealer.total())
    }
}

/// Output side of a round.
pub trait Table {
    /// Called after every change to the visible hands.
    fn show(&mut self, view: TableView<'_>);

    /// Called once when the round is over, with every card face up.
    fn announce(&mut self, view: TableView<'_>, outcome: Outcome, reason: Reason);
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    pub player_cards: Vec<Card>,
    pub player_total: u32,
    pub dealer_cards: Vec<Option<Card>>,
    pub dealer_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
}

impl TableSnapshot {
    pub fn capture(view: &TableView<'_>) -> Self {
        TableSnapshot {
            player_cards: view.player.cards().to_vec(),
            player_total: view.player.total(),
            dealer_cards: view.visible_dealer_cards(),
            dealer_total: view.visible_dealer_total(),
            announcement: None,
        }
    }
}

/// Keeps every rendered state, optionally forwarding each one as it happens.
#[derive(Default)]
pub struct RecordingTable<'a> {
    snapshots: Vec<TableSnapshot>,
    listener: Option<Box<dyn FnMut(&TableSnapshot) + 'a>>,
}

impl<'a> RecordingTable<'a> {
    pub fn new() -> Self {
        RecordingTable { snapshots: Vec::new(), listener: None }
    }

    pub fn with_listener(listener: impl FnMut(&TableSnapshot) + 'a) -> Self {
        RecordingTable { snapshots: Vec::new(), listener: Some(Box::new(listener)) }
    }

    pub fn snapshots(&self) -> &[TableSnapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<TableSnapshot> {
        self.snapshots
    }

    fn record(&mut self, snapshot: TableSnapshot) {
        if let Some(listener) = &mut self.listener {
            listener(&snapshot);
        }
        self.snapshots.push(snapshot);
    }
}

impl Table for RecordingTable<'_> {
    fn show(&mut self, view: TableView<'_>) {
        self.record(TableSnapshot::capture(&view));
    }

    fn announce(&mut self, view: TableView<'_>, outcome: Outcome, reason: Reason) {
        let mut snapshot = TableSnapshot::capture(&view);
        snapshot.announcement = Some(reason.message().to_string());
        tracing::trace!(?outcome, "announcement recorded");
        self.record(snapshot);
    }
}
