//! Round-1 roster curation and the frozen matches it preserves between regenerations.

use crate::models::court_match::CourtMatch;
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The only state carried between two generations of the same schedule.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterState {
    /// Players eligible for round 1.
    pub round1: BTreeSet<PlayerId>,
    /// Round-1 matches kept verbatim while all four players stay selected.
    pub frozen: Vec<CourtMatch>,
}

impl RosterState {
    /// Everyone is selected for round 1, nothing is frozen.
    pub fn new(players: &[Player]) -> Self {
        Self {
            round1: players.iter().map(|p| p.id).collect(),
            frozen: Vec::new(),
        }
    }

    /// Replace the round-1 set without touching frozen matches.
    pub fn select_round1(&mut self, player_ids: impl IntoIterator<Item = PlayerId>) {
        self.round1 = player_ids.into_iter().collect();
    }

    /// Commit a new round-1 selection.
    ///
    /// Round-1 matches of `current_matches` that only involve selected players become the new
    /// frozen set. Those already include previously frozen matches that were emitted verbatim,
    /// so the old set is replaced rather than merged.
    pub fn commit_round1_update(
        &mut self,
        current_matches: &[CourtMatch],
        new_selection: BTreeSet<PlayerId>,
    ) {
        let still_frozen = self
            .frozen
            .iter()
            .filter(|m| m.involves_only(&new_selection))
            .count();
        let frozen: Vec<CourtMatch> = current_matches
            .iter()
            .filter(|m| m.round == 1 && m.involves_only(&new_selection))
            .cloned()
            .collect();
        log::info!(
            "Round 1 roster updated: {} players, {} of {} frozen matches still valid, {} matches now frozen",
            new_selection.len(),
            still_frozen,
            self.frozen.len(),
            frozen.len()
        );
        self.frozen = frozen;
        self.round1 = new_selection;
    }

    /// Drop a player from round 1 and any frozen match they were part of.
    pub fn forget_player(&mut self, player_id: PlayerId) {
        self.round1.remove(&player_id);
        self.frozen.retain(|m| !m.contains(player_id));
    }

    /// Players still needed to reach the next multiple of four above the current selection.
    pub fn players_to_fill_court(&self) -> usize {
        let count = self.round1.len();
        (count + 1).div_ceil(4) * 4 - count
    }
}
