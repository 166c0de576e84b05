//! Rotation bookkeeping owned by a single generation run.

use crate::models::{CourtMatch, Player, PlayerId};
use std::collections::{HashMap, HashSet};

/// Last-played value for someone who has not played yet: available from session 0 on.
pub const NEVER_PLAYED: i64 = -2;

/// Symmetric "has been teammates with" relation, stored as ordered pairs.
#[derive(Clone, Debug, Default)]
pub struct PartnerHistory {
    pairs: HashSet<(PlayerId, PlayerId)>,
}

impl PartnerHistory {
    fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
        if a <= b { (a, b) } else { (b, a) }
    }

    pub fn record(&mut self, a: PlayerId, b: PlayerId) {
        self.pairs.insert(Self::key(a, b));
    }

    pub fn have_partnered(&self, a: PlayerId, b: PlayerId) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Per-player state consulted while choosing matches.
#[derive(Clone, Debug, Default)]
pub struct RoundState {
    last_played: HashMap<PlayerId, i64>,
    games_played: HashMap<PlayerId, u32>,
    pub partners: PartnerHistory,
}

impl RoundState {
    /// Fresh state: nobody has played, nobody has partnered.
    pub fn seeded(players: &[Player]) -> Self {
        let mut state = Self::default();
        for p in players {
            state.last_played.insert(p.id, NEVER_PLAYED);
            state.games_played.insert(p.id, 0);
        }
        state
    }

    pub fn last_played(&self, id: PlayerId) -> i64 {
        self.last_played.get(&id).copied().unwrap_or(NEVER_PLAYED)
    }

    pub fn games_played(&self, id: PlayerId) -> u32 {
        self.games_played.get(&id).copied().unwrap_or(0)
    }

    /// Not yet scheduled in `session`.
    pub fn is_available(&self, id: PlayerId, session: u32) -> bool {
        i64::from(session) - self.last_played(id) >= 1
    }

    /// Book a match for `session`: the four players are marked as played and both
    /// teammate pairs are remembered. Opponents are not recorded as partners.
    pub fn record_match(&mut self, players: &[PlayerId; 4], session: u32) {
        for &id in players {
            self.last_played.insert(id, i64::from(session));
            *self.games_played.entry(id).or_insert(0) += 1;
        }
        self.partners.record(players[0], players[1]);
        self.partners.record(players[2], players[3]);
    }

    /// Replay a frozen round-1 match as if it had just been selected.
    pub fn apply_frozen(&mut self, m: &CourtMatch) {
        self.record_match(&m.players, m.round.saturating_sub(1));
    }
}
