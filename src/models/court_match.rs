//! CourtMatch and MatchType for doubles games on one court in one round.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Which kind of doubles game a court hosts.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    MixDoubles,
    MenDoubles,
    WomenDoubles,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchType::MixDoubles => "Mix Doubles",
            MatchType::MenDoubles => "Men Doubles",
            MatchType::WomenDoubles => "Women Doubles",
        };
        f.write_str(label)
    }
}

/// A court assignment: four players on one court in one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourtMatch {
    /// 1-based round (session index + 1).
    pub round: u32,
    pub match_type: MatchType,
    /// 1-based court number within the round.
    pub court: u32,
    /// Positions 0 and 1 are team A, 2 and 3 are team B.
    pub players: [PlayerId; 4],
    pub occupied: bool,
    /// Session start time, "HH:MM".
    pub time: String,
    /// "<lowest level> - <highest level>" among the four players.
    pub skill_range: String,
}

impl CourtMatch {
    pub fn team_a(&self) -> [PlayerId; 2] {
        [self.players[0], self.players[1]]
    }

    pub fn team_b(&self) -> [PlayerId; 2] {
        [self.players[2], self.players[3]]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }

    /// True when every player of this match is in `selection`.
    pub fn involves_only(&self, selection: &BTreeSet<PlayerId>) -> bool {
        self.players.iter().all(|p| selection.contains(p))
    }
}
