//! Data structures for the match scheduler: players, court matches, roster and schedules.

mod court_match;
mod player;
mod roster;
mod schedule;

pub use court_match::{CourtMatch, MatchType};
pub use player::{Gender, Player, PlayerId, SkillLevel};
pub use roster::RosterState;
pub use schedule::{
    RosterStatus, Round, Schedule, ScheduleConfig, ScheduleConfigPatch, ScheduleError, ScheduleId,
    DEFAULT_SESSION_MINUTES, MAX_COURT_COUNT, MAX_SESSION_COUNT,
};
