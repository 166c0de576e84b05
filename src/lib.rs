//! Doubles match scheduler: library with models and match generation logic.

pub mod logic;
pub mod models;

pub use logic::{
    generate_matches, load_players_csv, regenerate_schedule, session_count, session_time,
    update_round1, RoundState,
};
pub use models::{
    CourtMatch, Gender, MatchType, Player, PlayerId, RosterState, RosterStatus, Round, Schedule,
    ScheduleConfig, ScheduleConfigPatch, ScheduleError, ScheduleId, SkillLevel,
};
