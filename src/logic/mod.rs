//! Match generation logic: sessions, rotation bookkeeping, candidate search, team balancing,
//! round-1 curation and roster import.

mod candidates;
mod generate;
mod import;
mod match_type;
mod round_one;
mod round_state;
mod selection;
mod sessions;
mod teams;

pub use candidates::{candidate_quartets, Quartet, MIXED_POOL_CAP, SAME_GENDER_POOL_CAP};
pub use generate::{generate_matches, regenerate_schedule, MIN_PLAYERS};
pub use import::load_players_csv;
pub use match_type::{count_available, determine_match_types};
pub use round_one::update_round1;
pub use round_state::{PartnerHistory, RoundState, NEVER_PLAYED};
pub use selection::{create_balanced_match, skill_range_label};
pub use sessions::{session_count, session_time};
pub use teams::{find_balanced_teams, TeamSplit};
