//! Per-session choice of doubles type for each court.

use crate::logic::round_state::RoundState;
use crate::models::{MatchType, Player};

/// Count players in `pool` who are still free in `session`.
pub fn count_available(pool: &[&Player], state: &RoundState, session: u32) -> usize {
    pool.iter()
        .filter(|p| state.is_available(p.id, session))
        .count()
}

/// Desired match type for each court, in court order.
///
/// Prefers mixed doubles, then the larger single-gender pool. Counts are estimates taken before
/// any court of the session is filled, so every court gets the same answer and the list is
/// either `court_count` long or empty.
#[allow(clippy::ifs_same_cond)]
pub fn determine_match_types(
    available_males: usize,
    available_females: usize,
    court_count: u32,
) -> Vec<MatchType> {
    let mut types = Vec::with_capacity(court_count as usize);
    for _ in 0..court_count {
        if available_males >= 2 && available_females >= 2 {
            types.push(MatchType::MixDoubles);
        } else if available_males >= 4 {
            types.push(MatchType::MenDoubles);
        } else if available_females >= 4 {
            types.push(MatchType::WomenDoubles);
        } else if available_males >= 2 && available_females >= 2 {
            // Unreachable after the first branch.
            types.push(MatchType::MixDoubles);
        }
    }
    types
}
