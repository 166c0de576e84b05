//! Round-1 curation: the operator picks who starts, valid matches stay frozen, and the
//! schedule is regenerated around them.

use crate::logic::generate::regenerate_schedule;
use crate::models::{PlayerId, Schedule, ScheduleError};
use std::collections::BTreeSet;

/// Replace the round-1 selection and regenerate.
///
/// The selection must be non-empty, only name registered players, and fit on the courts
/// (four per court). Round-1 matches whose players all stay selected keep their exact teams.
pub fn update_round1(schedule: &mut Schedule, player_ids: &[PlayerId]) -> Result<(), ScheduleError> {
    if player_ids.is_empty() {
        return Err(ScheduleError::EmptySelection);
    }
    for &id in player_ids {
        if schedule.get_player(id).is_none() {
            return Err(ScheduleError::PlayerNotFound(id));
        }
    }
    let selection: BTreeSet<PlayerId> = player_ids.iter().copied().collect();
    let max = schedule.config.max_round1_players();
    if selection.len() > max {
        return Err(ScheduleError::TooManyRound1Players {
            max,
            selected: selection.len(),
        });
    }

    schedule.roster.commit_round1_update(&schedule.matches, selection);
    regenerate_schedule(schedule);
    Ok(())
}
