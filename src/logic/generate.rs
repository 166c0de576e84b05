//! Match generation across all sessions and courts.

use crate::logic::match_type::{count_available, determine_match_types};
use crate::logic::round_state::RoundState;
use crate::logic::selection::create_balanced_match;
use crate::logic::sessions::session_time;
use crate::models::{CourtMatch, Gender, Player, PlayerId, Schedule};
use std::collections::BTreeSet;

/// Doubles cannot be played with fewer registered players than this.
pub const MIN_PLAYERS: usize = 4;

fn split_by_gender<'a>(players: impl Iterator<Item = &'a Player>) -> (Vec<&'a Player>, Vec<&'a Player>) {
    players.partition(|p| p.gender == Gender::Male)
}

/// Generate every match of the evening.
///
/// 1. Seed the rotation state for all players.
/// 2. Replay round-1 `frozen` matches into the state and emit them first.
/// 3. For each session, pick match types from the players still free, then fill every court
///    not already taken; session 0 only draws from `round1`, later sessions from everyone.
///
/// The result is round-major, court-minor, and fully determined by the inputs (including
/// the order of `players`). Fewer than four players yield no matches.
pub fn generate_matches(
    players: &[Player],
    round1: &BTreeSet<PlayerId>,
    court_count: u32,
    session_count: u32,
    start_time: &str,
    session_minutes: u32,
    frozen: &[CourtMatch],
) -> Vec<CourtMatch> {
    if players.len() < MIN_PLAYERS {
        log::debug!("Not generating matches: {} players, need {}", players.len(), MIN_PLAYERS);
        return Vec::new();
    }

    let mut state = RoundState::seeded(players);
    let mut matches: Vec<CourtMatch> = Vec::new();

    for m in frozen.iter().filter(|m| m.round == 1) {
        state.apply_frozen(m);
        matches.push(m.clone());
    }

    let (males_r1, females_r1) = split_by_gender(players.iter().filter(|p| round1.contains(&p.id)));
    let (males_all, females_all) = split_by_gender(players.iter());

    for session in 0..session_count {
        let round = session + 1;
        let time = session_time(start_time, session, session_minutes);
        let (males, females) = if session == 0 {
            (&males_r1, &females_r1)
        } else {
            (&males_all, &females_all)
        };

        let types = determine_match_types(
            count_available(males, &state, session),
            count_available(females, &state, session),
            court_count,
        );

        for (idx, &match_type) in types.iter().enumerate() {
            let court = idx as u32 + 1;
            if matches.iter().any(|m| m.round == round && m.court == court) {
                continue;
            }
            match create_balanced_match(round, court, match_type, males, females, &mut state, session, &time) {
                Some(m) => matches.push(m),
                None => log::debug!("Round {} court {}: no {} quartet available", round, court, match_type),
            }
        }
    }

    debug_assert!(rounds_are_disjoint(&matches), "a player was booked twice in one round");
    log::debug!(
        "Generated {} matches over {} sessions on {} courts ({} frozen)",
        matches.len(),
        session_count,
        court_count,
        frozen.len()
    );
    matches
}

fn rounds_are_disjoint(matches: &[CourtMatch]) -> bool {
    let mut seen = BTreeSet::new();
    matches
        .iter()
        .flat_map(|m| m.players.iter().map(move |p| (m.round, *p)))
        .all(|key| seen.insert(key))
}

/// Regenerate a schedule's matches from its roster, configuration and frozen matches.
pub fn regenerate_schedule(schedule: &mut Schedule) {
    schedule.matches = generate_matches(
        &schedule.players,
        &schedule.roster.round1,
        schedule.config.court_count,
        schedule.config.session_count(),
        &schedule.config.start_time,
        schedule.config.session_minutes,
        &schedule.roster.frozen,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchType, SkillLevel};

    fn mixed(men: usize, women: usize) -> Vec<Player> {
        let m = (0..men).map(|i| Player::new(format!("M{i}"), Gender::Male, SkillLevel::Intermediate));
        let w = (0..women).map(|i| Player::new(format!("W{i}"), Gender::Female, SkillLevel::Intermediate));
        m.chain(w).collect()
    }

    fn everyone(players: &[Player]) -> BTreeSet<PlayerId> {
        players.iter().map(|p| p.id).collect()
    }

    #[test]
    fn zero_sessions_give_no_matches() {
        let p = mixed(2, 2);
        assert!(generate_matches(&p, &everyone(&p), 1, 0, "20:00", 24, &[]).is_empty());
    }

    #[test]
    fn frozen_court_is_not_refilled() {
        let p = mixed(4, 4);
        let first = generate_matches(&p, &everyone(&p), 2, 1, "20:00", 24, &[]);
        assert_eq!(first.len(), 2);

        let frozen = vec![first[1].clone()];
        let again = generate_matches(&p, &everyone(&p), 2, 1, "20:00", 24, &frozen);
        assert_eq!(again.len(), 2);
        assert_eq!(again[0], first[1]);
        assert_eq!(again[1].court, 1);
        assert!(again[1].players.iter().all(|id| !first[1].contains(*id)));
    }

    #[test]
    fn frozen_matches_outside_round_one_are_ignored() {
        let p = mixed(2, 2);
        let mut stray = generate_matches(&p, &everyone(&p), 1, 1, "20:00", 24, &[]).remove(0);
        stray.round = 3;
        let out = generate_matches(&p, &everyone(&p), 1, 1, "20:00", 24, &[stray]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].round, 1);
    }

    #[test]
    fn later_rounds_draw_from_full_roster() {
        let p = mixed(8, 0);
        let round1: BTreeSet<PlayerId> = p[..4].iter().map(|x| x.id).collect();
        let out = generate_matches(&p, &round1, 2, 2, "20:00", 24, &[]);

        // Round 1 only fields one court, round 2 both.
        assert_eq!(out.iter().map(|m| (m.round, m.court)).collect::<Vec<_>>(), [(1, 1), (2, 1), (2, 2)]);
        assert!(out[0].players.iter().all(|id| round1.contains(id)));
        // Those who sat out have the fewest games and take the first court.
        assert!(p[4..].iter().all(|x| out[1].contains(x.id)));
        assert_eq!(out[1].match_type, MatchType::MenDoubles);
        assert_eq!(out[1].time, "20:24");
    }
}
