//! Choosing the quartet for one court and booking it.

use crate::logic::candidates::{candidate_quartets, Quartet};
use crate::logic::round_state::RoundState;
use crate::logic::teams::{find_balanced_teams, TeamSplit};
use crate::models::{CourtMatch, MatchType, Player, SkillLevel};

/// Lower is better. Fairness first, then balance, then novelty.
fn quartet_score(quartet: &Quartet<'_>, split: &TeamSplit<'_>, state: &RoundState) -> f64 {
    let games = quartet.members().map(|p| state.games_played(p.id));
    let spread = games.iter().max().copied().unwrap_or(0) - games.iter().min().copied().unwrap_or(0);
    f64::from(spread) * 4.0
        + f64::from(split.skill_diff) * 2.0
        + split.partner_penalty * 3.0
        + split.repeat_penalty
}

/// "<lowest> - <highest>" skill level names among the four players.
pub fn skill_range_label(players: &[&Player; 4]) -> String {
    let scores = players.map(|p| p.skill_score());
    let min = scores.iter().min().copied().unwrap_or(0);
    let max = scores.iter().max().copied().unwrap_or(0);
    format!("{} - {}", SkillLevel::from_score(min), SkillLevel::from_score(max))
}

/// Build the best-scoring match of `match_type` for one court from players still free in
/// `session`, and record it in `state`. Returns `None` when no quartet can be formed.
#[allow(clippy::too_many_arguments)]
pub fn create_balanced_match(
    round: u32,
    court: u32,
    match_type: MatchType,
    males: &[&Player],
    females: &[&Player],
    state: &mut RoundState,
    session: u32,
    time: &str,
) -> Option<CourtMatch> {
    let available_males: Vec<&Player> = males
        .iter()
        .copied()
        .filter(|p| state.is_available(p.id, session))
        .collect();
    let available_females: Vec<&Player> = females
        .iter()
        .copied()
        .filter(|p| state.is_available(p.id, session))
        .collect();

    let candidates = candidate_quartets(match_type, &available_males, &available_females, state);

    let mut best: Option<(Quartet<'_>, TeamSplit<'_>, f64)> = None;
    for quartet in candidates {
        let split = find_balanced_teams(&quartet, &state.partners);
        let score = quartet_score(&quartet, &split, state);
        if best.as_ref().map_or(true, |(_, _, s)| score < *s) {
            best = Some((quartet, split, score));
        }
    }

    let (quartet, split, score) = best?;
    let players = [split.team_a[0].id, split.team_a[1].id, split.team_b[0].id, split.team_b[1].id];
    state.record_match(&players, session);
    log::debug!(
        "Round {} court {}: {} with score {} ({} - {} skill)",
        round,
        court,
        match_type,
        score,
        split.team_a.iter().map(|p| p.skill_score()).sum::<u32>(),
        split.team_b.iter().map(|p| p.skill_score()).sum::<u32>()
    );

    Some(CourtMatch {
        round,
        match_type,
        court,
        players,
        occupied: true,
        time: time.to_string(),
        skill_range: skill_range_label(&quartet.members()),
    })
}
