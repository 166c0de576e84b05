//! Splitting a quartet into two balanced teams of two.

use crate::logic::candidates::Quartet;
use crate::logic::round_state::PartnerHistory;
use crate::models::Player;

/// The three ways to split four players into two pairs, as (team A, team B) indices.
const SPLITS: [([usize; 2], [usize; 2]); 3] = [([0, 1], [2, 3]), ([0, 2], [1, 3]), ([0, 3], [1, 2])];

/// Best split of a quartet together with its cost terms.
#[derive(Clone, Copy, Debug)]
pub struct TeamSplit<'a> {
    pub team_a: [&'a Player; 2],
    pub team_b: [&'a Player; 2],
    /// Absolute difference of summed skill scores.
    pub skill_diff: u32,
    /// 1 per team whose members have partnered before.
    pub partner_penalty: f64,
    /// 0.5 per same-position cross pair (A0/B0, A1/B1) that has partnered before.
    pub repeat_penalty: f64,
}

impl TeamSplit<'_> {
    fn cost(&self) -> f64 {
        f64::from(self.skill_diff) + self.partner_penalty + self.repeat_penalty
    }
}

fn team_skill(team: &[&Player; 2]) -> u32 {
    team.iter().map(|p| p.skill_score()).sum()
}

fn evaluate<'a>(team_a: [&'a Player; 2], team_b: [&'a Player; 2], partners: &PartnerHistory) -> TeamSplit<'a> {
    let partnered = |x: &Player, y: &Player| partners.have_partnered(x.id, y.id);

    let mut partner_penalty = 0.0;
    if partnered(team_a[0], team_a[1]) {
        partner_penalty += 1.0;
    }
    if partnered(team_b[0], team_b[1]) {
        partner_penalty += 1.0;
    }

    let mut repeat_penalty = 0.0;
    if partnered(team_a[0], team_b[0]) {
        repeat_penalty += 0.5;
    }
    if partnered(team_a[1], team_b[1]) {
        repeat_penalty += 0.5;
    }

    TeamSplit {
        team_a,
        team_b,
        skill_diff: team_skill(&team_a).abs_diff(team_skill(&team_b)),
        partner_penalty,
        repeat_penalty,
    }
}

/// Pick the split with the lowest `skill_diff + partner_penalty + repeat_penalty`.
/// Earlier splits win ties.
pub fn find_balanced_teams<'a>(quartet: &Quartet<'a>, partners: &PartnerHistory) -> TeamSplit<'a> {
    let members = quartet.members();
    debug_assert!(
        (0..4).all(|i| (i + 1..4).all(|j| members[i].id != members[j].id)),
        "quartet must hold four distinct players"
    );

    let pick = |([a1, a2], [b1, b2]): ([usize; 2], [usize; 2])| {
        evaluate([members[a1], members[a2]], [members[b1], members[b2]], partners)
    };
    let mut best = pick(SPLITS[0]);
    for split in SPLITS[1..].iter().copied().map(&pick) {
        if split.cost() < best.cost() {
            best = split;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, SkillLevel};

    fn player(name: &str, skill: SkillLevel) -> Player {
        Player::new(name, Gender::Male, skill)
    }

    fn quartet<'a>(p: &'a [Player]) -> Quartet<'a> {
        Quartet {
            a: &p[0],
            b: &p[1],
            c: &p[2],
            d: &p[3],
        }
    }

    #[test]
    fn pairs_strongest_with_weakest() {
        let p = vec![
            player("pro", SkillLevel::Pro),
            player("adv", SkillLevel::Advanced),
            player("nov", SkillLevel::Novice),
            player("unr", SkillLevel::Unrated),
        ];
        let split = find_balanced_teams(&quartet(&p), &PartnerHistory::default());
        // 5+0 vs 4+2 = 1, better than 5+4 vs 2+0 = 7 and 5+2 vs 4+0 = 3.
        assert_eq!(split.team_a[0].name, "pro");
        assert_eq!(split.team_a[1].name, "unr");
        assert_eq!(split.skill_diff, 1);
        assert_eq!(split.partner_penalty, 0.0);
    }

    #[test]
    fn first_split_wins_ties() {
        let p: Vec<Player> = (0..4).map(|i| player(&format!("p{i}"), SkillLevel::Beginner)).collect();
        let split = find_balanced_teams(&quartet(&p), &PartnerHistory::default());
        assert_eq!(split.team_a[1].name, "p1");
        assert_eq!(split.team_b[0].name, "p2");
    }

    #[test]
    fn avoids_repeating_partners() {
        let p: Vec<Player> = (0..4).map(|i| player(&format!("p{i}"), SkillLevel::Beginner)).collect();
        let mut history = PartnerHistory::default();
        history.record(p[0].id, p[1].id);
        let split = find_balanced_teams(&quartet(&p), &history);
        // {0,1}|{2,3} costs 1; {0,2}|{1,3} has A0/B0 = p0/p1 partnered, costs 0.5;
        // {0,3}|{1,2} has A0/B0 = p0/p1 partnered too, so the earlier one stays.
        assert_eq!(split.team_a[1].name, "p2");
        assert_eq!(split.partner_penalty, 0.0);
        assert_eq!(split.repeat_penalty, 0.5);
    }

    #[test]
    fn only_same_position_cross_pairs_count_as_repeats() {
        let p: Vec<Player> = (0..4).map(|i| player(&format!("p{i}"), SkillLevel::Beginner)).collect();
        let mut history = PartnerHistory::default();
        // Splits 1 and 2 each reuse a partnership; in split 3 the p0/p2 pair sits at A0/B1.
        history.record(p[0].id, p[1].id);
        history.record(p[0].id, p[2].id);
        let split = find_balanced_teams(&quartet(&p), &history);
        assert_eq!(split.team_a[1].name, "p3");
        assert_eq!(split.repeat_penalty, 0.5);
    }
}
