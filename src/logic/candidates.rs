//! Candidate quartets for one court: the pool is pruned to the least-played players, then
//! every admissible group of four is listed.

use crate::logic::round_state::RoundState;
use crate::models::{MatchType, Player};

/// Pool cap per gender for mixed doubles (6 choose 2 squared = 225 quartets).
pub const MIXED_POOL_CAP: usize = 6;
/// Pool cap for single-gender doubles (8 choose 4 = 70 quartets).
pub const SAME_GENDER_POOL_CAP: usize = 8;

/// Four distinct players in generation order. For mixed doubles the order is
/// male, female, male, female.
#[derive(Clone, Copy, Debug)]
pub struct Quartet<'a> {
    pub a: &'a Player,
    pub b: &'a Player,
    pub c: &'a Player,
    pub d: &'a Player,
}

impl<'a> Quartet<'a> {
    pub fn members(&self) -> [&'a Player; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

/// Fewest games first, then strongest first. The sort is stable, so roster order decides the rest.
fn least_played<'a>(pool: &[&'a Player], state: &RoundState, cap: usize) -> Vec<&'a Player> {
    let mut sorted = pool.to_vec();
    sorted.sort_by(|x, y| {
        state
            .games_played(x.id)
            .cmp(&state.games_played(y.id))
            .then_with(|| y.skill_score().cmp(&x.skill_score()))
    });
    sorted.truncate(cap);
    sorted
}

/// All unordered pairs, in index order.
fn pairs<'a>(list: &[&'a Player]) -> Vec<(&'a Player, &'a Player)> {
    let mut out = Vec::new();
    for i in 0..list.len() {
        for j in i + 1..list.len() {
            out.push((list[i], list[j]));
        }
    }
    out
}

/// All 4-combinations, in lexicographic index order.
fn combinations_of_four<'a>(list: &[&'a Player]) -> Vec<Quartet<'a>> {
    let n = list.len();
    let mut out = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    out.push(Quartet {
                        a: list[a],
                        b: list[b],
                        c: list[c],
                        d: list[d],
                    });
                }
            }
        }
    }
    out
}

/// Candidate quartets for `match_type` from already-available players.
///
/// Returns nothing when the pool cannot field the match (2 + 2 for mixed, 4 otherwise).
pub fn candidate_quartets<'a>(
    match_type: MatchType,
    available_males: &[&'a Player],
    available_females: &[&'a Player],
    state: &RoundState,
) -> Vec<Quartet<'a>> {
    match match_type {
        MatchType::MixDoubles => {
            if available_males.len() < 2 || available_females.len() < 2 {
                return Vec::new();
            }
            let males = least_played(available_males, state, MIXED_POOL_CAP);
            let females = least_played(available_females, state, MIXED_POOL_CAP);
            let female_pairs = pairs(&females);
            let mut out = Vec::new();
            for (m1, m2) in pairs(&males) {
                for &(f1, f2) in &female_pairs {
                    out.push(Quartet {
                        a: m1,
                        b: f1,
                        c: m2,
                        d: f2,
                    });
                }
            }
            out
        }
        MatchType::MenDoubles | MatchType::WomenDoubles => {
            let pool = if match_type == MatchType::MenDoubles {
                available_males
            } else {
                available_females
            };
            if pool.len() < 4 {
                return Vec::new();
            }
            combinations_of_four(&least_played(pool, state, SAME_GENDER_POOL_CAP))
        }
    }
}
