//! Random team lists, for stress testing and benchmarks.

use rand::Rng;
use std::collections::HashSet;
use std::fmt::Write;
use std::ops::Range;

/// Draws `count` distinct teams, each pairing an id from `left` with one from
/// `right`. `count` is clamped to the number of distinct pairs available.
pub fn random_teams(
    rng: &mut impl Rng,
    count: usize,
    left: Range<u32>,
    right: Range<u32>,
) -> Vec<(u32, u32)> {
    let possible = left.len() * right.len();
    let count = count.min(possible);
    let mut seen = HashSet::with_capacity(count);
    let mut teams = Vec::with_capacity(count);
    while teams.len() < count {
        let team = (rng.gen_range(left.clone()), rng.gen_range(right.clone()));
        if seen.insert(team) {
            teams.push(team);
        }
    }
    teams
}

/// Renders teams in the input format read by `parse_input`.
pub fn format_teams(teams: &[(u32, u32)]) -> String {
    let mut output = String::new();
    let _ = writeln!(&mut output, "{}", teams.len());
    for (a, b) in teams {
        let _ = writeln!(&mut output, "{} {}", a, b);
    }
    output
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::parse_input;
    use crate::params::Params;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_teams_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let teams = random_teams(&mut rng, 500, 1000..1100, 2000..2050);
        assert_eq!(teams.len(), 500);
        let distinct: HashSet<_> = teams.iter().collect();
        assert_eq!(distinct.len(), 500);
        assert!(teams
            .iter()
            .all(|&(a, b)| (1000..1100).contains(&a) && (2000..2050).contains(&b)));
    }

    #[test]
    fn test_count_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        let teams = random_teams(&mut rng, 100, 1000..1003, 2000..2002);
        assert_eq!(teams.len(), 6);
        assert!(random_teams(&mut rng, 10, 1000..1000, 2000..2002).is_empty());
    }

    #[test]
    fn test_format_parses_back() {
        let mut rng = StdRng::seed_from_u64(11);
        let teams = random_teams(&mut rng, 40, 1000..1020, 2000..2020);
        let problem = parse_input(format_teams(&teams).as_bytes(), &Params::default()).unwrap();
        assert_eq!(problem.teams, teams);
    }
}
