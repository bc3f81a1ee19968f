//! Reads a team list and splits the people in it into the two pools.
//!
//! The format is a team count followed by that many pairs of ids, all
//! whitespace separated.

use std::collections::BTreeSet;
use std::io::{BufRead, Read};

use crate::error::ParseError;
use crate::params::{Params, Side};
use crate::{solve, Solution};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Problem {
    /// Distinct left-pool ids, ascending.
    pub left: Vec<u32>,
    /// Distinct right-pool ids, ascending.
    pub right: Vec<u32>,
    pub teams: Vec<(u32, u32)>,
}

impl Problem {
    /// Partitions the members of `teams` into pools according to `params`.
    pub fn from_teams(teams: Vec<(u32, u32)>, params: &Params) -> Result<Problem, ParseError> {
        if teams.len() > params.max_teams {
            return Err(ParseError::TooManyTeams {
                count: teams.len(),
                max: params.max_teams,
            });
        }
        let mut left = BTreeSet::new();
        let mut right = BTreeSet::new();
        for &(a, b) in &teams {
            let side_a = params.side_of(a).ok_or(ParseError::IdOutOfRange { id: a })?;
            let side_b = params.side_of(b).ok_or(ParseError::IdOutOfRange { id: b })?;
            if side_a == side_b {
                return Err(ParseError::SamePool(a, b));
            }
            for (id, side) in [(a, side_a), (b, side_b)] {
                match side {
                    Side::Left => left.insert(id),
                    _ => right.insert(id),
                };
            }
        }
        Ok(Problem {
            left: left.into_iter().collect(),
            right: right.into_iter().collect(),
            teams,
        })
    }

    pub fn solve(&self, params: &Params) -> Solution {
        solve(&self.left, &self.right, &self.teams, params.friend_id)
    }
}

pub fn parse_input(mut reader: impl BufRead, params: &Params) -> Result<Problem, ParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut tokens = text.split_whitespace();

    let count = tokens.next().ok_or(ParseError::Empty)?;
    let expected: usize = count.parse().map_err(|_| ParseError::InvalidNumber {
        token: count.to_string(),
    })?;
    if expected > params.max_teams {
        return Err(ParseError::TooManyTeams {
            count: expected,
            max: params.max_teams,
        });
    }

    let ids = tokens
        .map(|token| {
            token.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<u32>, _>>()?;
    if ids.len() % 2 == 1 {
        return Err(ParseError::IncompleteTeam { index: ids.len() / 2 });
    }
    let teams: Vec<(u32, u32)> = ids.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
    if teams.len() != expected {
        return Err(ParseError::TeamCountMismatch {
            expected,
            found: teams.len(),
        });
    }

    Problem::from_teams(teams, params)
}
