//! Minimum vertex cover of a bipartite team graph.
//!
//! Every team pairs one person from the left pool with one from the right
//! pool. Finding the fewest people to exclude so that every team loses a
//! member is a minimum vertex cover problem, and on a bipartite graph König's
//! theorem turns it into a maximum matching problem. Where two covers of the
//! same size exist, the one containing a distinguished person is preferred.

use std::{
    fmt::Write,
    io::{BufRead, Read},
};

pub mod assemble;
pub mod builder;
pub mod error;
pub mod generate;
pub mod input;
pub mod konig;
pub mod ledger;
pub mod matching;
pub mod params;
pub mod registry;

pub use assemble::Solution;
pub use builder::{FlowGraph, GraphBuilder};
pub use error::{Inconsistency, ParseError};
pub use input::{parse_input, Problem};
pub use konig::KonigDeriver;
pub use matching::MatchingSolver;
pub use params::Params;

/// Computes a minimum vertex cover of the teams, preferring one that contains
/// `friend`. Every id in `teams` must appear in exactly one of `left` and `right`,
/// and every team must have one member on each side.
pub fn solve(left: &[u32], right: &[u32], teams: &[(u32, u32)], friend: u32) -> Solution {
    let mut graph = GraphBuilder::new(left, right, teams).build();
    let (_, diagnostics) = MatchingSolver::new(&mut graph).run();
    assemble::assemble(&graph, friend, diagnostics)
}

/// Ids of the people in a cover, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    vertices: Vec<u32>,
}

impl Cover {
    pub fn new(mut vertices: Vec<u32>) -> Cover {
        vertices.sort_unstable();
        vertices.dedup();
        Cover { vertices }
    }

    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.vertices.binary_search(&id).is_ok()
    }

    /// The cover size, then one id per line.
    pub fn format(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(&mut output, "{}", self.vertices.len());
        for vertex in &self.vertices {
            let _ = writeln!(&mut output, "{}", vertex);
        }
        output
    }

    /// The first team with neither member in the cover, if any.
    pub fn uncovered<'t>(&self, teams: &'t [(u32, u32)]) -> Option<&'t (u32, u32)> {
        teams
            .iter()
            .find(|(start, end)| !(self.contains(*start) || self.contains(*end)))
    }

    pub fn validate(&self, teams: &[(u32, u32)]) -> bool {
        self.uncovered(teams).is_none()
    }
}

/// Reads a cover back from the output of [`Cover::format`].
pub fn parse_cover(mut reader: impl BufRead) -> Result<Cover, ParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut tokens = text.split_whitespace().map(|token| {
        token.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
            token: token.to_string(),
        })
    });
    let expected = tokens.next().ok_or(ParseError::Empty)?? as usize;
    let vertices = tokens.collect::<Result<Vec<u32>, _>>()?;
    if vertices.len() != expected {
        return Err(ParseError::TeamCountMismatch {
            expected,
            found: vertices.len(),
        });
    }
    Ok(Cover::new(vertices))
}
