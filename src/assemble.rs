//! Reads the converged flow back out as a matching and an invitee set.

use bitvec::prelude::*;
use log::{debug, error};

use crate::builder::FlowGraph;
use crate::error::Inconsistency;
use crate::konig::KonigDeriver;
use crate::registry::VertexIdx;
use crate::Cover;

/// Matched vertices (by index) and the matched edges as left, right pairs.
#[derive(Debug, Clone)]
pub struct Matchset {
    pub matched: BitVec,
    pub edges: Vec<(VertexIdx, VertexIdx)>,
}

impl Matchset {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Result of one solve.
#[derive(Debug, Clone, Default)]
pub struct Solution {
    pub cover: Cover,
    pub matched_edges: Vec<(u32, u32)>,
    pub diagnostics: Vec<Inconsistency>,
}

impl Solution {
    pub fn matching_size(&self) -> usize {
        self.matched_edges.len()
    }

    pub fn is_consistent(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub fn compute_matchset(graph: &FlowGraph) -> Matchset {
    let mut matched = bitvec![0; graph.vertex_count()];
    let mut edges = Vec::new();
    for &u in &graph.left {
        for n in graph.registry.neighbours(u) {
            let v = n.vertex;
            if !graph.is_special(v) && graph.ledger.flow(u, v) > 0 {
                matched.set(u as usize, true);
                matched.set(v as usize, true);
                edges.push((u, v));
            }
        }
    }
    Matchset { matched, edges }
}

/// Picks the König cover containing `friend_id` when there is one.
pub fn compute_invitees(graph: &FlowGraph, matchset: &Matchset, friend_id: u32) -> Cover {
    let deriver = KonigDeriver::new(graph, &matchset.matched);
    let cover = deriver.preferred_cover(graph.registry.index_of(friend_id));
    let mut vertices: Vec<u32> = cover
        .iter_ones()
        .map(|idx| graph.registry.id(idx as VertexIdx))
        .collect();
    vertices.sort_unstable();
    Cover::new(vertices)
}

/// Derives the invitees from a converged graph and checks the cover against the
/// matching: by König's theorem their sizes must agree.
pub fn assemble(graph: &FlowGraph, friend_id: u32, mut diagnostics: Vec<Inconsistency>) -> Solution {
    let matchset = compute_matchset(graph);
    let cover = compute_invitees(graph, &matchset, friend_id);
    debug!("matching of size {}, cover of size {}", matchset.len(), cover.len());

    if cover.len() != matchset.len() {
        let inconsistency = Inconsistency::CoverSizeMismatch {
            matched: matchset.len(),
            cover: cover.len(),
        };
        error!("{inconsistency}");
        diagnostics.push(inconsistency);
    }

    let matched_edges = matchset
        .edges
        .iter()
        .map(|&(u, v)| (graph.registry.id(u), graph.registry.id(v)))
        .collect();
    Solution {
        cover,
        matched_edges,
        diagnostics,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::matching::MatchingSolver;

    #[test]
    fn test_matchset_skips_source_and_sink() {
        let graph = GraphBuilder::new(&[1000, 1001], &[2000], &[(1000, 2000), (1001, 2000)]).build();
        let matchset = compute_matchset(&graph);
        assert_eq!(matchset.len(), 1);
        assert_eq!(matchset.matched.count_ones(), 2);
        assert!(!matchset.matched[graph.source as usize]);
        assert!(!matchset.matched[graph.sink as usize]);
    }

    #[test]
    fn test_friend_on_right() {
        let graph = GraphBuilder::new(&[1000], &[2000], &[(1000, 2000)]).build();
        let solution = assemble(&graph, 2000, Vec::new());
        assert_eq!(solution.cover.vertices(), &[2000]);
        assert!(solution.is_consistent());
    }

    #[test]
    fn test_friend_on_left() {
        let graph = GraphBuilder::new(&[1000], &[2000], &[(1000, 2000)]).build();
        let solution = assemble(&graph, 1000, Vec::new());
        assert_eq!(solution.cover.vertices(), &[1000]);
    }

    #[test]
    fn test_mismatch_reported() {
        // a maximal but not maximum matching breaks the König equality
        let graph =
            GraphBuilder::new(&[1000, 1001], &[2000, 2001], &[(1000, 2000), (1000, 2001), (1001, 2000)])
                .build();
        let solution = assemble(&graph, 1009, Vec::new());
        assert_eq!(solution.matching_size(), 1);
        assert!(matches!(
            solution.diagnostics.as_slice(),
            [Inconsistency::CoverSizeMismatch { matched: 1, .. }]
        ));

        let mut graph = graph;
        MatchingSolver::new(&mut graph).run();
        let solution = assemble(&graph, 1009, Vec::new());
        assert_eq!(solution.matching_size(), 2);
        assert!(solution.is_consistent());
    }
}
