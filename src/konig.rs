//! Minimum vertex cover from a maximum matching, by König's theorem.
//!
//! Starting from every unmatched vertex of one side, mark everything reachable
//! along alternating paths: the first hop leaves on an edge outside the matching,
//! the next on a matching edge, and so on. With `T` the marked set, the cover is
//! `(side_b ∩ T) ∪ (side_a \ T)`.
//!
//! Either side can serve as `side_a`, and which of the two covers contains a given
//! vertex depends on the graph, so both are computed and the caller picks.

use bitvec::prelude::*;

use crate::builder::FlowGraph;
use crate::registry::VertexIdx;

pub struct KonigDeriver<'g> {
    graph: &'g FlowGraph,
    matched: &'g BitSlice,
}

impl<'g> KonigDeriver<'g> {
    /// `matched` marks, by vertex index, every vertex of the maximum matching.
    pub fn new(graph: &'g FlowGraph, matched: &'g BitSlice) -> Self {
        debug_assert_eq!(matched.len(), graph.vertex_count());
        KonigDeriver { graph, matched }
    }

    pub fn min_vertex_cover(&self, side_a: &[VertexIdx], side_b: &[VertexIdx]) -> BitVec {
        let unmatched: Vec<VertexIdx> = side_a
            .iter()
            .copied()
            .filter(|&v| !self.matched[v as usize])
            .collect();
        let konig_set = self.alternating_reach(&unmatched);

        let mut cover = bitvec![0; self.graph.vertex_count()];
        for &v in side_b.iter().filter(|&&v| konig_set[v as usize]) {
            cover.set(v as usize, true);
        }
        for &v in side_a.iter().filter(|&&v| !konig_set[v as usize]) {
            cover.set(v as usize, true);
        }
        cover
    }

    /// Marks every vertex reachable from `starts` along alternating paths.
    /// Uses an explicit stack so deep graphs cannot overflow the call stack.
    fn alternating_reach(&self, starts: &[VertexIdx]) -> BitVec {
        let mut konig_set = bitvec![0; self.graph.vertex_count()];
        // (vertex, whether the next hop must be a matching edge)
        let mut stack: Vec<(VertexIdx, bool)> = Vec::new();

        for &start in starts {
            if konig_set[start as usize] {
                continue;
            }
            konig_set.set(start as usize, true);
            stack.push((start, false));

            while let Some((v, in_match)) = stack.pop() {
                for n in self.graph.registry.neighbours(v) {
                    let w = n.vertex;
                    if konig_set[w as usize] || self.graph.is_special(w) {
                        continue;
                    }
                    if self.graph.ledger.carries_flow(v, w) == in_match {
                        konig_set.set(w as usize, true);
                        stack.push((w, !in_match));
                    }
                }
            }
        }
        konig_set
    }

    /// Covers computed starting from the unmatched left vertices and from the
    /// unmatched right vertices, in that order.
    pub fn covers(&self) -> (BitVec, BitVec) {
        let left_first = self.min_vertex_cover(&self.graph.left, &self.graph.right);
        let right_first = self.min_vertex_cover(&self.graph.right, &self.graph.left);
        (left_first, right_first)
    }

    /// The left-first cover if it contains `preferred`, otherwise the right-first one.
    pub fn preferred_cover(&self, preferred: Option<VertexIdx>) -> BitVec {
        let (left_first, right_first) = self.covers();
        match preferred {
            Some(p) if left_first[p as usize] => left_first,
            _ => right_first,
        }
    }
}
