//! Maximum matching by repeated breadth-first augmenting-path search.
//!
//! Each search walks the residual network from the source, stopping the moment
//! the sink is discovered. The path is then followed back from the sink and
//! the flow on every edge along it is flipped, which grows the matching by one.
//! This is slower than Hopcroft-Karp in theory, but simpler and just as fast on
//! graphs of a few thousand vertices.

use bitvec::prelude::*;
use log::{debug, error, trace};
use std::collections::VecDeque;

use crate::builder::FlowGraph;
use crate::error::Inconsistency;
use crate::registry::VertexIdx;

/// How a vertex was reached during a search: through `from`, along an edge
/// whose flow record is keyed `(from -> vertex)` when `forward` is set.
#[derive(Debug, Clone, Copy)]
struct Step {
    from: VertexIdx,
    forward: bool,
}

pub struct MatchingSolver<'g> {
    graph: &'g mut FlowGraph,
    visited: BitVec,
    prev: Vec<Option<Step>>,
    queue: VecDeque<VertexIdx>,
    diagnostics: Vec<Inconsistency>,
}

impl<'g> MatchingSolver<'g> {
    pub fn new(graph: &'g mut FlowGraph) -> Self {
        let n = graph.vertex_count();
        MatchingSolver {
            graph,
            visited: bitvec![0; n],
            prev: vec![None; n],
            queue: VecDeque::with_capacity(n),
            diagnostics: Vec::new(),
        }
    }

    /// Augments until no path is left. Returns the number of augmenting paths
    /// applied together with any inconsistencies hit while flipping.
    pub fn run(mut self) -> (usize, Vec<Inconsistency>) {
        let mut augmentations = 0;
        while self.find_augmenting_path() {
            self.process_path();
            augmentations += 1;
        }
        debug!("matching converged after {augmentations} augmenting paths");
        (augmentations, self.diagnostics)
    }

    /// Breadth-first search over edges with residual capacity, recording the
    /// predecessor of every discovered vertex.
    pub fn find_augmenting_path(&mut self) -> bool {
        self.visited.fill(false);
        self.prev.fill(None);
        self.queue.clear();

        let graph = &*self.graph;
        self.queue.push_back(graph.source);
        self.visited.set(graph.source as usize, true);

        while let Some(u) = self.queue.pop_front() {
            for n in graph.registry.neighbours(u) {
                let v = n.vertex;
                if self.visited[v as usize] || graph.ledger.residual_capacity(u, v) == 0 {
                    continue;
                }
                self.prev[v as usize] = Some(Step {
                    from: u,
                    forward: n.forward,
                });
                self.visited.set(v as usize, true);
                if v == graph.sink {
                    return true;
                }
                self.queue.push_back(v);
            }
        }
        false
    }

    /// Follows the last path found from sink back to source, flipping the flow
    /// of each edge in its stored direction.
    pub fn process_path(&mut self) {
        let source = self.graph.source;
        let mut v = self.graph.sink;
        while v != source {
            let Some(step) = self.prev[v as usize] else {
                error!("path broken at {}", self.graph.registry.id(v));
                break;
            };
            let u = step.from;
            let (from, to) = if step.forward { (u, v) } else { (v, u) };
            trace!(
                "flipping flow from {} to {}",
                self.graph.registry.id(from),
                self.graph.registry.id(to)
            );
            if self.graph.ledger.flip_flow(from, to).is_none() {
                let inconsistency = Inconsistency::MissingEdge {
                    from: self.graph.registry.id(from),
                    to: self.graph.registry.id(to),
                };
                error!("{inconsistency}");
                self.diagnostics.push(inconsistency);
            }
            v = u;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::builder::GraphBuilder;

    fn matched_pairs(graph: &FlowGraph) -> Vec<(u32, u32)> {
        let mut pairs = Vec::new();
        for &u in &graph.left {
            for n in graph.registry.neighbours(u) {
                if graph.ledger.flow(u, n.vertex) > 0 {
                    pairs.push((graph.registry.id(u), graph.registry.id(n.vertex)));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    #[test]
    fn test_augments_past_greedy_choice() {
        // greedy matches 1000-2000 and strands 1001; one augmenting path reroutes 1000
        let mut graph =
            GraphBuilder::new(&[1000, 1001], &[2000, 2001], &[(1000, 2000), (1000, 2001), (1001, 2000)])
                .build();
        assert_eq!(matched_pairs(&graph), vec![(1000, 2000)]);
        let (augmentations, diagnostics) = MatchingSolver::new(&mut graph).run();
        assert_eq!(augmentations, 1);
        assert!(diagnostics.is_empty());
        assert_eq!(matched_pairs(&graph), vec![(1000, 2001), (1001, 2000)]);
    }

    #[test]
    fn test_flow_conservation() {
        let mut graph = GraphBuilder::new(
            &[1000, 1001, 1002],
            &[2000, 2001, 2002],
            &[(1000, 2000), (1001, 2000), (1002, 2000), (1002, 2001), (1001, 2002)],
        )
        .build();
        MatchingSolver::new(&mut graph).run();
        for &u in &graph.left {
            let out: u8 = graph.registry.neighbours(u).iter().map(|n| graph.ledger.flow(u, n.vertex)).sum();
            assert_eq!(graph.ledger.flow(graph.source, u), out);
        }
        for &v in &graph.right {
            let incoming: u8 = graph.left.iter().map(|&u| graph.ledger.flow(u, v)).sum();
            assert_eq!(graph.ledger.flow(v, graph.sink), incoming);
        }
        assert_eq!(matched_pairs(&graph).len(), 3);
    }

    #[test]
    fn test_no_path_on_empty_graph() {
        let mut graph = GraphBuilder::new(&[], &[], &[]).build();
        let mut solver = MatchingSolver::new(&mut graph);
        assert!(!solver.find_augmenting_path());
    }

    #[test]
    fn test_left_ids_above_right_ids() {
        // pools swapped numerically, so index order no longer tracks edge direction
        let left = [2500, 2600];
        let right = [1200, 1300];
        let mut graph = GraphBuilder::new(&left, &right, &[(2500, 1200), (2500, 1300), (2600, 1200)]).build();
        let (_, diagnostics) = MatchingSolver::new(&mut graph).run();
        assert!(diagnostics.is_empty());
        assert_eq!(matched_pairs(&graph), vec![(2500, 1300), (2600, 1200)]);
    }
}
