//! Wires the flow network for a set of teams and seeds a greedy matching.

use bitvec::prelude::*;
use log::debug;

use crate::ledger::FlowLedger;
use crate::params::{Side, SINK_ID, SOURCE_ID};
use crate::registry::{VertexIdx, VertexRegistry};

/// The flow network for one solve. Left vertices hang off the source, right
/// vertices feed the sink, and every team is an edge from its left member to
/// its right member.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    pub registry: VertexRegistry,
    pub ledger: FlowLedger,
    pub source: VertexIdx,
    pub sink: VertexIdx,
    pub left: Vec<VertexIdx>,
    pub right: Vec<VertexIdx>,
}

impl FlowGraph {
    pub fn vertex_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_special(&self, idx: VertexIdx) -> bool {
        self.registry.side(idx).is_special()
    }
}

pub struct GraphBuilder<'a> {
    left_ids: &'a [u32],
    right_ids: &'a [u32],
    teams: &'a [(u32, u32)],
}

impl<'a> GraphBuilder<'a> {
    pub fn new(left_ids: &'a [u32], right_ids: &'a [u32], teams: &'a [(u32, u32)]) -> Self {
        GraphBuilder {
            left_ids,
            right_ids,
            teams,
        }
    }

    /// Builds the network and seeds it with a greedy matching.
    pub fn build(&self) -> FlowGraph {
        let mut graph = self.wire();
        let seeded = seed_greedy_matching(&mut graph);
        debug!(
            "built graph with {} left, {} right, {} edges; greedy matching of size {}",
            graph.left.len(),
            graph.right.len(),
            graph.ledger.len(),
            seeded
        );
        graph
    }

    /// Builds the network with zero flow everywhere.
    pub fn wire(&self) -> FlowGraph {
        let vertex_count = self.left_ids.len() + self.right_ids.len() + 2;
        let mut registry = VertexRegistry::with_capacity(vertex_count);
        let mut ledger = FlowLedger::with_capacity(vertex_count + self.teams.len());

        let source = registry.vertex_for(SOURCE_ID, Side::Source);
        let sink = registry.vertex_for(SINK_ID, Side::Sink);

        // source -> every left vertex
        let mut left = Vec::with_capacity(self.left_ids.len());
        for &id in self.left_ids {
            let u = registry.vertex_for(id, Side::Left);
            if registry.add_arc(source, u) {
                ledger.set_flow(source, u, 0);
                left.push(u);
            }
        }

        // every right vertex -> sink
        let mut right = Vec::with_capacity(self.right_ids.len());
        for &id in self.right_ids {
            let v = registry.vertex_for(id, Side::Right);
            if registry.add_arc(v, sink) {
                ledger.set_flow(v, sink, 0);
                right.push(v);
            }
        }

        for &(a, b) in self.teams {
            let (u, v) = match (registry.index_of(a), registry.index_of(b)) {
                (Some(a), Some(b)) if registry.side(a) == Side::Right => (b, a),
                (Some(a), Some(b)) => (a, b),
                _ => {
                    debug_assert!(false, "team ({a}, {b}) references an undeclared id");
                    continue;
                }
            };
            debug_assert!(
                registry.side(u) == Side::Left && registry.side(v) == Side::Right,
                "team ({a}, {b}) is not bipartite"
            );
            if registry.add_edge(u, v) {
                ledger.set_flow(u, v, 0);
            }
        }

        FlowGraph {
            registry,
            ledger,
            source,
            sink,
            left,
            right,
        }
    }
}

/// Matches each left vertex, in input order, to its first free neighbour.
/// Returns the number of pairs matched.
pub fn seed_greedy_matching(graph: &mut FlowGraph) -> usize {
    let mut visited = bitvec![0; graph.vertex_count()];
    let mut seeded = 0;
    for &u in &graph.left {
        let free = graph.registry.neighbours(u).iter().find(|n| {
            n.forward
                && !graph.is_special(n.vertex)
                && !visited[n.vertex as usize]
                && graph.ledger.flow(u, n.vertex) == 0
        });
        if let Some(n) = free {
            let v = n.vertex;
            graph.ledger.set_flow(graph.source, u, 1);
            graph.ledger.set_flow(u, v, 1);
            graph.ledger.set_flow(v, graph.sink, 1);
            visited.set(u as usize, true);
            visited.set(v as usize, true);
            seeded += 1;
        }
    }
    seeded
}

#[cfg(test)]
mod test {
    use super::*;

    fn flow_by_id(graph: &FlowGraph, a: u32, b: u32) -> u8 {
        let a = graph.registry.index_of(a).unwrap();
        let b = graph.registry.index_of(b).unwrap();
        graph.ledger.flow(a, b)
    }

    #[test]
    fn test_wire_edges() {
        let graph = GraphBuilder::new(&[1000, 1001], &[2000], &[(1000, 2000), (1001, 2000)]).wire();
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.left.len(), 2);
        assert_eq!(graph.right.len(), 1);
        // 2 source arcs, 1 sink arc, 2 teams
        assert_eq!(graph.ledger.len(), 5);
        for id in [1000, 1001] {
            let u = graph.registry.index_of(id).unwrap();
            assert_eq!(graph.ledger.capacity(graph.source, u), 1);
        }
        let v = graph.registry.index_of(2000).unwrap();
        assert_eq!(graph.ledger.capacity(v, graph.sink), 1);
        assert_eq!(graph.registry.neighbours(v).len(), 3);
    }

    #[test]
    fn test_reversed_team_oriented_left_to_right() {
        let graph = GraphBuilder::new(&[1000], &[2000], &[(2000, 1000)]).wire();
        let u = graph.registry.index_of(1000).unwrap();
        let v = graph.registry.index_of(2000).unwrap();
        assert!(graph.ledger.contains(u, v));
        assert!(!graph.ledger.contains(v, u));
    }

    #[test]
    fn test_duplicate_team_single_edge() {
        let graph = GraphBuilder::new(&[1000], &[2000], &[(1000, 2000), (1000, 2000)]).wire();
        let u = graph.registry.index_of(1000).unwrap();
        assert_eq!(graph.registry.neighbours(u).len(), 1);
        assert_eq!(graph.ledger.len(), 3);
    }

    #[test]
    fn test_greedy_seed() {
        let graph = GraphBuilder::new(
            &[1000, 1001, 1002],
            &[2000, 2001],
            &[(1000, 2000), (1001, 2000), (1001, 2001), (1002, 2001)],
        )
        .build();
        // 1000 takes 2000, 1001 falls through to 2001, 1002 is left unmatched
        assert_eq!(flow_by_id(&graph, 1000, 2000), 1);
        assert_eq!(flow_by_id(&graph, 1001, 2000), 0);
        assert_eq!(flow_by_id(&graph, 1001, 2001), 1);
        assert_eq!(flow_by_id(&graph, 1002, 2001), 0);
        assert_eq!(flow_by_id(&graph, SOURCE_ID, 1000), 1);
        assert_eq!(flow_by_id(&graph, SOURCE_ID, 1002), 0);
        assert_eq!(flow_by_id(&graph, 2001, SINK_ID), 1);
    }

    #[test]
    fn test_empty() {
        let graph = GraphBuilder::new(&[], &[], &[]).build();
        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.ledger.is_empty());
    }
}
