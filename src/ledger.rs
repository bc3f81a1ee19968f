//! Sparse store of directed unit-capacity edges and their flow.

use std::collections::HashMap;

use crate::registry::VertexIdx;

// flow and capacity reported for pairs with no edge
const EMPTY_FLOW: u8 = 0;
const EMPTY_CAPACITY: u8 = 0;

/// Flow on a single directed edge. Capacity is the same for every edge today,
/// but lives here so variable-capacity edges only touch this type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edge {
    flow: u8,
}

impl Edge {
    pub const CAPACITY: u8 = 1;

    pub fn flow(&self) -> u8 {
        self.flow
    }

    pub fn capacity(&self) -> u8 {
        Self::CAPACITY
    }

    fn flip(&mut self) {
        self.flow = if self.flow == 1 { 0 } else { 1 };
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlowLedger {
    edges: HashMap<(VertexIdx, VertexIdx), Edge>,
}

impl FlowLedger {
    pub fn with_capacity(capacity: usize) -> Self {
        FlowLedger {
            edges: HashMap::with_capacity(capacity),
        }
    }

    /// Sets the flow of `u -> v`, registering the edge if it is new.
    pub fn set_flow(&mut self, u: VertexIdx, v: VertexIdx, flow: u8) {
        debug_assert!(flow <= Edge::CAPACITY);
        self.edges.entry((u, v)).or_default().flow = flow;
    }

    /// Toggles the flow of an existing edge and returns the new value.
    /// Returns `None` if `u -> v` was never registered.
    pub fn flip_flow(&mut self, u: VertexIdx, v: VertexIdx) -> Option<u8> {
        let edge = self.edges.get_mut(&(u, v))?;
        edge.flip();
        Some(edge.flow)
    }

    pub fn flow(&self, u: VertexIdx, v: VertexIdx) -> u8 {
        self.edges.get(&(u, v)).map_or(EMPTY_FLOW, Edge::flow)
    }

    pub fn capacity(&self, u: VertexIdx, v: VertexIdx) -> u8 {
        self.edges.get(&(u, v)).map_or(EMPTY_CAPACITY, Edge::capacity)
    }

    pub fn contains(&self, u: VertexIdx, v: VertexIdx) -> bool {
        self.edges.contains_key(&(u, v))
    }

    /// Spare forward capacity of `u -> v` if there is any, otherwise the flow on
    /// `v -> u` that could be undone.
    pub fn residual_capacity(&self, u: VertexIdx, v: VertexIdx) -> u8 {
        if let Some(edge) = self.edges.get(&(u, v)) {
            let spare = edge.capacity() - edge.flow();
            if spare > 0 {
                return spare;
            }
        }
        self.flow(v, u)
    }

    /// Whether the edge between `u` and `v`, in either direction, carries flow.
    pub fn carries_flow(&self, u: VertexIdx, v: VertexIdx) -> bool {
        self.flow(u, v) > 0 || self.flow(v, u) > 0
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_unknown_pairs_report_no_edge() {
        let ledger = FlowLedger::default();
        assert_eq!(ledger.flow(0, 1), 0);
        assert_eq!(ledger.capacity(0, 1), 0);
        assert_eq!(ledger.residual_capacity(0, 1), 0);
    }

    #[test]
    fn test_set_and_flip() {
        let mut ledger = FlowLedger::default();
        ledger.set_flow(0, 1, 0);
        assert_eq!(ledger.capacity(0, 1), 1);
        assert_eq!(ledger.capacity(1, 0), 0);
        assert_eq!(ledger.flip_flow(0, 1), Some(1));
        assert_eq!(ledger.flow(0, 1), 1);
        assert_eq!(ledger.flip_flow(0, 1), Some(0));
        assert_eq!(ledger.flow(0, 1), 0);
    }

    #[test]
    fn test_flip_missing_edge() {
        let mut ledger = FlowLedger::default();
        ledger.set_flow(0, 1, 1);
        assert_eq!(ledger.flip_flow(1, 0), None);
        assert_eq!(ledger.flow(0, 1), 1);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_residual_capacity() {
        let mut ledger = FlowLedger::default();
        ledger.set_flow(0, 1, 0);
        assert_eq!(ledger.residual_capacity(0, 1), 1);
        assert_eq!(ledger.residual_capacity(1, 0), 0);

        ledger.set_flow(0, 1, 1);
        assert_eq!(ledger.residual_capacity(0, 1), 0);
        assert_eq!(ledger.residual_capacity(1, 0), 1);
        assert!(ledger.carries_flow(1, 0));
    }
}
