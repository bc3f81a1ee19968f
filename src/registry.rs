//! Arena of vertices, deduplicated by external id.

use smallvec::SmallVec;
use std::collections::HashMap;

use crate::params::Side;

/// Dense index of a vertex in its registry.
pub type VertexIdx = u32;

/// One adjacency entry. `forward` is set when the flow record for this edge is
/// keyed `(owner -> vertex)`, and cleared when it is keyed `(vertex -> owner)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbour {
    pub vertex: VertexIdx,
    pub forward: bool,
}

#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: u32,
    pub side: Side,
    neighbours: SmallVec<[Neighbour; 4]>,
}

impl Vertex {
    pub fn neighbours(&self) -> &[Neighbour] {
        &self.neighbours
    }

    fn links_to(&self, vertex: VertexIdx) -> bool {
        self.neighbours.iter().any(|n| n.vertex == vertex)
    }
}

#[derive(Debug, Clone, Default)]
pub struct VertexRegistry {
    vertices: Vec<Vertex>,
    indices: HashMap<u32, VertexIdx>,
}

impl VertexRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        VertexRegistry {
            vertices: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the canonical index for `id`, creating the vertex on first use.
    /// The side is fixed by whoever references the id first.
    pub fn vertex_for(&mut self, id: u32, side: Side) -> VertexIdx {
        if let Some(&idx) = self.indices.get(&id) {
            debug_assert_eq!(self.vertices[idx as usize].side, side, "id {id} on both sides");
            return idx;
        }
        let idx = self.vertices.len() as VertexIdx;
        self.vertices.push(Vertex {
            id,
            side,
            neighbours: SmallVec::new(),
        });
        self.indices.insert(id, idx);
        idx
    }

    pub fn index_of(&self, id: u32) -> Option<VertexIdx> {
        self.indices.get(&id).copied()
    }

    pub fn vertex(&self, idx: VertexIdx) -> &Vertex {
        &self.vertices[idx as usize]
    }

    pub fn id(&self, idx: VertexIdx) -> u32 {
        self.vertices[idx as usize].id
    }

    pub fn side(&self, idx: VertexIdx) -> Side {
        self.vertices[idx as usize].side
    }

    pub fn neighbours(&self, idx: VertexIdx) -> &[Neighbour] {
        self.vertices[idx as usize].neighbours()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Records `v` as a neighbour of `u` only. Used for the source and sink arcs.
    /// Returns false if the arc was already present.
    pub fn add_arc(&mut self, u: VertexIdx, v: VertexIdx) -> bool {
        if self.vertices[u as usize].links_to(v) {
            return false;
        }
        self.vertices[u as usize].neighbours.push(Neighbour {
            vertex: v,
            forward: true,
        });
        true
    }

    /// Records `u` and `v` as mutual neighbours, with the flow record keyed
    /// `(u -> v)`. Returns false if the edge was already present.
    pub fn add_edge(&mut self, u: VertexIdx, v: VertexIdx) -> bool {
        if self.vertices[u as usize].links_to(v) {
            return false;
        }
        self.vertices[u as usize].neighbours.push(Neighbour {
            vertex: v,
            forward: true,
        });
        self.vertices[v as usize].neighbours.push(Neighbour {
            vertex: u,
            forward: false,
        });
        true
    }
}
