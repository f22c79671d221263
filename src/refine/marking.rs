//! Per-edge bisection marks.
//!
//! Marks only grow during one refinement call; the closure loop relies on this
//! to terminate.

use crate::mesh_error::QuadRefineError;
use crate::refine::group::TripleGroup;
use crate::refine::tables::BLUE_MACRO_OUTER;
use crate::topology::indexer::MeshTopology;

/// One "will be bisected" flag per edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkingState {
    marks: Vec<bool>,
    count: usize,
}

impl MarkingState {
    /// All edges unmarked.
    pub fn new(num_edges: usize) -> Self {
        Self {
            marks: vec![false; num_edges],
            count: 0,
        }
    }

    /// Seed marks from caller-selected element indices.
    ///
    /// Standalone elements (`index < num_standalone`) get all four edges
    /// marked; a triple-group member selects its group, which gets its four
    /// macro-outer edges marked.
    ///
    /// # Errors
    /// [`QuadRefineError::InvalidMarking`] if an index is past the element list.
    pub fn seed(
        topology: &MeshTopology,
        groups: &[TripleGroup],
        num_standalone: usize,
        marked_elements: &[usize],
    ) -> Result<Self, QuadRefineError> {
        let len = topology.element_edges.len();
        let mut state = Self::new(topology.num_edges());
        for &index in marked_elements {
            if index >= len {
                return Err(QuadRefineError::InvalidMarking { index, len });
            }
            if index < num_standalone {
                for &edge in &topology.element_edges[index] {
                    state.mark(edge);
                }
            } else {
                let group = &groups[(index - num_standalone) / 3];
                let edges = group.boundary_edges(&topology.element_edges);
                state.apply(&edges, BLUE_MACRO_OUTER);
            }
        }
        Ok(state)
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether there are no edges at all.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of marked edges.
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_marked(&self, edge: usize) -> bool {
        self.marks[edge]
    }

    /// Mark `edge`; returns `true` if it was not marked before.
    #[inline]
    pub fn mark(&mut self, edge: usize) -> bool {
        let fresh = !self.marks[edge];
        if fresh {
            self.marks[edge] = true;
            self.count += 1;
        }
        fresh
    }

    /// Bit pattern of `edges` (bit `k` set if `edges[k]` is marked).
    #[inline]
    pub fn pattern(&self, edges: &[usize]) -> u8 {
        edges
            .iter()
            .enumerate()
            .fold(0u8, |p, (k, &e)| if self.marks[e] { p | (1 << k) } else { p })
    }

    /// Mark every `edges[k]` whose bit is set in `bits`; returns `true` if
    /// anything changed.
    pub fn apply(&mut self, edges: &[usize], bits: u8) -> bool {
        let mut changed = false;
        for (k, &e) in edges.iter().enumerate() {
            if bits & (1 << k) != 0 {
                changed |= self.mark(e);
            }
        }
        changed
    }

    /// Marked edge indices in increasing order.
    pub fn marked_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.marks
            .iter()
            .enumerate()
            .filter_map(|(e, &m)| m.then_some(e))
    }
}
