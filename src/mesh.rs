//! Quadrilateral mesh container.
//!
//! # Layout
//! - `coordinates[v]` is the position of vertex `v`.
//! - `elements[e]` lists the four corners of element `e` counter-clockwise.
//!   Local edge `k` runs from corner `k` to corner `(k + 1) % 4`.
//! - `boundaries[c]` is the segment list of boundary condition class `c`
//!   (e.g. `0` = Dirichlet, `1` = Neumann). Each segment coincides with one
//!   mesh edge.
//!
//! The element list is split into standalone elements followed by
//! triple-groups; the split point is owned by
//! [`RefineSession`](crate::refine::session::RefineSession), not by the mesh.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::QuadRefineError;
use serde::{Deserialize, Serialize};

/// 2D vertex coordinate.
pub type Vertex = [f64; 2];
/// Quadrilateral element as four counter-clockwise vertex indices.
pub type Element = [usize; 4];
/// Boundary segment as an ordered vertex pair.
pub type Segment = [usize; 2];

/// A 2D quadrilateral mesh with tagged boundary segment lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuadMesh {
    /// Vertex coordinates.
    pub coordinates: Vec<Vertex>,
    /// Element connectivity.
    pub elements: Vec<Element>,
    /// One segment list per boundary condition class.
    pub boundaries: Vec<Vec<Segment>>,
}

impl QuadMesh {
    /// Create a mesh without boundary lists.
    pub fn new(coordinates: Vec<Vertex>, elements: Vec<Element>) -> Self {
        Self {
            coordinates,
            elements,
            boundaries: Vec::new(),
        }
    }

    /// Attach one more boundary condition list; its class is its position.
    pub fn with_boundary(mut self, segments: Vec<Segment>) -> Self {
        self.boundaries.push(segments);
        self
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.coordinates.len()
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Corner coordinates of element `e`.
    ///
    /// Panics if `e` or one of its vertex indices is out of range.
    pub fn element_corners(&self, e: usize) -> [Vertex; 4] {
        self.elements[e].map(|v| self.coordinates[v])
    }

    /// Signed area of element `e` (positive for counter-clockwise corners).
    pub fn signed_area(&self, e: usize) -> f64 {
        crate::geometry::quality::quad_signed_area(&self.element_corners(e))
    }

    /// Sum of signed element areas.
    pub fn total_area(&self) -> f64 {
        (0..self.elements.len()).map(|e| self.signed_area(e)).sum()
    }
}

impl DebugInvariants for QuadMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "QuadMesh invalid");
    }

    fn validate_invariants(&self) -> Result<(), QuadRefineError> {
        let nv = self.coordinates.len();
        if let Some(v) = self.coordinates.iter().position(|c| !c.iter().all(|x| x.is_finite())) {
            return Err(QuadRefineError::InvalidGeometry(format!(
                "vertex {v} has non-finite coordinates {:?}",
                self.coordinates[v]
            )));
        }
        for (e, element) in self.elements.iter().enumerate() {
            for (k, &v) in element.iter().enumerate() {
                if v >= nv {
                    return Err(QuadRefineError::InvalidTopology(format!(
                        "element {e} references missing vertex {v} ({nv} vertices)"
                    )));
                }
                if element[..k].contains(&v) {
                    return Err(QuadRefineError::InvalidTopology(format!(
                        "element {e} repeats vertex {v}"
                    )));
                }
            }
        }
        for (class, segments) in self.boundaries.iter().enumerate() {
            if let Some([a, b]) = segments.iter().find(|s| s[0] >= nv || s[1] >= nv) {
                return Err(QuadRefineError::InvalidTopology(format!(
                    "boundary segment ({a}, {b}) of class {class} references a missing vertex"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_and_invariants_of_a_square() {
        let mesh = QuadMesh::new(
            vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]],
            vec![[0, 1, 2, 3]],
        )
        .with_boundary(vec![[0, 1]]);
        assert_eq!(mesh.total_area(), 4.0);
        assert!(mesh.validate_invariants().is_ok());
    }

    #[test]
    fn dangling_vertex_index_is_reported() {
        let mut mesh = QuadMesh::new(vec![[0.0, 0.0]; 4], vec![[0, 1, 2, 3]]);
        mesh.boundaries.push(vec![[3, 4]]);
        assert!(matches!(
            mesh.validate_invariants(),
            Err(QuadRefineError::InvalidTopology(_))
        ));
    }
}
