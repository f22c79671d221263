//! Edge extraction and element/boundary-to-edge incidence.
//!
//! # Expected invariants
//! - Elements are counter-clockwise quads; local edge `k` of an element is
//!   `(v_k, v_{(k+1) % 4})`.
//! - Every edge is shared by at most two elements, which traverse it in
//!   opposite directions (consistent winding).
//! - Every boundary segment coincides with an existing edge.
//!
//! [`EdgeIndexer`] numbers edges in order of first appearance (element order,
//! then local edge order), so the same input always yields the same numbering.

use crate::mesh::QuadMesh;
use crate::mesh_error::QuadRefineError;
use hashbrown::HashMap;

/// Edge incidence derived from raw element connectivity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshTopology {
    /// Edge endpoints, in the direction of first use.
    pub edges: Vec<[usize; 2]>,
    /// The four edge indices of every element, in local edge order.
    pub element_edges: Vec<[usize; 4]>,
    /// Elements incident to each edge (second slot empty on the boundary).
    pub edge_elements: Vec<(usize, Option<usize>)>,
    /// Edge index of every segment, per boundary list.
    pub boundary_edges: Vec<Vec<usize>>,
}

impl MeshTopology {
    /// Number of unique edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Whether edge `edge` has only one incident element.
    pub fn is_boundary_edge(&self, edge: usize) -> bool {
        self.edge_elements[edge].1.is_none()
    }
}

/// Derives [`MeshTopology`] from a [`QuadMesh`].
///
/// Implementations report malformed input as
/// [`QuadRefineError::InvalidTopology`]; the refinement core trusts their
/// output.
pub trait TopologyIndexer {
    /// Index the edges of `mesh`.
    fn index(&self, mesh: &QuadMesh) -> Result<MeshTopology, QuadRefineError>;
}

/// Default hash-based [`TopologyIndexer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeIndexer;

fn invalid(message: impl Into<String>) -> QuadRefineError {
    QuadRefineError::InvalidTopology(message.into())
}

#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

impl TopologyIndexer for EdgeIndexer {
    fn index(&self, mesh: &QuadMesh) -> Result<MeshTopology, QuadRefineError> {
        let nv = mesh.num_vertices();
        let mut lookup: HashMap<(usize, usize), usize> =
            HashMap::with_capacity(2 * mesh.num_elements() + 4);
        let mut edges: Vec<[usize; 2]> = Vec::with_capacity(2 * mesh.num_elements() + 4);
        let mut edge_elements: Vec<(usize, Option<usize>)> = Vec::with_capacity(edges.capacity());
        let mut element_edges = Vec::with_capacity(mesh.num_elements());

        for (e, element) in mesh.elements.iter().enumerate() {
            for (k, &v) in element.iter().enumerate() {
                if v >= nv {
                    return Err(invalid(format!(
                        "element {e} references missing vertex {v} ({nv} vertices)"
                    )));
                }
                if element[..k].contains(&v) {
                    return Err(invalid(format!("element {e} repeats vertex {v}")));
                }
            }

            let mut local = [0usize; 4];
            for k in 0..4 {
                let (a, b) = (element[k], element[(k + 1) % 4]);
                let next = edges.len();
                let edge = *lookup.entry(edge_key(a, b)).or_insert(next);
                if edge == next {
                    edges.push([a, b]);
                    edge_elements.push((e, None));
                } else {
                    let (first, second) = edge_elements[edge];
                    if second.is_some() {
                        return Err(invalid(format!(
                            "edge ({a}, {b}) is shared by more than two elements ({first}, {}, {e})",
                            second.unwrap_or_default()
                        )));
                    }
                    if edges[edge] == [a, b] {
                        return Err(invalid(format!(
                            "elements {first} and {e} traverse edge ({a}, {b}) in the same direction"
                        )));
                    }
                    edge_elements[edge].1 = Some(e);
                }
                local[k] = edge;
            }
            element_edges.push(local);
        }

        let mut boundary_edges = Vec::with_capacity(mesh.boundaries.len());
        for (class, segments) in mesh.boundaries.iter().enumerate() {
            let mut list = Vec::with_capacity(segments.len());
            for &[a, b] in segments {
                let edge = lookup.get(&edge_key(a, b)).copied().ok_or_else(|| {
                    invalid(format!(
                        "boundary segment ({a}, {b}) of class {class} is not a mesh edge"
                    ))
                })?;
                if edge_elements[edge].1.is_some() {
                    log::warn!("boundary segment ({a}, {b}) of class {class} lies on an interior edge");
                }
                list.push(edge);
            }
            boundary_edges.push(list);
        }

        Ok(MeshTopology {
            edges,
            element_edges,
            edge_elements,
            boundary_edges,
        })
    }
}
