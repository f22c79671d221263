//! Hanging-node detection.
//!
//! In a conforming quad mesh every edge is shared by two elements unless it
//! lies on the domain boundary. A hanging node shows up as an edge `(a, b)`
//! with one incident element whose neighbour instead uses the two halves
//! `(a, v)` and `(v, b)`, with `v` on the segment between `a` and `b`.

use crate::mesh::{QuadMesh, Vertex};
use crate::mesh_error::QuadRefineError;
use crate::topology::indexer::{EdgeIndexer, TopologyIndexer};
use hashbrown::{HashMap, HashSet};

const COLLINEAR_TOL: f64 = 1e-10;

/// A vertex lying inside an edge that is not split on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HangingNode {
    pub vertex: usize,
    pub edge: [usize; 2],
}

fn lies_between(p: Vertex, a: Vertex, b: Vertex) -> bool {
    let (ux, uy) = (b[0] - a[0], b[1] - a[1]);
    let (vx, vy) = (p[0] - a[0], p[1] - a[1]);
    let len2 = ux * ux + uy * uy;
    if len2 == 0.0 {
        return false;
    }
    let cross = ux * vy - uy * vx;
    let t = (ux * vx + uy * vy) / len2;
    cross.abs() <= COLLINEAR_TOL * len2 && t > COLLINEAR_TOL && t < 1.0 - COLLINEAR_TOL
}

/// Every hanging node of `mesh`, sorted by edge then vertex.
pub fn find_hanging_nodes(mesh: &QuadMesh) -> Result<Vec<HangingNode>, QuadRefineError> {
    let topology = EdgeIndexer.index(mesh)?;

    let mut open: HashSet<(usize, usize)> = HashSet::new();
    let mut neighbours: HashMap<usize, Vec<usize>> = HashMap::new();
    for (edge, &[a, b]) in topology.edges.iter().enumerate() {
        if topology.is_boundary_edge(edge) {
            open.insert((a.min(b), a.max(b)));
            neighbours.entry(a).or_default().push(b);
            neighbours.entry(b).or_default().push(a);
        }
    }

    let mut hanging = Vec::new();
    for &(a, b) in &open {
        let Some(around_a) = neighbours.get(&a) else {
            continue;
        };
        for &v in around_a {
            if v == b || !open.contains(&(v.min(b), v.max(b))) {
                continue;
            }
            let [pa, pb, pv] = [a, b, v].map(|i| mesh.coordinates[i]);
            if lies_between(pv, pa, pb) {
                hanging.push(HangingNode {
                    vertex: v,
                    edge: [a, b],
                });
            }
        }
    }
    hanging.sort_unstable_by_key(|h| (h.edge, h.vertex));
    Ok(hanging)
}

/// Fail with [`QuadRefineError::HangingNode`] on the first hanging node.
pub fn validate_conformity(mesh: &QuadMesh) -> Result<(), QuadRefineError> {
    match find_hanging_nodes(mesh)?.first() {
        Some(h) => Err(QuadRefineError::HangingNode {
            vertex: h.vertex,
            a: h.edge[0],
            b: h.edge[1],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_neighbour_leaves_a_hanging_node() {
        // left: one unit square, right: two half-height quads sharing vertex 6
        let mesh = QuadMesh::new(
            vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [2.0, 0.0],
                [0.0, 1.0],
                [1.0, 1.0],
                [2.0, 1.0],
                [1.0, 0.5],
                [2.0, 0.5],
            ],
            vec![[0, 1, 4, 3], [1, 2, 7, 6], [6, 7, 5, 4]],
        );
        let hanging = find_hanging_nodes(&mesh).unwrap();
        assert_eq!(
            hanging,
            vec![HangingNode {
                vertex: 6,
                edge: [1, 4]
            }]
        );
        assert_eq!(
            validate_conformity(&mesh),
            Err(QuadRefineError::HangingNode { vertex: 6, a: 1, b: 4 })
        );
    }

    #[test]
    fn square_is_conforming() {
        let mesh = QuadMesh::new(
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            vec![[0, 1, 2, 3]],
        );
        assert!(validate_conformity(&mesh).is_ok());
    }
}
