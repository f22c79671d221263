//! New vertex synthesis: edge midpoints, element centres and group interior
//! points.
//!
//! New vertices are appended in three runs: midpoints in increasing edge
//! index, then centres in standalone element order, then interior points in
//! group order (`South`, `SouthEast`, `East` within a group).

use crate::geometry::{centroid, midpoint, weighted_point};
use crate::mesh::{Element, Vertex};
use crate::refine::closure::Classification;
use crate::refine::group::TripleGroup;
use crate::refine::marking::MarkingState;
use crate::refine::tables::InteriorPoint;
use crate::topology::indexer::MeshTopology;

/// Vertex ids created by one refinement call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeSet {
    /// Coordinates of the old and new vertices.
    pub coordinates: Vec<Vertex>,
    /// Midpoint vertex of every marked edge.
    pub edge_midpoints: Vec<Option<usize>>,
    /// Centre vertex of every standalone element that is split.
    pub centers: Vec<Option<usize>>,
    /// Interior points of every group, indexed by [`InteriorPoint`].
    pub interior: Vec<[Option<usize>; 3]>,
    /// Number of midpoints created.
    pub num_midpoints: usize,
    /// Number of centres and interior points created.
    pub num_interior: usize,
}

impl NodeSet {
    /// Midpoint of `edge`; the edge must be marked.
    #[inline]
    pub fn midpoint(&self, edge: usize) -> usize {
        self.edge_midpoints[edge].expect("edge is marked before its midpoint is requested")
    }

    /// Interior point `point` of group `group`; the group's class must use it.
    #[inline]
    pub fn interior_point(&self, group: usize, point: InteriorPoint) -> usize {
        self.interior[group][slot(point)]
            .expect("interior point is created for every class that uses it")
    }
}

#[inline]
fn slot(point: InteriorPoint) -> usize {
    match point {
        InteriorPoint::South => 0,
        InteriorPoint::SouthEast => 1,
        InteriorPoint::East => 2,
    }
}

fn corners_of(coordinates: &[Vertex], element: &Element) -> [Vertex; 4] {
    element.map(|v| coordinates[v])
}

/// Create every vertex the classified refinement needs.
pub fn synthesize_nodes(
    coordinates: &[Vertex],
    elements: &[Element],
    topology: &MeshTopology,
    state: &MarkingState,
    classes: &Classification,
    groups: &[TripleGroup],
) -> NodeSet {
    let num_centers = classes.red.iter().filter(|c| c.needs_center()).count();
    let num_group_points: usize = classes.blue.iter().map(|c| c.interior_points().len()).sum();
    let num_interior = num_centers + num_group_points;

    let mut coords = Vec::with_capacity(coordinates.len() + state.count() + num_interior);
    coords.extend_from_slice(coordinates);

    let mut edge_midpoints = vec![None; topology.num_edges()];
    for edge in state.marked_edges() {
        let [a, b] = topology.edges[edge];
        edge_midpoints[edge] = Some(coords.len());
        coords.push(midpoint(coordinates[a], coordinates[b]));
    }

    let mut centers = vec![None; classes.red.len()];
    for (e, class) in classes.red.iter().enumerate() {
        if class.needs_center() {
            centers[e] = Some(coords.len());
            coords.push(centroid(&corners_of(coordinates, &elements[e])));
        }
    }

    let mut interior = vec![[None; 3]; groups.len()];
    for (g, (group, class)) in groups.iter().zip(&classes.blue).enumerate() {
        let macro_corners = corners_of(coordinates, &group.corners);
        for &point in class.interior_points() {
            interior[g][slot(point)] = Some(coords.len());
            coords.push(weighted_point(&macro_corners, &point.weights()));
        }
    }

    NodeSet {
        coordinates: coords,
        edge_midpoints,
        centers,
        interior,
        num_midpoints: state.count(),
        num_interior,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::QuadMesh;
    use crate::refine::closure::close_and_classify;
    use crate::topology::indexer::{EdgeIndexer, TopologyIndexer};

    #[test]
    fn midpoints_come_before_centres() {
        let mesh = QuadMesh::new(
            vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [2.0, 0.0],
                [0.0, 1.0],
                [1.0, 1.0],
                [2.0, 1.0],
            ],
            vec![[0, 1, 4, 3], [1, 2, 5, 4]],
        );
        let topo = EdgeIndexer.index(&mesh).unwrap();
        let mut state = MarkingState::seed(&topo, &[], 2, &[1]).unwrap();
        let classes = close_and_classify(&mut state, &topo, 2, &[]);
        let nodes = synthesize_nodes(
            &mesh.coordinates,
            &mesh.elements,
            &topo,
            &state,
            &classes,
            &[],
        );
        // element 1 marks edges 1, 4, 5, 6; element 0 closes with edge 2
        assert_eq!(state.marked_edges().collect::<Vec<_>>(), vec![1, 2, 4, 5, 6]);
        assert_eq!(nodes.num_midpoints, 5);
        assert_eq!(nodes.midpoint(1), 6);
        assert_eq!(nodes.coordinates[6], [1.0, 0.5]);
        assert_eq!(nodes.centers, vec![Some(11), Some(12)]);
        assert_eq!(nodes.coordinates[11], [0.5, 0.5]);
        assert_eq!(nodes.coordinates.len(), 13);
    }
}
