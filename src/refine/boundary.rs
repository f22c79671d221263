//! Boundary segment lists after refinement.

use crate::mesh::Segment;
use crate::refine::marking::MarkingState;
use crate::refine::nodes::NodeSet;

/// Rewrite every boundary list for the refined mesh.
///
/// Segments on unmarked edges keep their relative order; each segment
/// `[a, b]` on a marked edge becomes `[a, m]`, `[m, b]` with `m` its midpoint,
/// and these halves follow the unmarked segments in original order.
/// Boundary list `i` of the output is list `i` of the input.
pub fn update_boundaries(
    boundaries: &[Vec<Segment>],
    boundary_edges: &[Vec<usize>],
    state: &MarkingState,
    nodes: &NodeSet,
) -> Vec<Vec<Segment>> {
    boundaries
        .iter()
        .zip(boundary_edges)
        .map(|(segments, edges)| {
            let split = edges.iter().filter(|&&e| state.is_marked(e)).count();
            let mut out = Vec::with_capacity(segments.len() + split);
            let mut halves = Vec::with_capacity(2 * split);
            for (&[a, b], &edge) in segments.iter().zip(edges) {
                if state.is_marked(edge) {
                    let m = nodes.midpoint(edge);
                    halves.push([a, m]);
                    halves.push([m, b]);
                } else {
                    out.push([a, b]);
                }
            }
            out.append(&mut halves);
            out
        })
        .collect()
}
