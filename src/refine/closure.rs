//! Fixed-point mark propagation and pattern classification.

use crate::refine::group::TripleGroup;
use crate::refine::marking::MarkingState;
use crate::refine::tables::{blue_rule, red_rule, BlueClass, RedClass};
use crate::topology::indexer::MeshTopology;

/// Final class of every standalone element and triple-group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    /// One class per standalone element.
    pub red: Vec<RedClass>,
    /// One class per triple-group.
    pub blue: Vec<BlueClass>,
    /// Number of closure passes, including the final pass that changed nothing.
    pub passes: usize,
}

/// Add forced marks until every standalone pattern and every group pattern is
/// admissible. Returns the number of passes.
pub fn close_marks(
    state: &mut MarkingState,
    topology: &MeshTopology,
    num_standalone: usize,
    groups: &[TripleGroup],
) -> usize {
    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for edges in &topology.element_edges[..num_standalone] {
            let rule = red_rule(state.pattern(edges));
            if rule.forced != 0 {
                changed |= state.apply(edges, rule.forced);
            }
        }
        for group in groups {
            let edges = group.boundary_edges(&topology.element_edges);
            let rule = blue_rule(state.pattern(&edges));
            if rule.forced != 0 {
                changed |= state.apply(&edges, rule.forced);
            }
        }
        log::trace!("closure pass {passes}: {} marked edges", state.count());
        if !changed {
            return passes;
        }
    }
}

/// Close the marks, classify every element and group, and mark the
/// group-internal edges their class bisects.
pub fn close_and_classify(
    state: &mut MarkingState,
    topology: &MeshTopology,
    num_standalone: usize,
    groups: &[TripleGroup],
) -> Classification {
    let passes = close_marks(state, topology, num_standalone, groups);

    let red = topology.element_edges[..num_standalone]
        .iter()
        .map(|edges| {
            let rule = red_rule(state.pattern(edges));
            debug_assert_eq!(rule.forced, 0);
            rule.class
        })
        .collect();

    let mut blue = Vec::with_capacity(groups.len());
    for group in groups {
        let rule = blue_rule(state.pattern(&group.boundary_edges(&topology.element_edges)));
        debug_assert_eq!(rule.forced, 0);
        let (south, east) = rule.class.internal_splits();
        let (a_x, b_x) = group.internal_edges(&topology.element_edges);
        if south {
            state.mark(a_x);
        }
        if east {
            state.mark(b_x);
        }
        blue.push(rule.class);
    }

    Classification { red, blue, passes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::QuadMesh;
    use crate::topology::indexer::{EdgeIndexer, TopologyIndexer};

    /// 3×1 strip of unit squares.
    fn strip() -> QuadMesh {
        let mut coords = Vec::new();
        for y in 0..2 {
            for x in 0..4 {
                coords.push([x as f64, y as f64]);
            }
        }
        QuadMesh::new(coords, vec![[0, 1, 5, 4], [1, 2, 6, 5], [2, 3, 7, 6]])
    }

    #[test]
    fn marking_the_middle_closes_both_neighbours() {
        let mesh = strip();
        let topo = EdgeIndexer.index(&mesh).unwrap();
        let mut state = MarkingState::seed(&topo, &[], 3, &[1]).unwrap();
        let classes = close_and_classify(&mut state, &topo, 3, &[]);
        assert_eq!(classes.red[1], RedClass::FullRed);
        // left neighbour has its edge 1 marked and closes with edge 2
        assert_eq!(classes.red[0], RedClass::PartialLeft { corner: 2 });
        // right neighbour has its edge 3 marked and closes with edge 0
        assert_eq!(classes.red[2], RedClass::PartialLeft { corner: 0 });
        assert!(classes.passes >= 2);
    }

    #[test]
    fn closing_twice_is_idempotent() {
        let mesh = strip();
        let topo = EdgeIndexer.index(&mesh).unwrap();
        let mut state = MarkingState::seed(&topo, &[], 3, &[0]).unwrap();
        close_marks(&mut state, &topo, 3, &[]);
        let fixed = state.clone();
        assert_eq!(close_marks(&mut state, &topo, 3, &[]), 1);
        assert_eq!(state, fixed);
    }

    #[test]
    fn empty_marking_needs_a_single_pass() {
        let mesh = strip();
        let topo = EdgeIndexer.index(&mesh).unwrap();
        let mut state = MarkingState::new(topo.num_edges());
        let classes = close_and_classify(&mut state, &topo, 3, &[]);
        assert_eq!(classes.passes, 1);
        assert!(classes.red.iter().all(|c| *c == RedClass::None));
        assert_eq!(state.count(), 0);
    }
}
