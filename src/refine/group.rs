//! Triple-group layout.
//!
//! A triple-group is three consecutive elements produced by one blue split of
//! a macro-quad `M1 M2 M3 M4` whose sides `M1M2` and `M2M3` were bisected at
//! `a` and `b`, with interior vertex `X`:
//!
//! ```text
//!  M4 ──────────── M3
//!  │ ╲    g2       │
//!  │   ╲           │
//!  │ g0  X ─────── b
//!  │     │   g1    │
//!  M1 ── a ─────── M2
//! ```
//!
//! Members are stored as `g0 = [M1, a, X, M4]`, `g1 = [a, M2, b, X]`,
//! `g2 = [X, b, M3, M4]`.

use crate::mesh::Element;
use crate::mesh_error::QuadRefineError;

/// A triple-group recovered from the element list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TripleGroup {
    /// Element index of `g0`; members are `first..first + 3`.
    pub first: usize,
    /// Macro-quad corners `M1..M4`.
    pub corners: [usize; 4],
    /// Split vertex on `M1M2`.
    pub a: usize,
    /// Split vertex on `M2M3`.
    pub b: usize,
    /// Interior vertex shared by all three members.
    pub x: usize,
}

/// The three members of a blue split of `corners` around `corners[1]`.
#[inline]
pub fn blue_children(corners: [usize; 4], a: usize, b: usize, x: usize) -> [Element; 3] {
    let [m1, m2, m3, m4] = corners;
    [[m1, a, x, m4], [a, m2, b, x], [x, b, m3, m4]]
}

impl TripleGroup {
    /// Recover the group starting at element `first`, or `None` if the three
    /// elements do not have the blue layout.
    pub fn from_members(first: usize, members: &[Element]) -> Option<Self> {
        let [g0, g1, g2] = members else {
            return None;
        };
        let (a, x, m1, m4) = (g0[1], g0[2], g0[0], g0[3]);
        let (m2, b) = (g1[1], g1[2]);
        let m3 = g2[2];
        let group = Self {
            first,
            corners: [m1, m2, m3, m4],
            a,
            b,
            x,
        };
        (blue_children(group.corners, a, b, x) == [*g0, *g1, *g2]).then_some(group)
    }

    /// Element indices of `g0`, `g1`, `g2`.
    pub fn members(&self) -> [usize; 3] {
        [self.first, self.first + 1, self.first + 2]
    }

    /// Group boundary edges in blue-table bit order:
    /// `M1–a`, `a–M2`, `M2–b`, `b–M3`, `M3–M4`, `M4–M1`.
    pub fn boundary_edges(&self, element_edges: &[[usize; 4]]) -> [usize; 6] {
        let [g0, g1, g2] = self.members().map(|e| element_edges[e]);
        [g0[0], g1[0], g1[1], g2[1], g2[2], g0[3]]
    }

    /// Group-internal edges `a–X` and `b–X`.
    pub fn internal_edges(&self, element_edges: &[[usize; 4]]) -> (usize, usize) {
        (element_edges[self.first][1], element_edges[self.first + 1][2])
    }
}

/// Recover every triple-group from the trailing `sibling_count` elements.
pub fn collect_groups(
    elements: &[Element],
    sibling_count: usize,
) -> Result<Vec<TripleGroup>, QuadRefineError> {
    if sibling_count % 3 != 0 || sibling_count > elements.len() {
        return Err(QuadRefineError::InvalidSiblingCount {
            sibling_count,
            elements: elements.len(),
        });
    }
    let start = elements.len() - sibling_count;
    elements[start..]
        .chunks_exact(3)
        .enumerate()
        .map(|(group, members)| {
            TripleGroup::from_members(start + 3 * group, members)
                .ok_or(QuadRefineError::GroupLayoutMismatch { group })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_round_trips_through_members() {
        let children = blue_children([0, 1, 2, 3], 4, 5, 6);
        let group = TripleGroup::from_members(7, &children).unwrap();
        assert_eq!(group.corners, [0, 1, 2, 3]);
        assert_eq!((group.a, group.b, group.x), (4, 5, 6));
        assert_eq!(group.members(), [7, 8, 9]);
    }

    #[test]
    fn shuffled_members_are_rejected() {
        let [g0, g1, g2] = blue_children([0, 1, 2, 3], 4, 5, 6);
        assert!(TripleGroup::from_members(0, &[g1, g0, g2]).is_none());
        assert!(TripleGroup::from_members(0, &[g0, g1]).is_none());
    }

    #[test]
    fn sibling_count_must_cover_whole_groups() {
        let elements: Vec<Element> = blue_children([0, 1, 2, 3], 4, 5, 6).to_vec();
        assert_eq!(collect_groups(&elements, 3).unwrap().len(), 1);
        assert_eq!(collect_groups(&elements, 0).unwrap().len(), 0);
        assert!(matches!(
            collect_groups(&elements, 2),
            Err(QuadRefineError::InvalidSiblingCount { .. })
        ));
        assert!(matches!(
            collect_groups(&elements, 6),
            Err(QuadRefineError::InvalidSiblingCount { .. })
        ));
    }
}
