//! Element rebuilding from per-class connectivity templates.
//!
//! Every standalone element and every triple-group is an *item*. Each item
//! produces standalone children and whole triple-groups. A counting pass
//! gives every item two offsets (prefix sums over the class child counts) and
//! the output is allocated once:
//!
//! ```text
//! [ standalone children of item 0, 1, ... ][ grouped children of item 0, 1, ... ]
//!   `-------------- red block ------------'  `------------ blue block ----------'
//! ```
//!
//! The blue block holds only whole triple-groups, so its length is the next
//! sibling count.

use crate::mesh::Element;
use crate::refine::closure::Classification;
use crate::refine::group::{blue_children, TripleGroup};
use crate::refine::nodes::NodeSet;
use crate::refine::tables::{BlueClass, InteriorPoint, RedClass};
use crate::topology::indexer::MeshTopology;

/// Output of [`rebuild_elements`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuiltElements {
    /// Red block followed by the blue block.
    pub elements: Vec<Element>,
    /// Length of the red block.
    pub num_standalone: usize,
}

impl RebuiltElements {
    /// Number of elements organised as triple-groups.
    pub fn sibling_count(&self) -> usize {
        self.elements.len() - self.num_standalone
    }
}

/// Reference 1→4 subdivision of a quad given vertices, mid-edge points, and a center point.
pub fn quadrilateral_subdivision(
    vertices: [usize; 4],
    midpoints: [usize; 4],
    center: usize,
) -> [Element; 4] {
    let [v0, v1, v2, v3] = vertices;
    let [m01, m12, m23, m30] = midpoints;
    [
        [v0, m01, center, m30],
        [m01, v1, m12, center],
        [center, m12, v2, m23],
        [m30, center, m23, v3],
    ]
}

#[derive(Clone, Copy, Debug)]
enum Item {
    Standalone(usize),
    Group(usize),
}

/// Children of one item; at most 5 standalone and 2 groups (southeast-split).
#[derive(Clone, Copy, Debug, Default)]
struct ChildSet {
    standalone: [Element; 5],
    num_standalone: usize,
    grouped: [Element; 6],
    num_grouped: usize,
}

impl ChildSet {
    fn push(&mut self, element: Element) {
        self.standalone[self.num_standalone] = element;
        self.num_standalone += 1;
    }

    fn push_group(&mut self, members: [Element; 3]) {
        for member in members {
            self.grouped[self.num_grouped] = member;
            self.num_grouped += 1;
        }
    }
}

struct Templates<'a> {
    elements: &'a [Element],
    topology: &'a MeshTopology,
    classes: &'a Classification,
    groups: &'a [TripleGroup],
    nodes: &'a NodeSet,
}

impl Templates<'_> {
    fn build(&self, item: Item) -> ChildSet {
        match item {
            Item::Standalone(e) => self.standalone(e),
            Item::Group(g) => self.group(g),
        }
    }

    fn standalone(&self, e: usize) -> ChildSet {
        let mut out = ChildSet::default();
        let element = self.elements[e];
        let edges = self.topology.element_edges[e];
        let class = self.classes.red[e];
        match class {
            RedClass::None => out.push(element),
            RedClass::FullRed => {
                let mids = edges.map(|edge| self.nodes.midpoint(edge));
                let center = self.center(e);
                for child in quadrilateral_subdivision(element, mids, center) {
                    out.push(child);
                }
            }
            RedClass::PartialRight { corner } | RedClass::PartialLeft { corner } => {
                // rotate so the split corner becomes local vertex 1
                let c = corner as usize;
                let w = [0, 1, 2, 3].map(|k| element[(c + 3 + k) % 4]);
                let a = self.nodes.midpoint(edges[(c + 3) % 4]);
                let b = self.nodes.midpoint(edges[c]);
                out.push_group(blue_children(w, a, b, self.center(e)));
            }
        }
        debug_assert_eq!((out.num_standalone, out.num_grouped), class.child_counts());
        out
    }

    fn group(&self, g: usize) -> ChildSet {
        let mut out = ChildSet::default();
        let group = &self.groups[g];
        let class = self.classes.blue[g];
        let [m1, m2, m3, m4] = group.corners;
        let (a, b, x) = (group.a, group.b, group.x);
        let boundary = group.boundary_edges(&self.topology.element_edges);
        let (a_x, b_x) = group.internal_edges(&self.topology.element_edges);
        let mid = |edge: usize| self.nodes.midpoint(edge);

        match class {
            BlueClass::CollapseToBlue => out.push_group(blue_children(group.corners, a, b, x)),
            BlueClass::PromoteToRed => {
                let (m34, m41) = (mid(boundary[4]), mid(boundary[5]));
                out.push([m1, a, x, m41]);
                out.push([a, m2, b, x]);
                out.push([x, b, m3, m34]);
                out.push([m41, x, m34, m4]);
            }
            BlueClass::SouthSplit => {
                let s = self.nodes.interior_point(g, InteriorPoint::South);
                let (m1a, m2b, ax) = (mid(boundary[0]), mid(boundary[2]), mid(a_x));
                out.push_group(blue_children([m1, a, x, m4], m1a, ax, s));
                out.push([a, m2, m2b, ax]);
                out.push([ax, m2b, b, x]);
                out.push([x, b, m3, m4]);
            }
            BlueClass::EastSplit => {
                let e = self.nodes.interior_point(g, InteriorPoint::East);
                let (am2, bm3, bx) = (mid(boundary[1]), mid(boundary[3]), mid(b_x));
                out.push_group(blue_children([x, b, m3, m4], bx, bm3, e));
                out.push([a, am2, bx, x]);
                out.push([am2, m2, b, bx]);
                out.push([m1, a, x, m4]);
            }
            BlueClass::SouthEastSplit => {
                let s = self.nodes.interior_point(g, InteriorPoint::South);
                let q = self.nodes.interior_point(g, InteriorPoint::SouthEast);
                let e = self.nodes.interior_point(g, InteriorPoint::East);
                let [m1a, am2, m2b, bm3, m34, m41] = boundary.map(mid);
                let (ax, bx) = (mid(a_x), mid(b_x));
                out.push_group(blue_children([m1, a, x, m41], m1a, ax, s));
                out.push_group(blue_children([x, b, m3, m34], bx, bm3, e));
                for child in quadrilateral_subdivision([a, m2, b, x], [am2, m2b, bx, ax], q) {
                    out.push(child);
                }
                out.push([m41, x, m34, m4]);
            }
        }
        debug_assert_eq!((out.num_standalone, out.num_grouped), class.child_counts());
        out
    }

    fn center(&self, e: usize) -> usize {
        self.nodes.centers[e].expect("split elements always receive a centre")
    }
}

/// Expand every element and group into its children.
pub fn rebuild_elements(
    elements: &[Element],
    topology: &MeshTopology,
    classes: &Classification,
    groups: &[TripleGroup],
    nodes: &NodeSet,
) -> RebuiltElements {
    let items: Vec<Item> = (0..classes.red.len())
        .map(Item::Standalone)
        .chain((0..groups.len()).map(Item::Group))
        .collect();

    // counting pass: prefix sums of (standalone, grouped) child counts
    let mut red_offsets = Vec::with_capacity(items.len());
    let mut blue_offsets = Vec::with_capacity(items.len());
    let (mut red_total, mut blue_total) = (0usize, 0usize);
    for item in &items {
        let (standalone, grouped) = match *item {
            Item::Standalone(e) => classes.red[e].child_counts(),
            Item::Group(g) => classes.blue[g].child_counts(),
        };
        red_offsets.push(red_total);
        blue_offsets.push(blue_total);
        red_total += standalone;
        blue_total += grouped;
    }

    let templates = Templates {
        elements,
        topology,
        classes,
        groups,
        nodes,
    };

    #[cfg(feature = "rayon")]
    let sets: Vec<ChildSet> = {
        use rayon::prelude::*;
        items.par_iter().map(|item| templates.build(*item)).collect()
    };
    #[cfg(not(feature = "rayon"))]
    let sets = items.iter().map(|item| templates.build(*item));

    let mut out = vec![[0usize; 4]; red_total + blue_total];
    let (red_block, blue_block) = out.split_at_mut(red_total);
    for ((set, red_at), blue_at) in sets.into_iter().zip(red_offsets).zip(blue_offsets) {
        red_block[red_at..red_at + set.num_standalone]
            .copy_from_slice(&set.standalone[..set.num_standalone]);
        blue_block[blue_at..blue_at + set.num_grouped]
            .copy_from_slice(&set.grouped[..set.num_grouped]);
    }

    RebuiltElements {
        elements: out,
        num_standalone: red_total,
    }
}
