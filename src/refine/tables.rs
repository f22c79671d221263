//! Red (standalone) and blue (triple-group) pattern tables.
//!
//! Both tables map a mark bit pattern to the marks that must be added before
//! the pattern can be refined without hanging nodes, and to the subdivision
//! class of the closed pattern. They are generated once from the admissibility
//! rule and shared read-only by every session.
//!
//! # Red patterns
//! Bit `k` is local edge `k` of a standalone element. Admissible: no marks,
//! all four, or two adjacent edges `{k, k+1}` (a 3-child split around corner
//! `v_{k+1}`). One mark on edge `k` is closed with edge `k+1`; opposite pairs
//! and triples close to all four.
//!
//! # Blue patterns
//! Bit order over the group boundary, starting at `M1` and running
//! counter-clockwise: `M1–a`, `a–M2`, `M2–b`, `b–M3`, `M3–M4`, `M4–M1`.
//! The six bits fall into three disjoint blocks; a closed pattern is empty,
//! exactly one block, or everything.

use once_cell::sync::Lazy;
use static_assertions::const_assert_eq;

/// Group boundary bit of `M1–a` (macro-outer).
pub const BLUE_SOUTH_OUTER: u8 = 1 << 0;
/// Group boundary bit of `a–M2` (split edge next to the blue corner).
pub const BLUE_SOUTH_INNER: u8 = 1 << 1;
/// Group boundary bit of `M2–b` (split edge next to the blue corner).
pub const BLUE_EAST_INNER: u8 = 1 << 2;
/// Group boundary bit of `b–M3` (macro-outer).
pub const BLUE_EAST_OUTER: u8 = 1 << 3;
/// Group boundary bit of `M3–M4` (macro-outer).
pub const BLUE_NORTH: u8 = 1 << 4;
/// Group boundary bit of `M4–M1` (macro-outer).
pub const BLUE_WEST: u8 = 1 << 5;

/// The four macro-outer edges marked when a group member is selected.
pub const BLUE_MACRO_OUTER: u8 = BLUE_SOUTH_OUTER | BLUE_EAST_OUTER | BLUE_NORTH | BLUE_WEST;

const SOUTH_BLOCK: u8 = BLUE_SOUTH_OUTER | BLUE_EAST_INNER;
const EAST_BLOCK: u8 = BLUE_SOUTH_INNER | BLUE_EAST_OUTER;
const PROMOTE_BLOCK: u8 = BLUE_NORTH | BLUE_WEST;
const BLUE_ALL: u8 = 0b11_1111;
const RED_ALL: u8 = 0b1111;

const_assert_eq!(SOUTH_BLOCK & EAST_BLOCK, 0);
const_assert_eq!((SOUTH_BLOCK | EAST_BLOCK) & PROMOTE_BLOCK, 0);
const_assert_eq!(SOUTH_BLOCK | EAST_BLOCK | PROMOTE_BLOCK, BLUE_ALL);

/// Subdivision class of a standalone element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RedClass {
    /// No marks; the element is kept.
    None,
    /// All four edges bisected; 1→4 split around the centre.
    FullRed,
    /// Two adjacent edges meeting at an odd corner (`v1` or `v3`); the split
    /// runs along the `v1–v3` diagonal.
    PartialRight { corner: u8 },
    /// Two adjacent edges meeting at an even corner (`v0` or `v2`); the split
    /// runs along the `v0–v2` diagonal.
    PartialLeft { corner: u8 },
}

impl RedClass {
    /// `(standalone, grouped)` child counts.
    pub const fn child_counts(self) -> (usize, usize) {
        match self {
            RedClass::None => (1, 0),
            RedClass::FullRed => (4, 0),
            RedClass::PartialRight { .. } | RedClass::PartialLeft { .. } => (0, 3),
        }
    }

    /// Total number of children.
    pub const fn children(self) -> usize {
        let (standalone, grouped) = self.child_counts();
        standalone + grouped
    }

    /// Whether the element gets a centre vertex.
    pub const fn needs_center(self) -> bool {
        !matches!(self, RedClass::None)
    }

    /// Corner shared by the two marked edges of a partial split.
    pub const fn corner(self) -> Option<usize> {
        match self {
            RedClass::PartialRight { corner } | RedClass::PartialLeft { corner } => {
                Some(corner as usize)
            }
            _ => None,
        }
    }
}

/// Subdivision class of a triple-group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlueClass {
    /// Nothing marked; the three members are kept.
    CollapseToBlue,
    /// `M3–M4` and `M4–M1` bisected; the macro-quad becomes four red children.
    PromoteToRed,
    /// `a–M2` and `b–M3` bisected; `g2` is blue-split around `b`.
    EastSplit,
    /// `M1–a` and `M2–b` bisected; `g0` is blue-split around `a`.
    SouthSplit,
    /// Everything bisected; promotion plus further splits of three quarters.
    SouthEastSplit,
}

/// Interior point of a group at a fixed bilinear position of its macro-quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteriorPoint {
    /// Weights `(9, 3, 1, 3) / 16`.
    South,
    /// Weights `(3, 9, 3, 1) / 16`.
    SouthEast,
    /// Weights `(1, 3, 9, 3) / 16`.
    East,
}

impl InteriorPoint {
    /// Bilinear weights over `M1..M4`, in sixteenths.
    pub const fn weights(self) -> [f64; 4] {
        match self {
            InteriorPoint::South => crate::geometry::SOUTH_WEIGHTS,
            InteriorPoint::SouthEast => crate::geometry::SOUTH_EAST_WEIGHTS,
            InteriorPoint::East => crate::geometry::EAST_WEIGHTS,
        }
    }
}

impl BlueClass {
    /// `(standalone, grouped)` child counts.
    pub const fn child_counts(self) -> (usize, usize) {
        match self {
            BlueClass::CollapseToBlue => (0, 3),
            BlueClass::PromoteToRed => (4, 0),
            BlueClass::EastSplit | BlueClass::SouthSplit => (3, 3),
            BlueClass::SouthEastSplit => (5, 6),
        }
    }

    /// Total number of children.
    pub const fn children(self) -> usize {
        let (standalone, grouped) = self.child_counts();
        standalone + grouped
    }

    /// Interior points this class creates.
    pub const fn interior_points(self) -> &'static [InteriorPoint] {
        match self {
            BlueClass::CollapseToBlue | BlueClass::PromoteToRed => &[],
            BlueClass::SouthSplit => &[InteriorPoint::South],
            BlueClass::EastSplit => &[InteriorPoint::East],
            BlueClass::SouthEastSplit => &[
                InteriorPoint::South,
                InteriorPoint::SouthEast,
                InteriorPoint::East,
            ],
        }
    }

    /// Whether the group-internal edges `a–X` and `b–X` are bisected.
    pub const fn internal_splits(self) -> (bool, bool) {
        match self {
            BlueClass::SouthSplit => (true, false),
            BlueClass::EastSplit => (false, true),
            BlueClass::SouthEastSplit => (true, true),
            BlueClass::CollapseToBlue | BlueClass::PromoteToRed => (false, false),
        }
    }
}

/// Red table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedRule {
    /// Marks to add; zero for admissible patterns.
    pub forced: u8,
    /// Class of `pattern | forced`.
    pub class: RedClass,
}

/// Blue table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlueRule {
    /// Marks to add; zero for admissible patterns.
    pub forced: u8,
    /// Class of `pattern | forced`.
    pub class: BlueClass,
}

/// 16-entry table for standalone elements.
pub static RED_TABLE: Lazy<[RedRule; 16]> = Lazy::new(|| {
    std::array::from_fn(|p| {
        let pattern = p as u8;
        let closed = close_red(pattern);
        RedRule {
            forced: closed & !pattern,
            class: classify_red(closed),
        }
    })
});

/// 64-entry table for triple-groups.
pub static BLUE_TABLE: Lazy<[BlueRule; 64]> = Lazy::new(|| {
    std::array::from_fn(|p| {
        let pattern = p as u8;
        let closed = close_blue(pattern);
        BlueRule {
            forced: closed & !pattern,
            class: classify_blue(closed),
        }
    })
});

/// Look up the red rule for a 4-bit pattern.
#[inline]
pub fn red_rule(pattern: u8) -> RedRule {
    RED_TABLE[(pattern & RED_ALL) as usize]
}

/// Look up the blue rule for a 6-bit pattern.
#[inline]
pub fn blue_rule(pattern: u8) -> BlueRule {
    BLUE_TABLE[(pattern & BLUE_ALL) as usize]
}

/// Whether `pattern` is two adjacent edges; returns the shared corner.
fn adjacent_pair_corner(pattern: u8) -> Option<u8> {
    (0..4u8).find_map(|k| {
        let pair = (1 << k) | (1 << ((k + 1) % 4));
        (pattern == pair).then_some((k + 1) % 4)
    })
}

fn close_red(pattern: u8) -> u8 {
    match pattern.count_ones() {
        0 => 0,
        1 => {
            let k = pattern.trailing_zeros() as u8;
            pattern | (1 << ((k + 1) % 4))
        }
        2 if adjacent_pair_corner(pattern).is_some() => pattern,
        _ => RED_ALL,
    }
}

fn classify_red(closed: u8) -> RedClass {
    match closed {
        0 => RedClass::None,
        RED_ALL => RedClass::FullRed,
        _ => match adjacent_pair_corner(closed) {
            Some(corner) if corner % 2 == 1 => RedClass::PartialRight { corner },
            Some(corner) => RedClass::PartialLeft { corner },
            None => RedClass::FullRed,
        },
    }
}

fn close_blue(pattern: u8) -> u8 {
    let touched: Vec<u8> = [SOUTH_BLOCK, EAST_BLOCK, PROMOTE_BLOCK]
        .into_iter()
        .filter(|block| pattern & block != 0)
        .collect();
    match touched.as_slice() {
        [] => 0,
        [block] => *block,
        _ => BLUE_ALL,
    }
}

fn classify_blue(closed: u8) -> BlueClass {
    match closed {
        0 => BlueClass::CollapseToBlue,
        SOUTH_BLOCK => BlueClass::SouthSplit,
        EAST_BLOCK => BlueClass::EastSplit,
        PROMOTE_BLOCK => BlueClass::PromoteToRed,
        _ => BlueClass::SouthEastSplit,
    }
}
