//! Conforming red-blue refinement of quadrilateral meshes.
//!
//! # Expected invariants
//! - The input mesh is conforming and every element is counter-clockwise.
//! - The element list is `[standalone elements][triple-groups]`; the split is
//!   given by the sibling count, which must be a multiple of 3.
//! - Triple-groups keep the layout produced by [`group::blue_children`].
//!
//! Standalone elements are refined with the red table, triple-groups with the
//! blue table (see [`tables`]). The output keeps the same partition: standalone
//! children first, new triple-groups after.

pub mod boundary;
pub mod closure;
pub mod group;
pub mod marking;
pub mod nodes;
pub mod rebuild;
pub mod session;
pub mod tables;

pub use session::{
    refine_quad_mesh, refine_quad_mesh_with_indexer, RefineOptions, RefineOutput, RefineSession,
    RefineStats,
};
pub use tables::{BlueClass, RedClass};
