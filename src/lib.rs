#![cfg_attr(docsrs, feature(doc_cfg))]
//! # quad-refine
//!
//! quad-refine performs one step of local, conformity-preserving red-blue
//! refinement of 2D quadrilateral meshes. Marked elements are subdivided, the
//! subdivision spreads to neighbours until no hanging nodes remain, and the
//! refined coordinates, connectivity and boundary segment lists are returned
//! together with the updated sibling count.
//!
//! ## Features
//! - Red (standalone) and blue (triple-group) pattern tables built once per process
//! - Fixed-point mark closure with per-pattern connectivity templates
//! - Boundary condition lists carried through refinement
//! - Pluggable edge indexing via [`topology::TopologyIndexer`]
//! - Structured grid generation and hanging-node validation helpers
//! - Optional Rayon-parallel element rebuild (`rayon` feature)
//!
//! ## Determinism
//!
//! Edge numbering, new vertex numbering and element order depend only on the
//! input, so the same mesh and marks always produce the same output, with or
//! without the `rayon` feature.
//!
//! ## Usage
//!
//! ```rust
//! use quad_refine::prelude::*;
//!
//! let mesh = structured_quad_grid(2, 2, [0.0, 0.0], [1.0, 1.0], MeshGenOptions::default())?;
//! let mut session = RefineSession::new();
//! let out = session.refine(&mesh, &[0])?;
//! validate_conformity(&out.mesh)?;
//! assert_eq!(out.sibling_count % 3, 0);
//! # Ok::<(), QuadRefineError>(())
//! ```

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh;
pub mod mesh_error;
pub mod refine;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::conformity::{find_hanging_nodes, validate_conformity};
    pub use crate::algs::meshgen::{structured_quad_grid, MeshGenOptions};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh::{Element, QuadMesh, Segment, Vertex};
    pub use crate::mesh_error::QuadRefineError;
    pub use crate::refine::{
        refine_quad_mesh, refine_quad_mesh_with_indexer, RefineOptions, RefineOutput,
        RefineSession, RefineStats,
    };
    pub use crate::topology::{EdgeIndexer, MeshTopology, TopologyIndexer};
}
