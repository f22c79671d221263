//! QuadRefineError: Unified error type for quad-refine public APIs
//!
//! Every fallible operation in this crate returns this error type so that
//! callers embedding refinement in an adaptive loop never observe a panic.

use thiserror::Error;

/// Unified error type for quad-refine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuadRefineError {
    /// A marked index does not reference an existing standalone element or
    /// triple-group member.
    #[error("Invalid marking: element index {index} out of range (mesh has {len} elements)")]
    InvalidMarking { index: usize, len: usize },
    /// The topology indexer rejected the connectivity (non-manifold edge,
    /// inconsistent winding, dangling boundary segment, ...).
    #[error("Topology error: {0}")]
    InvalidTopology(String),
    /// The session's sibling count cannot describe the element list.
    #[error(
        "Invalid sibling count {sibling_count} for {elements} elements (must be a multiple of 3 and not exceed the element count)"
    )]
    InvalidSiblingCount { sibling_count: usize, elements: usize },
    /// Three consecutive trailing elements do not have the triple-group layout.
    #[error("Triple-group {group} does not match the blue refinement layout")]
    GroupLayoutMismatch { group: usize },
    /// Degenerate or inverted element geometry.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    /// The refined mesh still contains a hanging node.
    #[error("Non-conforming mesh: vertex {vertex} hangs on edge ({a}, {b})")]
    HangingNode { vertex: usize, a: usize, b: usize },
}
