//! Edge topology derived from element connectivity.
//!
//! The refinement core only needs, for every element, the indices of its four
//! edges and, for every boundary segment, the edge it lies on. How these are
//! obtained is pluggable through [`TopologyIndexer`].

pub mod indexer;

pub use indexer::{EdgeIndexer, MeshTopology, TopologyIndexer};
