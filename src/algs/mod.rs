//! Re-export public algorithms.

pub mod conformity;
pub mod meshgen;

pub use conformity::{find_hanging_nodes, validate_conformity};
pub use meshgen::structured_quad_grid;
