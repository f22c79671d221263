use crate::mesh::QuadMesh;
use crate::mesh_error::QuadRefineError;
use crate::refine::group::collect_groups;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), QuadRefineError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

/// A mesh together with the sibling count that partitions its elements.
#[derive(Clone, Copy, Debug)]
pub struct SiblingLayout<'a> {
    pub mesh: &'a QuadMesh,
    pub sibling_count: usize,
}

impl DebugInvariants for SiblingLayout<'_> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "sibling layout invalid");
    }

    /// The mesh is valid and the trailing `sibling_count` elements form whole
    /// triple-groups with the blue layout.
    fn validate_invariants(&self) -> Result<(), QuadRefineError> {
        self.mesh.validate_invariants()?;
        collect_groups(&self.mesh.elements, self.sibling_count).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refine::group::blue_children;

    fn square_grid() -> QuadMesh {
        let coords = (0..9).map(|i| [(i % 3) as f64, (i / 3) as f64]).collect();
        let elements = blue_children([0, 2, 8, 6], 1, 5, 4).to_vec();
        QuadMesh::new(coords, elements)
    }

    #[test]
    fn blue_layout_passes() {
        let mesh = square_grid();
        let layout = SiblingLayout {
            mesh: &mesh,
            sibling_count: 3,
        };
        assert!(layout.validate_invariants().is_ok());
        layout.debug_assert_invariants();
    }

    #[test]
    fn partial_group_fails() {
        let mesh = square_grid();
        let layout = SiblingLayout {
            mesh: &mesh,
            sibling_count: 2,
        };
        assert!(matches!(
            layout.validate_invariants(),
            Err(QuadRefineError::InvalidSiblingCount { .. })
        ));
    }
}
