//! Top-level refinement and the sibling count carried between calls.
//!
//! # Pipeline
//! index → seed → close → classify → synthesise nodes → rebuild elements →
//! update boundaries. Every stage writes fresh buffers; the input mesh is
//! never touched, and a [`RefineSession`] only adopts the new sibling count
//! after the whole pipeline succeeded.
//!
//! # Examples
//! ```rust
//! use quad_refine::mesh::QuadMesh;
//! use quad_refine::refine::session::RefineSession;
//!
//! let mesh = QuadMesh::new(
//!     vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
//!     vec![[0, 1, 2, 3]],
//! );
//! let mut session = RefineSession::new();
//! let out = session.refine(&mesh, &[0])?;
//! assert_eq!(out.mesh.num_elements(), 4);
//! assert_eq!(out.mesh.coordinates[8], [0.5, 0.5]);
//! assert_eq!(session.sibling_count(), 0);
//! # Ok::<(), quad_refine::mesh_error::QuadRefineError>(())
//! ```

use crate::algs::conformity::validate_conformity;
use crate::debug_invariants::{DebugInvariants, SiblingLayout};
use crate::geometry::quality::validate_mesh_geometry;
use crate::mesh::QuadMesh;
use crate::mesh_error::QuadRefineError;
use crate::refine::boundary::update_boundaries;
use crate::refine::closure::{close_and_classify, Classification};
use crate::refine::group::collect_groups;
use crate::refine::marking::MarkingState;
use crate::refine::nodes::synthesize_nodes;
use crate::refine::rebuild::rebuild_elements;
use crate::refine::tables::{BlueClass, RedClass};
use crate::topology::indexer::{EdgeIndexer, TopologyIndexer};
use serde::{Deserialize, Serialize};

/// Optional checks on the refined mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineOptions {
    /// Reject outputs with inverted or degenerate elements.
    pub check_geometry: bool,
    /// Reject outputs with hanging nodes.
    pub check_conformity: bool,
}

/// What one refinement call did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineStats {
    /// Closure passes, including the last one that changed nothing.
    pub closure_passes: usize,
    /// Edges bisected, group-internal ones included.
    pub marked_edges: usize,
    pub new_midpoints: usize,
    /// Element centres and group interior points.
    pub new_interior: usize,
    pub kept: usize,
    pub full_red: usize,
    pub partial: usize,
    pub collapsed: usize,
    pub promoted: usize,
    pub south_split: usize,
    pub east_split: usize,
    pub south_east_split: usize,
}

impl RefineStats {
    fn from_classes(classes: &Classification, state: &MarkingState, new_interior: usize) -> Self {
        let mut stats = RefineStats {
            closure_passes: classes.passes,
            marked_edges: state.count(),
            new_midpoints: state.count(),
            new_interior,
            ..Default::default()
        };
        for class in &classes.red {
            match class {
                RedClass::None => stats.kept += 1,
                RedClass::FullRed => stats.full_red += 1,
                RedClass::PartialRight { .. } | RedClass::PartialLeft { .. } => stats.partial += 1,
            }
        }
        for class in &classes.blue {
            match class {
                BlueClass::CollapseToBlue => stats.collapsed += 1,
                BlueClass::PromoteToRed => stats.promoted += 1,
                BlueClass::SouthSplit => stats.south_split += 1,
                BlueClass::EastSplit => stats.east_split += 1,
                BlueClass::SouthEastSplit => stats.south_east_split += 1,
            }
        }
        stats
    }

    /// Total number of new vertices.
    pub fn new_vertices(&self) -> usize {
        self.new_midpoints + self.new_interior
    }
}

/// Result of [`refine_quad_mesh`].
#[derive(Clone, Debug, PartialEq)]
pub struct RefineOutput {
    /// The refined mesh.
    pub mesh: QuadMesh,
    /// Number of trailing elements of `mesh` organised as triple-groups.
    pub sibling_count: usize,
    pub stats: RefineStats,
}

/// Refine `mesh` once, subdividing the elements listed in `marked` and
/// whatever else is needed to keep the mesh conforming.
///
/// `sibling_count` is the number of trailing elements of `mesh` that form
/// triple-groups (zero for a fresh mesh).
///
/// # Errors
/// - [`QuadRefineError::InvalidSiblingCount`] / [`QuadRefineError::GroupLayoutMismatch`]
///   if `sibling_count` does not describe the element list.
/// - [`QuadRefineError::InvalidTopology`] from the edge indexer.
/// - [`QuadRefineError::InvalidMarking`] if a marked index is out of range.
/// - [`QuadRefineError::InvalidGeometry`] / [`QuadRefineError::HangingNode`]
///   when the corresponding [`RefineOptions`] check fails on the output.
pub fn refine_quad_mesh(
    mesh: &QuadMesh,
    marked: &[usize],
    sibling_count: usize,
    options: RefineOptions,
) -> Result<RefineOutput, QuadRefineError> {
    refine_quad_mesh_with_indexer(&EdgeIndexer, mesh, marked, sibling_count, options)
}

/// [`refine_quad_mesh`] with a caller-provided [`TopologyIndexer`].
pub fn refine_quad_mesh_with_indexer<I: TopologyIndexer + ?Sized>(
    indexer: &I,
    mesh: &QuadMesh,
    marked: &[usize],
    sibling_count: usize,
    options: RefineOptions,
) -> Result<RefineOutput, QuadRefineError> {
    let groups = collect_groups(&mesh.elements, sibling_count)?;
    let topology = indexer.index(mesh)?;
    if topology.element_edges.len() != mesh.num_elements()
        || topology.boundary_edges.len() != mesh.boundaries.len()
    {
        return Err(QuadRefineError::InvalidTopology(format!(
            "indexer returned {} element edge lists and {} boundary lists for {} elements and {} boundary lists",
            topology.element_edges.len(),
            topology.boundary_edges.len(),
            mesh.num_elements(),
            mesh.boundaries.len()
        )));
    }
    let num_edges = topology.num_edges();
    let in_range = topology.edge_elements.len() == num_edges
        && topology.element_edges.iter().flatten().all(|&e| e < num_edges)
        && topology
            .boundary_edges
            .iter()
            .zip(&mesh.boundaries)
            .all(|(edges, segments)| {
                edges.len() == segments.len() && edges.iter().all(|&e| e < num_edges)
            });
    if !in_range {
        return Err(QuadRefineError::InvalidTopology(format!(
            "indexer returned edge indices outside its {num_edges} edges"
        )));
    }
    if options.check_geometry {
        if let Err(err) = validate_mesh_geometry(mesh) {
            log::warn!("refining a mesh with invalid input geometry: {err}");
        }
    }

    let num_standalone = mesh.num_elements() - sibling_count;
    let mut state = MarkingState::seed(&topology, &groups, num_standalone, marked)?;
    let classes = close_and_classify(&mut state, &topology, num_standalone, &groups);
    let nodes = synthesize_nodes(
        &mesh.coordinates,
        &mesh.elements,
        &topology,
        &state,
        &classes,
        &groups,
    );
    let rebuilt = rebuild_elements(&mesh.elements, &topology, &classes, &groups, &nodes);
    let boundaries = update_boundaries(&mesh.boundaries, &topology.boundary_edges, &state, &nodes);

    let stats = RefineStats::from_classes(&classes, &state, nodes.num_interior);
    let sibling_count = rebuilt.sibling_count();
    let refined = QuadMesh {
        coordinates: nodes.coordinates,
        elements: rebuilt.elements,
        boundaries,
    };

    SiblingLayout {
        mesh: &refined,
        sibling_count,
    }
    .debug_assert_invariants();
    if options.check_geometry {
        validate_mesh_geometry(&refined)?;
    }
    if options.check_conformity {
        validate_conformity(&refined)?;
    }

    log::debug!(
        "refined {} marked of {} elements in {} passes: {} -> {} elements, {} new vertices, nB {}",
        marked.len(),
        mesh.num_elements(),
        stats.closure_passes,
        mesh.num_elements(),
        refined.num_elements(),
        stats.new_vertices(),
        sibling_count
    );
    log::debug!("class histogram: {stats:?}");

    Ok(RefineOutput {
        mesh: refined,
        sibling_count,
        stats,
    })
}

/// Sibling count and options carried across successive refinements of the
/// same mesh.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineSession {
    sibling_count: usize,
    options: RefineOptions,
}

impl RefineSession {
    /// A session for a mesh without triple-groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session resuming from a previous sibling count.
    pub fn with_sibling_count(sibling_count: usize) -> Self {
        Self {
            sibling_count,
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: RefineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    pub fn options(&self) -> RefineOptions {
        self.options
    }

    /// Refine `mesh`; the session adopts the new sibling count only on success.
    pub fn refine(
        &mut self,
        mesh: &QuadMesh,
        marked: &[usize],
    ) -> Result<RefineOutput, QuadRefineError> {
        self.refine_with_indexer(&EdgeIndexer, mesh, marked)
    }

    /// [`RefineSession::refine`] with a caller-provided [`TopologyIndexer`].
    pub fn refine_with_indexer<I: TopologyIndexer + ?Sized>(
        &mut self,
        indexer: &I,
        mesh: &QuadMesh,
        marked: &[usize],
    ) -> Result<RefineOutput, QuadRefineError> {
        let out = refine_quad_mesh_with_indexer(
            indexer,
            mesh,
            marked,
            self.sibling_count,
            self.options,
        )?;
        self.sibling_count = out.sibling_count;
        Ok(out)
    }
}
