use quad_refine::algs::conformity::validate_conformity;
use quad_refine::mesh::QuadMesh;
use quad_refine::mesh_error::QuadRefineError;
use quad_refine::refine::{refine_quad_mesh, RefineOptions, RefineSession};

fn checked() -> RefineOptions {
    RefineOptions {
        check_geometry: true,
        check_conformity: true,
    }
}

fn unit_square() -> QuadMesh {
    QuadMesh::new(
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        vec![[0, 1, 2, 3]],
    )
}

/// Two unit squares side by side, bottom edge Dirichlet, the rest Neumann.
fn two_quads() -> QuadMesh {
    QuadMesh::new(
        vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [2.0, 1.0],
        ],
        vec![[0, 1, 4, 3], [1, 2, 5, 4]],
    )
    .with_boundary(vec![[0, 1], [1, 2]])
    .with_boundary(vec![[2, 5], [5, 4], [4, 3], [3, 0]])
}

#[test]
fn single_quad_splits_into_four() {
    let out = refine_quad_mesh(&unit_square(), &[0], 0, checked()).unwrap();
    let mesh = &out.mesh;
    assert_eq!(mesh.num_elements(), 4);
    assert_eq!(mesh.num_vertices(), 9);
    assert_eq!(mesh.coordinates[8], [0.5, 0.5]);
    assert_eq!(
        &mesh.coordinates[4..8],
        &[[0.5, 0.0], [1.0, 0.5], [0.5, 1.0], [0.0, 0.5]]
    );
    assert_eq!(
        mesh.elements,
        vec![[0, 4, 8, 7], [4, 1, 5, 8], [8, 5, 2, 6], [7, 8, 6, 3]]
    );
    assert_eq!(out.sibling_count, 0);
    for e in 0..4 {
        assert!((mesh.signed_area(e) - 0.25).abs() < 1e-12);
    }
}

#[test]
fn neighbour_of_a_red_split_gets_a_partial_split() {
    let out = refine_quad_mesh(&two_quads(), &[0], 0, checked()).unwrap();
    let mesh = &out.mesh;
    // 4 red children + one triple-group
    assert_eq!(mesh.num_elements(), 7);
    assert_eq!(out.sibling_count, 3);
    // 5 marked edges + 2 centres
    assert_eq!(mesh.num_vertices(), 6 + 5 + 2);
    assert_eq!(out.stats.full_red, 1);
    assert_eq!(out.stats.partial, 1);
    assert_eq!(mesh.coordinates[10], [1.5, 0.0]);
    assert_eq!(mesh.coordinates[12], [1.5, 0.5]);
    assert_eq!(&mesh.elements[4..], &[[4, 7, 12, 5], [7, 1, 10, 12], [12, 10, 2, 5]]);
    assert!((mesh.total_area() - 2.0).abs() < 1e-12);
    validate_conformity(mesh).unwrap();
}

#[test]
fn boundary_segments_on_split_edges_are_halved() {
    let out = refine_quad_mesh(&two_quads(), &[0], 0, RefineOptions::default()).unwrap();
    let boundaries = &out.mesh.boundaries;
    assert_eq!(boundaries.len(), 2);
    assert_eq!(boundaries[0], vec![[0, 6], [6, 1], [1, 10], [10, 2]]);
    assert_eq!(
        boundaries[1],
        vec![[2, 5], [5, 4], [4, 8], [8, 3], [3, 9], [9, 0]]
    );
}

#[test]
fn empty_marking_is_the_identity() {
    let mesh = two_quads();
    let out = refine_quad_mesh(&mesh, &[], 0, checked()).unwrap();
    assert_eq!(out.mesh, mesh);
    assert_eq!(out.sibling_count, 0);
    assert_eq!(out.stats.new_vertices(), 0);
}

#[test]
fn duplicate_marks_are_harmless() {
    let once = refine_quad_mesh(&two_quads(), &[0], 0, checked()).unwrap();
    let twice = refine_quad_mesh(&two_quads(), &[0, 0, 0], 0, checked()).unwrap();
    assert_eq!(once.mesh, twice.mesh);
}

#[test]
fn out_of_range_mark_is_rejected() {
    let err = refine_quad_mesh(&two_quads(), &[0, 2], 0, checked()).unwrap_err();
    assert_eq!(err, QuadRefineError::InvalidMarking { index: 2, len: 2 });
}

#[test]
fn inconsistent_winding_is_rejected() {
    let mut mesh = two_quads();
    mesh.elements[1] = [4, 5, 2, 1];
    let err = refine_quad_mesh(&mesh, &[0], 0, checked()).unwrap_err();
    assert!(matches!(err, QuadRefineError::InvalidTopology(_)));
}

#[test]
fn marking_everything_twice_stays_conforming() {
    let mut session = RefineSession::new().with_options(checked());
    let first = session.refine(&two_quads(), &[0, 1]).unwrap();
    assert_eq!(first.mesh.num_elements(), 8);
    assert_eq!(session.sibling_count(), 0);
    let all: Vec<usize> = (0..first.mesh.num_elements()).collect();
    let second = session.refine(&first.mesh, &all).unwrap();
    assert_eq!(second.mesh.num_elements(), 32);
    assert!((second.mesh.total_area() - 2.0).abs() < 1e-12);
}
