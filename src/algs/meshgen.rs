//! Structured quadrilateral grid generator.

use crate::mesh::{QuadMesh, Segment};
use crate::mesh_error::QuadRefineError;
use itertools::iproduct;

/// Sides of a rectangular domain, in counter-clockwise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Bottom,
    Right,
    Top,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Right, Side::Top, Side::Left];
}

/// Optional metadata for mesh generators.
#[derive(Clone, Debug)]
pub struct MeshGenOptions {
    /// Boundary condition class of each side, indexed like [`Side::ALL`].
    pub side_classes: [usize; 4],
}

impl Default for MeshGenOptions {
    /// Dirichlet (class 0) on the bottom, Neumann (class 1) elsewhere.
    fn default() -> Self {
        Self {
            side_classes: [0, 1, 1, 1],
        }
    }
}

fn invalid_geometry(message: impl Into<String>) -> QuadRefineError {
    QuadRefineError::InvalidGeometry(message.into())
}

/// Generate a structured 2D quad mesh over `[min, max]` with `nx`×`ny` cells.
///
/// Vertices are numbered row by row from `min`; cells likewise, each
/// counter-clockwise. Boundary segments run counter-clockwise around the
/// domain and are filed under the class of their side; the mesh gets
/// `max(side_classes) + 1` boundary lists.
pub fn structured_quad_grid(
    nx: usize,
    ny: usize,
    min: [f64; 2],
    max: [f64; 2],
    options: MeshGenOptions,
) -> Result<QuadMesh, QuadRefineError> {
    if nx == 0 || ny == 0 {
        return Err(invalid_geometry("nx and ny must be positive"));
    }
    if !(max[0] > min[0] && max[1] > min[1]) {
        return Err(invalid_geometry(format!(
            "empty domain [{min:?}, {max:?}]"
        )));
    }

    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let row_stride = nx + 1;
    let vertex = |i: usize, j: usize| j * row_stride + i;

    let coordinates = iproduct!(0..=ny, 0..=nx)
        .map(|(j, i)| [min[0] + dx * i as f64, min[1] + dy * j as f64])
        .collect();

    let elements = iproduct!(0..ny, 0..nx)
        .map(|(j, i)| {
            [
                vertex(i, j),
                vertex(i + 1, j),
                vertex(i + 1, j + 1),
                vertex(i, j + 1),
            ]
        })
        .collect();

    let num_classes = options.side_classes.iter().max().map_or(0, |c| c + 1);
    let mut boundaries: Vec<Vec<Segment>> = vec![Vec::new(); num_classes];
    for (side, &class) in Side::ALL.into_iter().zip(&options.side_classes) {
        let segments = &mut boundaries[class];
        match side {
            Side::Bottom => segments.extend((0..nx).map(|i| [vertex(i, 0), vertex(i + 1, 0)])),
            Side::Right => {
                segments.extend((0..ny).map(|j| [vertex(nx, j), vertex(nx, j + 1)]))
            }
            Side::Top => segments.extend(
                (0..nx)
                    .rev()
                    .map(|i| [vertex(i + 1, ny), vertex(i, ny)]),
            ),
            Side::Left => {
                segments.extend((0..ny).rev().map(|j| [vertex(0, j + 1), vertex(0, j)]))
            }
        }
    }

    Ok(QuadMesh {
        coordinates,
        elements,
        boundaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts_and_orientation() {
        let mesh = structured_quad_grid(3, 2, [0.0, 0.0], [3.0, 2.0], MeshGenOptions::default())
            .unwrap();
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_elements(), 6);
        assert!((0..6).all(|e| (mesh.signed_area(e) - 1.0).abs() < 1e-12));
        assert_eq!(mesh.boundaries.len(), 2);
        assert_eq!(mesh.boundaries[0], vec![[0, 1], [1, 2], [2, 3]]);
        assert_eq!(mesh.boundaries[1].len(), 2 + 3 + 2);
    }

    #[test]
    fn single_class_collects_every_side() {
        let options = MeshGenOptions {
            side_classes: [0; 4],
        };
        let mesh = structured_quad_grid(2, 2, [0.0, 0.0], [1.0, 1.0], options).unwrap();
        assert_eq!(mesh.boundaries.len(), 1);
        assert_eq!(mesh.boundaries[0].len(), 8);
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(structured_quad_grid(0, 2, [0.0, 0.0], [1.0, 1.0], MeshGenOptions::default())
            .is_err());
        assert!(structured_quad_grid(2, 2, [1.0, 0.0], [1.0, 1.0], MeshGenOptions::default())
            .is_err());
    }
}
