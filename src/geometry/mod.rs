//! Geometry utilities for quad-refine.
//!
//! Point construction for new vertices (midpoints, centres, bilinear interior
//! points) and basic quadrilateral quality checks.

pub mod quality;

use crate::mesh::Vertex;

/// Bilinear weights (in sixteenths) of the interior point near `M1`.
pub const SOUTH_WEIGHTS: [f64; 4] = [9.0, 3.0, 1.0, 3.0];
/// Bilinear weights (in sixteenths) of the interior point near `M2`.
pub const SOUTH_EAST_WEIGHTS: [f64; 4] = [3.0, 9.0, 3.0, 1.0];
/// Bilinear weights (in sixteenths) of the interior point near `M3`.
pub const EAST_WEIGHTS: [f64; 4] = [1.0, 3.0, 9.0, 3.0];

/// Arithmetic mean of two points.
#[inline]
pub fn midpoint(a: Vertex, b: Vertex) -> Vertex {
    [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1])]
}

/// Arithmetic mean of the four corners of a quadrilateral.
#[inline]
pub fn centroid(corners: &[Vertex; 4]) -> Vertex {
    weighted_point(corners, &[1.0, 1.0, 1.0, 1.0])
}

/// Weighted average of four corners; the weights are normalised by their sum.
pub fn weighted_point(corners: &[Vertex; 4], weights: &[f64; 4]) -> Vertex {
    let total: f64 = weights.iter().sum();
    let mut p = [0.0, 0.0];
    for (c, w) in corners.iter().zip(weights) {
        p[0] += w * c[0];
        p[1] += w * c[1];
    }
    [p[0] / total, p[1] / total]
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: [Vertex; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    #[test]
    fn bilinear_points_sit_at_quarter_positions() {
        assert_eq!(weighted_point(&UNIT, &SOUTH_WEIGHTS), [0.25, 0.25]);
        assert_eq!(weighted_point(&UNIT, &SOUTH_EAST_WEIGHTS), [0.75, 0.25]);
        assert_eq!(weighted_point(&UNIT, &EAST_WEIGHTS), [0.75, 0.75]);
    }

    #[test]
    fn centroid_and_midpoint() {
        assert_eq!(centroid(&UNIT), [0.5, 0.5]);
        assert_eq!(midpoint([0.0, 2.0], [4.0, 0.0]), [2.0, 1.0]);
    }
}
