//! Quadrilateral quality utilities.
//!
//! # Vertex ordering
//! Quads are `[v0, v1, v2, v3]`, counter-clockwise in XY. A positive signed
//! area means correct orientation; zero means degenerate.
//!
//! # Examples
//! ```rust
//! use quad_refine::geometry::quality::{quad_quality, validate_quad_geometry};
//!
//! let quad = [[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]];
//! let quality = quad_quality(&quad)?;
//! assert_eq!(quality.signed_area, 2.0);
//! assert_eq!(quality.aspect_ratio, 2.0);
//! validate_quad_geometry(&quad)?;
//! # Ok::<(), quad_refine::mesh_error::QuadRefineError>(())
//! ```

use crate::mesh::{QuadMesh, Vertex};
use crate::mesh_error::QuadRefineError;
use std::f64::consts::PI;

const EPS: f64 = 1e-12;

/// Basic quality metrics for a single quadrilateral.
#[derive(Clone, Copy, Debug)]
pub struct QuadQuality {
    /// Ratio of the longest edge length to the shortest edge length.
    pub aspect_ratio: f64,
    /// Minimum interior corner angle in degrees.
    pub min_angle_deg: f64,
    /// Signed area; negative values indicate clockwise (inverted) corners.
    pub signed_area: f64,
}

/// Signed area of a quadrilateral by the shoelace formula.
pub fn quad_signed_area(corners: &[Vertex; 4]) -> f64 {
    let mut twice = 0.0;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        twice += a[0] * b[1] - a[1] * b[0];
    }
    0.5 * twice
}

/// Compute quality metrics for a quadrilateral.
pub fn quad_quality(corners: &[Vertex; 4]) -> Result<QuadQuality, QuadRefineError> {
    let mut min_len = f64::INFINITY;
    let mut max_len = 0.0f64;
    let mut min_angle = f64::INFINITY;
    for i in 0..4 {
        let prev = corners[(i + 3) % 4];
        let curr = corners[i];
        let next = corners[(i + 1) % 4];
        let len = norm(sub(next, curr));
        if len <= EPS {
            return Err(QuadRefineError::InvalidGeometry(
                "zero-length edge detected".into(),
            ));
        }
        min_len = min_len.min(len);
        max_len = max_len.max(len);
        min_angle = min_angle.min(angle_deg(sub(prev, curr), sub(next, curr))?);
    }
    Ok(QuadQuality {
        aspect_ratio: max_len / min_len,
        min_angle_deg: min_angle,
        signed_area: quad_signed_area(corners),
    })
}

/// Validate that a quadrilateral is neither inverted nor degenerate.
///
/// Returns the computed quality metrics on success.
pub fn validate_quad_geometry(corners: &[Vertex; 4]) -> Result<QuadQuality, QuadRefineError> {
    let quality = quad_quality(corners)?;
    if !quality.signed_area.is_finite() || quality.signed_area.abs() <= EPS {
        return Err(QuadRefineError::InvalidGeometry(format!(
            "degenerate geometry: signed area = {}",
            quality.signed_area
        )));
    }
    if quality.signed_area < 0.0 {
        return Err(QuadRefineError::InvalidGeometry(format!(
            "inverted geometry: signed area = {}",
            quality.signed_area
        )));
    }
    if !quality.min_angle_deg.is_finite() || quality.min_angle_deg <= 0.0 {
        return Err(QuadRefineError::InvalidGeometry(format!(
            "invalid geometry: min angle = {}",
            quality.min_angle_deg
        )));
    }
    Ok(quality)
}

/// Validate every element of a mesh, reporting the first offending element.
pub fn validate_mesh_geometry(mesh: &QuadMesh) -> Result<(), QuadRefineError> {
    for (e, element) in mesh.elements.iter().enumerate() {
        let mut corners = [[0.0; 2]; 4];
        for (slot, &v) in corners.iter_mut().zip(element) {
            *slot = *mesh.coordinates.get(v).ok_or_else(|| {
                QuadRefineError::InvalidTopology(format!(
                    "element {e} references missing vertex {v}"
                ))
            })?;
        }
        validate_quad_geometry(&corners).map_err(|err| {
            QuadRefineError::InvalidGeometry(format!("element {e}: {err}"))
        })?;
    }
    Ok(())
}

fn sub(a: Vertex, b: Vertex) -> Vertex {
    [a[0] - b[0], a[1] - b[1]]
}

fn dot(a: Vertex, b: Vertex) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

fn norm(a: Vertex) -> f64 {
    dot(a, a).sqrt()
}

fn angle_deg(a: Vertex, b: Vertex) -> Result<f64, QuadRefineError> {
    let na = norm(a);
    let nb = norm(b);
    if na <= EPS || nb <= EPS {
        return Err(QuadRefineError::InvalidGeometry(
            "zero-length edge detected".into(),
        ));
    }
    let cos = (dot(a, b) / (na * nb)).clamp(-1.0, 1.0);
    Ok(cos.acos() * 180.0 / PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clockwise_quad_is_rejected() {
        let quad = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
        assert!(quad_signed_area(&quad) < 0.0);
        assert!(matches!(
            validate_quad_geometry(&quad),
            Err(QuadRefineError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn collapsed_edge_is_rejected() {
        let quad = [[0.0, 0.0], [0.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert!(quad_quality(&quad).is_err());
    }

    #[test]
    fn unit_square_has_right_angles() {
        let quad = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let q = validate_quad_geometry(&quad).unwrap();
        assert!((q.min_angle_deg - 90.0).abs() < 1e-9);
        assert_eq!(q.aspect_ratio, 1.0);
    }
}
