//! Approximate boolean operations on triangle soups.

use crate::float_types::Real;
use crate::mesh::TriangleMesh;
use nalgebra::Point3;

/// Fixed centroid-proximity threshold of the overlap heuristic.
pub const CENTROID_THRESHOLD: Real = 0.5;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BooleanOp {
    Subtract,
    Union,
    Intersect,
}

/// Combine two meshes with centroid-distance thresholding.
///
/// This is explicitly *not* exact CSG. Triangles are kept or dropped whole
/// depending on how close their centroid lies to the other soup's triangle
/// centroids, so results are visually plausible but neither watertight nor
/// geometrically exact, and `Union` concatenates without removing interior
/// seams. The heuristic contract is kept as-is for parity with the sandbox
/// it replaces; an exact upgrade would be a deliberate behavior change, not
/// a drop-in fix.
///
/// Both meshes are read in their own local frames; the caller places the
/// result (conventionally at the first operand's transform) and removes the
/// two source shapes.
///
/// Returns `None` when either input has no triangles, or when fewer than 3
/// triangles survive.
pub fn boolean_op(a: &TriangleMesh, b: &TriangleMesh, op: BooleanOp) -> Option<TriangleMesh> {
    if a.triangle_count() == 0 || b.triangle_count() == 0 {
        return None;
    }

    let b_centroids: Vec<Point3<Real>> = (0..b.triangle_count())
        .map(|t| b.triangle_centroid(t))
        .collect();
    let near_b = |c: &Point3<Real>| {
        b_centroids
            .iter()
            .any(|bc| (c - bc).norm() < CENTROID_THRESHOLD)
    };

    fn push_triangle(positions: &mut Vec<Real>, mesh: &TriangleMesh, t: usize) {
        for p in mesh.triangle_positions(t) {
            positions.extend_from_slice(&[p.x, p.y, p.z]);
        }
    }

    let mut positions: Vec<Real> = Vec::new();

    match op {
        BooleanOp::Union => {
            // plain concatenation, no seam removal
            for t in 0..a.triangle_count() {
                push_triangle(&mut positions, a, t);
            }
            for t in 0..b.triangle_count() {
                push_triangle(&mut positions, b, t);
            }
        },
        BooleanOp::Subtract => {
            for t in 0..a.triangle_count() {
                if !near_b(&a.triangle_centroid(t)) {
                    push_triangle(&mut positions, a, t);
                }
            }
        },
        BooleanOp::Intersect => {
            for t in 0..a.triangle_count() {
                if near_b(&a.triangle_centroid(t)) {
                    push_triangle(&mut positions, a, t);
                }
            }
        },
    }

    // fewer than 3 triangles' worth of vertices is a degenerate result
    if positions.len() < 27 {
        log::debug!("{op:?} result degenerate ({} floats)", positions.len());
        return None;
    }

    let mut result = TriangleMesh::from_buffers(positions, None, None, None);
    result.compute_vertex_normals();
    Some(result)
}
