//! Plane/triangle clipping with attribute interpolation.

use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;

/// Clip one triangle against `plane`, keeping the front side.
///
/// `epsilon` is the half-width of the on-plane band. A vertex inside the
/// band counts as kept, so a triangle grazing the plane survives whole
/// instead of shedding zero-area slivers, at the cost of a small bias
/// toward the front side. The bias is intentional.
///
/// Returns no triangles (fully behind), the input unchanged (no vertex
/// strictly behind), or the kept 3-or-4-gon fan-triangulated into 1–2
/// triangles. Output winding follows the input; interpolated normals come
/// back renormalized.
pub fn clip_triangle(triangle: &[Vertex; 3], plane: &Plane, epsilon: Real) -> Vec<[Vertex; 3]> {
    let distances = [
        plane.signed_distance(&triangle[0].pos),
        plane.signed_distance(&triangle[1].pos),
        plane.signed_distance(&triangle[2].pos),
    ];

    let front = distances.iter().filter(|d| **d > epsilon).count();
    let behind = distances.iter().filter(|d| **d < -epsilon).count();

    // No vertex strictly behind: keep the triangle as-is.
    if behind == 0 {
        return vec![*triangle];
    }
    // No vertex strictly in front: discard.
    if front == 0 {
        return Vec::new();
    }

    // Straddling. Walk the edges in order, emitting kept vertices and edge
    // crossings; the result is an ordered polygon of 3 or 4 vertices.
    let mut kept: Vec<Vertex> = Vec::with_capacity(4);
    for i in 0..3 {
        let j = (i + 1) % 3;
        let di = distances[i];
        let dj = distances[j];

        if di >= -epsilon {
            kept.push(triangle[i]);
        }

        if (di > epsilon && dj < -epsilon) || (di < -epsilon && dj > epsilon) {
            let t = di.abs() / (di.abs() + dj.abs());
            kept.push(triangle[i].interpolate(&triangle[j], t));
        }
    }

    // Fan from the first vertex: a quad becomes two triangles.
    let mut result = Vec::with_capacity(kept.len().saturating_sub(2));
    for i in 1..kept.len().saturating_sub(1) {
        result.push([kept[0], kept[i], kept[i + 1]]);
    }
    result
}
