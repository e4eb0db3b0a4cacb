//! Cut-face (cap) reconstruction from the plane crossings of a mesh's
//! original triangle edges.

use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector2};

/// Weld threshold for crossing points computed from adjacent triangles.
/// Deliberately coarser than any clipping epsilon: the same cut-edge point
/// reached from two neighbouring triangles agrees only to the last float
/// bits.
pub const WELD_EPSILON: Real = 1e-3;

/// Cap geometry ready to append onto a rebuilt mesh: fan vertices (centroid
/// first) and triangle indices relative to the cap's own vertex block.
#[derive(Debug, Default)]
pub struct CapGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl CapGeometry {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Collect the crossings of `triangle`'s edges with `plane` into `points`.
///
/// This runs over the *original* (pre-clip) triangles, so both triangles
/// sharing a cut edge contribute the same crossing and the cap ring closes.
pub fn collect_intersection_points(
    triangle: &[Point3<Real>; 3],
    plane: &Plane,
    epsilon: Real,
    points: &mut Vec<Point3<Real>>,
) {
    let distances = [
        plane.signed_distance(&triangle[0]),
        plane.signed_distance(&triangle[1]),
        plane.signed_distance(&triangle[2]),
    ];

    for i in 0..3 {
        let j = (i + 1) % 3;
        let di = distances[i];
        let dj = distances[j];

        if (di > epsilon && dj < -epsilon) || (di < -epsilon && dj > epsilon) {
            let t = di.abs() / (di.abs() + dj.abs());
            points.push(triangle[i] + (triangle[j] - triangle[i]) * t);
        }
    }
}

/// Build a closed triangle fan sealing the cut.
///
/// Near-identical points are welded at [`WELD_EPSILON`]; fewer than 3 unique
/// points yield an empty cap and the cut face stays open. The remaining
/// points are projected into an in-plane frame, sorted by angle around their
/// centroid, and fanned from the centroid.
///
/// This assumes the crossings trace a single convex-ish loop. A plane that
/// crosses the solid more than once (a torus cut through both rings) still
/// produces a cap, just a visually wrong one. A known limitation of the
/// angular sort, not an error.
pub fn build_cap(points: &[Point3<Real>], plane: &Plane) -> CapGeometry {
    if points.len() < 3 {
        return CapGeometry::default();
    }

    // Weld near-identical crossings.
    let mut unique: Vec<Point3<Real>> = Vec::new();
    for p in points {
        if unique.iter().all(|q| (p - q).norm() >= WELD_EPSILON) {
            unique.push(*p);
        }
    }
    if unique.len() < 3 {
        return CapGeometry::default();
    }

    let centroid = Point3::from(
        unique
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords)
            / unique.len() as Real,
    );

    // Project into the plane's (u, v) frame and sort by angle around the
    // centroid.
    let (u, v) = plane.basis();
    let mut ring: Vec<(Point3<Real>, Real, Real, Real)> = unique
        .iter()
        .map(|p| {
            let rel = p - centroid;
            let x = rel.dot(&u);
            let y = rel.dot(&v);
            (*p, x, y, y.atan2(x))
        })
        .collect();
    ring.sort_by(|a, b| a.3.total_cmp(&b.3));

    let mut cap = CapGeometry::default();

    // Centroid first, boundary ring after; every cap normal is the plane
    // normal, UVs are remapped from the in-plane projection.
    cap.vertices
        .push(Vertex::new(centroid, plane.normal, Vector2::new(0.5, 0.5)));
    for &(p, x, y, _) in &ring {
        cap.vertices.push(Vertex::new(
            p,
            plane.normal,
            Vector2::new((x + 1.0) * 0.5, (y + 1.0) * 0.5),
        ));
    }

    let n = ring.len() as u32;
    for i in 0..n {
        let next = (i + 1) % n;
        cap.indices.extend_from_slice(&[0, i + 1, next + 1]);
    }

    cap
}
