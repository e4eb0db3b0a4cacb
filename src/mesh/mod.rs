//! `TriangleMesh`: the flat-buffer mesh the cutting engine operates on.

use crate::float_types::{EPSILON, Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Point3, Vector2, Vector3};
use std::sync::OnceLock;

pub mod plane;
pub mod vertex;

use vertex::Vertex;

/// Triangle mesh in buffer form, mirroring the render layer's geometry
/// layout: flat position floats (3 per vertex), optional normals (3 per
/// vertex), optional UVs (2 per vertex), and an optional triangle index
/// buffer. Without indices, every consecutive run of 3 vertices forms a
/// triangle.
///
/// The mesh trusts its construction contract (indices in range, attribute
/// buffers matching the vertex count); the shape factories are the only
/// sanctioned producers and are responsible for upholding it.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    pub positions: Vec<Real>,
    pub normals: Option<Vec<Real>>,
    pub uvs: Option<Vec<Real>>,
    pub indices: Option<Vec<u32>>,

    /// Lazily calculated AABB that spans `positions`.
    bounding_box: OnceLock<Aabb>,
}

impl TriangleMesh {
    /// An empty mesh (zero vertices, zero triangles).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from raw buffers.
    pub fn from_buffers(
        positions: Vec<Real>,
        normals: Option<Vec<Real>>,
        uvs: Option<Vec<Real>>,
        indices: Option<Vec<u32>>,
    ) -> Self {
        debug_assert_eq!(positions.len() % 3, 0);
        if let Some(normals) = &normals {
            debug_assert_eq!(normals.len(), positions.len());
        }
        if let Some(uvs) = &uvs {
            debug_assert_eq!(uvs.len() / 2, positions.len() / 3);
        }
        if let Some(indices) = &indices {
            debug_assert_eq!(indices.len() % 3, 0);
            debug_assert!(
                indices
                    .iter()
                    .all(|&i| (i as usize) < positions.len() / 3)
            );
        }

        TriangleMesh {
            positions,
            normals,
            uvs,
            indices,
            bounding_box: OnceLock::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 9,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex indices of triangle `i`, with implicit sequential grouping
    /// when the mesh is non-indexed.
    pub fn triangle_indices(&self, i: usize) -> [usize; 3] {
        match &self.indices {
            Some(indices) => [
                indices[3 * i] as usize,
                indices[3 * i + 1] as usize,
                indices[3 * i + 2] as usize,
            ],
            None => [3 * i, 3 * i + 1, 3 * i + 2],
        }
    }

    pub fn position(&self, vertex: usize) -> Point3<Real> {
        Point3::new(
            self.positions[3 * vertex],
            self.positions[3 * vertex + 1],
            self.positions[3 * vertex + 2],
        )
    }

    fn stored_normal(&self, vertex: usize) -> Option<Vector3<Real>> {
        self.normals.as_ref().map(|n| {
            Vector3::new(n[3 * vertex], n[3 * vertex + 1], n[3 * vertex + 2])
        })
    }

    fn stored_uv(&self, vertex: usize) -> Option<Vector2<Real>> {
        self.uvs
            .as_ref()
            .map(|uv| Vector2::new(uv[2 * vertex], uv[2 * vertex + 1]))
    }

    /// The three corner positions of triangle `i`.
    pub fn triangle_positions(&self, i: usize) -> [Point3<Real>; 3] {
        let [a, b, c] = self.triangle_indices(i);
        [self.position(a), self.position(b), self.position(c)]
    }

    /// Centroid of triangle `i`.
    pub fn triangle_centroid(&self, i: usize) -> Point3<Real> {
        let [a, b, c] = self.triangle_positions(i);
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Gather triangle `i` as fully-attributed vertices. A missing normal
    /// buffer is replaced by the face normal at all three corners, a missing
    /// UV buffer by the canonical (0,0) / (1,0) / (0.5,1) assignment.
    pub fn triangle(&self, i: usize) -> [Vertex; 3] {
        let idx = self.triangle_indices(i);
        let pos = [self.position(idx[0]), self.position(idx[1]), self.position(idx[2])];

        let face = face_normal(&pos[0], &pos[1], &pos[2]);
        let default_uvs = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.5, 1.0),
        ];

        [0usize, 1, 2].map(|k| {
            let normal = self.stored_normal(idx[k]).unwrap_or(face);
            let uv = self.stored_uv(idx[k]).unwrap_or(default_uvs[k]);
            Vertex { pos: pos[k], normal, uv }
        })
    }

    /// Recompute smooth per-vertex normals by area-weighted averaging of the
    /// adjacent face normals, replacing whatever normal buffer existed. The
    /// cutter calls this after rebuilding so shading stays smooth across the
    /// new cut surface.
    pub fn compute_vertex_normals(&mut self) {
        let count = self.vertex_count();
        let mut accumulated = vec![Vector3::<Real>::zeros(); count];

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle_indices(t);
            let pa = self.position(a);
            let pb = self.position(b);
            let pc = self.position(c);

            // the cross product is already area-weighted
            let face = (pb - pa).cross(&(pc - pa));
            accumulated[a] += face;
            accumulated[b] += face;
            accumulated[c] += face;
        }

        let mut normals = Vec::with_capacity(count * 3);
        for n in accumulated {
            let norm = n.norm();
            let n = if norm > EPSILON { n / norm } else { Vector3::z() };
            normals.extend_from_slice(&[n.x, n.y, n.z]);
        }
        self.normals = Some(normals);
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all vertices.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            if self.positions.is_empty() {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in 0..self.vertex_count() {
                let p = self.position(v);
                for k in 0..3 {
                    mins[k] = mins[k].min(p[k]);
                    maxs[k] = maxs[k].max(p[k]);
                }
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Invalidates the cached bounding box.
    pub fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Swap in freshly built buffers. The previous buffers are dropped
    /// before this returns, on every path; the render layer mirrors the
    /// swap by disposing its GPU-side copy.
    pub fn replace_geometry(&mut self, new: TriangleMesh) {
        let old = std::mem::replace(self, new);
        drop(old);
    }
}

/// Geometric (face) normal of a triangle, +Z for degenerate triangles.
pub fn face_normal(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Vector3<Real> {
    let n = (b - a).cross(&(c - a));
    let norm = n.norm();
    if norm > EPSILON { n / norm } else { Vector3::z() }
}
