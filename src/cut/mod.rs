//! Destructive plane cuts on [`TriangleMesh`].

pub mod cap;
pub mod clip;

pub use cap::{CapGeometry, build_cap, collect_intersection_points};
pub use clip::clip_triangle;

use crate::float_types::{Precision, Real};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use crate::mesh::TriangleMesh;
use hashbrown::HashMap;
use nalgebra::Matrix4;

/// Scale quantizing dedup keys to 6 decimal digits. Cut-edge vertices
/// reached independently from adjacent triangles must collapse to one index,
/// or the cap ring cannot close against the rim.
const DEDUP_SCALE: Real = 1e6;

/// Outcome of one committed cut on one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutReport {
    pub triangles_before: usize,
    pub triangles_after: usize,
    pub cap_triangles: usize,
    /// False when the plane crossed the surface but no cap could be built;
    /// the solid is left with an open cut face.
    pub sealed: bool,
    /// True when every triangle was discarded and the mesh is now empty.
    /// The caller decides whether the shape should be deleted.
    pub emptied: bool,
}

/// Accumulates clipped triangles into fresh indexed buffers, collapsing
/// position-identical vertices through a quantized key.
struct MeshAccumulator {
    positions: Vec<Real>,
    normals: Vec<Real>,
    uvs: Vec<Real>,
    indices: Vec<u32>,
    dedup: HashMap<(i64, i64, i64), u32>,
}

impl MeshAccumulator {
    fn new() -> Self {
        MeshAccumulator {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
            dedup: HashMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn push_raw(&mut self, vertex: &Vertex) -> u32 {
        let idx = (self.positions.len() / 3) as u32;
        self.positions
            .extend_from_slice(&[vertex.pos.x, vertex.pos.y, vertex.pos.z]);
        self.normals
            .extend_from_slice(&[vertex.normal.x, vertex.normal.y, vertex.normal.z]);
        self.uvs.extend_from_slice(&[vertex.uv.x, vertex.uv.y]);
        idx
    }

    fn add_vertex(&mut self, vertex: &Vertex) -> u32 {
        let key = (
            (vertex.pos.x * DEDUP_SCALE).round() as i64,
            (vertex.pos.y * DEDUP_SCALE).round() as i64,
            (vertex.pos.z * DEDUP_SCALE).round() as i64,
        );
        if let Some(&idx) = self.dedup.get(&key) {
            return idx;
        }
        let idx = self.push_raw(vertex);
        self.dedup.insert(key, idx);
        idx
    }

    fn push_triangle(&mut self, tri: &[Vertex; 3]) {
        let a = self.add_vertex(&tri[0]);
        let b = self.add_vertex(&tri[1]);
        let c = self.add_vertex(&tri[2]);
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append cap vertices verbatim (the cap ring is not welded against the
    /// rim) with indices rebased onto this buffer.
    fn push_cap(&mut self, cap: CapGeometry) {
        let base = (self.positions.len() / 3) as u32;
        for v in &cap.vertices {
            self.push_raw(v);
        }
        for i in cap.indices {
            self.indices.push(base + i);
        }
    }

    fn into_mesh(self) -> TriangleMesh {
        TriangleMesh::from_buffers(
            self.positions,
            Some(self.normals),
            Some(self.uvs),
            Some(self.indices),
        )
    }
}

impl TriangleMesh {
    /// Cut this mesh by a world-space plane, keeping the front side and
    /// sealing the cut surface with a cap fan.
    ///
    /// `world_transform` is the mesh's local→world matrix; the plane is
    /// brought into local space first so clipping is independent of the
    /// shape's placement, rotation, and scale.
    ///
    /// Destructive: the previous buffers are replaced (and dropped) before
    /// this returns, on every path. A cut that discards everything leaves
    /// the mesh empty for the caller to deal with.
    pub fn cut_by_plane(
        &mut self,
        world_transform: &Matrix4<Real>,
        plane: &Plane,
        precision: Precision,
    ) -> CutReport {
        let epsilon = precision.epsilon();
        let world_to_local = world_transform
            .try_inverse()
            .unwrap_or_else(Matrix4::identity);
        let local_plane = plane.transformed(&world_to_local);

        let triangles_before = self.triangle_count();

        let mut acc = MeshAccumulator::new();
        for t in 0..triangles_before {
            let tri = self.triangle(t);
            for clipped in clip_triangle(&tri, &local_plane, epsilon) {
                acc.push_triangle(&clipped);
            }
        }

        // Second pass over the original triangles: collect the cut-edge
        // crossings the cap is built from.
        let mut crossings = Vec::new();
        for t in 0..triangles_before {
            let tri = self.triangle_positions(t);
            collect_intersection_points(&tri, &local_plane, epsilon, &mut crossings);
        }

        let mut cap_triangles = 0;
        let mut sealed = true;
        if !crossings.is_empty() {
            let cap = build_cap(&crossings, &local_plane);
            if cap.is_empty() {
                sealed = false;
                log::warn!(
                    "plane crossed the surface at {} point(s) but no cap was built; cut face left open",
                    crossings.len()
                );
            } else {
                cap_triangles = cap.triangle_count();
                acc.push_cap(cap);
            }
        }

        let emptied = acc.is_empty();
        let mut rebuilt = acc.into_mesh();
        if !emptied {
            // Smooth shading across the rebuilt surface, overriding the
            // clipper's interpolated normals.
            rebuilt.compute_vertex_normals();
        }
        let triangles_after = rebuilt.triangle_count();

        // Old buffers are dropped here, emptied or not.
        self.replace_geometry(rebuilt);

        log::debug!(
            "cut: {triangles_before} -> {triangles_after} triangles ({cap_triangles} cap)"
        );

        CutReport {
            triangles_before,
            triangles_after,
            cap_triangles,
            sealed,
            emptied,
        }
    }
}
