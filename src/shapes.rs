//! Primitive solid generators.
//!
//! All generators produce fully attributed [`TriangleMesh`]es (positions,
//! normals, UVs) centered on the origin with Y up, matching the sandbox's
//! default placement conventions (boxes and spheres centered, cylinders and
//! cones standing on the Y axis, the torus lying in the XY plane). The
//! platonic solids come out as non-indexed soups so both storage layouts of
//! the mesh contract stay exercised; everything else is indexed.

use crate::boolean::BooleanOp;
use crate::float_types::{EPSILON, PI, Real, TAU};
use crate::mesh::TriangleMesh;
use nalgebra::{Point3, Vector3};

/// Shape parameter records: enough metadata to rebuild a pristine primitive,
/// and what the config layer persists alongside transform, color, and
/// visibility.
///
/// Geometry baked in afterwards (cuts, boolean results) is *not*
/// re-derivable from a record; restoring one yields the untouched primitive.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Cube { width: Real, height: Real, depth: Real },
    Sphere { radius: Real, segments: usize, stacks: usize },
    Cylinder { radius: Real, height: Real, segments: usize },
    Cone { radius: Real, height: Real, segments: usize },
    Pyramid { radius: Real, height: Real },
    Torus { ring_radius: Real, tube_radius: Real, radial_segments: usize, tubular_segments: usize },
    Dodecahedron { radius: Real },
    Icosahedron { radius: Real },
    /// Output of a boolean combine; its parameters alone cannot rebuild it.
    BooleanResult { op: BooleanOp },
}

impl ShapeKind {
    // The sandbox's default dimensions for each primitive.

    pub const fn cube() -> Self {
        ShapeKind::Cube { width: 2.0, height: 2.0, depth: 2.0 }
    }

    pub const fn sphere() -> Self {
        ShapeKind::Sphere { radius: 1.5, segments: 32, stacks: 32 }
    }

    pub const fn cylinder() -> Self {
        ShapeKind::Cylinder { radius: 1.0, height: 3.0, segments: 32 }
    }

    pub const fn cone() -> Self {
        ShapeKind::Cone { radius: 1.5, height: 3.0, segments: 32 }
    }

    pub const fn pyramid() -> Self {
        ShapeKind::Pyramid { radius: 1.5, height: 3.0 }
    }

    pub const fn torus() -> Self {
        ShapeKind::Torus {
            ring_radius: 1.5,
            tube_radius: 0.5,
            radial_segments: 16,
            tubular_segments: 100,
        }
    }

    pub const fn dodecahedron() -> Self {
        ShapeKind::Dodecahedron { radius: 1.5 }
    }

    pub const fn icosahedron() -> Self {
        ShapeKind::Icosahedron { radius: 1.5 }
    }

    /// Build the primitive, or `None` for kinds that cannot be rebuilt from
    /// parameters.
    pub fn build(&self) -> Option<TriangleMesh> {
        match *self {
            ShapeKind::Cube { width, height, depth } => {
                Some(TriangleMesh::cuboid(width, height, depth))
            },
            ShapeKind::Sphere { radius, segments, stacks } => {
                Some(TriangleMesh::sphere(radius, segments, stacks))
            },
            ShapeKind::Cylinder { radius, height, segments } => {
                Some(TriangleMesh::cylinder(radius, height, segments))
            },
            ShapeKind::Cone { radius, height, segments } => {
                Some(TriangleMesh::cone(radius, height, segments))
            },
            // a pyramid is a 4-sided cone
            ShapeKind::Pyramid { radius, height } => Some(TriangleMesh::cone(radius, height, 4)),
            ShapeKind::Torus {
                ring_radius,
                tube_radius,
                radial_segments,
                tubular_segments,
            } => Some(TriangleMesh::torus(
                ring_radius,
                tube_radius,
                radial_segments,
                tubular_segments,
            )),
            ShapeKind::Dodecahedron { radius } => Some(TriangleMesh::dodecahedron(radius)),
            ShapeKind::Icosahedron { radius } => Some(TriangleMesh::icosahedron(radius)),
            ShapeKind::BooleanResult { .. } => None,
        }
    }
}

/// Index-buffer builder shared by the gridded generators.
struct GeometryBuilder {
    positions: Vec<Real>,
    normals: Vec<Real>,
    uvs: Vec<Real>,
    indices: Vec<u32>,
}

impl GeometryBuilder {
    fn new() -> Self {
        GeometryBuilder {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    fn vertex(&mut self, pos: Point3<Real>, normal: Vector3<Real>, u: Real, v: Real) -> u32 {
        let idx = (self.positions.len() / 3) as u32;
        self.positions.extend_from_slice(&[pos.x, pos.y, pos.z]);
        self.normals
            .extend_from_slice(&[normal.x, normal.y, normal.z]);
        self.uvs.extend_from_slice(&[u, v]);
        idx
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    fn build(self) -> TriangleMesh {
        TriangleMesh::from_buffers(
            self.positions,
            Some(self.normals),
            Some(self.uvs),
            Some(self.indices),
        )
    }
}

impl TriangleMesh {
    /// Axis-aligned box centered on the origin: 24 vertices (4 per face) so
    /// each face carries its own normal and a full 0..1 UV tile.
    pub fn cuboid(width: Real, height: Real, depth: Real) -> TriangleMesh {
        let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
        let mut g = GeometryBuilder::new();

        // (center, u half-axis, v half-axis); the face normal is u × v
        let faces: [(Vector3<Real>, Vector3<Real>, Vector3<Real>); 6] = [
            (Vector3::new(hx, 0.0, 0.0), Vector3::new(0.0, 0.0, -hz), Vector3::new(0.0, hy, 0.0)),
            (Vector3::new(-hx, 0.0, 0.0), Vector3::new(0.0, 0.0, hz), Vector3::new(0.0, hy, 0.0)),
            (Vector3::new(0.0, hy, 0.0), Vector3::new(hx, 0.0, 0.0), Vector3::new(0.0, 0.0, -hz)),
            (Vector3::new(0.0, -hy, 0.0), Vector3::new(hx, 0.0, 0.0), Vector3::new(0.0, 0.0, hz)),
            (Vector3::new(0.0, 0.0, hz), Vector3::new(hx, 0.0, 0.0), Vector3::new(0.0, hy, 0.0)),
            (Vector3::new(0.0, 0.0, -hz), Vector3::new(-hx, 0.0, 0.0), Vector3::new(0.0, hy, 0.0)),
        ];

        for (center, u, v) in faces {
            let normal = u.cross(&v).normalize();
            let a = g.vertex(Point3::from(center - u - v), normal, 0.0, 0.0);
            let b = g.vertex(Point3::from(center + u - v), normal, 1.0, 0.0);
            let c = g.vertex(Point3::from(center + u + v), normal, 1.0, 1.0);
            let d = g.vertex(Point3::from(center - u + v), normal, 0.0, 1.0);
            g.triangle(a, b, c);
            g.triangle(a, c, d);
        }

        g.build()
    }

    pub fn cube(size: Real) -> TriangleMesh {
        Self::cuboid(size, size, size)
    }

    /// UV sphere around the Y axis: `(stacks + 1)` latitude rows by
    /// `(segments + 1)` longitude columns, with the seam column duplicated
    /// so UVs stay continuous.
    pub fn sphere(radius: Real, segments: usize, stacks: usize) -> TriangleMesh {
        let mut g = GeometryBuilder::new();

        for j in 0..=stacks {
            let v = j as Real / stacks as Real;
            let phi = v * PI;
            for i in 0..=segments {
                let u = i as Real / segments as Real;
                let theta = u * TAU;

                let pos = Point3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                let normal = if pos.coords.norm() > EPSILON {
                    pos.coords.normalize()
                } else {
                    Vector3::y()
                };
                g.vertex(pos, normal, u, 1.0 - v);
            }
        }

        let row = (segments + 1) as u32;
        for j in 0..stacks as u32 {
            for i in 0..segments as u32 {
                let a = j * row + i;
                let b = (j + 1) * row + i;
                let c = b + 1;
                let d = a + 1;

                // skip the degenerate triangle collapsed onto each pole
                if j != 0 {
                    g.triangle(a, d, b);
                }
                if j != stacks as u32 - 1 {
                    g.triangle(d, c, b);
                }
            }
        }

        g.build()
    }

    /// Truncated cone standing on the Y axis, centered vertically. Radii may
    /// differ per end; a zero top radius gives a cone, zero bottom a funnel.
    pub fn frustum(
        radius_top: Real,
        radius_bottom: Real,
        height: Real,
        segments: usize,
    ) -> TriangleMesh {
        let mut g = GeometryBuilder::new();
        let half = height * 0.5;
        let slope = (radius_bottom - radius_top) / height;

        // Side: two rings with smooth slanted normals.
        let mut top_ring = Vec::with_capacity(segments + 1);
        let mut bottom_ring = Vec::with_capacity(segments + 1);
        for i in 0..=segments {
            let u = i as Real / segments as Real;
            let theta = u * TAU;
            let (sin, cos) = (theta.sin(), theta.cos());
            let normal = Vector3::new(cos, slope, sin).normalize();

            top_ring.push(g.vertex(
                Point3::new(radius_top * cos, half, radius_top * sin),
                normal,
                u,
                1.0,
            ));
            bottom_ring.push(g.vertex(
                Point3::new(radius_bottom * cos, -half, radius_bottom * sin),
                normal,
                u,
                0.0,
            ));
        }
        for i in 0..segments {
            if radius_top > EPSILON {
                g.triangle(top_ring[i], top_ring[i + 1], bottom_ring[i]);
            }
            if radius_bottom > EPSILON {
                g.triangle(top_ring[i + 1], bottom_ring[i + 1], bottom_ring[i]);
            }
        }

        // Caps: fan around a center vertex, ring duplicated for flat normals.
        let mut cap = |y: Real, radius: Real, up: bool| {
            if radius <= EPSILON {
                return;
            }
            let normal = if up { Vector3::y() } else { -Vector3::y() };
            let center = g.vertex(Point3::new(0.0, y, 0.0), normal, 0.5, 0.5);
            let mut ring = Vec::with_capacity(segments + 1);
            for i in 0..=segments {
                let theta = i as Real / segments as Real * TAU;
                let (sin, cos) = (theta.sin(), theta.cos());
                ring.push(g.vertex(
                    Point3::new(radius * cos, y, radius * sin),
                    normal,
                    (cos + 1.0) * 0.5,
                    (sin + 1.0) * 0.5,
                ));
            }
            for i in 0..segments {
                if up {
                    g.triangle(center, ring[i + 1], ring[i]);
                } else {
                    g.triangle(center, ring[i], ring[i + 1]);
                }
            }
        };
        cap(half, radius_top, true);
        cap(-half, radius_bottom, false);

        g.build()
    }

    pub fn cylinder(radius: Real, height: Real, segments: usize) -> TriangleMesh {
        Self::frustum(radius, radius, height, segments)
    }

    /// Cone with its apex up. Four segments make the sandbox's pyramid.
    pub fn cone(radius: Real, height: Real, segments: usize) -> TriangleMesh {
        Self::frustum(0.0, radius, height, segments)
    }

    /// Torus lying in the XY plane: `ring_radius` to the tube center,
    /// `tube_radius` around it.
    pub fn torus(
        ring_radius: Real,
        tube_radius: Real,
        radial_segments: usize,
        tubular_segments: usize,
    ) -> TriangleMesh {
        let mut g = GeometryBuilder::new();

        for j in 0..=radial_segments {
            let v = j as Real / radial_segments as Real * TAU;
            for i in 0..=tubular_segments {
                let u = i as Real / tubular_segments as Real * TAU;

                let pos = Point3::new(
                    (ring_radius + tube_radius * v.cos()) * u.cos(),
                    (ring_radius + tube_radius * v.cos()) * u.sin(),
                    tube_radius * v.sin(),
                );
                let center =
                    Point3::new(ring_radius * u.cos(), ring_radius * u.sin(), 0.0);
                let normal = (pos - center).normalize();

                g.vertex(
                    pos,
                    normal,
                    i as Real / tubular_segments as Real,
                    j as Real / radial_segments as Real,
                );
            }
        }

        let row = (tubular_segments + 1) as u32;
        for j in 1..=radial_segments as u32 {
            for i in 1..=tubular_segments as u32 {
                let a = j * row + i - 1;
                let b = (j - 1) * row + i - 1;
                let c = (j - 1) * row + i;
                let d = j * row + i;
                g.triangle(a, b, d);
                g.triangle(b, c, d);
            }
        }

        g.build()
    }

    /// Regular dodecahedron scaled to `radius`.
    pub fn dodecahedron(radius: Real) -> TriangleMesh {
        let t = (1.0 + (5.0 as Real).sqrt()) / 2.0;
        let r = 1.0 / t;

        #[rustfmt::skip]
        let vertices: [[Real; 3]; 20] = [
            [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
            [0.0, -r, -t], [0.0, -r, t], [0.0, r, -t], [0.0, r, t],
            [-r, -t, 0.0], [-r, t, 0.0], [r, -t, 0.0], [r, t, 0.0],
            [-t, 0.0, -r], [t, 0.0, -r], [-t, 0.0, r], [t, 0.0, r],
        ];

        #[rustfmt::skip]
        let faces: [[usize; 3]; 36] = [
            [3, 11, 7], [3, 7, 15], [3, 15, 13],
            [7, 19, 17], [7, 17, 6], [7, 6, 15],
            [17, 4, 8], [17, 8, 10], [17, 10, 6],
            [8, 0, 16], [8, 16, 2], [8, 2, 10],
            [0, 12, 1], [0, 1, 18], [0, 18, 16],
            [6, 10, 2], [6, 2, 13], [6, 13, 15],
            [2, 16, 18], [2, 18, 3], [2, 3, 13],
            [18, 1, 9], [18, 9, 11], [18, 11, 3],
            [4, 14, 12], [4, 12, 0], [4, 0, 8],
            [11, 9, 5], [11, 5, 19], [11, 19, 7],
            [19, 5, 14], [19, 14, 4], [19, 4, 17],
            [1, 12, 14], [1, 14, 5], [1, 5, 9],
        ];

        polyhedron(&vertices, &faces, radius)
    }

    /// Regular icosahedron scaled to `radius`.
    pub fn icosahedron(radius: Real) -> TriangleMesh {
        let t = (1.0 + (5.0 as Real).sqrt()) / 2.0;

        #[rustfmt::skip]
        let vertices: [[Real; 3]; 12] = [
            [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
            [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
            [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
        ];

        #[rustfmt::skip]
        let faces: [[usize; 3]; 20] = [
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        polyhedron(&vertices, &faces, radius)
    }
}

/// Flat-shaded polyhedron from a canonical vertex/face table: every corner
/// is projected onto the sphere of `radius`, faces get their own duplicated
/// vertices (non-indexed soup) and spherically mapped UVs.
fn polyhedron(vertices: &[[Real; 3]], faces: &[[usize; 3]], radius: Real) -> TriangleMesh {
    let scaled: Vec<Point3<Real>> = vertices
        .iter()
        .map(|v| {
            let p = Vector3::new(v[0], v[1], v[2]).normalize() * radius;
            Point3::from(p)
        })
        .collect();

    let mut positions = Vec::with_capacity(faces.len() * 9);
    let mut normals = Vec::with_capacity(faces.len() * 9);
    let mut uvs = Vec::with_capacity(faces.len() * 6);

    for face in faces {
        let (a, b, c) = (scaled[face[0]], scaled[face[1]], scaled[face[2]]);
        let normal = crate::mesh::face_normal(&a, &b, &c);

        for p in [a, b, c] {
            positions.extend_from_slice(&[p.x, p.y, p.z]);
            normals.extend_from_slice(&[normal.x, normal.y, normal.z]);

            let u = p.z.atan2(p.x) / TAU + 0.5;
            let v = (p.y / radius).clamp(-1.0, 1.0).acos() / PI;
            uvs.extend_from_slice(&[u, v]);
        }
    }

    TriangleMesh::from_buffers(positions, Some(normals), Some(uvs), None)
}
