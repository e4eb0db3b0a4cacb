//! Struct and functions for working with the `Vertex`s a mesh's triangles
//! are gathered into.

use crate::float_types::{EPSILON, Real};
use nalgebra::{Point3, Vector2, Vector3};

/// A mesh vertex: position, shading normal, and texture coordinate.
///
/// This is the unit the clipper interpolates; a triangle handed to the
/// cutting engine always carries three of these, with missing source
/// attributes synthesized beforehand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub uv: Vector2<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`], zeroing any non-finite component.
    #[inline]
    pub fn new(mut pos: Point3<Real>, mut normal: Vector3<Real>, mut uv: Vector2<Real>) -> Self {
        // Sanitise position
        for c in pos.coords.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }

        // Sanitise normal
        for c in normal.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }

        // Sanitise uv
        for c in uv.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }

        Vertex { pos, normal, uv }
    }

    /// Flip vertex normal in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linear interpolation toward `other` at parameter `t`.
    ///
    /// Position and UV are lerped. The normal is lerped and then
    /// renormalized so it leaves here unit length again; a near-zero blend
    /// (opposing normals) falls back to `self.normal`.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let pos = self.pos + (other.pos - self.pos) * t;

        let mut normal = self.normal + (other.normal - self.normal) * t;
        let norm = normal.norm();
        if norm > EPSILON {
            normal /= norm;
        } else {
            normal = self.normal;
        }

        let uv = self.uv + (other.uv - self.uv) * t;

        Vertex { pos, normal, uv }
    }
}
