//! Cutting planes: unit normal plus signed offset.

use crate::float_types::{EPSILON, Real};
use nalgebra::{Matrix4, Point3, Vector3};

/// A plane in constant-offset form: a point `p` lies on the plane when
/// `normal · p + offset == 0`. Positive signed distance is the *front* side,
/// the side a cut keeps.
///
/// The type trusts its input: callers supply a unit normal. Validating and
/// defaulting a degenerate normal happens at the session boundary, before a
/// plane can reach the cutting core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub offset: Real,
}

impl Plane {
    pub const fn new(normal: Vector3<Real>, offset: Real) -> Self {
        Plane { normal, offset }
    }

    /// Plane through `point` oriented by the unit `normal`.
    pub fn from_point_normal(point: &Point3<Real>, normal: Vector3<Real>) -> Self {
        Plane {
            normal,
            offset: -normal.dot(&point.coords),
        }
    }

    /// Signed distance of `point`: positive in front (kept by a cut),
    /// negative behind (discarded), zero on the plane.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) + self.offset
    }

    /// Flip the plane in place: the kept side becomes the discarded side.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }

    /// Return a flipped copy of this plane.
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// The foot of the perpendicular from the origin; a point on the plane.
    pub fn point_on_plane(&self) -> Point3<Real> {
        Point3::from(self.normal * -self.offset)
    }

    /// Build an orthonormal basis `(u, v)` spanning the plane, with
    /// `u × v = normal`.
    pub fn basis(&self) -> (Vector3<Real>, Vector3<Real>) {
        let u = if self.normal.x.abs() < 0.9 {
            Vector3::x().cross(&self.normal).normalize()
        } else {
            Vector3::y().cross(&self.normal).normalize()
        };
        let v = self.normal.cross(&u);
        (u, v)
    }

    /// Apply an affine transform to the plane.
    ///
    /// To express a world-space plane in a mesh's local frame, pass the
    /// inverse of the mesh's world transform. The normal travels through the
    /// inverse-transpose, the offset through a transformed on-plane
    /// reference point. A non-invertible matrix leaves the plane unchanged.
    pub fn transformed(&self, matrix: &Matrix4<Real>) -> Plane {
        let Some(inverse) = matrix.try_inverse() else {
            return *self;
        };

        let reference = matrix.transform_point(&self.point_on_plane());

        let normal_matrix = inverse.transpose().fixed_view::<3, 3>(0, 0).into_owned();
        let normal = normal_matrix * self.normal;
        let norm = normal.norm();
        if norm < EPSILON {
            return *self;
        }
        let normal = normal / norm;

        Plane {
            normal,
            offset: -normal.dot(&reference.coords),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Translation3;

    #[test]
    fn flip() {
        let mut plane = Plane::new(Vector3::y(), 2.0);
        plane.flip();
        assert_eq!(plane.normal, Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(plane.offset, -2.0);
    }

    #[test]
    fn signed_distance_convention() {
        // x = 1 plane, front pointing +x
        let plane = Plane::new(Vector3::x(), -1.0);
        assert_relative_eq!(plane.signed_distance(&Point3::new(3.0, 0.0, 0.0)), 2.0);
        assert_relative_eq!(plane.signed_distance(&Point3::new(1.0, 5.0, -2.0)), 0.0);
        assert!(plane.signed_distance(&Point3::origin()) < 0.0);
    }

    #[test]
    fn from_point_normal_places_point_on_plane() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let plane = Plane::from_point_normal(&p, Vector3::z());
        assert_relative_eq!(plane.signed_distance(&p), 0.0);
        assert_eq!(plane.offset, -3.0);
    }

    #[test]
    fn transformed_by_translation() {
        // world plane x = 5, mesh sitting at x = 5: in mesh-local space the
        // plane passes through the origin
        let world_plane = Plane::new(Vector3::x(), -5.0);
        let world = Translation3::new(5.0, 0.0, 0.0).to_homogeneous();
        let world_to_local = world.try_inverse().unwrap();

        let local = world_plane.transformed(&world_to_local);
        assert_relative_eq!(local.normal, Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(local.offset, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn transformed_by_scale_keeps_unit_normal() {
        let plane = Plane::new(Vector3::x(), -1.0);
        let scale = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 1.0));
        let local = plane.transformed(&scale.try_inverse().unwrap());
        assert_relative_eq!(local.normal.norm(), 1.0, epsilon = 1e-12);
        // geometry scaled up by 2 meets the world plane x=1 at local x=0.5
        assert_relative_eq!(
            local.signed_distance(&Point3::new(0.5, 0.0, 0.0)),
            0.0,
            epsilon = 1e-12
        );
    }
}
