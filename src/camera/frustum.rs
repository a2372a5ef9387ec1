//! View frustum for visibility queries
//!
//! Extracts frustum planes from the view-projection matrix and provides
//! intersection tests for points, spheres and bounding boxes.

use glam::{Mat4, Vec3, Vec4};

use crate::bounds::BoundingVolume;

/// A plane in 3D space, represented as (normal.x, normal.y, normal.z, distance)
/// where the plane equation is: ax + by + cz + d = 0
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed distance from origin (`n · p + d = 0`).
    pub distance: f32,
}

impl Plane {
    /// Create a plane from coefficients and normalize it
    #[must_use]
    pub fn from_coefficients(v: Vec4) -> Self {
        let len = v.truncate().length();
        if len > 0.0 {
            Self {
                normal: v.truncate() / len,
                distance: v.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from point to plane (positive = in front, negative =
    /// behind)
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// View frustum consisting of 6 planes
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Six clipping planes: left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    /// Uses the Gribb/Hartmann method for plane extraction.
    /// Planes point inward (positive half-space is inside the frustum).
    #[must_use]
    pub fn from_view_projection(vp: Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        // For right-handed system with [0,1] depth range (wgpu/Vulkan)
        Self {
            planes: [
                Plane::from_coefficients(row3 + row0),
                Plane::from_coefficients(row3 - row0),
                Plane::from_coefficients(row3 + row1),
                Plane::from_coefficients(row3 - row1),
                Plane::from_coefficients(row2),
                Plane::from_coefficients(row3 - row2),
            ],
        }
    }

    /// Test if a point is inside the frustum
    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Test if a sphere intersects or is inside the frustum
    #[inline]
    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }

    /// Test if a box intersects or is inside the frustum. Conservative: may
    /// report boxes near frustum corners as visible.
    #[must_use]
    pub fn intersects_bounds(&self, bounds: &BoundingVolume) -> bool {
        self.planes.iter().all(|plane| {
            // corner furthest along the plane normal
            let p = Vec3::select(
                plane.normal.cmpge(Vec3::ZERO),
                bounds.max,
                bounds.min,
            );
            plane.distance_to_point(p) >= 0.0
        })
    }

    /// Test if every corner of the box is inside the frustum.
    #[must_use]
    pub fn contains_bounds(&self, bounds: &BoundingVolume) -> bool {
        bounds
            .corners()
            .iter()
            .all(|&corner| self.contains_point(corner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_z() -> Frustum {
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let view =
            Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        Frustum::from_view_projection(proj * view)
    }

    #[test]
    fn test_frustum_contains_origin() {
        let frustum = looking_down_z();

        // Origin should be inside the frustum
        assert!(frustum.contains_point(Vec3::ZERO));

        // Point far behind camera should be outside
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 20.0)));
    }

    #[test]
    fn test_sphere_intersection() {
        let frustum = looking_down_z();

        // Sphere at origin should intersect
        assert!(frustum.intersects_sphere(Vec3::ZERO, 1.0));

        // Large sphere behind camera that doesn't reach frustum
        assert!(!frustum.intersects_sphere(Vec3::new(0.0, 0.0, 50.0), 1.0));
    }

    #[test]
    fn test_bounds_intersection() {
        let frustum = looking_down_z();
        let near_origin =
            BoundingVolume::from_corners(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(frustum.intersects_bounds(&near_origin));
        assert!(frustum.contains_bounds(&near_origin));

        let off_to_side = BoundingVolume::from_corners(
            Vec3::new(100.0, -1.0, -1.0),
            Vec3::new(102.0, 1.0, 1.0),
        );
        assert!(!frustum.intersects_bounds(&off_to_side));

        let straddling = BoundingVolume::from_corners(
            Vec3::new(-50.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, 1.0),
        );
        assert!(frustum.intersects_bounds(&straddling));
        assert!(!frustum.contains_bounds(&straddling));
    }
}
