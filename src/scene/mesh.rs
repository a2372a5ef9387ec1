use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Triangle mesh geometry in node-local space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshGeometry {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangle list indices into `positions`.
    #[serde(default)]
    pub indices: Vec<u32>,
}

impl MeshGeometry {
    /// Axis-aligned box of the given width (x), height (y) and depth (z),
    /// centred on the local origin.
    #[must_use]
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let h = Vec3::new(width, height, depth) * 0.5;
        let positions = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // -z
            4, 5, 6, 4, 6, 7, // +z
            0, 1, 5, 0, 5, 4, // -y
            3, 6, 2, 3, 7, 6, // +y
            0, 4, 7, 0, 7, 3, // -x
            1, 2, 6, 1, 6, 5, // +x
        ];
        Self { positions, indices }
    }

    /// Cone with its apex at `+height/2` and a `segments`-sided base ring at
    /// `-height/2`. The first ring vertex lies on +z.
    #[must_use]
    pub fn cone(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let half = height * 0.5;

        let mut positions = Vec::with_capacity(segments as usize + 2);
        positions.push(Vec3::new(0.0, half, 0.0));
        positions.push(Vec3::new(0.0, -half, 0.0));
        for i in 0..segments {
            let theta = i as f32 / segments as f32 * TAU;
            positions.push(Vec3::new(
                radius * theta.sin(),
                -half,
                radius * theta.cos(),
            ));
        }

        let mut indices = Vec::with_capacity(segments as usize * 6);
        for i in 0..segments {
            let a = 2 + i;
            let b = 2 + (i + 1) % segments;
            indices.extend_from_slice(&[0, a, b, 1, b, a]);
        }
        Self { positions, indices }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the geometry has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
