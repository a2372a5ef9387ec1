//! Synthetic stand-in scene used when no model asset can be loaded.
//!
//! A small building (body plus a four-sided roof) surrounded by scattered
//! trees. The scatter is driven by a seeded RNG so the same options always
//! produce the same scene.

use std::f32::consts::FRAC_PI_4;

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{GroupNode, Material, MeshGeometry, Node, Transform};
use crate::options::PlaceholderOptions;

const BUILDING_COLOR: u32 = 0x8B_45_13;
const ROOF_COLOR: u32 = 0xDC_14_3C;
const TREE_COLOR: u32 = 0x22_8B_22;

/// Build the placeholder root node.
#[must_use]
pub fn build(options: &PlaceholderOptions) -> Node {
    let mut children = Vec::with_capacity(options.prop_count as usize + 2);

    children.push(Node::mesh(
        "building",
        MeshGeometry::cuboid(10.0, 5.0, 8.0),
        Material::from_hex(BUILDING_COLOR),
        Transform::from_translation(Vec3::new(0.0, 2.5, 0.0)),
    ));

    children.push(Node::mesh(
        "roof",
        MeshGeometry::cone(7.0, 3.0, 4),
        Material::from_hex(ROOF_COLOR),
        Transform::from_translation(Vec3::new(0.0, 6.5, 0.0))
            .with_rotation(Quat::from_rotation_y(FRAC_PI_4)),
    ));

    let mut rng = StdRng::seed_from_u64(options.seed);
    let extent = options.scatter_extent.max(0.0);
    for i in 0..options.prop_count {
        let x = (rng.random::<f32>() - 0.5) * extent;
        let z = (rng.random::<f32>() - 0.5) * extent;
        children.push(Node::mesh(
            format!("tree_{i}"),
            MeshGeometry::cone(1.0, 4.0, 8),
            Material::from_hex(TREE_COLOR),
            Transform::from_translation(Vec3::new(x, 2.0, z)),
        ));
    }

    Node::Group(GroupNode {
        name: "placeholder".into(),
        transform: Transform::IDENTITY,
        children,
    })
}
