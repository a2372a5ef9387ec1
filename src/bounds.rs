//! Axis-aligned bounds and size derivation for model graphs.
//!
//! Bounds are always derived from the graph on request and never stored on
//! it, so a caller that changes the graph simply calls [`compute_bounds`]
//! again.

use glam::{Mat4, Vec3};

use crate::scene::{ModelGraph, Node};

/// Axis-aligned box in world space. `min <= max` on every axis; a
/// zero-volume box is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Smallest corner.
    pub min: Vec3,
    /// Largest corner.
    pub max: Vec3,
}

impl BoundingVolume {
    /// Degenerate box at a single point.
    #[must_use]
    pub fn point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Box from two arbitrary corners; the components are sorted so the
    /// invariant holds whatever order they are given in.
    #[must_use]
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Grow the box to include `p`.
    pub fn expand_to(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether the box has zero extent on every axis.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.min == self.max
    }

    /// Whether `p` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// The eight corners of the box.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self::point(Vec3::ZERO)
    }
}

/// Scalars derived from a [`BoundingVolume`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsSize {
    /// `max - min`.
    pub size: Vec3,
    /// Largest component of `size`; never negative.
    pub max_dimension: f32,
    /// `(min + max) / 2`.
    pub center: Vec3,
}

/// Bounds of every mesh in the graph, under each node's cumulative
/// transform. A graph with no geometry yields a point box at the origin.
#[must_use]
pub fn compute_bounds(graph: &ModelGraph) -> BoundingVolume {
    compute_node_bounds(graph.root())
}

/// Bounds of a subtree, treating `node` as the top of the hierarchy.
#[must_use]
pub fn compute_node_bounds(node: &Node) -> BoundingVolume {
    let mut acc = None;
    accumulate(node, Mat4::IDENTITY, &mut acc);
    acc.unwrap_or_default()
}

fn accumulate(node: &Node, parent: Mat4, acc: &mut Option<BoundingVolume>) {
    let world = parent * node.transform().matrix();
    match node {
        Node::Mesh(mesh) => {
            for &local in &mesh.geometry.positions {
                let p = world.transform_point3(local);
                // NaN/inf vertices would break min <= max
                if !p.is_finite() {
                    continue;
                }
                match acc {
                    Some(bounds) => bounds.expand_to(p),
                    None => *acc = Some(BoundingVolume::point(p)),
                }
            }
        }
        Node::Group(group) => {
            for child in &group.children {
                accumulate(child, world, acc);
            }
        }
        Node::Light(_) => {}
    }
}

/// Size, largest extent and centre of `bounds`.
#[must_use]
pub fn compute_size(bounds: &BoundingVolume) -> BoundsSize {
    let size = bounds.size();
    BoundsSize {
        size,
        max_dimension: size.max_element().max(0.0),
        center: bounds.center(),
    }
}
