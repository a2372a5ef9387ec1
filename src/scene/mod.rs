//! Model graph: the hierarchical scene representation of a loaded asset.
//!
//! A [`ModelGraph`] owns a single root [`Node`]. Nodes are a tagged variant
//! of mesh, group and light, each carrying a local [`Transform`]. The graph
//! is owned by the viewer session and replaced wholesale on reload.

mod mesh;
pub mod placeholder;

use glam::{Mat4, Quat, Vec3};
pub use mesh::MeshGeometry;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Local translation / rotation / scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Offset from the parent origin.
    pub translation: Vec3,
    /// Orientation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity transform moved by `translation`.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Replace the rotation component.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the scale component.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-parent matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// Surface appearance of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Surface {
    /// Image texture referenced by URI (relative to the asset).
    Texture {
        /// Texture location.
        uri: String,
    },
    /// Flat diffuse colour.
    Color {
        /// Linear RGB in `[0, 1]`.
        rgb: [f32; 3],
    },
}

/// Material attached to a mesh node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// What the surface looks like.
    pub surface: Surface,
    /// Whether the surface is drawn at all.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

const fn default_visible() -> bool {
    true
}

impl Material {
    /// Textured material.
    #[must_use]
    pub fn textured(uri: impl Into<String>) -> Self {
        Self {
            surface: Surface::Texture { uri: uri.into() },
            visible: true,
        }
    }

    /// Flat colour material.
    #[must_use]
    pub fn color(rgb: [f32; 3]) -> Self {
        Self {
            surface: Surface::Color { rgb },
            visible: true,
        }
    }

    /// Flat colour material from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        Self::color(hex_to_rgb(hex))
    }

    /// Whether this material samples a texture.
    #[must_use]
    pub fn is_textured(&self) -> bool {
        matches!(self.surface, Surface::Texture { .. })
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::from_hex(0x88_88_88)
    }
}

/// Unpack `0xRRGGBB` into RGB floats in `[0, 1]`.
#[must_use]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Renderable geometry with its material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshNode {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Local transform.
    #[serde(default)]
    pub transform: Transform,
    /// Vertex and index data.
    pub geometry: MeshGeometry,
    /// Surface material.
    #[serde(default)]
    pub material: Material,
}

/// Grouping node; contributes only its transform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupNode {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Local transform applied to every child.
    #[serde(default)]
    pub transform: Transform,
    /// Child nodes, in draw order.
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Kind of light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel light shining from the node position toward the origin.
    Directional,
}

/// Light source carried by an asset. Lights occupy no volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightNode {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Local transform.
    #[serde(default)]
    pub transform: Transform,
    /// Light type.
    pub light: LightKind,
    /// Linear RGB colour.
    pub color: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
}

/// A node of the model graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Geometry leaf.
    Mesh(MeshNode),
    /// Container of further nodes.
    Group(GroupNode),
    /// Light source.
    Light(LightNode),
}

impl Node {
    /// Empty group with an identity transform.
    #[must_use]
    pub fn empty_group(name: impl Into<String>) -> Self {
        Self::Group(GroupNode {
            name: name.into(),
            ..GroupNode::default()
        })
    }

    /// Mesh leaf with the given geometry, material and transform.
    #[must_use]
    pub fn mesh(
        name: impl Into<String>,
        geometry: MeshGeometry,
        material: Material,
        transform: Transform,
    ) -> Self {
        Self::Mesh(MeshNode {
            name: name.into(),
            transform,
            geometry,
            material,
        })
    }

    /// Display name of the node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Mesh(m) => &m.name,
            Self::Group(g) => &g.name,
            Self::Light(l) => &l.name,
        }
    }

    /// Local transform of the node.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        match self {
            Self::Mesh(m) => &m.transform,
            Self::Group(g) => &g.transform,
            Self::Light(l) => &l.transform,
        }
    }

    /// Mutable access to the local transform.
    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            Self::Mesh(m) => &mut m.transform,
            Self::Group(g) => &mut g.transform,
            Self::Light(l) => &mut l.transform,
        }
    }

    /// Children of the node (empty for leaves).
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Group(g) => &g.children,
            Self::Mesh(_) | Self::Light(_) => &[],
        }
    }

    /// Visit every mesh in this subtree, depth first.
    pub fn for_each_mesh(&self, f: &mut impl FnMut(&MeshNode)) {
        match self {
            Self::Mesh(m) => f(m),
            Self::Group(g) => {
                for child in &g.children {
                    child.for_each_mesh(f);
                }
            }
            Self::Light(_) => {}
        }
    }

    /// Visit every mesh in this subtree mutably, depth first.
    pub fn for_each_mesh_mut(&mut self, f: &mut impl FnMut(&mut MeshNode)) {
        match self {
            Self::Mesh(m) => f(m),
            Self::Group(g) => {
                for child in &mut g.children {
                    child.for_each_mesh_mut(f);
                }
            }
            Self::Light(_) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// ModelGraph
// ---------------------------------------------------------------------------

/// Where a model graph came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Primary asset, materials as authored.
    Textured,
    /// Fallback asset; every mesh carries the uniform default material.
    Untextured,
    /// Synthetic scene substituted when no asset could be loaded.
    Placeholder,
}

/// A loaded (or synthesized) model: one root node plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelGraph {
    root: Node,
    kind: ModelKind,
}

impl ModelGraph {
    /// Wrap a root node.
    #[must_use]
    pub fn new(root: Node, kind: ModelKind) -> Self {
        Self { root, kind }
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Mutable root node.
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Provenance of the graph.
    #[must_use]
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Whether the graph came from the untextured fallback asset.
    #[must_use]
    pub fn is_untextured(&self) -> bool {
        self.kind == ModelKind::Untextured
    }

    /// Number of mesh leaves in the graph.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.root.for_each_mesh(&mut |_| count += 1);
        count
    }

    /// Replace the material of every mesh with a copy of `material`.
    pub fn apply_uniform_material(&mut self, material: &Material) {
        self.root
            .for_each_mesh_mut(&mut |mesh| mesh.material = material.clone());
    }

    /// Show or hide every mesh material.
    pub fn set_materials_visible(&mut self, visible: bool) {
        self.root
            .for_each_mesh_mut(&mut |mesh| mesh.material.visible = visible);
    }

    /// Move the root node by `offset` in parent (world) space.
    pub fn translate(&mut self, offset: Vec3) {
        self.root.transform_mut().translation += offset;
    }
}
