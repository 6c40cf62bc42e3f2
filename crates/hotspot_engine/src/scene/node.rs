//! Scene nodes

use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::math::Transform;
use crate::render::hooks::{ShaderHook, UniformHook};
use crate::scene::Bounds;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Geometry handle of a mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Pickable volume in local space
    pub bounds: Bounds,
}

impl Geometry {
    /// Geometry picked through the given volume
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

/// Material of a mesh
#[derive(Debug, Clone, Default)]
pub struct Material {
    /// Debug name
    pub name: String,
    /// GLSL vertex shader source before projection injection
    pub vertex_shader: String,
    /// GLSL fragment shader source
    pub fragment_shader: String,
    /// Called by the renderer once, right before compiling this material
    pub before_compile: Option<ShaderHook>,
}

impl Material {
    /// Material with the given name and vertex shader
    pub fn new(name: impl Into<String>, vertex_shader: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertex_shader: vertex_shader.into(),
            ..Default::default()
        }
    }
}

/// Drawable payload of a mesh node
///
/// `geometry` and `material` become `None` once the mesh is disposed.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Geometry (bounds used for picking)
    pub geometry: Option<Geometry>,
    /// Material
    pub material: Option<Material>,
    /// Called by the renderer before every draw of this mesh
    pub before_render: Option<UniformHook>,
}

/// Kind of a scene node
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Pure transform node
    Group,
    /// Drawable node
    Mesh(Mesh),
}

/// A node of the scene tree
#[derive(Debug, Clone)]
pub struct SceneNode {
    id: NodeId,
    /// Debug name
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Invisible nodes and their descendants are neither drawn nor picked
    pub visible: bool,
    kind: NodeKind,
    target_id: Option<String>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: NodeId::next(),
            name: name.into(),
            transform: Transform::identity(),
            visible: true,
            kind,
            target_id: None,
            children: Vec::new(),
        }
    }

    /// Create an empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    /// Create a mesh node
    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self::with_kind(
            name,
            NodeKind::Mesh(Mesh {
                geometry: Some(geometry),
                material: Some(material),
                before_render: None,
            }),
        )
    }

    /// Set the local transform (builder)
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Mark this node as a visual of the hotspot registered under `target_id`
    #[must_use]
    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    /// Append a child (builder)
    #[must_use]
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Node identifier
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Hotspot marker, if any
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// Set or clear the hotspot marker
    pub fn set_target_id(&mut self, target_id: Option<String>) {
        self.target_id = target_id;
    }

    /// Node kind
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether this node is drawable
    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh(_))
    }

    /// Mesh payload
    pub fn mesh_data(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }

    /// Mutable mesh payload
    pub fn mesh_data_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }

    /// Direct children
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Append a child
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Visit this node and all descendants, depth-first, parents first
    pub fn traverse(&self, visitor: &mut impl FnMut(&SceneNode)) {
        visitor(self);
        for child in &self.children {
            child.traverse(visitor);
        }
    }

    /// Mutable variant of [`SceneNode::traverse`]
    pub fn traverse_mut(&mut self, visitor: &mut impl FnMut(&mut SceneNode)) {
        visitor(self);
        for child in &mut self.children {
            child.traverse_mut(visitor);
        }
    }

    /// Release geometry, material and hooks of this subtree
    ///
    /// Children are detached and disposed recursively. Returns the number of
    /// meshes that still held resources.
    pub fn dispose(&mut self) -> usize {
        let mut disposed = 0;

        if let NodeKind::Mesh(mesh) = &mut self.kind {
            let had_geometry = mesh.geometry.take().is_some();
            let had_material = mesh.material.take().is_some();
            if had_geometry || had_material {
                disposed += 1;
            }
            mesh.before_render = None;
        }

        for mut child in self.children.drain(..) {
            disposed += child.dispose();
        }

        log::trace!("Disposed node '{}' ({} meshes)", self.name, disposed);
        disposed
    }
}
