//! Scene graph root

use crate::scene::SceneNode;

/// Root of a scene tree
///
/// Owns the top-level nodes in insertion order. Insertion and removal are
/// plain list operations; spatial queries go through the raycaster.
#[derive(Debug)]
pub struct SceneGraph {
    name: String,
    /// Whether the renderer may frustum-cull this scene as a whole
    pub frustum_culled: bool,
    children: Vec<SceneNode>,
}

impl SceneGraph {
    /// Create a new empty scene graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frustum_culled: false,
            children: Vec::new(),
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a top-level node
    pub fn add(&mut self, node: SceneNode) {
        self.children.push(node);
    }

    /// Remove and return the last top-level node
    pub fn pop(&mut self) -> Option<SceneNode> {
        self.children.pop()
    }

    /// Detach every top-level node without disposing it
    pub fn take_children(&mut self) -> Vec<SceneNode> {
        std::mem::take(&mut self.children)
    }

    /// Top-level nodes
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Number of top-level nodes
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the scene has no top-level nodes
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Visit every node of the scene, depth-first
    pub fn traverse(&self, visitor: &mut impl FnMut(&SceneNode)) {
        for child in &self.children {
            child.traverse(visitor);
        }
    }
}
