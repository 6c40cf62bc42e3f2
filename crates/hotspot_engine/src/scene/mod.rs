//! Scene graph
//!
//! A minimal retained scene graph: a named root ([`SceneGraph`]) owning a
//! tree of [`SceneNode`]s. Meshes carry local-space [`Bounds`] used by the
//! raycaster, an optional hotspot marker, and the render hooks attached by
//! the interactive layer.
//!
//! ## Architecture
//!
//! ```text
//! SceneGraph (root, named)
//!      ↓
//! SceneNode (group | mesh) ── children ──→ SceneNode ...
//!      ↓
//! Mesh { geometry: Bounds, material, render hooks }
//! ```

mod bounds;
mod node;
mod scene_graph;

pub use bounds::{Bounds, AABB, BoundingSphere};
pub use node::{Geometry, Material, Mesh, NodeId, NodeKind, SceneNode};
pub use scene_graph::SceneGraph;
