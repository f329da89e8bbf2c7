//! Scene graph and transform propagation.
//!
//! Nodes live in an arena owned by [`SceneGraph`] and refer to each other by
//! [`NodeId`]. Every node carries a local transform and an ordered list of
//! children, each child being either another node or a [`Leaf`] that points
//! at shared geometry. Walking the graph from a root accumulates the local
//! transforms from the outermost node inwards and hands every leaf its world
//! transform.

use std::{fmt, rc::Rc};

use cgmath::{Matrix4, SquareMatrix};

use crate::data_structures::texture::TextureId;

/// Upper bound on the nesting depth a traversal accepts before giving up.
pub const MAX_DEPTH: usize = 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("scene node `{node}` is its own ancestor")]
    Cycle { node: String },
    #[error("scene graph is nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },
    #[error("scene node id {id} does not belong to this graph")]
    UnknownNode { id: usize },
}

/// Handle to a node inside a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A drawable reference: shared geometry plus an optional texture that
/// overrides the geometry's own one.
///
/// Cloning a leaf only bumps the reference count of the geometry, which is how
/// one uploaded cube ends up in every segment of a tower.
pub struct Leaf<G> {
    pub geometry: Rc<G>,
    pub texture: Option<TextureId>,
}

impl<G> Leaf<G> {
    pub fn new(geometry: Rc<G>) -> Self {
        Self {
            geometry,
            texture: None,
        }
    }

    pub fn with_texture(geometry: Rc<G>, texture: TextureId) -> Self {
        Self {
            geometry,
            texture: Some(texture),
        }
    }

    /// Two leaves are the same instance source if they share geometry and texture.
    pub fn same_source(&self, other: &Leaf<G>) -> bool {
        Rc::ptr_eq(&self.geometry, &other.geometry) && self.texture == other.texture
    }
}

impl<G> Clone for Leaf<G> {
    fn clone(&self) -> Self {
        Self {
            geometry: Rc::clone(&self.geometry),
            texture: self.texture,
        }
    }
}

impl<G> fmt::Debug for Leaf<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("geometry", &Rc::as_ptr(&self.geometry))
            .field("texture", &self.texture)
            .finish()
    }
}

pub enum Child<G> {
    Node(NodeId),
    Geometry(Leaf<G>),
}

impl<G> fmt::Debug for Child<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Node(id) => f.debug_tuple("Node").field(id).finish(),
            Child::Geometry(leaf) => f.debug_tuple("Geometry").field(leaf).finish(),
        }
    }
}

pub struct SceneNode<G> {
    /// Only used for diagnostics, uniqueness is not enforced.
    pub name: String,
    pub transform: Matrix4<f32>,
    children: Vec<Child<G>>,
}

impl<G> SceneNode<G> {
    pub fn children(&self) -> &[Child<G>] {
        &self.children
    }
}

impl<G> fmt::Debug for SceneNode<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("children", &self.children)
            .finish()
    }
}

pub struct SceneGraph<G> {
    nodes: Vec<SceneNode<G>>,
}

impl<G> Default for SceneGraph<G> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<G> SceneGraph<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a detached node. Attach it with [`SceneGraph::add_child`].
    pub fn add_node(&mut self, name: impl Into<String>, transform: Matrix4<f32>) -> NodeId {
        self.nodes.push(SceneNode {
            name: name.into(),
            transform,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), StructuralError> {
        self.check(child)?;
        self.node_mut(parent)?.children.push(Child::Node(child));
        Ok(())
    }

    pub fn add_geometry(&mut self, parent: NodeId, leaf: Leaf<G>) -> Result<(), StructuralError> {
        self.node_mut(parent)?.children.push(Child::Geometry(leaf));
        Ok(())
    }

    /// Creates a node holding exactly one leaf and attaches it under `parent`.
    pub fn add_segment(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Matrix4<f32>,
        leaf: Leaf<G>,
    ) -> Result<NodeId, StructuralError> {
        let id = self.add_node(name, transform);
        self.add_geometry(id, leaf)?;
        self.add_child(parent, id)?;
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode<G>> {
        self.nodes.get(id.0)
    }

    /// First node carrying `name`, in creation order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    pub fn local_transform(&self, id: NodeId) -> Option<Matrix4<f32>> {
        self.node(id).map(|node| node.transform)
    }

    pub fn set_local_transform(
        &mut self,
        id: NodeId,
        transform: Matrix4<f32>,
    ) -> Result<(), StructuralError> {
        self.node_mut(id)?.transform = transform;
        Ok(())
    }

    /// Walks `root` depth-first in child order and calls `draw` once for every
    /// leaf reached with `inherited * root * ... * parent` as world transform.
    ///
    /// The graph itself is never modified. Returns the number of leaves drawn.
    pub fn compose<F>(
        &self,
        root: NodeId,
        inherited: Matrix4<f32>,
        mut draw: F,
    ) -> Result<usize, StructuralError>
    where
        F: FnMut(&Leaf<G>, &Matrix4<f32>),
    {
        self.check(root)?;
        let mut on_path = vec![false; self.nodes.len()];
        let mut drawn = 0;
        self.visit(root, &inherited, 0, &mut on_path, &mut drawn, &mut draw)?;
        Ok(drawn)
    }

    /// Collects every `(leaf, world transform)` pair reachable from `root`.
    pub fn world_transforms(
        &self,
        root: NodeId,
    ) -> Result<Vec<(Leaf<G>, Matrix4<f32>)>, StructuralError> {
        let mut out = Vec::new();
        self.compose(root, Matrix4::identity(), |leaf, world| {
            out.push((leaf.clone(), *world))
        })?;
        Ok(out)
    }

    /// Consumes the graph and yields every distinct geometry once.
    ///
    /// Once the graph is gone the returned handles are the last references,
    /// unless the caller kept clones elsewhere.
    pub fn into_geometries(self) -> Vec<Rc<G>> {
        let mut unique: Vec<Rc<G>> = Vec::new();
        for node in self.nodes {
            for child in node.children {
                if let Child::Geometry(leaf) = child {
                    if !unique.iter().any(|g| Rc::ptr_eq(g, &leaf.geometry)) {
                        unique.push(leaf.geometry);
                    }
                }
            }
        }
        unique
    }

    fn visit<F>(
        &self,
        id: NodeId,
        inherited: &Matrix4<f32>,
        depth: usize,
        on_path: &mut [bool],
        drawn: &mut usize,
        draw: &mut F,
    ) -> Result<(), StructuralError>
    where
        F: FnMut(&Leaf<G>, &Matrix4<f32>),
    {
        if depth >= MAX_DEPTH {
            return Err(StructuralError::DepthExceeded { limit: MAX_DEPTH });
        }
        let node = self.node(id).ok_or(StructuralError::UnknownNode { id: id.0 })?;
        if on_path[id.0] {
            return Err(StructuralError::Cycle {
                node: node.name.clone(),
            });
        }
        on_path[id.0] = true;
        let world = inherited * node.transform;
        for child in &node.children {
            match child {
                Child::Node(child_id) => {
                    self.visit(*child_id, &world, depth + 1, on_path, drawn, draw)?
                }
                Child::Geometry(leaf) => {
                    draw(leaf, &world);
                    *drawn += 1;
                }
            }
        }
        on_path[id.0] = false;
        Ok(())
    }

    fn check(&self, id: NodeId) -> Result<(), StructuralError> {
        self.node(id)
            .map(|_| ())
            .ok_or(StructuralError::UnknownNode { id: id.0 })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode<G>, StructuralError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(StructuralError::UnknownNode { id: id.0 })
    }
}
