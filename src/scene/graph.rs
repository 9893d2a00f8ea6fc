use glam::{EulerRot, Mat4, Quat, Vec3};
use std::sync::Arc;

use super::material::MaterialId;
use super::mesh::MeshData;

/// Position, Euler rotation (XYZ order, radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Decompose an affine matrix into translation, XYZ Euler angles and scale
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            position,
            rotation: Vec3::new(x, y, z),
            scale,
        }
    }

    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local matrix: translate * rotate * scale
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Handle into the scene arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A transformable object, optionally carrying a mesh and a material
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Arc<MeshData>>,
    pub material: Option<MaterialId>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

impl Node {
    /// Empty grouping node
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            material: None,
            cast_shadow: false,
            receive_shadow: false,
            parent: None,
            children: Vec::new(),
            attached: false,
        }
    }

    pub fn mesh(name: impl Into<String>, mesh: Arc<MeshData>) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::group(name)
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Something the renderer draws: a mesh node and its world matrix
#[derive(Debug, Clone)]
pub struct Renderable {
    pub node: NodeId,
    pub world: Mat4,
}

/// Flat arena scene graph
///
/// Nodes are spawned detached and become visible once attached to the
/// root (`add`) or to an attached parent (`add_child`). Nothing is ever
/// removed.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached node
    pub fn spawn(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = None;
        node.children.clear();
        node.attached = false;
        self.nodes.push(node);
        id
    }

    /// Attach a node to the scene root
    pub fn add(&mut self, id: NodeId) {
        self.detach(id);
        self.roots.push(id);
        self.set_attached(id, true);
    }

    /// Re-parent `child` under `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        let attached = self.nodes[parent.0].attached;
        self.set_attached(child, attached);
    }

    /// Deep copy of a subtree; meshes and materials are shared, the copy is detached
    pub fn clone_node(&mut self, id: NodeId) -> NodeId {
        let source = self.nodes[id.0].clone();
        let copy = self.spawn(source.clone());
        for child in source.children {
            let child_copy = self.clone_node(child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Top-level nodes in attachment order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.nodes[id.0].attached
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First attached node with the given name, depth-first from the roots
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.traverse().into_iter().find(|id| self.nodes[id.0].name == name)
    }

    /// Attached nodes depth-first in attachment order
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// World matrix of any node, attached or not
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// Attached mesh nodes with their world matrices
    pub fn renderables(&self) -> Vec<Renderable> {
        let mut out = Vec::new();
        for root in &self.roots {
            self.collect_renderables(*root, Mat4::IDENTITY, &mut out);
        }
        out
    }

    fn collect_renderables(&self, id: NodeId, parent: Mat4, out: &mut Vec<Renderable>) {
        let node = &self.nodes[id.0];
        let world = parent * node.transform.matrix();
        if node.mesh.is_some() {
            out.push(Renderable { node: id, world });
        }
        for child in &node.children {
            self.collect_renderables(*child, world, out);
        }
    }

    /// Apply `f` to a node and every descendant
    pub fn for_each_in_subtree(&mut self, id: NodeId, mut f: impl FnMut(&mut Node)) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0];
            f(node);
            stack.extend(node.children.iter().copied());
        }
    }

    /// Assign a material to a node and all its descendants
    pub fn paint(&mut self, id: NodeId, material: MaterialId) {
        self.for_each_in_subtree(id, |node| node.material = Some(material));
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
        self.roots.retain(|r| *r != id);
        self.set_attached(id, false);
    }

    fn set_attached(&mut self, id: NodeId, attached: bool) {
        self.nodes[id.0].attached = attached;
        let children = self.nodes[id.0].children.clone();
        for child in children {
            self.set_attached(child, attached);
        }
    }
}
