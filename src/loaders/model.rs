use std::sync::Arc;
use thiserror::Error;

use crate::scene::{MeshData, Node, NodeId, Scene, Transform};

/// Why a model could not be produced
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to import {locator}")]
    Import {
        locator: String,
        #[source]
        source: gltf::Error,
    },
    #[error("{locator} has no scene with a root node")]
    EmptyScene { locator: String },
    #[error("{locator}: mesh primitive has no positions")]
    MissingPositions { locator: String },
    #[error("loader gave up on {locator} without reporting a result")]
    Abandoned { locator: String },
}

/// Node hierarchy of an imported file, before it is placed in a scene
#[derive(Debug, Clone)]
pub struct ModelNode {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Arc<MeshData>>,
    pub children: Vec<ModelNode>,
}

/// A fully imported model
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub locator: String,
    /// Top-level nodes of the model's default scene
    pub roots: Vec<ModelNode>,
}

impl LoadedModel {
    /// First top-level node, the asset itself
    pub fn first_root(&self) -> Result<&ModelNode, LoadError> {
        self.roots.first().ok_or_else(|| LoadError::EmptyScene {
            locator: self.locator.clone(),
        })
    }

    /// Spawn the first top-level node (and its subtree) detached into `scene`
    pub fn instantiate_first(&self, scene: &mut Scene) -> Result<NodeId, LoadError> {
        Ok(instantiate(scene, self.first_root()?))
    }
}

/// Spawn a model subtree into the scene, detached
pub fn instantiate(scene: &mut Scene, model: &ModelNode) -> NodeId {
    let mut node = Node::group(model.name.clone()).with_transform(model.transform);
    node.mesh = model.mesh.clone();
    let id = scene.spawn(node);
    for child in &model.children {
        let child_id = instantiate(scene, child);
        scene.add_child(id, child_id);
    }
    id
}
