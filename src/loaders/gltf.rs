use glam::Mat4;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use super::model::{LoadError, LoadedModel, ModelNode};
use crate::scene::{MeshData, Transform};
use crate::traits::{LoadCallback, ModelLoader};

/// Imports glTF/GLB files on a worker thread, one thread per request
#[derive(Debug, Clone)]
pub struct GltfLoader {
    base_dir: PathBuf,
}

impl GltfLoader {
    /// Locators are resolved relative to `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn resolve(&self, locator: &str) -> PathBuf {
        self.base_dir.join(locator)
    }
}

impl ModelLoader for GltfLoader {
    fn load(&self, locator: &str, on_complete: LoadCallback) {
        let path = self.resolve(locator);
        let locator = locator.to_string();
        let spawned = thread::Builder::new()
            .name(format!("gltf:{}", locator))
            .spawn(move || on_complete(import_model(&path, &locator)));

        // Spawn failure drops the callback, which the awaiting side sees as abandoned
        if let Err(e) = spawned {
            log::error!("Could not start loader thread: {}", e);
        }
    }
}

/// Synchronously import a glTF file into a node hierarchy
pub fn import_model(path: &Path, locator: &str) -> Result<LoadedModel, LoadError> {
    log::info!("Loading glTF file: {:?}", path);

    let (document, buffers, _images) = gltf::import(path).map_err(|source| LoadError::Import {
        locator: locator.to_string(),
        source,
    })?;

    log::debug!(
        "{}: {} scenes, {} nodes, {} meshes",
        locator,
        document.scenes().count(),
        document.nodes().count(),
        document.meshes().count()
    );

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| LoadError::EmptyScene {
            locator: locator.to_string(),
        })?;

    let roots = scene
        .nodes()
        .map(|node| convert_node(&node, &buffers, locator))
        .collect::<Result<Vec<_>, _>>()?;

    if roots.is_empty() {
        return Err(LoadError::EmptyScene {
            locator: locator.to_string(),
        });
    }

    log::info!("Loaded {} ({} root nodes)", locator, roots.len());
    Ok(LoadedModel {
        locator: locator.to_string(),
        roots,
    })
}

/// Recursively converts glTF nodes
fn convert_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    locator: &str,
) -> Result<ModelNode, LoadError> {
    let matrix = Mat4::from_cols_array_2d(&node.transform().matrix());

    let mesh = match node.mesh() {
        Some(mesh) => convert_mesh(&mesh, buffers, locator)?.map(Arc::new),
        None => None,
    };

    let children = node
        .children()
        .map(|child| convert_node(&child, buffers, locator))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ModelNode {
        name: node
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("node{}", node.index())),
        transform: Transform::from_matrix(matrix),
        mesh,
        children,
    })
}

/// Merge every triangle primitive of a mesh into one `MeshData`
fn convert_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    locator: &str,
) -> Result<Option<MeshData>, LoadError> {
    let mut merged: Option<MeshData> = None;

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "{}: skipping {:?} primitive in mesh {:?}",
                locator,
                primitive.mode(),
                mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| LoadError::MissingPositions {
                locator: locator.to_string(),
            })?
            .collect();
        let normals = reader.read_normals().map(|n| n.collect());
        let uvs = reader.read_tex_coords(0).map(|t| t.into_f32().collect());
        let indices = reader.read_indices().map(|i| i.into_u32().collect());

        let part = MeshData::new(positions, normals, uvs, indices);
        match merged.as_mut() {
            Some(mesh) => mesh.merge(&part),
            None => merged = Some(part),
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locators_resolve_under_base_dir() {
        let loader = GltfLoader::new("assets");
        assert_eq!(
            loader.resolve("models/pill/pill.glb"),
            PathBuf::from("assets/models/pill/pill.glb")
        );
    }

    #[test]
    fn test_missing_file_reports_import_error() {
        let err = import_model(Path::new("does/not/exist.glb"), "does/not/exist.glb").unwrap_err();
        assert!(matches!(err, LoadError::Import { .. }));
    }

    #[test]
    fn test_loader_reports_failure_through_callback() {
        let loader = GltfLoader::new("does-not-exist");
        let result = pollster::block_on(crate::loaders::load_model(&loader, "missing.glb"));
        assert!(matches!(result, Err(LoadError::Import { .. })));
    }
}
