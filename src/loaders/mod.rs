pub mod async_loader;
pub mod gltf;
pub mod model;

pub use async_loader::load_model;
pub use self::gltf::{import_model, GltfLoader};
pub use model::{instantiate, LoadError, LoadedModel, ModelNode};
