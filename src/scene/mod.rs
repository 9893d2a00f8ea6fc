pub mod animation;
pub mod graph;
pub mod light;
pub mod material;
pub mod mesh;
pub mod uniforms;

pub use animation::{Animator, Channel, Tween};
pub use graph::{Node, NodeId, Renderable, Scene, Transform};
pub use light::{AmbientLight, DirectionalLight, Lights, ShadowCamera};
pub use material::{
    hex_to_linear, Material, MaterialId, MaterialLibrary, ShaderMaterial, ShaderProgram,
    ShadowMaterial, StandardMaterial,
};
pub use mesh::{compute_normals, MeshData};
pub use uniforms::{SharedUniforms, UniformBag, UniformValue, U_MOUSE, U_RESOLUTION, U_TIME};
