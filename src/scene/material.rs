use glam::Vec3;

use super::uniforms::SharedUniforms;

/// Vertex/fragment WGSL pair for a custom shader material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderProgram {
    pub name: &'static str,
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl ShaderProgram {
    /// Flat "digital rain" over the mesh UVs
    pub const MATRIX: Self = Self {
        name: "matrix",
        vertex: include_str!("../shaders/matrix/vertex.wgsl"),
        fragment: include_str!("../shaders/matrix/fragment.wgsl"),
    };

    /// Rain with a time-driven wave displacing the surface
    pub const TEST01: Self = Self {
        name: "test01",
        vertex: include_str!("../shaders/test01/vertex.wgsl"),
        fragment: include_str!("../shaders/test01/fragment.wgsl"),
    };
}

/// Lit material with a base color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    /// Linear RGB
    pub color: Vec3,
    pub metalness: f32,
    pub roughness: f32,
    pub wireframe: bool,
}

impl StandardMaterial {
    pub fn new(hex: u32, metalness: f32, roughness: f32) -> Self {
        Self {
            color: hex_to_linear(hex),
            metalness,
            roughness,
            wireframe: false,
        }
    }

    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }
}

/// Custom shader driven by a shared uniform bag
#[derive(Debug, Clone)]
pub struct ShaderMaterial {
    pub program: ShaderProgram,
    pub uniforms: SharedUniforms,
}

/// Invisible except where a shadow falls on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowMaterial {
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub enum Material {
    Standard(StandardMaterial),
    Shader(ShaderMaterial),
    Shadow(ShadowMaterial),
}

/// Handle into the material library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(usize);

impl MaterialId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Owns every material created during the session
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i), m))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Convert a 0xRRGGBB sRGB color to linear RGB
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xFF) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
