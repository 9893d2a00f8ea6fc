use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec2, Vec3};

use crate::scene::MeshData;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Offscreen scene target; sRGB so lit colors stay linear in the shaders
pub const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Interleaved mesh vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn interleave(mesh: &MeshData) -> Vec<Vertex> {
        mesh.positions
            .iter()
            .zip(&mesh.normals)
            .zip(&mesh.uvs)
            .map(|((position, normal), uv)| Vertex {
                position: *position,
                normal: *normal,
                uv: *uv,
            })
            .collect()
    }
}

/// Per-frame data: cameras, lights and the shader-material inputs
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    /// xyz toward the light, w intensity
    pub light_direction: [f32; 4],
    /// rgb, a = 1 when the light casts shadows
    pub light_color: [f32; 4],
    /// rgb premultiplied by intensity
    pub ambient: [f32; 4],
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub time: f32,
    /// 1 / shadow map size
    pub shadow_texel: f32,
    pub _pad: [f32; 2],
}

/// Inputs the frame uniform is built from
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs {
    pub view_proj: Mat4,
    pub light_view_proj: Mat4,
    pub camera_position: Vec3,
    pub light_direction: Vec3,
    pub light_intensity: f32,
    pub light_color: Vec3,
    pub cast_shadow: bool,
    pub ambient: Vec3,
    pub resolution: Vec2,
    pub mouse: Vec2,
    pub time: f32,
    pub shadow_map_size: u32,
}

impl FrameUniform {
    pub fn new(inputs: &FrameInputs) -> Self {
        Self {
            view_proj: inputs.view_proj.to_cols_array_2d(),
            light_view_proj: inputs.light_view_proj.to_cols_array_2d(),
            camera_position: inputs.camera_position.extend(1.0).into(),
            light_direction: inputs.light_direction.extend(inputs.light_intensity).into(),
            light_color: inputs
                .light_color
                .extend(if inputs.cast_shadow { 1.0 } else { 0.0 })
                .into(),
            ambient: inputs.ambient.extend(1.0).into(),
            resolution: inputs.resolution.into(),
            mouse: inputs.mouse.into(),
            time: inputs.time,
            shadow_texel: 1.0 / inputs.shadow_map_size.max(1) as f32,
            _pad: [0.0; 2],
        }
    }
}

/// Per-node data
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model's upper 3x3, columns padded to vec4
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb, a = opacity
    pub color: [f32; 4],
    /// metalness, roughness, receive_shadow, unused
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Mat4, color: [f32; 4], params: [f32; 4]) -> Self {
        let normal = Mat4::from_mat3(Mat3::from_mat4(model).inverse().transpose());
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal.to_cols_array_2d(),
            color,
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn test_interleave_keeps_vertex_order() {
        let mesh = MeshData::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            Some(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
            None,
        );
        let vertices = Vertex::interleave(&mesh);

        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[2].uv, [0.0, 1.0]);
        assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
    }
}
