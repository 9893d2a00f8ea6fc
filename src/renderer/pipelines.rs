use super::types::{Vertex, DEPTH_FORMAT, SCENE_FORMAT};
use crate::scene::ShaderProgram;

const STANDARD_SHADER: &str = include_str!("../shaders/standard.wgsl");
const SHADOW_DEPTH_SHADER: &str = include_str!("../shaders/shadow_depth.wgsl");
const DISPLAY_SHADER: &str = include_str!("../shaders/display.wgsl");

/// Bind group layouts shared by every pipeline
pub struct Layouts {
    /// group 0: frame uniform
    pub frame: wgpu::BindGroupLayout,
    /// group 1: object uniform
    pub object: wgpu::BindGroupLayout,
    /// group 2: shadow depth map + comparison sampler
    pub shadow_map: wgpu::BindGroupLayout,
    /// Offscreen color target + sampler for the display pass
    pub display: wgpu::BindGroupLayout,
}

impl Layouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let frame = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
            entries: &[uniform_entry],
        });

        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[uniform_entry],
        });

        let shadow_map = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_map_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });

        let display = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("display_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        Self {
            frame,
            object,
            shadow_map,
            display,
        }
    }
}

/// How a standard-shader variant rasterizes and blends
#[derive(Debug, Clone, Copy)]
pub enum StandardVariant {
    Lit,
    Wireframe,
    ShadowCatcher,
}

pub fn create_standard_pipeline(
    device: &wgpu::Device,
    layouts: &Layouts,
    variant: StandardVariant,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("standard_shader"),
        source: wgpu::ShaderSource::Wgsl(STANDARD_SHADER.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("standard_pipeline_layout"),
        bind_group_layouts: &[&layouts.frame, &layouts.object, &layouts.shadow_map],
        push_constant_ranges: &[],
    });

    let (label, topology, fs_entry, blend, depth_write) = match variant {
        StandardVariant::Lit => (
            "standard_pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            "fs_main",
            wgpu::BlendState::REPLACE,
            true,
        ),
        StandardVariant::Wireframe => (
            "wireframe_pipeline",
            wgpu::PrimitiveTopology::LineList,
            "fs_main",
            wgpu::BlendState::REPLACE,
            true,
        ),
        StandardVariant::ShadowCatcher => (
            "shadow_catcher_pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            "fs_shadow",
            wgpu::BlendState::ALPHA_BLENDING,
            false,
        ),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: SCENE_FORMAT,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: primitive(topology),
        depth_stencil: Some(depth_state(depth_write, wgpu::DepthBiasState::default())),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Custom shader material: separate vertex and fragment modules
pub fn create_program_pipeline(
    device: &wgpu::Device,
    layouts: &Layouts,
    program: &ShaderProgram,
) -> wgpu::RenderPipeline {
    let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{}_vertex", program.name)),
        source: wgpu::ShaderSource::Wgsl(program.vertex.into()),
    });
    let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{}_fragment", program.name)),
        source: wgpu::ShaderSource::Wgsl(program.fragment.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{}_pipeline_layout", program.name)),
        bind_group_layouts: &[&layouts.frame, &layouts.object],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{}_pipeline", program.name)),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &vertex,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: SCENE_FORMAT,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: primitive(wgpu::PrimitiveTopology::TriangleList),
        depth_stencil: Some(depth_state(true, wgpu::DepthBiasState::default())),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Depth-only pipeline rendering casters from the light's point of view
pub fn create_shadow_depth_pipeline(device: &wgpu::Device, layouts: &Layouts) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("shadow_depth_shader"),
        source: wgpu::ShaderSource::Wgsl(SHADOW_DEPTH_SHADER.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("shadow_depth_pipeline_layout"),
        bind_group_layouts: &[&layouts.frame, &layouts.object],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("shadow_depth_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: None,
        primitive: primitive(wgpu::PrimitiveTopology::TriangleList),
        depth_stencil: Some(depth_state(
            true,
            wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        )),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Fullscreen blit of the offscreen scene onto the surface
pub fn create_display_pipeline(
    device: &wgpu::Device,
    layouts: &Layouts,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("display_shader"),
        source: wgpu::ShaderSource::Wgsl(DISPLAY_SHADER.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("display_pipeline_layout"),
        bind_group_layouts: &[&layouts.display],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Display Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: primitive(wgpu::PrimitiveTopology::TriangleList),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn primitive(topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        // Models are drawn double-sided; the lit shader flips back-face normals
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

fn depth_state(write: bool, bias: wgpu::DepthBiasState) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias,
    }
}
