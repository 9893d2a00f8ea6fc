// renderer - wgpu forward renderer for the scene graph
pub mod overlay;
pub mod pipelines;
pub mod targets;
pub mod types;

use anyhow::{anyhow, Result};
use glam::Vec2;
use std::collections::HashMap;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::context::AppContext;
use crate::core::GpuContext;
use crate::frame::FrameInfo;
use crate::scene::{
    Material, MeshData, NodeId, Renderable, ShaderProgram, U_MOUSE, U_RESOLUTION,
};
use crate::traits::FrameRenderer;

use overlay::Overlay;
use pipelines::{
    create_display_pipeline, create_program_pipeline, create_shadow_depth_pipeline,
    create_standard_pipeline, Layouts, StandardVariant,
};
use targets::{SceneTarget, ShadowMap};
use types::{FrameInputs, FrameUniform, ObjectUniform, Vertex};

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
const FALLBACK_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Buffers of one uploaded mesh
struct GpuMesh {
    // Keeps the cache key's allocation alive
    _source: Arc<MeshData>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    wire_buffer: wgpu::Buffer,
    wire_count: u32,
}

/// Uniform buffer and bind group of one scene node
struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Which pipeline a renderable is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawKind {
    Lit,
    Wireframe,
    Program(&'static str),
    ShadowCatcher,
}

struct DrawItem {
    node: NodeId,
    mesh: usize,
    kind: DrawKind,
    cast_shadow: bool,
}

/// Renders the scene into an offscreen target, blits it to the window and draws the overlay
pub struct SceneRenderer {
    window: Arc<Window>,
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    layouts: Layouts,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    lit_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: wgpu::RenderPipeline,
    shadow_catcher_pipeline: wgpu::RenderPipeline,
    shadow_depth_pipeline: wgpu::RenderPipeline,
    display_pipeline: wgpu::RenderPipeline,
    programs: HashMap<&'static str, wgpu::RenderPipeline>,
    meshes: HashMap<usize, GpuMesh>,
    objects: HashMap<NodeId, ObjectSlot>,
    display_sampler: wgpu::Sampler,
    shadow_map: ShadowMap,
    target: SceneTarget,
    overlay: Option<Overlay>,
}

impl SceneRenderer {
    pub fn new(
        window: Arc<Window>,
        surface: wgpu::Surface<'static>,
        gpu: GpuContext,
        ctx: &AppContext,
        show_ui: bool,
    ) -> Result<Self> {
        let device = gpu.device();
        let size = window.inner_size();

        let surface_config = gpu.surface_config(&surface, size.width, size.height)?;
        surface.configure(device, &surface_config);

        let layouts = Layouts::new(device);

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &layouts.frame,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let display_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Display Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let shadow_map = ShadowMap::new(device, &layouts, ctx.lights.directional.shadow.map_size);
        let target = SceneTarget::new(
            device,
            &layouts,
            &display_sampler,
            ctx.viewport.drawing_buffer_size(),
        );

        let overlay = show_ui.then(|| Overlay::new(&window, device, surface_config.format));

        log::info!(
            "Renderer initialized: surface {}x{} {:?}, shadow map {}",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            shadow_map.size()
        );

        Ok(Self {
            lit_pipeline: create_standard_pipeline(device, &layouts, StandardVariant::Lit),
            wireframe_pipeline: create_standard_pipeline(device, &layouts, StandardVariant::Wireframe),
            shadow_catcher_pipeline: create_standard_pipeline(
                device,
                &layouts,
                StandardVariant::ShadowCatcher,
            ),
            shadow_depth_pipeline: create_shadow_depth_pipeline(device, &layouts),
            display_pipeline: create_display_pipeline(device, &layouts, surface_config.format),
            window,
            surface,
            surface_config,
            layouts,
            frame_buffer,
            frame_bind_group,
            programs: HashMap::new(),
            meshes: HashMap::new(),
            objects: HashMap::new(),
            display_sampler,
            shadow_map,
            target,
            overlay,
            gpu,
        })
    }

    /// Offer a window event to the overlay; true when it was consumed
    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.handle_event(&self.window, event),
            None => false,
        }
    }

    /// Reconfigure the surface for a new physical size
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    /// Recreate the offscreen target when the drawing buffer size changed
    fn sync_target(&mut self, ctx: &AppContext) {
        let wanted = ctx.viewport.drawing_buffer_size();
        if self.target.size() != wanted {
            self.target = SceneTarget::new(
                self.gpu.device(),
                &self.layouts,
                &self.display_sampler,
                wanted,
            );
        }
    }

    fn upload_mesh(&mut self, mesh: &Arc<MeshData>) -> usize {
        let key = Arc::as_ptr(mesh) as usize;
        if !self.meshes.contains_key(&key) {
            let device = self.gpu.device();
            let vertices = Vertex::interleave(mesh);
            let wire = mesh.wireframe_indices();

            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            let wire_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Wireframe Buffer"),
                contents: bytemuck::cast_slice(&wire),
                usage: wgpu::BufferUsages::INDEX,
            });

            log::debug!(
                "Uploaded mesh: {} vertices, {} triangles",
                mesh.vertex_count(),
                mesh.triangle_count()
            );

            self.meshes.insert(
                key,
                GpuMesh {
                    _source: Arc::clone(mesh),
                    vertex_buffer,
                    index_buffer,
                    index_count: mesh.indices.len() as u32,
                    wire_buffer,
                    wire_count: wire.len() as u32,
                },
            );
        }
        key
    }

    fn write_object(&mut self, node: NodeId, uniform: &ObjectUniform) {
        let device = self.gpu.device();
        let slot = self.objects.entry(node).or_insert_with(|| {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Object Uniform Buffer"),
                size: std::mem::size_of::<ObjectUniform>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("object_bind_group"),
                layout: &self.layouts.object,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            ObjectSlot { buffer, bind_group }
        });
        self.gpu
            .queue()
            .write_buffer(&slot.buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }

    fn ensure_program(&mut self, program: &ShaderProgram) {
        if !self.programs.contains_key(program.name) {
            log::debug!("Compiling shader material {}", program.name);
            let pipeline = create_program_pipeline(self.gpu.device(), &self.layouts, program);
            self.programs.insert(program.name, pipeline);
        }
    }

    /// Upload everything a frame needs and decide how each renderable is drawn
    fn prepare(&mut self, ctx: &AppContext, renderables: &[Renderable]) -> Vec<DrawItem> {
        let mut items = Vec::with_capacity(renderables.len());

        for renderable in renderables {
            let node = ctx.scene.node(renderable.node);
            let Some(mesh) = node.mesh.as_ref() else {
                continue;
            };
            let mesh = self.upload_mesh(mesh);
            let receive = if node.receive_shadow { 1.0 } else { 0.0 };

            let material = node.material.and_then(|id| ctx.materials.get(id));
            let (kind, color, params) = match material {
                Some(Material::Standard(m)) => (
                    if m.wireframe {
                        DrawKind::Wireframe
                    } else {
                        DrawKind::Lit
                    },
                    m.color.extend(1.0).into(),
                    [m.metalness, m.roughness, receive, 0.0],
                ),
                Some(Material::Shader(m)) => {
                    self.ensure_program(&m.program);
                    (DrawKind::Program(m.program.name), [1.0; 4], [0.0, 1.0, receive, 0.0])
                }
                Some(Material::Shadow(m)) => (
                    DrawKind::ShadowCatcher,
                    [0.0, 0.0, 0.0, m.opacity],
                    [0.0, 1.0, 1.0, 0.0],
                ),
                None => (DrawKind::Lit, FALLBACK_COLOR, [0.0, 1.0, receive, 0.0]),
            };

            self.write_object(renderable.node, &ObjectUniform::new(renderable.world, color, params));
            items.push(DrawItem {
                node: renderable.node,
                mesh,
                kind,
                cast_shadow: node.cast_shadow,
            });
        }

        // Transparent shadow catchers go last
        items.sort_by_key(|item| item.kind == DrawKind::ShadowCatcher);
        items
    }

    fn frame_uniform(&self, ctx: &AppContext) -> FrameUniform {
        let light = &ctx.lights.directional;
        let uniforms = ctx.uniforms.borrow();
        let (width, height) = (ctx.viewport.width as f32, ctx.viewport.height as f32);

        FrameUniform::new(&FrameInputs {
            view_proj: ctx.camera.view_projection(),
            light_view_proj: light.view_projection(),
            camera_position: ctx.camera.position,
            light_direction: light.direction(),
            light_intensity: light.intensity,
            light_color: light.color,
            cast_shadow: light.cast_shadow,
            ambient: ctx.lights.ambient.color * ctx.lights.ambient.intensity,
            resolution: uniforms
                .vec2(U_RESOLUTION)
                .unwrap_or(Vec2::new(width, height)),
            mouse: uniforms
                .vec2(U_MOUSE)
                .unwrap_or(Vec2::new(width / 2.0, height / 2.0)),
            time: ctx.time(),
            shadow_map_size: self.shadow_map.size(),
        })
    }

    fn acquire(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(self.gpu.device(), &self.surface_config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                Ok(None)
            }
            Err(e) => Err(anyhow!("Failed to acquire surface texture: {}", e)),
        }
    }

    fn draw_mesh(pass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh, wireframe: bool) {
        let (indices, count) = if wireframe {
            (&mesh.wire_buffer, mesh.wire_count)
        } else {
            (&mesh.index_buffer, mesh.index_count)
        };
        // Empty buffers cannot be sliced
        if count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..count, 0, 0..1);
    }

    fn encode_shadow_pass(&self, encoder: &mut wgpu::CommandEncoder, items: &[DrawItem], enabled: bool) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_map.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        if !enabled {
            return;
        }

        pass.set_pipeline(&self.shadow_depth_pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for item in items.iter().filter(|item| item.cast_shadow) {
            let (Some(mesh), Some(object)) = (self.meshes.get(&item.mesh), self.objects.get(&item.node))
            else {
                continue;
            };
            pass.set_bind_group(1, &object.bind_group, &[]);
            Self::draw_mesh(&mut pass, mesh, false);
        }
    }

    fn encode_scene_pass(&self, encoder: &mut wgpu::CommandEncoder, items: &[DrawItem]) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for item in items {
            let (Some(mesh), Some(object)) = (self.meshes.get(&item.mesh), self.objects.get(&item.node))
            else {
                continue;
            };
            let pipeline = match item.kind {
                DrawKind::Lit => &self.lit_pipeline,
                DrawKind::Wireframe => &self.wireframe_pipeline,
                DrawKind::ShadowCatcher => &self.shadow_catcher_pipeline,
                DrawKind::Program(name) => match self.programs.get(name) {
                    Some(pipeline) => pipeline,
                    None => continue,
                },
            };
            pass.set_pipeline(pipeline);
            pass.set_bind_group(1, &object.bind_group, &[]);
            if !matches!(item.kind, DrawKind::Program(_)) {
                pass.set_bind_group(2, &self.shadow_map.bind_group, &[]);
            }
            Self::draw_mesh(&mut pass, mesh, item.kind == DrawKind::Wireframe);
        }
    }

    fn encode_display_pass(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Display Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.display_pipeline);
        pass.set_bind_group(0, &self.target.display_bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

impl FrameRenderer for SceneRenderer {
    fn render_frame(&mut self, ctx: &mut AppContext, frame: &FrameInfo) -> Result<()> {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        if (size.width, size.height) != (self.surface_config.width, self.surface_config.height) {
            self.resize_surface(size.width, size.height);
        }
        self.sync_target(ctx);

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.record_frame(frame.delta);
        }

        let renderables = ctx.scene.renderables();
        let items = self.prepare(ctx, &renderables);
        let frame_uniform = self.frame_uniform(ctx);
        self.gpu
            .queue()
            .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[frame_uniform]));

        let Some(output) = self.acquire()? else {
            return Ok(());
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.encode_shadow_pass(&mut encoder, &items, ctx.lights.directional.cast_shadow);
        self.encode_scene_pass(&mut encoder, &items);
        self.encode_display_pass(&mut encoder, &view);

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.draw(
                &self.window,
                self.gpu.device(),
                self.gpu.queue(),
                &mut encoder,
                &view,
                [self.surface_config.width, self.surface_config.height],
                ctx,
            );
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
