// context.rs - Everything the scene owns for the lifetime of the session
use glam::{Vec2, Vec3};

use crate::camera::PerspectiveCamera;
use crate::config::SceneConfig;
use crate::controls::OrbitControls;
use crate::core::{PointerAction, Viewport};
use crate::frame::FrameInfo;
use crate::panel::{MaterialPalette, MaterialSelector};
use crate::scene::{
    AmbientLight, Animator, DirectionalLight, Lights, Material, MaterialLibrary, Scene,
    ShaderMaterial, ShaderProgram, SharedUniforms, UniformBag, UniformValue, U_MOUSE,
    U_RESOLUTION, U_TIME,
};

/// Scene state shared by the loader, the assembler, the render loop and the panel
///
/// Built once at startup and only touched from the event-loop thread.
#[derive(Debug)]
pub struct AppContext {
    pub scene: Scene,
    pub materials: MaterialLibrary,
    pub uniforms: SharedUniforms,
    pub palette: MaterialPalette,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub lights: Lights,
    pub viewport: Viewport,
    pub animator: Animator,
    /// Set once the document model is in the scene
    pub selector: Option<MaterialSelector>,
}

impl AppContext {
    /// `width`/`height` are logical pixels
    pub fn new(config: &SceneConfig, width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let viewport = Viewport::new(width, height, device_pixel_ratio);

        let uniforms = UniformBag::for_viewport(width as f32, height as f32).shared();

        // Both shader materials read the same bag
        let mut materials = MaterialLibrary::new();
        let palette = MaterialPalette {
            matrix: materials.add(Material::Shader(ShaderMaterial {
                program: ShaderProgram::MATRIX,
                uniforms: uniforms.clone(),
            })),
            test01: materials.add(Material::Shader(ShaderMaterial {
                program: ShaderProgram::TEST01,
                uniforms: uniforms.clone(),
            })),
        };

        let cam = &config.camera;
        let mut camera = PerspectiveCamera::new(cam.fov, viewport.aspect(), cam.near, cam.far);
        camera.position = Vec3::from_array(cam.position);
        camera.look_at = Vec3::from_array(cam.target);

        let mut controls = OrbitControls::new(Vec3::from_array(cam.target));
        controls.enable_damping = true;
        controls.auto_rotate = cam.auto_rotate;

        let light = &config.light;
        let mut directional = DirectionalLight::new(Vec3::ONE, light.directional_intensity);
        directional.position = Vec3::from_array(light.position);
        directional.cast_shadow = true;
        directional.shadow.map_size = light.shadow_map_size;

        Self {
            scene: Scene::new(),
            materials,
            uniforms,
            palette,
            camera,
            controls,
            lights: Lights {
                ambient: AmbientLight {
                    color: Vec3::ONE,
                    intensity: light.ambient_intensity,
                },
                directional,
            },
            viewport,
            animator: Animator::new(),
            selector: None,
        }
    }

    /// Apply a window resize; returns the new aspect ratio
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) -> f32 {
        if width == 0 || height == 0 {
            return self.viewport.aspect();
        }
        let aspect = self.viewport.resize(width, height, device_pixel_ratio);
        self.camera.aspect = aspect;
        self.uniforms.borrow_mut().set(
            U_RESOLUTION,
            UniformValue::Vec2(Vec2::new(width as f32, height as f32)),
        );
        log::debug!(
            "Resized to {}x{} @{} (aspect {:.3})",
            width,
            height,
            self.viewport.pixel_ratio,
            aspect
        );
        aspect
    }

    pub fn apply_pointer(&mut self, action: PointerAction) {
        match action {
            PointerAction::Moved { x, y } => {
                self.uniforms
                    .borrow_mut()
                    .set(U_MOUSE, UniformValue::Vec2(Vec2::new(x, y)));
            }
            PointerAction::Rotate { dx, dy } => {
                self.controls
                    .rotate_by_pixels(dx, dy, self.viewport.height as f32);
            }
            PointerAction::Dolly { zoom_in } => self.controls.dolly(zoom_in),
        }
    }

    /// Per-frame scene update: time uniform, tweens, then orbit controls
    pub fn advance(&mut self, frame: &FrameInfo) {
        self.uniforms
            .borrow_mut()
            .set(U_TIME, UniformValue::Float(frame.time));
        self.animator.advance(&mut self.scene, frame.delta);
        self.controls.update(&mut self.camera, frame.delta);
    }

    pub fn time(&self) -> f32 {
        self.uniforms.borrow().float(U_TIME).unwrap_or(0.0)
    }
}
