use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

/// Sun-style light shining from `position` toward `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub cast_shadow: bool,
    pub shadow: ShadowCamera,
}

/// Orthographic frustum and map size used to render the shadow depth map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCamera {
    pub map_size: u32,
    pub half_extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowCamera {
    fn default() -> Self {
        Self {
            map_size: 512,
            half_extent: 5.0,
            near: 0.5,
            far: 500.0,
        }
    }
}

impl DirectionalLight {
    pub fn new(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Vec3::Y,
            target: Vec3::ZERO,
            cast_shadow: false,
            shadow: ShadowCamera::default(),
        }
    }

    /// Unit vector pointing from the surface toward the light
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).try_normalize().unwrap_or(Vec3::Y)
    }

    /// Projection * view of the shadow camera
    ///
    /// A light sitting on its target looks straight down from one unit above it.
    pub fn view_projection(&self) -> Mat4 {
        let direction = self.direction();
        let up = if direction.abs_diff_eq(Vec3::Y, 1e-4) || direction.abs_diff_eq(Vec3::NEG_Y, 1e-4)
        {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let eye = if self.position.distance_squared(self.target) > f32::EPSILON {
            self.position
        } else {
            self.target + direction
        };
        let view = Mat4::look_at_rh(eye, self.target, up);
        let e = self.shadow.half_extent;
        let projection = Mat4::orthographic_rh(-e, e, -e, e, self.shadow.near, self.shadow.far);
        projection * view
    }
}

/// Every light in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}
