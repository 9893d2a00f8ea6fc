use glam::Vec3;
use std::ops::RangeInclusive;

use crate::context::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn read(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    fn write(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }
}

/// Property a slider edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTarget {
    CameraPosition(Axis),
    LightPosition(Axis),
}

/// A labelled numeric control over one scene property
///
/// The range only bounds the slider; `set` writes whatever it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlBinding {
    pub label: &'static str,
    pub target: BindingTarget,
    pub range: RangeInclusive<f32>,
}

impl ControlBinding {
    pub fn new(label: &'static str, target: BindingTarget) -> Self {
        Self {
            label,
            target,
            range: -20.0..=20.0,
        }
    }

    pub fn get(&self, ctx: &AppContext) -> f32 {
        match self.target {
            BindingTarget::CameraPosition(axis) => axis.read(ctx.camera.position),
            BindingTarget::LightPosition(axis) => axis.read(ctx.lights.directional.position),
        }
    }

    pub fn set(&self, ctx: &mut AppContext, value: f32) {
        match self.target {
            BindingTarget::CameraPosition(axis) => axis.write(&mut ctx.camera.position, value),
            BindingTarget::LightPosition(axis) => {
                axis.write(&mut ctx.lights.directional.position, value)
            }
        }
    }
}

/// Camera X/Y/Z followed by Light X/Y/Z
pub fn default_bindings() -> Vec<ControlBinding> {
    use Axis::*;
    use BindingTarget::*;

    vec![
        ControlBinding::new("Camera X", CameraPosition(X)),
        ControlBinding::new("Camera Y", CameraPosition(Y)),
        ControlBinding::new("Camera Z", CameraPosition(Z)),
        ControlBinding::new("Light X", LightPosition(X)),
        ControlBinding::new("Light Y", LightPosition(Y)),
        ControlBinding::new("Light Z", LightPosition(Z)),
    ]
}
