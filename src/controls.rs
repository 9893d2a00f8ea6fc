use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::camera::PerspectiveCamera;

const EPS: f32 = 1e-6;

/// Radius, azimuth around +Y (`theta`) and polar angle from +Y (`phi`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbits the camera around a target point with optional damping and auto-rotation
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    /// 2.0 is one full orbit every 30 seconds
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: false,
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Pointer drag in logical pixels over a viewport of the given height
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.rotate_left(TAU * dx / viewport_height * self.rotate_speed);
        self.rotate_up(TAU * dy / viewport_height * self.rotate_speed);
    }

    /// One wheel notch toward (`zoom_in`) or away from the target
    pub fn dolly(&mut self, zoom_in: bool) {
        let step = 0.95f32.powf(self.zoom_speed);
        if zoom_in {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// Pending rotation not yet applied to the camera
    pub fn pending_rotation(&self) -> (f32, f32) {
        (self.delta_theta, self.delta_phi)
    }

    /// Move the camera according to accumulated input; `delta` is the frame time in seconds
    pub fn update(&mut self, camera: &mut PerspectiveCamera, delta: f32) {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(offset);

        if self.auto_rotate {
            self.rotate_left(self.auto_rotation_angle(delta));
        }

        if self.enable_damping {
            spherical.theta += self.delta_theta * self.damping_factor;
            spherical.phi += self.delta_phi * self.damping_factor;
        } else {
            spherical.theta += self.delta_theta;
            spherical.phi += self.delta_phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + spherical.to_offset();
        camera.look_at = self.target;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
    }

    fn auto_rotation_angle(&self, delta: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spherical_round_trip() {
        let offset = Vec3::new(9.0, 12.25, -9.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!(back.abs_diff_eq(offset, 1e-4));
    }

    #[test]
    fn test_zero_offset_is_degenerate_but_finite() {
        let s = Spherical::from_offset(Vec3::ZERO);
        assert_eq!(s.radius, 0.0);
        assert!(s.to_offset().is_finite());
    }

    #[test]
    fn test_dolly_in_then_out_is_neutral() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.dolly(true);
        controls.dolly(false);

        let mut camera = PerspectiveCamera::new(55.0, 1.0, 0.1, 100.0);
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        controls.update(&mut camera, 0.016);
        assert!((camera.position.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_polar_angle_stays_off_the_pole() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        let mut camera = PerspectiveCamera::new(55.0, 1.0, 0.1, 100.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);

        controls.rotate_up(10.0);
        controls.update(&mut camera, 0.016);

        assert!(camera.position.is_finite());
        assert!(camera.position.y > 4.99);
        assert!((camera.position.length() - 5.0).abs() < 1e-4);
    }
}
