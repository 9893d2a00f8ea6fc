use glam::Vec3;
use matrix_scene::camera::PerspectiveCamera;
use matrix_scene::controls::OrbitControls;

fn camera_at(position: Vec3) -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::new(55.0, 16.0 / 9.0, 0.1, 100.0);
    camera.position = position;
    camera
}

#[cfg(test)]
mod orbit_controls_tests {
    use super::*;

    #[test]
    fn test_rotation_preserves_distance_to_target() {
        let target = Vec3::new(0.0, 0.75, 0.0);
        let mut controls = OrbitControls::new(target);
        let mut camera = camera_at(Vec3::new(9.0, 13.0, -9.0));
        let distance = camera.position.distance(target);

        for (dx, dy) in [(30.0, 0.0), (-120.0, 15.0), (5.0, -40.0)] {
            controls.rotate_by_pixels(dx, dy, 720.0);
            controls.update(&mut camera, 1.0 / 60.0);
            assert!((camera.position.distance(target) - distance).abs() < 1e-3);
            assert_eq!(camera.look_at, target);
        }
    }

    #[test]
    fn test_auto_rotate_moves_camera_around_target() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.auto_rotate = true;
        let start = Vec3::new(0.0, 2.0, 10.0);
        let mut camera = camera_at(start);

        controls.update(&mut camera, 1.0);

        assert!(camera.position.distance(start) > 1e-3);
        assert!((camera.position.y - start.y).abs() < 1e-4);
        assert!((camera.position.length() - start.length()).abs() < 1e-3);
    }

    #[test]
    fn test_damping_spreads_rotation_over_frames() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.enable_damping = true;
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));

        controls.rotate_left(1.0);
        controls.update(&mut camera, 1.0 / 60.0);
        let (pending, _) = controls.pending_rotation();

        assert!(pending.abs() < 1.0 && pending.abs() > 0.0);

        for _ in 0..500 {
            controls.update(&mut camera, 1.0 / 60.0);
        }
        assert!(controls.pending_rotation().0.abs() < 1e-6);
    }

    #[test]
    fn test_dolly_in_reduces_distance() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));

        controls.dolly(true);
        controls.update(&mut camera, 0.0);
        let closer = camera.position.length();
        controls.dolly(false);
        controls.update(&mut camera, 0.0);

        assert!(closer < 10.0);
        assert!((camera.position.length() - 10.0).abs() < 1e-3);
    }
}
