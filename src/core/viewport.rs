/// Highest device pixel ratio the drawing buffer is rendered at
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Viewport - logical window size plus the capped pixel density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels
    pub width: u32,
    /// Height in logical pixels
    pub height: u32,
    /// Device pixel ratio, capped at `MAX_PIXEL_RATIO`
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Create viewport from logical size and the display's pixel ratio
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: capped_pixel_ratio(device_pixel_ratio),
        }
    }

    /// Apply a resize and return the new aspect ratio
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) -> f32 {
        self.width = width;
        self.height = height;
        self.pixel_ratio = capped_pixel_ratio(device_pixel_ratio);
        self.aspect()
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Size of the render target in physical pixels, never zero
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

fn capped_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    device_pixel_ratio.min(MAX_PIXEL_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_caps_pixel_ratio() {
        let viewport = Viewport::new(1920, 1080, 3.0);
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.drawing_buffer_size(), (3840, 2160));
    }

    #[test]
    fn test_low_density_is_kept() {
        let viewport = Viewport::new(800, 600, 1.0);
        assert_eq!(viewport.pixel_ratio, 1.0);
        assert_eq!(viewport.drawing_buffer_size(), (800, 600));
    }

    #[test]
    fn test_fractional_density() {
        let viewport = Viewport::new(1000, 500, 1.5);
        assert_eq!(viewport.drawing_buffer_size(), (1500, 750));
    }

    #[test]
    fn test_resize_returns_aspect() {
        let mut viewport = Viewport::new(800, 600, 1.0);
        let aspect = viewport.resize(1280, 720, 2.5);

        assert_eq!(aspect, 1280.0 / 720.0);
        assert_eq!(viewport.width, 1280);
        assert_eq!(viewport.height, 720);
        assert_eq!(viewport.pixel_ratio, 2.0);
    }

    #[test]
    fn test_drawing_buffer_never_zero() {
        let viewport = Viewport::new(0, 0, 1.0);
        assert_eq!(viewport.drawing_buffer_size(), (1, 1));
    }
}
