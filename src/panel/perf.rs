const UPDATE_INTERVAL: f32 = 1.0;

/// Frame rate and frame time, averaged over roughly one second
#[derive(Debug, Clone, Default)]
pub struct PerfCounter {
    frame_count: u32,
    accumulated: f32,
    fps: f32,
    frame_ms: f32,
}

impl PerfCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame that took `delta` seconds
    pub fn record(&mut self, delta: f32) {
        self.frame_count += 1;
        self.accumulated += delta;

        if self.accumulated >= UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.accumulated;
            self.frame_ms = self.accumulated * 1000.0 / self.frame_count as f32;
            log::debug!("FPS: {:.1} ({:.2} ms)", self.fps, self.frame_ms);
            self.frame_count = 0;
            self.accumulated = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_after_one_second() {
        let mut perf = PerfCounter::new();
        for _ in 0..59 {
            perf.record(1.0 / 60.0);
        }
        assert_eq!(perf.fps(), 0.0);

        perf.record(1.0 / 60.0 + 1e-4);
        assert!((perf.fps() - 60.0).abs() < 0.1);
        assert!((perf.frame_ms() - 16.67).abs() < 0.1);
    }
}
