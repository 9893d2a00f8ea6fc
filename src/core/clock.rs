use std::time::Instant;

/// Wall-clock time source; reads zero until started
#[derive(Debug, Default, Clone, Copy)]
pub struct Clock {
    origin: Option<Instant>,
    previous: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started() -> Self {
        let mut clock = Self::new();
        clock.start();
        clock
    }

    /// Measure from now, discarding any earlier start
    pub fn start(&mut self) {
        let now = Instant::now();
        self.origin = Some(now);
        self.previous = Some(now);
    }

    pub fn is_started(&self) -> bool {
        self.origin.is_some()
    }

    /// Seconds since `start`
    pub fn elapsed(&self) -> f32 {
        self.origin
            .map_or(0.0, |origin| origin.elapsed().as_secs_f32())
    }

    /// Seconds since the previous call, or since `start` on the first one
    ///
    /// An unstarted clock starts here and reports zero.
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let previous = self.previous.replace(now).unwrap_or(now);
        self.origin.get_or_insert(now);
        now.duration_since(previous).as_secs_f32()
    }
}
