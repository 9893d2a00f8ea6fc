/// One-shot timer driven by explicit time steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
    fired: bool,
}

impl Countdown {
    /// Running countdown; negative delays behave like zero
    pub fn new(delay: f32) -> Self {
        Self {
            remaining: delay.max(0.0),
            fired: false,
        }
    }

    /// Consume `delta` seconds; true only on the step that runs out the delay
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.fired = true;
        }
        self.fired
    }

    /// Seconds left, zero once fired
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_pending(&self) -> bool {
        !self.fired
    }
}
