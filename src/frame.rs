/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the render loop started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }

    /// Frame sampled at `time`, following this one
    pub fn next_at(&self, time: f32) -> Self {
        Self {
            number: self.number + 1,
            time,
            delta: (time - self.time).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_at_derives_delta() {
        let first = FrameInfo::new(0, 1.0, 0.0);
        let second = first.next_at(1.25);

        assert_eq!(second.number, 1);
        assert_eq!(second.delta, 0.25);
    }

    #[test]
    fn test_time_going_backwards_clamps_delta() {
        let frame = FrameInfo::new(3, 2.0, 0.1).next_at(1.0);
        assert_eq!(frame.delta, 0.0);
    }
}
