use super::graph::{NodeId, Scene};

/// Transform component a tween drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    RotationX,
    RotationY,
    RotationZ,
}

impl Channel {
    fn read(self, scene: &Scene, node: NodeId) -> f32 {
        let r = scene.node(node).transform.rotation;
        match self {
            Channel::RotationX => r.x,
            Channel::RotationY => r.y,
            Channel::RotationZ => r.z,
        }
    }

    fn write(self, scene: &mut Scene, node: NodeId, value: f32) {
        let r = &mut scene.node_mut(node).transform.rotation;
        match self {
            Channel::RotationX => r.x = value,
            Channel::RotationY => r.y = value,
            Channel::RotationZ => r.z = value,
        }
    }
}

/// Linear interpolation of one channel, optionally restarting forever
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub target: NodeId,
    pub channel: Channel,
    pub from: f32,
    pub to: f32,
    /// Seconds per cycle
    pub duration: f32,
    pub looping: bool,
}

impl Tween {
    /// Channel value `elapsed` seconds after the tween started
    pub fn sample(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = if self.looping {
            (elapsed % self.duration) / self.duration
        } else {
            (elapsed / self.duration).min(1.0)
        };
        self.from + (self.to - self.from) * t
    }

    /// Step a clock reading, keeping it inside one cycle so it never loses precision
    fn advance_elapsed(&self, elapsed: f32, delta: f32) -> f32 {
        let next = elapsed + delta;
        if self.duration <= 0.0 {
            0.0
        } else if self.looping {
            next % self.duration
        } else {
            next.min(self.duration)
        }
    }
}

/// Runs every registered tween off one shared clock
#[derive(Debug, Default)]
pub struct Animator {
    tweens: Vec<(Tween, f32)>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loop `channel` of `target` from its current value to `to`
    pub fn animate_loop(
        &mut self,
        scene: &Scene,
        target: NodeId,
        channel: Channel,
        to: f32,
        duration: f32,
    ) -> &Tween {
        let tween = Tween {
            target,
            channel,
            from: channel.read(scene, target),
            to,
            duration,
            looping: true,
        };
        self.tweens.push((tween, 0.0));
        &self.tweens[self.tweens.len() - 1].0
    }

    /// Advance every tween by `delta` seconds and write the values back
    pub fn advance(&mut self, scene: &mut Scene, delta: f32) {
        for (tween, elapsed) in &mut self.tweens {
            *elapsed = tween.advance_elapsed(*elapsed, delta);
            tween.channel.write(scene, tween.target, tween.sample(*elapsed));
        }
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
