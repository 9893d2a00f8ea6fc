// render_loop.rs - Self-scheduling frame loop as an explicit state machine
use anyhow::Result;

use crate::context::AppContext;
use crate::core::Clock;
use crate::frame::FrameInfo;
use crate::traits::{FrameRenderer, WindowContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Drives one scene update and one render per redraw, then asks for the next redraw
///
/// A render error leaves the loop without a pending redraw, so it halts.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    clock: Clock,
    last: Option<FrameInfo>,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            clock: Clock::new(),
            last: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn frame_count(&self) -> u64 {
        self.last.map_or(0, |f| f.number + 1)
    }

    /// Begin looping: resets the clock and schedules the first frame
    pub fn start(&mut self, window: &dyn WindowContext) {
        if self.state != LoopState::Idle {
            log::warn!("Render loop already started ({:?})", self.state);
            return;
        }
        self.clock.start();
        self.state = LoopState::Running;
        log::info!("Render loop started");
        window.request_redraw();
    }

    /// Stop for good; later ticks are no-ops
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            log::info!("Render loop stopped after {} frames", self.frame_count());
        }
        self.state = LoopState::Stopped;
    }

    /// Handle a redraw using wall-clock time
    pub fn tick(
        &mut self,
        ctx: &mut AppContext,
        renderer: &mut dyn FrameRenderer,
        window: &dyn WindowContext,
    ) -> Result<Option<FrameInfo>> {
        if !self.is_running() {
            return Ok(None);
        }
        let elapsed = self.clock.elapsed();
        self.advance(elapsed, ctx, renderer, window)
    }

    /// One iteration at `elapsed` seconds since start
    ///
    /// Returns the frame that was rendered, or `None` when not running.
    pub fn advance(
        &mut self,
        elapsed: f32,
        ctx: &mut AppContext,
        renderer: &mut dyn FrameRenderer,
        window: &dyn WindowContext,
    ) -> Result<Option<FrameInfo>> {
        if !self.is_running() {
            return Ok(None);
        }

        let frame = match self.last {
            Some(last) => last.next_at(elapsed),
            None => FrameInfo::new(0, elapsed, 0.0),
        };
        self.last = Some(frame);

        ctx.advance(&frame);
        renderer.render_frame(ctx, &frame)?;
        window.request_redraw();

        Ok(Some(frame))
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use std::cell::Cell;

    struct CountingWindow(Cell<u32>);

    impl WindowContext for CountingWindow {
        fn request_redraw(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    struct NullRenderer;

    impl FrameRenderer for NullRenderer {
        fn render_frame(&mut self, _ctx: &mut AppContext, _frame: &FrameInfo) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_frames_are_numbered_with_deltas() {
        let mut ctx = AppContext::new(&SceneConfig::default(), 800, 600, 1.0);
        let window = CountingWindow(Cell::new(0));
        let mut render_loop = RenderLoop::new();
        render_loop.start(&window);

        let first = render_loop
            .advance(0.1, &mut ctx, &mut NullRenderer, &window)
            .unwrap()
            .unwrap();
        let second = render_loop
            .advance(0.35, &mut ctx, &mut NullRenderer, &window)
            .unwrap()
            .unwrap();

        assert_eq!(first.number, 0);
        assert_eq!(first.delta, 0.0);
        assert_eq!(second.number, 1);
        assert!((second.delta - 0.25).abs() < 1e-6);
        assert_eq!(render_loop.frame_count(), 2);
    }

    #[test]
    fn test_start_twice_schedules_once() {
        let window = CountingWindow(Cell::new(0));
        let mut render_loop = RenderLoop::new();

        render_loop.start(&window);
        render_loop.start(&window);

        assert_eq!(window.0.get(), 1);
    }
}
