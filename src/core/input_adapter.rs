use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Pointer gesture extracted from a window event, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Cursor moved to a new position
    Moved { x: f32, y: f32 },
    /// Cursor dragged with the primary button held
    Rotate { dx: f32, dy: f32 },
    /// One wheel notch; `zoom_in` is true when scrolling away from the user
    Dolly { zoom_in: bool },
}

/// Adapter that turns winit pointer events into orbit-control gestures
#[derive(Debug, Clone)]
pub struct PointerInput {
    scale_factor: f64,
    dragging: bool,
    position: Option<(f32, f32)>,
}

impl PointerInput {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            dragging: false,
            position: None,
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Process a winit WindowEvent; returns every gesture it produced
    pub fn process_event(&mut self, event: &WindowEvent) -> Vec<PointerAction> {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                Vec::new()
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor);
                self.move_to(logical.x, logical.y)
            }
            WindowEvent::CursorLeft { .. } => {
                self.position = None;
                self.dragging = false;
                Vec::new()
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                if y == 0.0 {
                    Vec::new()
                } else {
                    vec![PointerAction::Dolly { zoom_in: y > 0.0 }]
                }
            }
            _ => Vec::new(),
        }
    }

    /// Track an event the debug overlay already handled
    ///
    /// Releases and the cursor leaving still end a drag, and moves still update
    /// the tracked position, but nothing reaches the orbit controls.
    pub fn process_captured(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => self.dragging = false,
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor);
                self.position = Some((logical.x, logical.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.position = None;
                self.dragging = false;
            }
            _ => {}
        }
    }

    /// Record a cursor position in logical pixels
    pub fn move_to(&mut self, x: f32, y: f32) -> Vec<PointerAction> {
        let mut actions = vec![PointerAction::Moved { x, y }];
        if let (true, Some((px, py))) = (self.dragging, self.position) {
            actions.push(PointerAction::Rotate {
                dx: x - px,
                dy: y - py,
            });
        }
        self.position = Some((x, y));
        actions
    }

    /// Press or release the primary button
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }
}

impl Default for PointerInput {
    fn default() -> Self {
        Self::new(1.0)
    }
}
