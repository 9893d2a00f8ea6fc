/// Window lifecycle abstraction used by the render loop
pub trait WindowContext {
    /// Ask for another redraw; the next frame is delivered as an event
    fn request_redraw(&self);
}

impl WindowContext for winit::window::Window {
    fn request_redraw(&self) {
        winit::window::Window::request_redraw(self);
    }
}
