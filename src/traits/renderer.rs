use crate::context::AppContext;
use crate::frame::FrameInfo;

/// Draws one frame of the scene held by the application context
///
/// Takes the context mutably because the debug panel edits live scene
/// state while the frame is being built.
pub trait FrameRenderer {
    fn render_frame(&mut self, ctx: &mut AppContext, frame: &FrameInfo) -> anyhow::Result<()>;
}
