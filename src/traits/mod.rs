pub mod loader;
pub mod renderer;
pub mod window;

pub use loader::*;
pub use renderer::*;
pub use window::*;
