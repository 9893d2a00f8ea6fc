pub mod clock;
pub mod gpu_context;
pub mod input_adapter;
pub mod timer;
pub mod viewport;
pub mod wake;

pub use clock::Clock;
pub use gpu_context::GpuContext;
pub use input_adapter::{PointerAction, PointerInput};
pub use timer::Countdown;
pub use viewport::{Viewport, MAX_PIXEL_RATIO};
pub use wake::notify_waker;
