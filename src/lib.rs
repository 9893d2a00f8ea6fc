pub mod camera;
pub mod cli;
pub mod config;
pub mod context;
pub mod controls;
pub mod core;
pub mod frame;
pub mod loaders;
pub mod panel;
pub mod promise_demo;
pub mod render_loop;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod traits;

pub use context::AppContext;
pub use render_loop::{LoopState, RenderLoop};
pub use scenes::{bootstrap, AssembledScene, BootstrapTask};
