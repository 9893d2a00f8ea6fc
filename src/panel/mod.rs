pub mod bindings;
pub mod material_select;
pub mod perf;
pub mod ui;

pub use bindings::{default_bindings, Axis, BindingTarget, ControlBinding};
pub use material_select::{MaterialOption, MaterialPalette, MaterialSelector, SelectError};
pub use perf::PerfCounter;
pub use ui::DebugPanel;
