use super::bindings::{default_bindings, ControlBinding};
use super::material_select::MaterialOption;
use super::perf::PerfCounter;
use crate::context::AppContext;

/// egui debug window plus the frame-rate readout
#[derive(Debug, Clone)]
pub struct DebugPanel {
    bindings: Vec<ControlBinding>,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self {
            bindings: default_bindings(),
        }
    }

    pub fn bindings(&self) -> &[ControlBinding] {
        &self.bindings
    }

    pub fn show(&self, egui_ctx: &egui::Context, app: &mut AppContext, perf: &PerfCounter) {
        show_perf(egui_ctx, perf);

        egui::Window::new("Controls")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
            .resizable(false)
            .default_width(240.0)
            .show(egui_ctx, |ui| {
                ui.checkbox(&mut app.controls.auto_rotate, "autoRotate");

                if let Some(selector) = app.selector.as_mut() {
                    let mut choice = selector.current();
                    egui::ComboBox::from_label("material")
                        .selected_text(choice.label())
                        .show_ui(ui, |ui| {
                            for option in MaterialOption::ALL {
                                ui.selectable_value(&mut choice, option, option.label());
                            }
                        });
                    if choice != selector.current() {
                        selector.select(&mut app.scene, choice);
                    }
                }

                ui.separator();

                for binding in &self.bindings {
                    let mut value = binding.get(app);
                    let slider = egui::Slider::new(&mut value, binding.range.clone())
                        .text(binding.label);
                    if ui.add(slider).changed() {
                        binding.set(app, value);
                    }
                }
            });
    }
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn show_perf(egui_ctx: &egui::Context, perf: &PerfCounter) {
    egui::Window::new("FPS")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .frame(egui::Frame::NONE)
        .show(egui_ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0}", perf.fps()))
                    .size(48.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.label(
                egui::RichText::new(format!("FPS  {:.1} ms", perf.frame_ms()))
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
        });
}
