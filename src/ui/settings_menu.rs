use crate::settings::{FOV_RANGE, FPS_CAP_RANGE, SENSITIVITY_RANGE, Settings};
use crate::ui::UiActions;

pub struct SettingsMenu;

impl SettingsMenu {
    pub fn show(ctx: &egui::Context, settings: &mut Settings) -> UiActions {
        let mut actions = UiActions::default();

        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.add(egui::Slider::new(&mut settings.fov_degrees, FOV_RANGE).text("Field of view"));
                ui.add(
                    egui::Slider::new(&mut settings.mouse_sensitivity, SENSITIVITY_RANGE)
                        .text("Mouse sensitivity"),
                );
                ui.add(egui::Slider::new(&mut settings.fps_cap, FPS_CAP_RANGE).text("FPS cap"));

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Resume").clicked() {
                        actions.resume = true;
                    }
                    if ui.button("Quit").clicked() {
                        actions.quit = true;
                    }
                });
            });

        actions
    }
}
