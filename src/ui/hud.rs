use egui::{Align2, Color32, Id, LayerId, Order, Stroke};

use crate::game::block::BlockKind;

pub struct Hud;

impl Hud {
    pub fn show(ctx: &egui::Context, fps: f32, selected: BlockKind) {
        let painter = ctx.layer_painter(LayerId::new(Order::Background, Id::new("crosshair")));
        let center = ctx.screen_rect().center();
        let stroke = Stroke::new(2.0, Color32::from_white_alpha(180));
        painter.line_segment(
            [center - egui::vec2(8.0, 0.0), center + egui::vec2(8.0, 0.0)],
            stroke,
        );
        painter.line_segment(
            [center - egui::vec2(0.0, 8.0), center + egui::vec2(0.0, 8.0)],
            stroke,
        );

        egui::Area::new(Id::new("hud"))
            .anchor(Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
            .show(ctx, |ui| {
                ui.colored_label(Color32::WHITE, format!("FPS: {fps:.0}"));
                ui.colored_label(Color32::WHITE, format!("Block: {}", selected.name()));
            });
    }
}
