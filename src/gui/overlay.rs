use eframe::egui;

/// Dims the player and shows the remaining count in its centre.
///
/// Painted on its own layer between the player and the control panel; it
/// takes no input.
pub fn show_countdown_overlay(ctx: &egui::Context, player: egui::Rect, remaining: u32) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Middle,
        egui::Id::new("countdown_overlay"),
    ));

    painter.rect_filled(player, egui::Rounding::ZERO, egui::Color32::from_black_alpha(160));
    painter.text(
        player.center(),
        egui::Align2::CENTER_CENTER,
        remaining.to_string(),
        egui::FontId::proportional(overlay_font_size(player)),
        egui::Color32::WHITE,
    );
}

fn overlay_font_size(player: egui::Rect) -> f32 {
    (player.width().min(player.height()) * 0.4).clamp(24.0, 200.0)
}
