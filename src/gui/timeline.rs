use eframe::egui;
use crate::core::format_timestamp;

/// What the timeline draws besides the playhead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMarkers {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub active: bool,
}

/// Seek bar for the demo player with the loop region drawn over it.
///
/// Returns a seek target when the user clicks or drags on the bar.
pub fn show_timeline(ui: &mut egui::Ui, position: f64, duration: f64, markers: LoopMarkers) -> Option<f64> {
    let available_width = ui.available_width() - 40.0; // Leave margin for labels
    let timeline_height = 60.0;

    let (rect, response) = ui.allocate_exact_size(
        egui::Vec2::new(available_width.max(100.0), timeline_height),
        egui::Sense::click_and_drag(),
    );

    let track_rect = egui::Rect::from_min_size(
        rect.min + egui::Vec2::new(10.0, 20.0),
        egui::Vec2::new(rect.width() - 20.0, 20.0),
    );

    if ui.is_rect_visible(rect) && duration > 0.0 {
        let painter = ui.painter();
        let x_for = |t: f64| track_rect.min.x + ((t / duration).clamp(0.0, 1.0) * track_rect.width() as f64) as f32;

        painter.rect_filled(rect, egui::Rounding::same(4.0), ui.visuals().extreme_bg_color);
        painter.rect_stroke(
            track_rect,
            egui::Rounding::same(2.0),
            egui::Stroke::new(1.0, ui.visuals().text_color()),
        );

        // Time markers
        let time_per_pixel = duration / track_rect.width() as f64;
        let interval = marker_interval(time_per_pixel);
        for i in 0..((duration / interval) as i32 + 1) {
            let time = i as f64 * interval;
            if time > duration {
                break;
            }
            let x = x_for(time);
            painter.line_segment(
                [egui::Pos2::new(x, track_rect.min.y), egui::Pos2::new(x, track_rect.max.y)],
                egui::Stroke::new(0.5, ui.visuals().weak_text_color()),
            );
            painter.text(
                egui::Pos2::new(x, track_rect.min.y - 15.0),
                egui::Align2::CENTER_BOTTOM,
                format_timestamp(time),
                egui::FontId::monospace(10.0),
                ui.visuals().weak_text_color(),
            );
        }

        // Loop region, dimmed while the loop is off or the bounds are inverted.
        if let (Some(start), Some(end)) = (markers.start, markers.end) {
            let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
            let alpha = if markers.active { 0.6 } else { 0.2 };
            let region = egui::Rect::from_min_max(
                egui::Pos2::new(x_for(lo), track_rect.min.y),
                egui::Pos2::new(x_for(hi), track_rect.max.y),
            );
            painter.rect_filled(
                region,
                egui::Rounding::same(2.0),
                ui.visuals().selection.bg_fill.gamma_multiply(alpha),
            );
        }

        for bound in [markers.start, markers.end].into_iter().flatten() {
            let handle = egui::Rect::from_center_size(
                egui::Pos2::new(x_for(bound), track_rect.center().y),
                egui::Vec2::new(4.0, track_rect.height() + 10.0),
            );
            painter.rect_filled(handle, egui::Rounding::same(2.0), ui.visuals().selection.bg_fill);
        }

        // Playhead
        let current_x = x_for(position);
        painter.line_segment(
            [egui::Pos2::new(current_x, rect.min.y), egui::Pos2::new(current_x, rect.max.y)],
            egui::Stroke::new(2.0, egui::Color32::RED),
        );
        painter.rect_filled(
            egui::Rect::from_center_size(egui::Pos2::new(current_x, rect.min.y + 5.0), egui::Vec2::new(12.0, 10.0)),
            egui::Rounding::same(2.0),
            egui::Color32::RED,
        );

        painter.text(
            rect.max - egui::Vec2::new(10.0, 5.0),
            egui::Align2::RIGHT_BOTTOM,
            format!("{} / {}", format_timestamp(position), format_timestamp(duration)),
            egui::FontId::monospace(12.0),
            ui.visuals().text_color(),
        );
    }

    if response.clicked() || response.dragged() {
        let pointer = response.interact_pointer_pos()?;
        return Some(time_at(pointer.x, track_rect, duration));
    }
    None
}

fn time_at(x: f32, track_rect: egui::Rect, duration: f64) -> f64 {
    let relative = ((x - track_rect.min.x) / track_rect.width()).clamp(0.0, 1.0) as f64;
    relative * duration
}

/// Picks a round marker spacing for roughly 60px between labels.
fn marker_interval(time_per_pixel: f64) -> f64 {
    let base_interval = time_per_pixel * 60.0;

    if base_interval <= 1.0 {
        1.0
    } else if base_interval <= 5.0 {
        5.0
    } else if base_interval <= 10.0 {
        10.0
    } else if base_interval <= 30.0 {
        30.0
    } else if base_interval <= 60.0 {
        60.0
    } else {
        300.0
    }
}
