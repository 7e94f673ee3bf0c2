use eframe::egui;
use global_hotkey::hotkey::Code;

use crate::core::{format_bound, Intent, PanelLayout, SettingsStore};
use crate::hotkeys::Keymap;
use crate::playback::SessionSnapshot;

/// Draws the floating control panel over the top-right corner of `player`
/// and returns the intents the user clicked this frame.
///
/// The title drags the panel; the offset is written to `store` when the drag
/// ends, the minimized flag on every toggle.
pub fn show_panel(
    ctx: &egui::Context,
    player: egui::Rect,
    layout: &mut PanelLayout,
    store: &mut dyn SettingsStore,
    snapshot: Option<&SessionSnapshot>,
    keymap: &Keymap,
) -> Vec<Intent> {
    let mut intents = Vec::new();
    let anchor = egui::pos2(player.right() - layout.right, player.top() + layout.top);

    egui::Area::new(egui::Id::new("guitar_helper_panel"))
        .order(egui::Order::Foreground)
        .pivot(egui::Align2::RIGHT_TOP)
        .fixed_pos(anchor)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    let title = ui.add(
                        egui::Label::new(egui::RichText::new("🎸 Guitar Helper").strong())
                            .sense(egui::Sense::drag()),
                    );
                    if title.dragged() {
                        let delta = title.drag_delta();
                        layout.drag_by(delta.x, delta.y);
                    }
                    if title.drag_stopped() && !layout.minimized {
                        layout.finish_drag(store);
                    }

                    let toggle = if layout.minimized { "🗖" } else { "🗕" };
                    if ui.small_button(toggle).clicked() {
                        layout.toggle_minimized(store);
                    }
                });

                if layout.minimized {
                    return;
                }

                ui.separator();
                match snapshot {
                    Some(snapshot) => show_rows(ui, snapshot, keymap, &mut intents),
                    None => {
                        ui.weak("Waiting for media…");
                    }
                }
            });
        });

    intents
}

fn show_rows(ui: &mut egui::Ui, snapshot: &SessionSnapshot, keymap: &Keymap, intents: &mut Vec<Intent>) {
    egui::Grid::new("guitar_helper_rows")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Loop");
            ui.horizontal(|ui| {
                intent_button(ui, "[", Intent::SetLoopStart, keymap, intents);
                ui.monospace(format_bound(snapshot.loop_start));
                intent_button(ui, "]", Intent::SetLoopEnd, keymap, intents);
                ui.monospace(format_bound(snapshot.loop_end));
                intent_button(ui, toggle_label(snapshot.loop_active), Intent::ToggleLoop, keymap, intents);
            });
            ui.end_row();

            ui.label("Speed");
            ui.horizontal(|ui| {
                intent_button(ui, "-", Intent::SpeedDown, keymap, intents);
                ui.monospace(speed_label(snapshot.speed));
                intent_button(ui, "+", Intent::SpeedUp, keymap, intents);
            });
            ui.end_row();

            ui.label("Countdown");
            ui.horizontal(|ui| {
                intent_button(ui, sound_label(snapshot.sound_enabled), Intent::ToggleSound, keymap, intents);
                intent_button(ui, toggle_label(snapshot.countdown_enabled), Intent::ToggleCountdown, keymap, intents);
                intent_button(ui, "Count in", Intent::RequestCountdown, keymap, intents);
            });
            ui.end_row();
        });
}

fn intent_button(ui: &mut egui::Ui, label: &str, intent: Intent, keymap: &Keymap, intents: &mut Vec<Intent>) {
    let mut response = ui.button(label);
    let hint = shortcut_hint(keymap, intent);
    if !hint.is_empty() {
        response = response.on_hover_text(hint);
    }
    if response.clicked() {
        intents.push(intent);
    }
}

pub fn speed_label(speed: f64) -> String {
    format!("{:.1}x", speed)
}

pub fn toggle_label(on: bool) -> &'static str {
    if on {
        "On"
    } else {
        "Off"
    }
}

pub fn sound_label(enabled: bool) -> &'static str {
    if enabled {
        "🔊"
    } else {
        "🔇"
    }
}

fn key_glyph(code: Code) -> String {
    match code {
        Code::BracketLeft => "[".to_string(),
        Code::BracketRight => "]".to_string(),
        Code::Minus => "-".to_string(),
        Code::Equal => "=".to_string(),
        Code::NumpadAdd => "Num +".to_string(),
        Code::NumpadSubtract => "Num -".to_string(),
        Code::Comma => ",".to_string(),
        Code::Period => ".".to_string(),
        Code::Semicolon => ";".to_string(),
        Code::Slash => "/".to_string(),
        Code::Backslash => "\\".to_string(),
        other => {
            let name = format!("{:?}", other);
            let short = name
                .strip_prefix("Key")
                .or_else(|| name.strip_prefix("Digit"))
                .map(str::to_string);
            short.unwrap_or(name)
        }
    }
}

/// Hover text listing the keys bound to `intent`, empty when none are.
pub fn shortcut_hint(keymap: &Keymap, intent: Intent) -> String {
    let keys: Vec<String> = keymap.keys_for(intent).into_iter().map(key_glyph).collect();
    if keys.is_empty() {
        String::new()
    } else {
        format!("Shortcut: {}", keys.join(" / "))
    }
}
