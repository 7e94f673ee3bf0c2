use std::time::{Duration, Instant};

use eframe::egui;
use global_hotkey::hotkey::Code;

use crate::core::{format_timestamp, Intent, PanelLayout, SettingsStore};
use crate::gui::overlay::show_countdown_overlay;
use crate::gui::panel::{show_panel, speed_label};
use crate::gui::timeline::{show_timeline, LoopMarkers};
use crate::hotkeys::{pressed_codes, FocusTarget, Keymap};
use crate::playback::{ClockMedia, ClockProbe, ClockRemote, CountdownOrigin, SessionHost, SessionSnapshot};

const REPAINT_INTERVAL: Duration = Duration::from_millis(50);
const DEFAULT_CLIP_SECONDS: f64 = 180.0;

/// Desktop host: a clock-driven stand-in player with the practice panel on top.
pub struct GuitarHelperApp {
    pub host: SessionHost,
    pub probe: ClockProbe,
    pub remote: Option<ClockRemote>,
    pub keymap: Keymap,
    pub layout: PanelLayout,
    pub settings: Box<dyn SettingsStore>,
    /// Length of the next clip loaded with "Replace media".
    pub clip_length: f64,
}

impl GuitarHelperApp {
    pub fn new(host: SessionHost, probe: ClockProbe, keymap: Keymap, settings: Box<dyn SettingsStore>) -> Self {
        let layout = PanelLayout::load(settings.as_ref());
        log::debug!("Panel layout: {:?}", layout);

        let mut app = Self {
            host,
            probe,
            remote: None,
            keymap,
            layout,
            settings,
            clip_length: DEFAULT_CLIP_SECONDS,
        };
        app.load_clip(DEFAULT_CLIP_SECONDS);
        app
    }

    /// Swaps the page's media element for a fresh one of `duration` seconds.
    pub fn load_clip(&mut self, duration: f64) {
        self.remove_clip();
        let media = ClockMedia::new(duration);
        self.remote = Some(media.remote());
        self.probe.load(media);
        log::info!("Loaded a {} clip", format_timestamp(duration));
    }

    pub fn remove_clip(&mut self) {
        if let Some(remote) = self.remote.take() {
            remote.detach();
            log::info!("Removed the current clip");
        }
    }

    /// Routes pressed keys through the keymap unless a text field owns them.
    pub fn handle_keys(&mut self, codes: &[Code], focus: FocusTarget) {
        for code in codes {
            if let Some(intent) = self.keymap.lookup(*code, focus) {
                log::debug!("Shortcut {:?} -> {:?}", code, intent);
                self.host.dispatch(intent);
            }
        }
    }

    pub fn dispatch_all(&mut self, intents: Vec<Intent>) {
        for intent in intents {
            self.host.dispatch(intent);
        }
    }

    pub fn status_text(&self, snapshot: Option<&SessionSnapshot>) -> String {
        let Some(snapshot) = snapshot else {
            return format!("Looking for media (attempt {})", self.host.discovery_attempts());
        };
        let countdown = self.host.session().map(|s| s.countdown());
        match countdown.and_then(|c| c.origin()) {
            Some(CountdownOrigin::LoopReentry) => "Counting in (loop restart)".to_string(),
            Some(CountdownOrigin::UserInitiated) => "Counting in".to_string(),
            None if snapshot.playing => "Playing".to_string(),
            None => "Paused".to_string(),
        }
    }

    fn show_transport(&mut self, ui: &mut egui::Ui, snapshot: Option<&SessionSnapshot>) {
        ui.horizontal(|ui| {
            match self.remote.clone() {
                Some(remote) => {
                    let label = if remote.is_playing() { "⏸ Pause" } else { "▶ Play" };
                    if ui.button(label).clicked() {
                        if remote.is_playing() {
                            remote.pause();
                        } else {
                            remote.play();
                        }
                    }
                }
                None => {
                    ui.add_enabled(false, egui::Button::new("▶ Play"));
                }
            }

            ui.separator();
            ui.label("Clip length (s)");
            ui.add(egui::Slider::new(&mut self.clip_length, 5.0..=3600.0).logarithmic(true));
            if ui.button("Replace media").clicked() {
                self.load_clip(self.clip_length);
            }
            if ui.add_enabled(self.remote.is_some(), egui::Button::new("Remove media")).clicked() {
                self.remove_clip();
            }
        });

        if let Some(remote) = &self.remote {
            let markers = snapshot
                .map(|s| LoopMarkers {
                    start: s.loop_start,
                    end: s.loop_end,
                    active: s.loop_active,
                })
                .unwrap_or_default();
            if let Some(target) = show_timeline(ui, remote.position(), remote.duration(), markers) {
                remote.scrub(target);
            }
        }
    }

    /// Fills the central area with the "video" and returns its rect.
    fn show_player(&self, ui: &mut egui::Ui) -> egui::Rect {
        let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let painter = ui.painter();
        painter.rect_filled(rect, egui::Rounding::same(8.0), egui::Color32::from_gray(20));

        let text = match &self.remote {
            Some(remote) => {
                let state = if remote.is_playing() { "▶" } else { "⏸" };
                format!("{} {}  ·  {}", state, format_timestamp(remote.position()), speed_label(remote.rate()))
            }
            None => "No media on the page".to_string(),
        };
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::monospace(28.0),
            egui::Color32::from_gray(200),
        );
        rect
    }
}

/// What holds keyboard focus right now, in keymap terms.
pub fn focus_target(ctx: &egui::Context) -> FocusTarget {
    if ctx.wants_keyboard_input() {
        FocusTarget::TextEntry
    } else if ctx.memory(|m| m.focused().is_some()) {
        FocusTarget::Widget
    } else {
        FocusTarget::Nothing
    }
}

impl eframe::App for GuitarHelperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.host.pump(Instant::now());

        let codes = ctx.input(|i| pressed_codes(&i.events));
        if !codes.is_empty() {
            self.handle_keys(&codes, focus_target(ctx));
        }

        let snapshot = self.host.snapshot();

        egui::TopBottomPanel::top("transport").show(ctx, |ui| {
            self.show_transport(ui, snapshot.as_ref());
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Status:");
                ui.label(self.status_text(snapshot.as_ref()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("Keys: [ ] set loop · L loop · C countdown · - / + speed");
                });
            });
        });

        let player = egui::CentralPanel::default()
            .show(ctx, |ui| self.show_player(ui))
            .inner;

        let intents = show_panel(
            ctx,
            player,
            &mut self.layout,
            self.settings.as_mut(),
            snapshot.as_ref(),
            &self.keymap,
        );
        self.dispatch_all(intents);

        if let Some(remaining) = snapshot.and_then(|s| s.countdown_remaining) {
            show_countdown_overlay(ctx, player, remaining);
        }

        // Position readouts and the countdown move without input events.
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
