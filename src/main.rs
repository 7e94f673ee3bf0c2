mod audio;
mod core;
mod gui;
mod hotkeys;
mod playback;

use eframe::egui;
use crate::audio::RodioCuePlayer;
use crate::core::{HelperConfig, JsonFileStore, MemoryStore, SettingsStore};
use crate::gui::GuitarHelperApp;
use crate::hotkeys::Keymap;
use crate::playback::{ClockProbe, SessionHost, TokioTicker};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = HelperConfig::load().unwrap_or_else(|e| {
        log::warn!("Using default config: {}", e);
        HelperConfig::default()
    });

    // Countdown timers run here; the UI thread only drains their ticks.
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| anyhow::anyhow!("Failed to start timer runtime: {}", e))?;
    let (ticker, ticks) = TokioTicker::new(runtime.handle().clone());

    let settings: Box<dyn SettingsStore> = match JsonFileStore::open(&JsonFileStore::default_path()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Panel layout will not be saved: {}", e);
            Box::new(MemoryStore::default())
        }
    };

    let probe = ClockProbe::default();
    let host = SessionHost::new(
        Box::new(probe.clone()),
        Box::new(ticker),
        Box::new(RodioCuePlayer::new(config.cues.clone())),
        ticks,
        &config,
    );
    let keymap = Keymap::from_config(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 640.0])
            .with_title("Guitar Helper - Practice Loop & Count-in"),
        ..Default::default()
    };

    eframe::run_native(
        "Guitar Helper",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(GuitarHelperApp::new(host, probe, keymap, settings)))
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    drop(runtime);
    Ok(())
}
