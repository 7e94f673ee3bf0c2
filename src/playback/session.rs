use crate::audio::CuePlayer;
use crate::core::Intent;
use crate::playback::countdown::{
    CountdownOrigin, CountdownRequest, CountdownScheduler, CountdownSettings, Feedback, RunId, TickOutcome, Ticker,
};
use crate::playback::looping::{LoopCheck, LoopMonitor, LoopState};
use crate::playback::media::{MediaHandle, MediaNotice};
use crate::playback::speed::SpeedController;

/// What the control panel needs to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub position: f64,
    pub playing: bool,
    pub loop_start: Option<f64>,
    pub loop_end: Option<f64>,
    pub loop_active: bool,
    pub speed: f64,
    pub countdown_enabled: bool,
    pub sound_enabled: bool,
    pub countdown_remaining: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Live,
    Detached,
}

/// Services owned by the host and lent to the session for one turn.
pub struct Services<'a> {
    pub ticker: &'a mut dyn Ticker,
    pub cues: &'a mut dyn CuePlayer,
}

impl<'a> Services<'a> {
    fn feedback(&mut self) -> Feedback<'_> {
        Feedback {
            ticker: &mut *self.ticker,
            cues: &mut *self.cues,
        }
    }
}

/// Playback state for one discovered media element.
pub struct PlaybackSession {
    media: MediaHandle,
    looping: LoopMonitor,
    speed: SpeedController,
    countdown: CountdownScheduler,
    settings: CountdownSettings,
}

impl PlaybackSession {
    pub fn new(media: MediaHandle, settings: CountdownSettings) -> Self {
        log::info!("Playback session started");
        Self {
            media,
            looping: LoopMonitor::default(),
            speed: SpeedController::default(),
            countdown: CountdownScheduler::default(),
            settings,
        }
    }

    pub fn countdown(&self) -> &CountdownScheduler {
        &self.countdown
    }

    pub fn apply(&mut self, intent: Intent, services: &mut Services<'_>) {
        log::debug!("Intent: {:?}", intent);
        match intent {
            Intent::SetLoopStart => {
                if self.media.is_attached() {
                    let _ = self.looping.set_start(self.media.position());
                }
            }
            Intent::SetLoopEnd => {
                if self.media.is_attached() {
                    let _ = self.looping.set_end(self.media.position());
                }
            }
            Intent::ToggleLoop => {
                // Rejections are already logged by the monitor.
                if let Ok(state) = self.looping.toggle() {
                    log::debug!("Loop is now {:?}", state);
                }
            }
            Intent::ToggleCountdown => {
                self.settings.enabled = !self.settings.enabled;
                log::info!("Countdown {}", if self.settings.enabled { "enabled" } else { "disabled" });
            }
            Intent::ToggleSound => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                log::info!("Countdown sound {}", if self.settings.sound_enabled { "on" } else { "off" });
            }
            Intent::SpeedUp => {
                self.speed.step_up(&mut self.media);
            }
            Intent::SpeedDown => {
                self.speed.step_down(&mut self.media);
            }
            Intent::RequestCountdown => {
                self.request_countdown(CountdownOrigin::UserInitiated, services);
            }
        }
    }

    fn request_countdown(&mut self, origin: CountdownOrigin, services: &mut Services<'_>) -> CountdownRequest {
        let rewind_to = self.looping.armed_start();
        self.countdown
            .request(origin, rewind_to, &self.settings, &mut self.media, &mut services.feedback())
    }

    pub fn handle_notice(&mut self, notice: MediaNotice, services: &mut Services<'_>) -> SessionStatus {
        match notice {
            MediaNotice::PositionUpdate(t) => {
                // Boundary check and the countdown it asks for happen in one turn.
                if let LoopCheck::Wrapped { .. } = self.looping.on_position(t, &mut self.media) {
                    if self.settings.enabled {
                        self.request_countdown(CountdownOrigin::LoopReentry, services);
                    }
                }
            }
            MediaNotice::Resumed(origin) => {
                let rewind_to = self.looping.armed_start();
                let outcome = self.countdown.on_resume(
                    origin,
                    rewind_to,
                    &self.settings,
                    &mut self.media,
                    &mut services.feedback(),
                );
                log::debug!("Resume ({:?}) -> {:?}", origin, outcome);
            }
            MediaNotice::Detached => {
                log::info!("Media element detached");
                return SessionStatus::Detached;
            }
        }
        SessionStatus::Live
    }

    /// Drains and handles everything the media element raised since last time.
    pub fn pump_media(&mut self, services: &mut Services<'_>) -> SessionStatus {
        for notice in self.media.poll() {
            if self.handle_notice(notice, services) == SessionStatus::Detached {
                return SessionStatus::Detached;
            }
        }
        SessionStatus::Live
    }

    pub fn on_tick(&mut self, run: RunId, services: &mut Services<'_>) -> TickOutcome {
        self.countdown
            .on_tick(run, &self.settings, &mut self.media, &mut services.feedback())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            position: self.media.position(),
            playing: !self.media.is_paused(),
            loop_start: self.looping.start(),
            loop_end: self.looping.end(),
            loop_active: self.looping.state() == LoopState::Armed,
            speed: self.speed.speed(),
            countdown_enabled: self.settings.enabled,
            sound_enabled: self.settings.sound_enabled,
            countdown_remaining: self.countdown.remaining(),
        }
    }

    pub fn teardown(&mut self) {
        self.countdown.teardown();
        log::info!("Playback session ended");
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.countdown.teardown();
    }
}
