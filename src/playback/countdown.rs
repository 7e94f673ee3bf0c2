// =============================================================================
// COUNTDOWN SCHEDULER - PRE-ROLL COUNT-IN BEFORE PLAYBACK
// =============================================================================
//
// STATES:
// - Idle
// - Running(run): media paused, one repeating timer outstanding
//
// TRANSITIONS:
// - Idle -> Running     user request, loop re-entry, or an external play
//                       while the countdown feature is enabled
// - Running -> Running  each tick decrements `remaining`
// - Running -> Idle     `remaining` hits zero: timer dropped, final cue,
//                       media resumed on our behalf
//
// The resume we issue raises a play notification of its own. It arrives
// labeled Programmatic (see MediaHandle::resume) and is swallowed here, so
// finishing one countdown can never start the next.
//
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::audio::{Cue, CuePlayer};
use crate::playback::media::{MediaHandle, ResumeOrigin};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// Run ids are unique across sessions so a tick queued for a torn-down
// session can never match a run in its successor.
static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one countdown run; ticks for any other run are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub u64);

/// Cancels its repeating timer when dropped.
pub struct TickGuard {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TickGuard {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Source of fixed-cadence real-time ticks, delivered back as `RunId`s.
pub trait Ticker {
    fn start(&mut self, run: RunId, period: Duration) -> TickGuard;
}

/// Collaborators the countdown drives besides the media.
pub struct Feedback<'a> {
    pub ticker: &'a mut dyn Ticker,
    pub cues: &'a mut dyn CuePlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownSettings {
    pub enabled: bool,
    pub seconds: u32,
    pub sound_enabled: bool,
}

impl From<&crate::core::CountdownConfig> for CountdownSettings {
    fn from(config: &crate::core::CountdownConfig) -> Self {
        Self {
            enabled: config.enabled,
            seconds: config.effective_seconds(),
            sound_enabled: config.sound_enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOrigin {
    UserInitiated,
    LoopReentry,
}

struct CountdownRun {
    id: RunId,
    remaining: u32,
    origin: CountdownOrigin,
    _timer: TickGuard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownRequest {
    Started { run: RunId, remaining: u32 },
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counting(u32),
    Finished,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// Our own resume coming back around.
    Swallowed,
    Ignored,
    Started(RunId),
}

#[derive(Default)]
pub struct CountdownScheduler {
    run: Option<CountdownRun>,
}

impl CountdownScheduler {
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.run.as_ref().map(|run| run.remaining)
    }

    pub fn origin(&self) -> Option<CountdownOrigin> {
        self.run.as_ref().map(|run| run.origin)
    }

    /// Starts a run unless one is already alive. `rewind_to` is the armed
    /// loop start, used only for fresh user-initiated starts.
    pub fn request(
        &mut self,
        origin: CountdownOrigin,
        rewind_to: Option<f64>,
        settings: &CountdownSettings,
        media: &mut MediaHandle,
        fx: &mut Feedback<'_>,
    ) -> CountdownRequest {
        if self.run.is_some() {
            log::debug!("Countdown already running, ignoring {:?} request", origin);
            return CountdownRequest::AlreadyRunning;
        }

        media.pause();
        if origin == CountdownOrigin::UserInitiated {
            if let Some(start) = rewind_to {
                media.seek(start);
            }
        }

        let id = RunId(NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed));
        let remaining = settings.seconds.max(1);
        let timer = fx.ticker.start(id, TICK_PERIOD);
        self.run = Some(CountdownRun {
            id,
            remaining,
            origin,
            _timer: timer,
        });

        log::info!("Countdown {:?} started ({:?}, {}s)", id, origin, remaining);
        play_cue(settings, fx.cues, Cue::Tick);
        CountdownRequest::Started { run: id, remaining }
    }

    pub fn on_tick(
        &mut self,
        run: RunId,
        settings: &CountdownSettings,
        media: &mut MediaHandle,
        fx: &mut Feedback<'_>,
    ) -> TickOutcome {
        let Some(current) = self.run.as_mut().filter(|current| current.id == run) else {
            log::debug!("Dropping stale tick for {:?}", run);
            return TickOutcome::Stale;
        };

        current.remaining = current.remaining.saturating_sub(1);
        if current.remaining > 0 {
            let remaining = current.remaining;
            log::debug!("Countdown {:?}: {}", run, remaining);
            play_cue(settings, fx.cues, Cue::Tick);
            return TickOutcome::Counting(remaining);
        }

        // Dropping the run drops its timer guard.
        self.run = None;
        play_cue(settings, fx.cues, Cue::Final);
        media.resume();
        log::info!("Countdown {:?} finished, playback resumed", run);
        TickOutcome::Finished
    }

    pub fn on_resume(
        &mut self,
        origin: ResumeOrigin,
        rewind_to: Option<f64>,
        settings: &CountdownSettings,
        media: &mut MediaHandle,
        fx: &mut Feedback<'_>,
    ) -> ResumeOutcome {
        match origin {
            ResumeOrigin::Programmatic => ResumeOutcome::Swallowed,
            ResumeOrigin::External if !settings.enabled => ResumeOutcome::Ignored,
            ResumeOrigin::External => {
                match self.request(CountdownOrigin::UserInitiated, rewind_to, settings, media, fx) {
                    CountdownRequest::Started { run, .. } => ResumeOutcome::Started(run),
                    CountdownRequest::AlreadyRunning => ResumeOutcome::Ignored,
                }
            }
        }
    }

    /// Drops any live run (and its timer) when the session goes away.
    pub fn teardown(&mut self) {
        if let Some(run) = self.run.take() {
            log::info!("Countdown {:?} cancelled by session teardown", run.id);
        }
    }
}

// Sound is cosmetic: failures are logged and the countdown carries on.
fn play_cue(settings: &CountdownSettings, cues: &mut dyn CuePlayer, cue: Cue) {
    if !settings.sound_enabled {
        return;
    }
    if let Err(e) = cues.play(cue) {
        log::warn!("Failed to play countdown sound: {}", e);
    }
}
