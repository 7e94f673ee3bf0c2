//! Test doubles for the playback core.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;

use crate::audio::{Cue, CuePlayer};
use crate::playback::countdown::{RunId, TickGuard, Ticker};
use crate::playback::discovery::MediaProbe;
use crate::playback::media::{MediaElement, NativeEvent};

#[derive(Debug)]
pub struct FakeState {
    pub position: f64,
    pub duration: Option<f64>,
    pub paused: bool,
    pub connected: bool,
    pub rate: f64,
    pub seeks: Vec<f64>,
    pub rates: Vec<f64>,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub pending: Vec<NativeEvent>,
}

/// Scriptable media element; clones share state.
#[derive(Debug, Clone)]
pub struct FakeMedia(Rc<RefCell<FakeState>>);

impl FakeMedia {
    pub fn new(duration: Option<f64>) -> Self {
        Self(Rc::new(RefCell::new(FakeState {
            position: 0.0,
            duration,
            paused: true,
            connected: true,
            rate: 1.0,
            seeks: Vec::new(),
            rates: Vec::new(),
            play_calls: 0,
            pause_calls: 0,
            pending: Vec::new(),
        })))
    }

    pub fn state(&self) -> RefMut<'_, FakeState> {
        self.0.borrow_mut()
    }

    /// Host progress tick at `t`.
    pub fn time_update(&self, t: f64) {
        let mut state = self.state();
        state.position = t;
        state.pending.push(NativeEvent::TimeUpdate(t));
    }

    /// The user pressed the host's play button.
    pub fn user_play(&self) {
        let mut state = self.state();
        if state.paused {
            state.paused = false;
            state.pending.push(NativeEvent::Play);
        }
    }

    pub fn user_pause(&self) {
        self.state().paused = true;
    }

    pub fn detach(&self) {
        self.state().connected = false;
    }
}

impl MediaElement for FakeMedia {
    fn current_time(&self) -> f64 {
        self.0.borrow().position
    }

    fn duration(&self) -> Option<f64> {
        self.0.borrow().duration
    }

    fn paused(&self) -> bool {
        self.0.borrow().paused
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut state = self.state();
        state.position = seconds;
        state.seeks.push(seconds);
    }

    fn set_playback_rate(&mut self, rate: f64) {
        let mut state = self.state();
        state.rate = rate;
        state.rates.push(rate);
    }

    fn play(&mut self) {
        let mut state = self.state();
        state.play_calls += 1;
        if state.paused {
            state.paused = false;
            state.pending.push(NativeEvent::Play);
        }
    }

    fn pause(&mut self) {
        let mut state = self.state();
        state.pause_calls += 1;
        state.paused = true;
    }

    fn is_connected(&self) -> bool {
        self.0.borrow().connected
    }

    fn drain_events(&mut self) -> Vec<NativeEvent> {
        std::mem::take(&mut self.state().pending)
    }
}

/// Hands out queued elements one discovery attempt at a time.
#[derive(Debug, Clone, Default)]
pub struct FakeProbe {
    pub queue: Rc<RefCell<Vec<Option<FakeMedia>>>>,
    pub attempts: Rc<RefCell<usize>>,
}

impl FakeProbe {
    pub fn push(&self, media: Option<FakeMedia>) {
        self.queue.borrow_mut().push(media);
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.borrow()
    }
}

impl MediaProbe for FakeProbe {
    fn find(&mut self) -> Option<Box<dyn MediaElement>> {
        *self.attempts.borrow_mut() += 1;
        let mut queue = self.queue.borrow_mut();
        if queue.is_empty() {
            return None;
        }
        queue
            .remove(0)
            .map(|media| Box::new(media) as Box<dyn MediaElement>)
    }
}

#[derive(Debug, Default)]
pub struct TickerLog {
    pub started: Vec<RunId>,
    pub active: Vec<RunId>,
    pub periods: Vec<Duration>,
}

/// Records timers instead of running them; tests deliver ticks by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker(pub Rc<RefCell<TickerLog>>);

impl ManualTicker {
    pub fn active(&self) -> Vec<RunId> {
        self.0.borrow().active.clone()
    }

    pub fn started(&self) -> Vec<RunId> {
        self.0.borrow().started.clone()
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, run: RunId, period: Duration) -> TickGuard {
        {
            let mut log = self.0.borrow_mut();
            log.started.push(run);
            log.active.push(run);
            log.periods.push(period);
        }
        let log = Rc::clone(&self.0);
        TickGuard::new(move || log.borrow_mut().active.retain(|r| *r != run))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingCues {
    pub played: Rc<RefCell<Vec<Cue>>>,
    pub fail: bool,
}

impl RecordingCues {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn played(&self) -> Vec<Cue> {
        self.played.borrow().clone()
    }
}

impl CuePlayer for RecordingCues {
    fn play(&mut self, cue: Cue) -> anyhow::Result<()> {
        self.played.borrow_mut().push(cue);
        if self.fail {
            return Err(anyhow::anyhow!("audio output blocked"));
        }
        Ok(())
    }
}
