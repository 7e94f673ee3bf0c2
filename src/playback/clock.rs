// =============================================================================
// CLOCK MEDIA - WALL-CLOCK DRIVEN STAND-IN FOR A HOST PLAYER
// =============================================================================
//
// Behaves like a host media element without decoding anything: while
// playing, the position advances with elapsed wall time scaled by the
// playback rate and stops at the end of the clip. Every poll while playing
// raises a time-update, and paused -> playing raises a play notification.
//
// The desktop host keeps a `ClockRemote` to drive the "native" transport
// (play/pause buttons, scrubbing, replacing the clip) the way a user would.
//
// =============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crate::playback::discovery::MediaProbe;
use crate::playback::media::{MediaElement, NativeEvent};

#[derive(Debug)]
struct ClockState {
    duration: f64,
    rate: f64,
    connected: bool,
    // Position at the moment playback (re)started or was last moved.
    anchor_position: f64,
    // Set while playing.
    anchor_time: Option<Instant>,
    pending: Vec<NativeEvent>,
}

impl ClockState {
    fn position_at(&self, now: Instant) -> f64 {
        match self.anchor_time {
            Some(start) => {
                let elapsed = now.saturating_duration_since(start).as_secs_f64();
                (self.anchor_position + elapsed * self.rate).min(self.duration)
            }
            None => self.anchor_position,
        }
    }

    // Folds elapsed time into the anchor so rate or position can change.
    fn rebase(&mut self, now: Instant) {
        self.anchor_position = self.position_at(now);
        if self.anchor_time.is_some() {
            self.anchor_time = Some(now);
        }
    }

    fn play(&mut self, now: Instant) {
        if self.anchor_time.is_some() || !self.connected {
            return;
        }
        if self.anchor_position >= self.duration {
            self.anchor_position = 0.0;
        }
        self.anchor_time = Some(now);
        self.pending.push(NativeEvent::Play);
    }

    fn pause(&mut self, now: Instant) {
        self.rebase(now);
        self.anchor_time = None;
    }

    fn seek(&mut self, to: f64, now: Instant) {
        self.rebase(now);
        self.anchor_position = to.clamp(0.0, self.duration);
    }

    fn poll(&mut self, now: Instant) -> Vec<NativeEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if self.anchor_time.is_some() {
            let position = self.position_at(now);
            events.push(NativeEvent::TimeUpdate(position));
            if position >= self.duration {
                // Ended.
                self.pause(now);
            }
        }
        events
    }
}

/// A media element whose clock is real time.
#[derive(Debug, Clone)]
pub struct ClockMedia {
    state: Rc<RefCell<ClockState>>,
}

impl ClockMedia {
    pub fn new(duration: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState {
                duration: duration.max(0.0),
                rate: 1.0,
                connected: true,
                anchor_position: 0.0,
                anchor_time: None,
                pending: Vec::new(),
            })),
        }
    }

    pub fn remote(&self) -> ClockRemote {
        ClockRemote {
            state: Rc::clone(&self.state),
        }
    }
}

impl MediaElement for ClockMedia {
    fn current_time(&self) -> f64 {
        self.state.borrow().position_at(Instant::now())
    }

    fn duration(&self) -> Option<f64> {
        Some(self.state.borrow().duration)
    }

    fn paused(&self) -> bool {
        self.state.borrow().anchor_time.is_none()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.state.borrow_mut().seek(seconds, Instant::now());
    }

    fn set_playback_rate(&mut self, rate: f64) {
        let mut state = self.state.borrow_mut();
        state.rebase(Instant::now());
        state.rate = rate;
    }

    fn play(&mut self) {
        self.state.borrow_mut().play(Instant::now());
    }

    fn pause(&mut self) {
        self.state.borrow_mut().pause(Instant::now());
    }

    fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    fn drain_events(&mut self) -> Vec<NativeEvent> {
        self.state.borrow_mut().poll(Instant::now())
    }
}

/// Host-side transport for a [`ClockMedia`]; acts like the user on the player.
#[derive(Debug, Clone)]
pub struct ClockRemote {
    state: Rc<RefCell<ClockState>>,
}

impl ClockRemote {
    pub fn position(&self) -> f64 {
        self.state.borrow().position_at(Instant::now())
    }

    pub fn duration(&self) -> f64 {
        self.state.borrow().duration
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().anchor_time.is_some()
    }

    pub fn rate(&self) -> f64 {
        self.state.borrow().rate
    }

    pub fn play(&self) {
        self.state.borrow_mut().play(Instant::now());
    }

    pub fn pause(&self) {
        self.state.borrow_mut().pause(Instant::now());
    }

    pub fn scrub(&self, to: f64) {
        self.state.borrow_mut().seek(to, Instant::now());
    }

    /// Removes the element from the "page".
    pub fn detach(&self) {
        let mut state = self.state.borrow_mut();
        state.pause(Instant::now());
        state.connected = false;
    }
}

/// Offers whichever clip the host has loaded most recently.
#[derive(Debug, Clone, Default)]
pub struct ClockProbe {
    slot: Rc<RefCell<Option<ClockMedia>>>,
}

impl ClockProbe {
    /// Puts a new clip on the page; discovery picks it up on its next attempt.
    pub fn load(&self, media: ClockMedia) {
        *self.slot.borrow_mut() = Some(media);
    }
}

impl MediaProbe for ClockProbe {
    fn find(&mut self) -> Option<Box<dyn MediaElement>> {
        self.slot
            .borrow_mut()
            .take()
            .map(|media| Box::new(media) as Box<dyn MediaElement>)
    }
}
