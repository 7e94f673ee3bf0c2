// =============================================================================
// MEDIA HANDLE - CONTROL SURFACE OVER A HOST-PROVIDED MEDIA ELEMENT
// =============================================================================
//
// The host player owns decoding and rendering. We only ever touch its
// position, playback rate and play/pause state, and listen for its native
// time-update and play notifications.
//
// A play notification can come from us (the countdown resuming playback) or
// from anyone else (the user, the host page, another script). The handle
// tags its own resume calls so each notification can be labeled with its
// origin when it is drained.
//
// =============================================================================

/// Notifications raised by the host element, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeEvent {
    /// Progress tick carrying the element's current time in seconds.
    TimeUpdate(f64),
    /// Playback started (paused -> playing).
    Play,
}

/// The subset of a host media element the helper drives.
pub trait MediaElement {
    fn current_time(&self) -> f64;
    fn duration(&self) -> Option<f64>;
    fn paused(&self) -> bool;
    fn set_current_time(&mut self, seconds: f64);
    fn set_playback_rate(&mut self, rate: f64);
    fn play(&mut self);
    fn pause(&mut self);
    /// False once the host has removed or replaced the element.
    fn is_connected(&self) -> bool;
    fn drain_events(&mut self) -> Vec<NativeEvent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOrigin {
    /// Caused by [`MediaHandle::resume`].
    Programmatic,
    /// Caused by the user, the host page or another script.
    External,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaNotice {
    PositionUpdate(f64),
    Resumed(ResumeOrigin),
    Detached,
}

/// One-shot marker for the next play notification.
#[derive(Debug, Default)]
struct ResumeTag {
    armed: bool,
}

impl ResumeTag {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn classify(&mut self) -> ResumeOrigin {
        if std::mem::take(&mut self.armed) {
            ResumeOrigin::Programmatic
        } else {
            ResumeOrigin::External
        }
    }
}

pub struct MediaHandle {
    element: Box<dyn MediaElement>,
    resume_tag: ResumeTag,
    detached_reported: bool,
}

impl MediaHandle {
    pub fn new(element: Box<dyn MediaElement>) -> Self {
        Self {
            element,
            resume_tag: ResumeTag::default(),
            detached_reported: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.element.is_connected()
    }

    pub fn position(&self) -> f64 {
        if self.is_attached() {
            self.element.current_time()
        } else {
            0.0
        }
    }

    pub fn is_paused(&self) -> bool {
        !self.is_attached() || self.element.paused()
    }

    /// Seeks within `[0, duration]`. Ignored once the element is gone.
    pub fn seek(&mut self, to: f64) {
        if !self.is_attached() || !to.is_finite() {
            return;
        }
        let mut target = to.max(0.0);
        if let Some(duration) = self.element.duration().filter(|d| d.is_finite()) {
            target = target.min(duration.max(0.0));
        }
        log::debug!("Seeking media to {:.3}s", target);
        self.element.set_current_time(target);
    }

    pub fn set_rate(&mut self, rate: f64) {
        if self.is_attached() {
            self.element.set_playback_rate(rate);
        }
    }

    pub fn pause(&mut self) {
        if self.is_attached() {
            self.element.pause();
        }
    }

    /// Starts playback on our own behalf. The play notification this causes is
    /// reported as [`ResumeOrigin::Programmatic`].
    pub fn resume(&mut self) {
        if !self.is_attached() {
            return;
        }
        // An element that is already playing raises no play notification,
        // so arming the tag would swallow the next genuine one instead.
        if self.element.paused() {
            self.resume_tag.arm();
        }
        self.element.play();
    }

    /// Drains native notifications and labels resume origins.
    pub fn poll(&mut self) -> Vec<MediaNotice> {
        if !self.is_attached() {
            if self.detached_reported {
                return Vec::new();
            }
            self.detached_reported = true;
            return vec![MediaNotice::Detached];
        }

        self.element
            .drain_events()
            .into_iter()
            .map(|event| match event {
                NativeEvent::TimeUpdate(t) => MediaNotice::PositionUpdate(t),
                NativeEvent::Play => MediaNotice::Resumed(self.resume_tag.classify()),
            })
            .collect()
    }
}
