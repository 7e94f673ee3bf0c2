use std::time::{Duration, Instant};
use crate::playback::media::{MediaElement, MediaHandle};

/// Looks for a playable media element on the host page.
pub trait MediaProbe {
    fn find(&mut self) -> Option<Box<dyn MediaElement>>;
}

/// Retries the probe on a fixed interval until an element shows up.
pub struct Discovery {
    interval: Duration,
    next_attempt: Option<Instant>,
    attempts: u32,
}

impl Discovery {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_attempt: None,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn poll(&mut self, probe: &mut dyn MediaProbe, now: Instant) -> Option<MediaHandle> {
        if let Some(next) = self.next_attempt {
            if now < next {
                return None;
            }
        }

        self.attempts += 1;
        match probe.find().filter(|element| element.is_connected()) {
            Some(element) => {
                log::info!("Media element found after {} attempt(s)", self.attempts);
                self.restart();
                Some(MediaHandle::new(element))
            }
            None => {
                log::debug!("No media element yet, retrying in {:?}", self.interval);
                self.next_attempt = Some(now + self.interval);
                None
            }
        }
    }

    /// Forgets the retry schedule so the next poll probes immediately.
    pub fn restart(&mut self) {
        self.next_attempt = None;
        self.attempts = 0;
    }
}
