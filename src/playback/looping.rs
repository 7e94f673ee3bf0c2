use crate::core::LoopConfigError;
use crate::playback::media::MediaHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Armed,
}

/// Result of checking one position update against the loop region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopCheck {
    Idle,
    Inside,
    /// Position met or passed the loop end; media was sent back to `to`.
    Wrapped { to: f64 },
}

/// A/B loop region and the boundary check run on every progress tick.
#[derive(Debug, Default, Clone)]
pub struct LoopMonitor {
    start: Option<f64>,
    end: Option<f64>,
    armed: bool,
}

impl LoopMonitor {
    pub fn start(&self) -> Option<f64> {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    pub fn state(&self) -> LoopState {
        if self.armed {
            LoopState::Armed
        } else {
            LoopState::Idle
        }
    }

    /// Start of the region when the loop is armed.
    pub fn armed_start(&self) -> Option<f64> {
        if self.armed {
            self.start
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<(f64, f64), LoopConfigError> {
        let start = self.start.ok_or(LoopConfigError::MissingStart)?;
        let end = self.end.ok_or(LoopConfigError::MissingEnd)?;
        if end <= start {
            return Err(LoopConfigError::Inverted { start, end });
        }
        Ok((start, end))
    }

    pub fn set_start(&mut self, seconds: f64) -> Result<(), LoopConfigError> {
        self.start = Some(seconds);
        self.revalidate()
    }

    pub fn set_end(&mut self, seconds: f64) -> Result<(), LoopConfigError> {
        self.end = Some(seconds);
        self.revalidate()
    }

    // An armed loop never sits on an invalid region.
    fn revalidate(&mut self) -> Result<(), LoopConfigError> {
        if !self.armed {
            return Ok(());
        }
        if let Err(e) = self.validate() {
            self.armed = false;
            log::warn!("Loop disarmed: {}", e);
            return Err(e);
        }
        Ok(())
    }

    pub fn arm(&mut self) -> Result<(), LoopConfigError> {
        let (start, end) = self.validate().map_err(|e| {
            log::warn!("Loop not armed: {}", e);
            e
        })?;
        self.armed = true;
        log::info!("Loop armed {:.2}s -> {:.2}s", start, end);
        Ok(())
    }

    pub fn disarm(&mut self) {
        if self.armed {
            log::info!("Loop disarmed");
        }
        self.armed = false;
    }

    pub fn toggle(&mut self) -> Result<LoopState, LoopConfigError> {
        if self.armed {
            self.disarm();
        } else {
            self.arm()?;
        }
        Ok(self.state())
    }

    /// Level-triggered boundary check: fires whenever `position >= end`.
    pub fn on_position(&self, position: f64, media: &mut MediaHandle) -> LoopCheck {
        if !self.armed {
            return LoopCheck::Idle;
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return LoopCheck::Idle;
        };
        if position >= end {
            log::debug!("Loop end {:.2}s reached at {:.2}s, seeking back to {:.2}s", end, position, start);
            media.seek(start);
            LoopCheck::Wrapped { to: start }
        } else {
            LoopCheck::Inside
        }
    }
}
