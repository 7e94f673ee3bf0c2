use crate::playback::media::MediaHandle;

pub const MIN_SPEED: f64 = 0.5;
/// Natural tempo; the helper only slows playback down.
pub const MAX_SPEED: f64 = 1.0;
pub const SPEED_STEP: f64 = 0.1;

/// Rounds to one decimal and clamps into `[MIN_SPEED, MAX_SPEED]`.
/// Returns `None` for NaN.
pub fn clamp_speed(requested: f64) -> Option<f64> {
    if requested.is_nan() {
        return None;
    }
    let rounded = (requested * 10.0).round() / 10.0;
    Some(rounded.clamp(MIN_SPEED, MAX_SPEED))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedController {
    speed: f64,
}

impl Default for SpeedController {
    fn default() -> Self {
        Self { speed: MAX_SPEED }
    }
}

impl SpeedController {
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, requested: f64, media: &mut MediaHandle) -> f64 {
        let Some(clamped) = clamp_speed(requested) else {
            log::warn!("Ignoring non-numeric playback speed request");
            return self.speed;
        };
        media.set_rate(clamped);
        self.speed = clamped;
        log::debug!("Playback speed set to {:.1}x", clamped);
        clamped
    }

    pub fn step_up(&mut self, media: &mut MediaHandle) -> f64 {
        self.set_speed(self.speed + SPEED_STEP, media)
    }

    pub fn step_down(&mut self, media: &mut MediaHandle) -> f64 {
        self.set_speed(self.speed - SPEED_STEP, media)
    }
}
