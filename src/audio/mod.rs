pub mod cue_player;
pub mod device_manager;
pub mod sound_generator;

pub use cue_player::RodioCuePlayer;
pub use sound_generator::render_cue_wav;

/// Countdown audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// One count of the countdown (lower pitch).
    Tick,
    /// Playback is about to resume (higher pitch).
    Final,
}

/// Best-effort cue output. Callers log failures and carry on.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue) -> anyhow::Result<()>;
}
