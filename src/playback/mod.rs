pub mod clock;
pub mod countdown;
pub mod discovery;
pub mod host;
pub mod looping;
pub mod media;
pub mod session;
pub mod speed;
pub mod ticker;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::{ClockMedia, ClockProbe, ClockRemote};
pub use countdown::{CountdownOrigin, CountdownScheduler, CountdownSettings, RunId, TickGuard, Ticker};
pub use discovery::{Discovery, MediaProbe};
pub use host::SessionHost;
pub use looping::{LoopMonitor, LoopState};
pub use media::{MediaElement, MediaHandle, MediaNotice, NativeEvent, ResumeOrigin};
pub use session::{PlaybackSession, SessionSnapshot};
pub use speed::{SpeedController, MAX_SPEED, MIN_SPEED};
pub use ticker::TokioTicker;
