use std::time::Instant;
use tokio::sync::mpsc;

use crate::audio::CuePlayer;
use crate::core::{HelperConfig, Intent};
use crate::playback::countdown::{CountdownSettings, RunId, Ticker};
use crate::playback::discovery::{Discovery, MediaProbe};
use crate::playback::session::{PlaybackSession, Services, SessionSnapshot, SessionStatus};

/// Owns discovery, the live session and the services it borrows each turn.
///
/// Everything runs on the caller's thread: `pump` is one turn of the event
/// loop and handles media notices and countdown ticks to completion.
pub struct SessionHost {
    probe: Box<dyn MediaProbe>,
    discovery: Discovery,
    session: Option<PlaybackSession>,
    ticker: Box<dyn Ticker>,
    cues: Box<dyn CuePlayer>,
    ticks: mpsc::UnboundedReceiver<RunId>,
    countdown_defaults: CountdownSettings,
}

impl SessionHost {
    pub fn new(
        probe: Box<dyn MediaProbe>,
        ticker: Box<dyn Ticker>,
        cues: Box<dyn CuePlayer>,
        ticks: mpsc::UnboundedReceiver<RunId>,
        config: &HelperConfig,
    ) -> Self {
        Self {
            probe,
            discovery: Discovery::new(config.discovery_interval()),
            session: None,
            ticker,
            cues,
            ticks,
            countdown_defaults: CountdownSettings::from(&config.countdown),
        }
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// Probe attempts since the last session ended.
    pub fn discovery_attempts(&self) -> u32 {
        self.discovery.attempts()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(PlaybackSession::snapshot)
    }

    pub fn pump(&mut self, now: Instant) {
        if self.session.is_none() {
            if let Some(media) = self.discovery.poll(self.probe.as_mut(), now) {
                self.session = Some(PlaybackSession::new(media, self.countdown_defaults));
            }
        }

        let mut services = Services {
            ticker: self.ticker.as_mut(),
            cues: self.cues.as_mut(),
        };

        let Some(session) = self.session.as_mut() else {
            // Ticks for a session that no longer exists.
            while self.ticks.try_recv().is_ok() {}
            return;
        };

        if session.pump_media(&mut services) == SessionStatus::Detached {
            self.end_session();
            return;
        }

        while let Ok(run) = self.ticks.try_recv() {
            session.on_tick(run, &mut services);
        }
    }

    pub fn dispatch(&mut self, intent: Intent) {
        let Some(session) = self.session.as_mut() else {
            log::debug!("No media yet, ignoring {:?}", intent);
            return;
        };
        let mut services = Services {
            ticker: self.ticker.as_mut(),
            cues: self.cues.as_mut(),
        };
        session.apply(intent, &mut services);
    }

    fn end_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.teardown();
        }
        while self.ticks.try_recv().is_ok() {}
        self.discovery.restart();
        log::info!("Waiting for a new media element");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::testing::{FakeMedia, FakeProbe, ManualTicker, RecordingCues};
    use std::time::Duration;

    struct Rig {
        host: SessionHost,
        probe: FakeProbe,
        ticker: ManualTicker,
        ticks: mpsc::UnboundedSender<RunId>,
    }

    fn rig(countdown_enabled: bool) -> Rig {
        let probe = FakeProbe::default();
        let ticker = ManualTicker::default();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let mut config = HelperConfig::default();
        config.countdown.enabled = countdown_enabled;

        let host = SessionHost::new(
            Box::new(probe.clone()),
            Box::new(ticker.clone()),
            Box::new(RecordingCues::default()),
            tick_rx,
            &config,
        );
        Rig {
            host,
            probe,
            ticker,
            ticks: tick_tx,
        }
    }

    #[test]
    fn test_session_created_once_media_is_found() {
        let mut rig = rig(false);
        let t0 = Instant::now();

        rig.host.pump(t0);
        assert!(rig.host.snapshot().is_none());

        rig.probe.push(Some(FakeMedia::new(Some(30.0))));
        rig.host.pump(t0 + Duration::from_millis(200));
        assert!(rig.host.snapshot().is_none());

        rig.host.pump(t0 + Duration::from_secs(1));
        assert!(rig.host.snapshot().is_some());
        assert_eq!(rig.probe.attempts(), 2);
    }

    #[test]
    fn test_intents_before_discovery_are_ignored() {
        let mut rig = rig(false);
        rig.host.dispatch(Intent::RequestCountdown);
        assert!(rig.ticker.started().is_empty());
    }

    #[test]
    fn test_ticks_drive_the_countdown_through_the_channel() {
        let mut rig = rig(true);
        let media = FakeMedia::new(Some(30.0));
        rig.probe.push(Some(media.clone()));
        let t0 = Instant::now();
        rig.host.pump(t0);

        rig.host.dispatch(Intent::RequestCountdown);
        let run = rig.ticker.started()[0];

        for _ in 0..3 {
            rig.ticks.send(run).unwrap();
        }
        rig.host.pump(t0);
        assert_eq!(media.state().play_calls, 1);
        assert!(rig.host.snapshot().unwrap().countdown_remaining.is_none());

        // The programmatic play is drained on the next turn without a new run.
        rig.host.pump(t0);
        assert_eq!(rig.ticker.started().len(), 1);
    }

    #[test]
    fn test_detach_tears_down_and_rediscovers() {
        let mut rig = rig(false);
        let first = FakeMedia::new(Some(30.0));
        rig.probe.push(Some(first.clone()));
        let t0 = Instant::now();
        rig.host.pump(t0);

        rig.host.dispatch(Intent::SpeedDown);
        rig.host.dispatch(Intent::RequestCountdown);
        assert_eq!(rig.ticker.active().len(), 1);

        first.detach();
        rig.host.pump(t0);
        assert!(rig.host.snapshot().is_none());
        assert!(rig.ticker.active().is_empty());

        // A tick queued for the old run is discarded.
        let stale = rig.ticker.started()[0];
        rig.ticks.send(stale).unwrap();

        let second = FakeMedia::new(Some(30.0));
        rig.probe.push(Some(second.clone()));
        rig.host.pump(t0);

        let snapshot = rig.host.snapshot().expect("fresh session");
        assert_eq!(snapshot.speed, 1.0);
        assert_eq!(snapshot.countdown_remaining, None);
        assert_eq!(second.state().play_calls, 0);
    }
}
