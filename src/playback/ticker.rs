use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use crate::playback::countdown::{RunId, TickGuard, Ticker};

/// Runs countdown timers as tokio tasks and delivers ticks over a channel.
pub struct TokioTicker {
    runtime: tokio::runtime::Handle,
    sender: mpsc::UnboundedSender<RunId>,
}

impl TokioTicker {
    pub fn new(runtime: tokio::runtime::Handle) -> (Self, mpsc::UnboundedReceiver<RunId>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { runtime, sender }, receiver)
    }
}

impl Ticker for TokioTicker {
    fn start(&mut self, run: RunId, period: Duration) -> TickGuard {
        let sender = self.sender.clone();
        let task = self.runtime.spawn(async move {
            // First tick one full period after start.
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(run).is_err() {
                    log::debug!("Tick receiver gone, stopping timer for {:?}", run);
                    break;
                }
            }
        });

        TickGuard::new(move || task.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_arrive_until_guard_dropped() {
        let (mut ticker, mut ticks) = TokioTicker::new(tokio::runtime::Handle::current());
        let guard = ticker.start(RunId(7), Duration::from_millis(10));

        for _ in 0..2 {
            let tick = tokio::time::timeout(Duration::from_secs(2), ticks.recv())
                .await
                .expect("tick should arrive");
            assert_eq!(tick, Some(RunId(7)));
        }

        drop(guard);
        tokio::time::sleep(Duration::from_millis(20)).await;
        while ticks.try_recv().is_ok() {}

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(ticks.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_no_tick_before_first_period() {
        let (mut ticker, mut ticks) = TokioTicker::new(tokio::runtime::Handle::current());
        let _guard = ticker.start(RunId(1), Duration::from_millis(200));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(ticks.try_recv().is_err());
    }
}
