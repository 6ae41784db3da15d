use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A recurring background task. Dropping the timer stops future ticks; a tick that
/// is already running finishes.
pub(crate) struct AutoSaveTimer {
    token: CancellationToken,
    period: Duration,
}

impl AutoSaveTimer {
    /// Spawns the tick loop on `handle`. The first tick fires one `period` from now.
    /// `on_tick` returning `None` ends the loop.
    pub(crate) fn arm<F, Fut>(handle: &Handle, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Option<Fut> + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(tick) = on_tick() else { break };
                        tick.await;
                    }
                }
            }
            debug!("auto-save timer ({}s) stopped", period.as_secs());
        });

        Self { token, period }
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for AutoSaveTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
