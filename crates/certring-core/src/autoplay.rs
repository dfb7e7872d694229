//! Autoplay driver: periodic advancement of the focus.
//!
//! The driver owns a tokio timer task that sends [`AutoplayTick`] messages
//! over a channel. It never touches focus state itself; the owner applies a
//! tick only after [`AutoplayDriver::accept`] confirms it belongs to the
//! current timer. Stopping, restarting or dropping the driver invalidates
//! every tick issued before, including ticks already sitting in the channel.

use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Channel buffer size for autoplay ticks.
pub const TICK_CHANNEL_SIZE: usize = 8;

/// Shortest period the timer accepts.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A timer tick, tagged with the timer generation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayTick {
    generation: u64,
}

/// Whether the autoplay timer is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayState {
    Running,
    #[default]
    Stopped,
}

/// Running timer task. Dropping it cancels the task.
#[derive(Debug)]
struct Timer {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Cancellable periodic driver that advances the carousel by one.
///
/// The timer runs while the ring has more than one item and autoplay is not
/// paused. It restarts whenever the item count changes. Manual navigation
/// does not touch the driver, so the next scheduled tick is neither reset
/// nor skipped.
///
/// Ticks are buffered up to [`TICK_CHANNEL_SIZE`]. A consumer that falls
/// further behind loses the extra ticks, and the carousel advances fewer
/// steps than the elapsed periods.
#[derive(Debug)]
pub struct AutoplayDriver {
    period: Duration,
    paused: bool,
    item_count: usize,
    generation: u64,
    timer: Option<Timer>,
    tx: mpsc::Sender<AutoplayTick>,
}

impl AutoplayDriver {
    /// Create a stopped driver and the receiver its ticks are delivered on.
    pub fn new(period: Duration) -> (Self, mpsc::Receiver<AutoplayTick>) {
        let (tx, rx) = mpsc::channel(TICK_CHANNEL_SIZE);
        let driver = Self {
            period: period.max(MIN_PERIOD),
            paused: false,
            item_count: 0,
            generation: 0,
            timer: None,
            tx,
        };
        (driver, rx)
    }

    /// Interval between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Current state.
    pub fn state(&self) -> AutoplayState {
        if self.timer.is_some() {
            AutoplayState::Running
        } else {
            AutoplayState::Stopped
        }
    }

    /// Whether autoplay was paused by the user.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Bring the driver in line with the current item count.
    ///
    /// A changed count restarts the timer (or stops it when there is nothing
    /// to rotate to). An unchanged count leaves a running timer alone.
    /// Must be called from within a tokio runtime.
    pub fn sync(&mut self, item_count: usize) {
        let running = self.timer.is_some();
        if item_count == self.item_count && running == self.should_run() {
            return;
        }
        self.item_count = item_count;
        self.restart();
    }

    /// Pause or resume autoplay.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        self.restart();
    }

    /// Change the tick period. Restarts a running timer.
    pub fn set_period(&mut self, period: Duration) {
        let period = period.max(MIN_PERIOD);
        if period == self.period {
            return;
        }
        self.period = period;
        if self.timer.is_some() {
            self.restart();
        }
    }

    /// Stop the timer and invalidate all ticks issued so far.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            tracing::debug!(generation = self.generation, "autoplay stopped");
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether `tick` came from the running timer and should advance focus.
    pub fn accept(&self, tick: AutoplayTick) -> bool {
        let current = self.timer.is_some() && tick.generation == self.generation;
        if !current {
            tracing::trace!(
                tick = tick.generation,
                current = self.generation,
                "discarding stale autoplay tick"
            );
        }
        current
    }

    fn should_run(&self) -> bool {
        !self.paused && self.item_count > 1
    }

    fn restart(&mut self) {
        self.stop();
        if self.should_run() {
            self.start();
        }
    }

    fn start(&mut self) {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let tx = self.tx.clone();
        let tick = AutoplayTick {
            generation: self.generation,
        };
        let period = self.period;
        let first = Instant::now() + period;

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => match tx.try_send(tick) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            tracing::debug!("autoplay receiver is behind, tick dropped");
                        }
                        Err(TrySendError::Closed(_)) => break,
                    },
                }
            }
        });

        tracing::debug!(
            generation = self.generation,
            period_ms = period.as_millis() as u64,
            items = self.item_count,
            "autoplay started"
        );
        self.timer = Some(Timer { cancel, task });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(5000);

    #[tokio::test(start_paused = true)]
    async fn test_state_follows_item_count() {
        let (mut driver, _ticks) = AutoplayDriver::new(PERIOD);
        assert_eq!(driver.state(), AutoplayState::Stopped);

        driver.sync(1);
        assert_eq!(driver.state(), AutoplayState::Stopped);
        driver.sync(2);
        assert_eq!(driver.state(), AutoplayState::Running);
        driver.sync(1);
        assert_eq!(driver.state(), AutoplayState::Stopped);
        driver.sync(0);
        assert_eq!(driver.state(), AutoplayState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_count_keeps_timer() {
        let (mut driver, mut ticks) = AutoplayDriver::new(PERIOD);
        driver.sync(3);
        let tick = ticks.recv().await.unwrap();
        driver.sync(3);
        assert!(driver.accept(tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_count_change_invalidates_old_ticks() {
        let (mut driver, mut ticks) = AutoplayDriver::new(PERIOD);
        driver.sync(3);
        let tick = ticks.recv().await.unwrap();
        driver.sync(4);
        assert_eq!(driver.state(), AutoplayState::Running);
        assert!(!driver.accept(tick));

        let fresh = ticks.recv().await.unwrap();
        assert!(driver.accept(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_and_resume() {
        let (mut driver, mut ticks) = AutoplayDriver::new(PERIOD);
        driver.sync(3);
        driver.set_paused(true);
        assert!(driver.is_paused());
        assert_eq!(driver.state(), AutoplayState::Stopped);

        tokio::time::advance(PERIOD * 3).await;
        assert!(ticks.try_recv().is_err());

        driver.set_paused(false);
        assert_eq!(driver.state(), AutoplayState::Running);
        let tick = ticks.recv().await.unwrap();
        assert!(driver.accept(tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_closes_channel() {
        let (mut driver, mut ticks) = AutoplayDriver::new(PERIOD);
        driver.sync(4);
        drop(driver);
        assert!(ticks.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_consumer_loses_ticks_beyond_buffer() {
        let (mut driver, mut ticks) = AutoplayDriver::new(PERIOD);
        driver.sync(3);

        for _ in 0..TICK_CHANNEL_SIZE + 4 {
            tokio::time::advance(PERIOD).await;
            tokio::task::yield_now().await;
        }

        let mut delivered = 0;
        while let Ok(tick) = ticks.try_recv() {
            assert!(driver.accept(tick));
            delivered += 1;
        }
        assert_eq!(delivered, TICK_CHANNEL_SIZE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_clamped() {
        let (driver, _ticks) = AutoplayDriver::new(Duration::ZERO);
        assert_eq!(driver.period(), MIN_PERIOD);
    }
}
