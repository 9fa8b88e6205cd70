use core::time::Duration;
use web_time::Instant;

use crate::*;

/// Once-per-period ticker for the round clock, driven through a [`Scheduler`]. At most one tick is
/// pending at any time.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundTimer {
    period: Duration,
    pending: Option<TaskId>,
}

impl RoundTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            pending: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts ticking one period from `now`. A ticker that was already running is stopped first.
    pub fn start<T>(
        &mut self,
        scheduler: &mut Scheduler<T>,
        now: Instant,
        round: RoundId,
        tick: T,
    ) {
        self.stop(scheduler);
        self.pending = Some(scheduler.schedule(now + self.period, round, tick));
    }

    pub fn stop<T>(&mut self, scheduler: &mut Scheduler<T>) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Schedules the tick after the one that fired at `fired_at`. Does nothing once stopped.
    pub fn rearm<T>(
        &mut self,
        scheduler: &mut Scheduler<T>,
        fired_at: Instant,
        round: RoundId,
        tick: T,
    ) {
        if self.pending.is_some_and(|id| id.due() == fired_at) {
            self.pending = Some(scheduler.schedule(fired_at + self.period, round, tick));
        }
    }
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
