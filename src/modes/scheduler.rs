//! Tick timing for the game loop
//!
//! Wraps a tokio [`Interval`] so that:
//!
//! - a speed change never moves the tick that is already scheduled; the new
//!   period starts with the tick after it
//! - ticks missed while nothing polled the timer (e.g. while paused) are not
//!   replayed in a burst
//! - [`TickScheduler::restart`] begins a full, fresh interval from now, which
//!   is what resuming or starting a game uses

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::TickSpeed;

pub struct TickScheduler {
    interval: Interval,
    speed: TickSpeed,
}

impl TickScheduler {
    /// Must be called from within a tokio runtime
    pub fn new(speed: TickSpeed) -> Self {
        Self {
            interval: Self::fresh_interval(speed),
            speed,
        }
    }

    fn fresh_interval(speed: TickSpeed) -> Interval {
        let period = speed.interval();
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    pub fn speed(&self) -> TickSpeed {
        self.speed
    }

    /// Use `speed` from the next scheduling on
    pub fn set_speed(&mut self, speed: TickSpeed) {
        self.speed = speed;
    }

    /// Wait for the pending tick. Cancel safe.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
        if self.interval.period() != self.speed.interval() {
            self.interval = Self::fresh_interval(self.speed);
        }
    }

    /// Drop the pending tick and schedule the next one a full period from now
    pub fn restart(&mut self) {
        self.interval = Self::fresh_interval(self.speed);
    }
}
