use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Real-time countdown to the next day.
///
/// Three states: stopped (`running == false`), counting, and paused
/// (`running && paused`). Pausing keeps the remaining time.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct DayCycle {
    day_length: Duration,
    remaining: Duration,
    running: bool,
    paused: bool,
    days_elapsed: u32,
}

/// Persisted timer state.
///
/// `anchor` is the unix second the current countdown started, shifted back by
/// any time already spent in it (rounded up to whole seconds). Only a
/// counting timer has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimerBlob {
    pub running: bool,
    pub paused: bool,
    pub remaining_ms: u64,
    pub days_elapsed: u32,
    pub anchor: Option<u64>,
}

impl DayCycle {
    pub fn new(day_length: Duration) -> Self {
        let day_length = day_length.max(Duration::from_millis(1));
        Self {
            day_length,
            remaining: day_length,
            running: false,
            paused: false,
            days_elapsed: 0,
        }
    }

    pub fn day_length(&self) -> Duration {
        self.day_length
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn days_elapsed(&self) -> u32 {
        self.days_elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.running && self.paused
    }

    /// Running and not paused.
    pub fn is_counting(&self) -> bool {
        self.running && !self.paused
    }

    /// Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.paused = false;
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.is_counting() {
            return false;
        }
        self.paused = true;
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.is_paused() {
            return false;
        }
        self.paused = false;
        true
    }

    pub fn stop_and_reset(&mut self) {
        self.running = false;
        self.paused = false;
        self.remaining = self.day_length;
        self.days_elapsed = 0;
    }

    /// Counts a day advanced by hand.
    pub fn record_manual_day(&mut self) {
        self.days_elapsed = self.days_elapsed.saturating_add(1);
    }

    /// Runs the countdown by `delta`. Returns how many days expired; the
    /// countdown restarts from a full day after each one.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        if !self.is_counting() {
            return 0;
        }
        let mut left = delta;
        let mut expired = 0u32;
        while left >= self.remaining {
            left -= self.remaining;
            self.remaining = self.day_length;
            expired += 1;
        }
        self.remaining -= left;
        self.days_elapsed = self.days_elapsed.saturating_add(expired);
        expired
    }

    pub fn snapshot(&self, now: u64) -> TimerBlob {
        let spent_ms = self.day_length.saturating_sub(self.remaining).as_millis();
        let spent = u64::try_from(spent_ms.div_ceil(1000)).unwrap_or(u64::MAX);
        TimerBlob {
            running: self.running,
            paused: self.paused,
            remaining_ms: u64::try_from(self.remaining.as_millis()).unwrap_or(u64::MAX),
            days_elapsed: self.days_elapsed,
            anchor: self.is_counting().then(|| now.saturating_sub(spent)),
        }
    }

    /// Rebuilds a timer from its blob. A counting timer replays the wall time
    /// since its anchor: whole days come back as the catch-up count (capped at
    /// `max_catch_up`) and the remainder becomes the new countdown. Anything
    /// else restores the stored remaining time, falling back to a full day
    /// when it is out of range.
    pub fn restore(
        blob: &TimerBlob,
        day_length: Duration,
        now: u64,
        max_catch_up: u32,
    ) -> (Self, u32) {
        let mut cycle = DayCycle::new(day_length);
        cycle.running = blob.running;
        cycle.paused = blob.running && blob.paused;
        cycle.days_elapsed = blob.days_elapsed;

        let mut catch_up = 0;
        match blob.anchor.filter(|_| cycle.is_counting()) {
            Some(anchor) => {
                let elapsed = Duration::from_secs(now.saturating_sub(anchor));
                let day_ms = cycle.day_length.as_millis();
                let whole_days = elapsed.as_millis() / day_ms;
                let into_day = elapsed.as_millis() % day_ms;
                let into_day = Duration::from_millis(u64::try_from(into_day).unwrap_or(0));
                cycle.remaining = cycle.day_length.saturating_sub(into_day);
                catch_up = u32::try_from(whole_days).unwrap_or(u32::MAX).min(max_catch_up);
                cycle.days_elapsed = cycle.days_elapsed.saturating_add(catch_up);
            }
            None => {
                let stored = Duration::from_millis(blob.remaining_ms);
                if !stored.is_zero() && stored <= cycle.day_length {
                    cycle.remaining = stored;
                }
            }
        }
        (cycle, catch_up)
    }
}
