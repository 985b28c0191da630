//! Bounded polling
//!
//! The transmit and receive loops have no interrupt to wait on: the chip's
//! status registers are the only progress signal. [`PollBudget`] is the
//! bookkeeping for such a loop. It hands out a fixed delay between polls and
//! reports exhaustion once the delays handed out reach the timeout.
//!
//! Time is measured as the sum of the delays the loop has slept, not by a
//! wall clock, so a loop driven by a fake delay is fully deterministic. Bus
//! transfers between polls are not counted.

use core::time::Duration;

/// Outcome of one step of a bounded poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// Sleep for this many microseconds, then poll again
    Wait(u32),
    /// The deadline has passed
    Expired,
}

/// Remaining wait time of a bounded poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollBudget {
    interval_us: u32,
    remaining_us: u64,
}

impl PollBudget {
    /// A budget of `timeout` spent in steps of `interval_us`.
    ///
    /// The interval is at least one microsecond so the loop always makes
    /// progress toward its deadline.
    pub fn new(timeout: Duration, interval_us: u32) -> Self {
        Self {
            interval_us: interval_us.max(1),
            remaining_us: u64::try_from(timeout.as_micros()).unwrap_or(u64::MAX),
        }
    }

    /// Delay between polls in microseconds
    pub fn interval_us(&self) -> u32 {
        self.interval_us
    }

    /// Called after a poll found no progress.
    ///
    /// Returns the delay to sleep before the next poll, shortened to whatever
    /// remains of the timeout, or [`Poll::Expired`] once nothing remains.
    pub fn step(&mut self) -> Poll {
        if self.remaining_us == 0 {
            return Poll::Expired;
        }
        let wait = self.remaining_us.min(self.interval_us as u64) as u32;
        self.remaining_us -= wait as u64;
        Poll::Wait(wait)
    }
}
