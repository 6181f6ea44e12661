//! Tick timers that turn real elapsed time into whole steps.
//!
//! Both timers keep the remainder of every update, so feeding one large delta
//! or many small ones that add up to the same total yields the same number of
//! steps. Arithmetic is exact integer nanoseconds.

use std::time::Duration;

/// Split `total` into whole `period`s and the remainder.
///
/// The step count saturates at `u32::MAX`; the remainder is always exact so
/// the accumulator stays below one period. A zero period means "as many steps
/// as anyone could want" and never accumulates.
fn split_steps(total: Duration, period: Duration) -> (u32, Duration) {
    if period.is_zero() {
        let steps = if total.is_zero() { 0 } else { u32::MAX };
        return (steps, Duration::ZERO);
    }

    let period_ns = period.as_nanos();
    let total_ns = total.as_nanos();
    let steps = u32::try_from(total_ns / period_ns).unwrap_or(u32::MAX);
    let rest = u64::try_from(total_ns % period_ns).unwrap_or(u64::MAX);
    (steps, Duration::from_nanos(rest))
}

/// Fixed-period accumulator.
///
/// Invariant: `elapsed() <= period()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    current: Duration,
    period: Duration,
}

impl Timer {
    /// Empty timer with the given period.
    pub fn new(period: Duration) -> Self {
        Self {
            current: Duration::ZERO,
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time accumulated towards the next step.
    pub fn elapsed(&self) -> Duration {
        self.current
    }

    /// Advance by `dt` and return the number of whole periods completed.
    pub fn update(&mut self, dt: Duration) -> u32 {
        let total = self.current.saturating_add(dt);
        let (steps, rest) = split_steps(total, self.period);
        self.current = rest;
        steps
    }

    pub fn reset(&mut self) {
        self.current = Duration::ZERO;
    }

    /// Fill the timer so the next positive update yields a step.
    pub fn set_to_max(&mut self) {
        self.current = self.period;
    }

    /// Change the period, keeping accumulated time (clamped to the new period).
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
        self.current = self.current.min(period);
    }

    /// Change the period and fill the timer.
    pub fn reload(&mut self, period: Duration) {
        self.period = period;
        self.current = period;
    }
}

/// Number of DAS-phase steps before the timer switches to the ARR period.
const DAS_STEPS_BEFORE_ARR: u8 = 2;

/// Delayed-auto-shift timer.
///
/// Steps at the DAS period until two DAS-phase updates have produced steps,
/// then at the ARR period until [`DasArrTimer::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DasArrTimer {
    das: Duration,
    arr: Duration,
    current: Duration,
    das_steps: u8,
}

impl DasArrTimer {
    pub fn new(das: Duration, arr: Duration) -> Self {
        Self {
            das,
            arr,
            current: Duration::ZERO,
            das_steps: 0,
        }
    }

    pub fn das(&self) -> Duration {
        self.das
    }

    pub fn arr(&self) -> Duration {
        self.arr
    }

    /// Whether the timer has left the initial delay.
    pub fn is_repeating(&self) -> bool {
        self.das_steps >= DAS_STEPS_BEFORE_ARR
    }

    fn active_period(&self) -> Duration {
        if self.is_repeating() {
            self.arr
        } else {
            self.das
        }
    }

    pub fn update(&mut self, dt: Duration) -> u32 {
        let total = self.current.saturating_add(dt);
        let (steps, rest) = split_steps(total, self.active_period());
        self.current = rest;
        if steps > 0 && !self.is_repeating() {
            self.das_steps += 1;
        }
        steps
    }

    /// Back to an empty accumulator in the DAS phase.
    pub fn reset(&mut self) {
        self.current = Duration::ZERO;
        self.das_steps = 0;
    }

    /// Fill the timer for its current phase so the next positive update steps.
    pub fn set_to_max(&mut self) {
        self.current = self.active_period();
    }

    /// Swap in new handling values, keeping the current phase.
    pub fn set_handling(&mut self, das: Duration, arr: Duration) {
        self.das = das;
        self.arr = arr;
        self.current = self.current.min(self.active_period());
    }
}
