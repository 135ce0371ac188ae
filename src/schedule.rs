//! Sampling cadence and button debounce
//!
//! Timestamps are free-running `u32` microsecond counters, as returned by a
//! typical `micros()`. All comparisons use wrapping arithmetic, so a counter
//! roll-over (about every 71 minutes) does not stall sampling.

/// How a [`Cadence`] advances after firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CadenceMode {
    /// Deadlines advance by exactly one period; late polls catch up
    FixedRate,
    /// The next deadline is one period after the poll that fired
    MinInterval,
}

/// Periodic deadline checked from a polling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cadence {
    mode: CadenceMode,
    period_us: u32,
    // Next deadline for FixedRate, last firing time for MinInterval
    mark_us: u32,
}

impl Cadence {
    /// Cadence that keeps an average rate of one firing per `period_us`
    ///
    /// The first poll at or after time 0 fires.
    #[must_use]
    pub const fn fixed_rate(period_us: u32) -> Self {
        Self {
            mode: CadenceMode::FixedRate,
            period_us,
            mark_us: 0,
        }
    }

    /// Cadence that fires at most once per `period_us`
    ///
    /// The first poll at or after `period_us` fires.
    #[must_use]
    pub const fn min_interval(period_us: u32) -> Self {
        Self {
            mode: CadenceMode::MinInterval,
            period_us,
            mark_us: 0,
        }
    }

    /// Cadence firing `rate_hz` times per second, or `None` for a zero rate
    #[must_use]
    pub const fn from_hz(rate_hz: u32, mode: CadenceMode) -> Option<Self> {
        if rate_hz == 0 {
            return None;
        }
        let period_us = 1_000_000 / rate_hz;
        Some(match mode {
            CadenceMode::FixedRate => Self::fixed_rate(period_us),
            CadenceMode::MinInterval => Self::min_interval(period_us),
        })
    }

    /// Period in microseconds
    #[must_use]
    pub const fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Advancement mode
    #[must_use]
    pub const fn mode(&self) -> CadenceMode {
        self.mode
    }

    /// Restart the cadence from `now_us`
    ///
    /// A fixed-rate cadence fires on the next poll; a min-interval cadence
    /// one period later.
    pub const fn reset(&mut self, now_us: u32) {
        self.mark_us = now_us;
    }

    /// Check the deadline and advance it if it has passed
    // Wrapping difference reinterpreted as signed to compare across roll-over
    #[allow(clippy::cast_possible_wrap)]
    pub const fn poll(&mut self, now_us: u32) -> bool {
        match self.mode {
            CadenceMode::FixedRate => {
                if (now_us.wrapping_sub(self.mark_us) as i32) >= 0 {
                    self.mark_us = self.mark_us.wrapping_add(self.period_us);
                    true
                } else {
                    false
                }
            }
            CadenceMode::MinInterval => {
                if now_us.wrapping_sub(self.mark_us) >= self.period_us {
                    self.mark_us = now_us;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Debounced digital input
///
/// The stable state follows the raw level once the raw level has stayed
/// unchanged for the whole window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    window_us: u32,
    last_raw: bool,
    stable: bool,
    changed_at_us: u32,
}

impl Debouncer {
    /// Debouncer starting in `initial` state
    #[must_use]
    pub const fn new(window_us: u32, initial: bool) -> Self {
        Self {
            window_us,
            last_raw: initial,
            stable: initial,
            changed_at_us: 0,
        }
    }

    /// Debouncer with the window given in milliseconds
    #[must_use]
    pub const fn from_ms(window_ms: u32, initial: bool) -> Self {
        Self::new(window_ms.saturating_mul(1000), initial)
    }

    /// Feed one raw sample; returns the debounced state
    pub const fn update(&mut self, raw: bool, now_us: u32) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.changed_at_us = now_us;
        }
        if raw != self.stable && now_us.wrapping_sub(self.changed_at_us) >= self.window_us {
            self.stable = raw;
        }
        self.stable
    }

    /// Debounced state
    #[must_use]
    pub const fn state(&self) -> bool {
        self.stable
    }
}
