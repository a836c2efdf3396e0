//! Configuration types for the bit-banged MDIO driver

use crate::error::{ConfigError, Result};
use crate::internal::constants::{
    DEFAULT_HALF_PERIOD_NS, DEFAULT_IDLE_US, DEFAULT_PREAMBLE_SETTLE_US, MIN_HALF_PERIOD_NS,
};

/// Bus timing configuration
///
/// All delays are busy-waits through `embedded_hal::delay::DelayNs`. They are
/// lower bounds: a slow GPIO implementation only stretches the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MdioTiming {
    /// MDC half-period in nanoseconds
    ///
    /// Applied twice per bit: data setup before the rising edge, then
    /// clock-high hold before sampling.
    pub half_period_ns: u32,
    /// Idle time before the preamble in microseconds
    pub idle_us: u32,
    /// Settle time between the preamble and the start code in microseconds
    pub preamble_settle_us: u32,
}

impl Default for MdioTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl MdioTiming {
    /// Create the default timing (1 MHz MDC, 100 µs idle, 10 µs settle)
    pub const fn new() -> Self {
        Self {
            half_period_ns: DEFAULT_HALF_PERIOD_NS,
            idle_us: DEFAULT_IDLE_US,
            preamble_settle_us: DEFAULT_PREAMBLE_SETTLE_US,
        }
    }

    /// Set the MDC half-period in nanoseconds
    #[must_use]
    pub const fn with_half_period_ns(mut self, ns: u32) -> Self {
        self.half_period_ns = ns;
        self
    }

    /// Derive the half-period from a target MDC frequency
    ///
    /// Frequencies above 2.5 MHz produce a configuration that fails
    /// [`validate`](Self::validate).
    #[must_use]
    pub const fn with_mdc_hz(mut self, hz: u32) -> Self {
        self.half_period_ns = if hz == 0 { 0 } else { 500_000_000 / hz };
        self
    }

    /// Set the idle time before the preamble
    #[must_use]
    pub const fn with_idle_us(mut self, us: u32) -> Self {
        self.idle_us = us;
        self
    }

    /// Set the settle time after the preamble
    #[must_use]
    pub const fn with_preamble_settle_us(mut self, us: u32) -> Self {
        self.preamble_settle_us = us;
        self
    }

    /// Check the configuration against the MDC frequency limit
    pub const fn validate(&self) -> Result<()> {
        if self.half_period_ns < MIN_HALF_PERIOD_NS {
            return Err(crate::error::Error::Config(ConfigError::InvalidConfig));
        }
        Ok(())
    }
}
