//! Bit-Banged MDIO Controller
//!
//! Software implementation of the IEEE 802.3 Clause 22 management frame over
//! two GPIO lines. Used when the MAC has no SMI block, when the PHY sits on
//! pins the SMI block cannot reach, or when more than one management bus is
//! needed.
//!
//! # Frame format
//!
//! ```text
//!        preamble  ST  OP  PHYAD  REGAD  TA   DATA
//! read:  32 x 1    01  10  aaaaa  rrrrr  Z0   16 bits, PHY -> host
//! write: 32 x 1    01  01  aaaaa  rrrrr  10   16 bits, host -> PHY
//! ```
//!
//! All fields are MSB first. The preamble is preceded by an idle delay and
//! followed by a short settle delay (see [`MdioTiming`]).
//!
//! # Bit timing
//!
//! ```text
//!        setup   high
//! MDC  ___/‾‾‾‾‾‾\___
//! MDIO =X========X===    drive, wait half, rise, wait half, sample, fall
//! ```
//!
//! Delays are busy-waits; the controller never yields inside a frame. A frame
//! takes roughly `64 * 2 * half_period + idle + settle`, about 175 µs with
//! the default timing.

use embedded_hal::delay::DelayNs;

use crate::driver::config::MdioTiming;
use crate::error::Result;
use crate::internal::constants::{
    ADDR_BITS, DATA_BITS, FIELD2_BITS, OPCODE_READ, OPCODE_WRITE, PREAMBLE_BITS, START_CODE,
    TURNAROUND_WRITE,
};

use super::mdio::{MdioBus, check_addresses};
use super::pins::{Direction, MdioPins};

/// Clause 22 operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Opcode {
    Read,
    Write,
}

impl Opcode {
    const fn bits(self) -> u16 {
        match self {
            Opcode::Read => OPCODE_READ,
            Opcode::Write => OPCODE_WRITE,
        }
    }
}

// =============================================================================
// Bit-Banged Controller
// =============================================================================

/// MDIO master driving MDC/MDIO in software
///
/// Exclusive access is enforced by `&mut self`; share one between tasks
/// through [`MdioChannels`](crate::sync::MdioChannels).
#[derive(Debug)]
pub struct MdioBitbang<P: MdioPins, D: DelayNs> {
    pins: P,
    delay: D,
    timing: MdioTiming,
    /// Last direction programmed on MDIO, `None` before the first bit
    direction: Option<Direction>,
}

impl<P: MdioPins, D: DelayNs> MdioBitbang<P, D> {
    /// Create a controller with the default timing
    pub fn new(pins: P, delay: D) -> Self {
        Self {
            pins,
            delay,
            timing: MdioTiming::new(),
            direction: None,
        }
    }

    /// Create a controller with custom timing
    ///
    /// Returns `ConfigError::InvalidConfig` if the timing exceeds the MDC
    /// frequency limit.
    pub fn with_timing(pins: P, delay: D, timing: MdioTiming) -> Result<Self> {
        timing.validate()?;
        Ok(Self {
            pins,
            delay,
            timing,
            direction: None,
        })
    }

    /// Get the timing in use
    pub fn timing(&self) -> MdioTiming {
        self.timing
    }

    /// Borrow the lines
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Mutably borrow the lines
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Borrow the delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Release the lines and the delay provider
    pub fn release(self) -> (P, D) {
        (self.pins, self.delay)
    }

    // =========================================================================
    // Bit-Level Primitive
    // =========================================================================

    /// Clock one bit
    ///
    /// With `is_read` the line is released for the PHY and `value` is
    /// ignored. The level sampled while MDC is high is returned in both
    /// directions; during writes it echoes the driven bit.
    pub fn transfer_bit(&mut self, value: bool, is_read: bool) -> Result<bool> {
        let direction = if is_read {
            Direction::Input
        } else {
            Direction::Output
        };
        if self.direction != Some(direction) {
            self.pins.set_mdio_direction(direction)?;
            self.direction = Some(direction);
        }
        if !is_read {
            self.pins.write_mdio(value)?;
        }
        self.delay.delay_ns(self.timing.half_period_ns);

        self.pins.set_mdc(true)?;
        self.delay.delay_ns(self.timing.half_period_ns);
        let sampled = self.pins.read_mdio()?;
        self.pins.set_mdc(false)?;

        Ok(sampled)
    }

    /// Drive the low `count` bits of `value`, MSB first
    fn send_bits(&mut self, value: u16, count: u8) -> Result<()> {
        for i in (0..count).rev() {
            self.transfer_bit((value >> i) & 1 != 0, false)?;
        }
        Ok(())
    }

    // =========================================================================
    // Frame Builder
    // =========================================================================

    /// Idle, preamble, start code, opcode and both address fields
    fn send_header(&mut self, op: Opcode, phy_addr: u8, reg_addr: u8) -> Result<()> {
        self.delay.delay_us(self.timing.idle_us);
        for _ in 0..PREAMBLE_BITS {
            self.transfer_bit(true, false)?;
        }
        self.delay.delay_us(self.timing.preamble_settle_us);

        self.send_bits(START_CODE, FIELD2_BITS)?;
        self.send_bits(op.bits(), FIELD2_BITS)?;
        self.send_bits(phy_addr as u16, ADDR_BITS)?;
        self.send_bits(reg_addr as u16, ADDR_BITS)
    }

    /// Complete read frame, returns the 16 data bits
    fn read_frame(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        self.send_header(Opcode::Read, phy_addr, reg_addr)?;

        // Turnaround: PHY releases, then drives 0. Host never drives.
        for _ in 0..FIELD2_BITS {
            self.transfer_bit(true, true)?;
        }

        let mut value = 0u16;
        for _ in 0..DATA_BITS {
            value = (value << 1) | self.transfer_bit(true, true)? as u16;
        }
        Ok(value)
    }

    /// Complete write frame
    fn write_frame(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.send_header(Opcode::Write, phy_addr, reg_addr)?;
        self.send_bits(TURNAROUND_WRITE, FIELD2_BITS)?;
        self.send_bits(value, DATA_BITS)
    }
}

// =============================================================================
// Basic Register Access
// =============================================================================

impl<P: MdioPins, D: DelayNs> MdioBus for MdioBitbang<P, D> {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        check_addresses(phy_addr, reg_addr)?;
        self.read_frame(phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        check_addresses(phy_addr, reg_addr)?;
        self.write_frame(phy_addr, reg_addr, value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
