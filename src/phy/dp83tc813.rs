//! DP83TC813 Link Status Indicator
//!
//! Periodic task for a TI DP83TC813 100BASE-T1 automotive PHY. It mirrors
//! the link status onto an LED and uses a push button to flip the PHY
//! between master and slave roles.
//!
//! # Behavior per period (20 ms)
//!
//! 1. Sample the button. After 50 consecutive pressed periods (1 s):
//!    blink the LED 5 times, wait for the button to be released, then
//!    toggle the master/slave bit with a read-modify-write.
//! 2. Read BMSR and drive the LED from the link status bit.
//! 3. Sleep for the rest of the period.
//!
//! # Example
//!
//! ```ignore
//! use ph_mdio_bitbang::phy::LinkIndicator;
//!
//! let mut mdio = CHANNELS.handle(1)?;
//! let mut indicator = LinkIndicator::new(0, led, button);
//! indicator.run(&mut mdio, &mut delay)?;
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{IoError, Result};
use crate::hal::mdio::{MdioBus, bmsr};
use crate::internal::constants::{
    ACK_BLINK_MS, ACK_BLINKS, BUTTON_HOLD_PERIODS, LINK_POLL_PERIOD_MS,
};

// =============================================================================
// DP83TC813 Register Definitions
// =============================================================================

/// DP83TC813 extended register identifiers
pub mod regs {
    /// Basic Mode Status Register
    pub const BMSR: u16 = 0x0001;
    /// PMA/PMD Control 2 (MMD 1)
    pub const PMA_CTRL2: u16 = 0x1834;
}

/// PMA_CTRL2 bits
pub mod pma_ctrl2 {
    /// Master/slave configuration value (1 = master)
    pub const MASTER: u16 = 1 << 14;
}

/// Read the current master/slave role
pub fn is_master<M: MdioBus + ?Sized>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
    let ctrl = mdio.read_extended(phy_addr, regs::PMA_CTRL2)?;
    Ok(ctrl & pma_ctrl2::MASTER != 0)
}

/// Flip the master/slave role, returning the new role (`true` = master)
pub fn toggle_master_slave<M: MdioBus + ?Sized>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
    let ctrl = mdio.read_extended(phy_addr, regs::PMA_CTRL2)? ^ pma_ctrl2::MASTER;
    mdio.write_extended(phy_addr, regs::PMA_CTRL2, ctrl)?;
    Ok(ctrl & pma_ctrl2::MASTER != 0)
}

// =============================================================================
// Link Indicator
// =============================================================================

/// Link LED and role button for one DP83TC813
#[derive(Debug)]
pub struct LinkIndicator<LED, BTN> {
    phy_addr: u8,
    led: LED,
    button: BTN,
    /// Consecutive periods the button has been seen pressed
    held_periods: u32,
}

impl<LED: OutputPin, BTN: InputPin> LinkIndicator<LED, BTN> {
    /// Create an indicator for the PHY at `phy_addr`
    ///
    /// The button is active high.
    pub fn new(phy_addr: u8, led: LED, button: BTN) -> Self {
        Self {
            phy_addr,
            led,
            button,
            held_periods: 0,
        }
    }

    /// PHY address this indicator polls
    pub fn phy_addr(&self) -> u8 {
        self.phy_addr
    }

    /// Release the LED and button pins
    pub fn release(self) -> (LED, BTN) {
        (self.led, self.button)
    }

    /// Run one period, returning the link state observed
    pub fn step<M, D>(&mut self, mdio: &mut M, delay: &mut D) -> Result<bool>
    where
        M: MdioBus + ?Sized,
        D: DelayNs,
    {
        if self.button_pressed()? {
            self.held_periods += 1;
        } else {
            self.held_periods = 0;
        }

        if self.held_periods == BUTTON_HOLD_PERIODS {
            self.acknowledge(delay)?;
            while self.button_pressed()? {
                delay.delay_ms(LINK_POLL_PERIOD_MS);
            }
            let _master = toggle_master_slave(mdio, self.phy_addr)?;
            #[cfg(feature = "defmt")]
            defmt::info!("DP83TC813: role switched, master={}", _master);
            self.held_periods = 0;
        }

        let status = mdio.read_extended(self.phy_addr, regs::BMSR)?;
        let link_up = status & bmsr::LINK_STATUS != 0;
        self.set_led(link_up)?;

        delay.delay_ms(LINK_POLL_PERIOD_MS);
        Ok(link_up)
    }

    /// Run forever, returning only on a bus or pin error
    pub fn run<M, D>(&mut self, mdio: &mut M, delay: &mut D) -> Result<Infallible>
    where
        M: MdioBus + ?Sized,
        D: DelayNs,
    {
        loop {
            self.step(mdio, delay)?;
        }
    }

    fn acknowledge<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        for _ in 0..ACK_BLINKS {
            self.set_led(true)?;
            delay.delay_ms(ACK_BLINK_MS);
            self.set_led(false)?;
            delay.delay_ms(ACK_BLINK_MS);
        }
        Ok(())
    }

    fn button_pressed(&mut self) -> Result<bool> {
        self.button.is_high().map_err(|_| IoError::Gpio.into())
    }

    fn set_led(&mut self, on: bool) -> Result<()> {
        self.led
            .set_state(on.into())
            .map_err(|_| IoError::Gpio.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
