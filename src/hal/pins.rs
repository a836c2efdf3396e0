//! MDC/MDIO Line Abstraction
//!
//! The bit-banged driver needs four things from the platform: drive MDC,
//! switch the direction of MDIO, drive MDIO, and sample MDIO. [`MdioPins`]
//! is that seam.
//!
//! `embedded-hal` 1.0 has no trait for switching a pin between input and
//! output at runtime, so HALs expose it in different ways (flex pins,
//! open-drain pins, mode-changing types). [`OpenDrainPins`] covers the
//! common open-drain wiring through the standard digital traits; other
//! wirings implement [`MdioPins`] directly.
//!
//! # Example
//!
//! ```ignore
//! use ph_mdio_bitbang::hal::pins::OpenDrainPins;
//!
//! let mdc = Output::new(peripherals.GPIO23, Level::Low, OutputConfig::default());
//! let mdio = Flex::new(peripherals.GPIO18); // open-drain with pull-up
//! let pins = OpenDrainPins::new(mdc, mdio);
//! ```

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{IoError, Result};

/// Direction of the MDIO data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Host drives the line
    #[default]
    Output,
    /// Line is released so the PHY can drive it
    Input,
}

/// Platform access to the two MDIO lines
pub trait MdioPins {
    /// Drive the MDC clock line
    fn set_mdc(&mut self, high: bool) -> Result<()>;

    /// Configure the MDIO line direction
    fn set_mdio_direction(&mut self, direction: Direction) -> Result<()>;

    /// Drive the MDIO line (only meaningful as output)
    fn write_mdio(&mut self, high: bool) -> Result<()>;

    /// Sample the level currently present on the MDIO line
    fn read_mdio(&mut self) -> Result<bool>;
}

impl<T: MdioPins + ?Sized> MdioPins for &mut T {
    fn set_mdc(&mut self, high: bool) -> Result<()> {
        (**self).set_mdc(high)
    }

    fn set_mdio_direction(&mut self, direction: Direction) -> Result<()> {
        (**self).set_mdio_direction(direction)
    }

    fn write_mdio(&mut self, high: bool) -> Result<()> {
        (**self).write_mdio(high)
    }

    fn read_mdio(&mut self) -> Result<bool> {
        (**self).read_mdio()
    }
}

// =============================================================================
// Open-Drain Adapter
// =============================================================================

/// [`MdioPins`] over an output MDC pin and an open-drain MDIO pin
///
/// MDIO must be open-drain with a pull-up (external 1.5 kΩ as recommended by
/// IEEE 802.3, or the internal one for short traces). Releasing the line is
/// done by driving it high; the PHY can then pull it low.
#[derive(Debug)]
pub struct OpenDrainPins<MDC, MDIO> {
    mdc: MDC,
    mdio: MDIO,
    direction: Direction,
}

impl<MDC, MDIO> OpenDrainPins<MDC, MDIO>
where
    MDC: OutputPin,
    MDIO: InputPin + OutputPin,
{
    /// Wrap the two lines
    pub fn new(mdc: MDC, mdio: MDIO) -> Self {
        Self {
            mdc,
            mdio,
            direction: Direction::Output,
        }
    }

    /// Release the pins
    pub fn release(self) -> (MDC, MDIO) {
        (self.mdc, self.mdio)
    }
}

impl<MDC, MDIO> MdioPins for OpenDrainPins<MDC, MDIO>
where
    MDC: OutputPin,
    MDIO: InputPin + OutputPin,
{
    fn set_mdc(&mut self, high: bool) -> Result<()> {
        self.mdc.set_state(high.into()).map_err(|_| IoError::Gpio)?;
        Ok(())
    }

    fn set_mdio_direction(&mut self, direction: Direction) -> Result<()> {
        if direction == Direction::Input {
            self.mdio.set_high().map_err(|_| IoError::Gpio)?;
        }
        self.direction = direction;
        Ok(())
    }

    fn write_mdio(&mut self, high: bool) -> Result<()> {
        // Driving low while released would fight the PHY
        if self.direction == Direction::Output {
            self.mdio.set_state(high.into()).map_err(|_| IoError::Gpio)?;
        }
        Ok(())
    }

    fn read_mdio(&mut self) -> Result<bool> {
        self.mdio.is_high().map_err(|_| IoError::Gpio.into())
    }
}
