//! MDIO Bus Interface
//!
//! This module defines the [`MdioBus`] trait that every register-level
//! consumer (PHY drivers, the status indicator, the shell) is written
//! against, together with the IEEE 802.3 Clause 22 register map.
//!
//! Implementations:
//! - [`MdioBitbang`](super::bitbang::MdioBitbang): owns the lines, exclusive by `&mut`
//! - [`ChannelHandle`](crate::sync::ChannelHandle): one channel of a shared
//!   [`MdioChannels`](crate::sync::MdioChannels) table, locked per transaction

use crate::error::{ConfigError, Result};
use crate::internal::constants::{MAX_PHY_ADDR, MAX_REG_ADDR};

use super::mmd;

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// This trait can be implemented by different backends, allowing
/// the PHY drivers to work with various MDIO implementations.
///
/// Reads from a device that does not answer are not errors: the protocol
/// has no acknowledge, so they return the idle level of the line.
pub trait MdioBus {
    /// Read a basic PHY register (0-31)
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a basic PHY register (0-31)
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;

    /// Read a register by extended identifier
    ///
    /// See [`mmd::read_extended`] for the identifier ranges.
    fn read_extended(&mut self, phy_addr: u8, reg_id: u16) -> Result<u16> {
        mmd::read_extended(self, phy_addr, reg_id)
    }

    /// Write a register by extended identifier
    ///
    /// See [`mmd::write_extended`] for the identifier ranges.
    fn write_extended(&mut self, phy_addr: u8, reg_id: u16, value: u16) -> Result<()> {
        mmd::write_extended(self, phy_addr, reg_id, value)
    }
}

impl<M: MdioBus + ?Sized> MdioBus for &mut M {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        (**self).read(phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        (**self).write(phy_addr, reg_addr, value)
    }

    fn read_extended(&mut self, phy_addr: u8, reg_id: u16) -> Result<u16> {
        (**self).read_extended(phy_addr, reg_id)
    }

    fn write_extended(&mut self, phy_addr: u8, reg_id: u16, value: u16) -> Result<()> {
        (**self).write_extended(phy_addr, reg_id, value)
    }
}

// =============================================================================
// PHY Register Definitions (IEEE 802.3 standard registers)
// =============================================================================

/// Standard PHY register addresses (IEEE 802.3 Clause 22)
pub mod phy_reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 1;
    /// PHY Identifier 1
    pub const PHYIDR1: u8 = 2;
    /// PHY Identifier 2
    pub const PHYIDR2: u8 = 3;
    /// MMD Access Control Register
    pub const MMD_CTRL: u8 = 13;
    /// MMD Access Data Register
    pub const MMD_DATA: u8 = 14;
}

/// BMSR (Basic Mode Status Register) bits
pub mod bmsr {
    /// Link status
    pub const LINK_STATUS: u16 = 1 << 2;
}

/// MMD_CTRL (MMD Access Control Register) fields
pub mod mmd_ctrl {
    /// Function field: address
    pub const FUNC_ADDRESS: u16 = 0x0000;
    /// Function field: data, no post increment
    pub const FUNC_DATA: u16 = 0x4000;
    /// Function field mask
    pub const FUNC_MASK: u16 = 0xC000;
    /// Device address mask
    pub const DEVAD_MASK: u16 = 0x001F;
}

/// Reject addresses that do not fit the 5-bit frame fields
pub(crate) fn check_addresses(phy_addr: u8, reg_addr: u8) -> Result<()> {
    if phy_addr > MAX_PHY_ADDR {
        return Err(ConfigError::InvalidPhyAddress.into());
    }
    if reg_addr > MAX_REG_ADDR {
        return Err(ConfigError::InvalidRegister.into());
    }
    Ok(())
}

// =============================================================================
// PHY Helper Functions
// =============================================================================

/// Read the PHY identifier
///
/// Returns `(PHYIDR1 << 16) | PHYIDR2`. An absent device reads `0xFFFF_FFFF`
/// with the usual pull-up.
pub fn read_phy_id<M: MdioBus + ?Sized>(mdio: &mut M, phy_addr: u8) -> Result<u32> {
    let id1 = mdio.read(phy_addr, phy_reg::PHYIDR1)? as u32;
    let id2 = mdio.read(phy_addr, phy_reg::PHYIDR2)? as u32;
    Ok((id1 << 16) | id2)
}

/// Check the link status bit in BMSR
pub fn is_link_up<M: MdioBus + ?Sized>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
    let bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;
    Ok((bmsr_val & bmsr::LINK_STATUS) != 0)
}

// =============================================================================
// Unit Tests
// =============================================================================
