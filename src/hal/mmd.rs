//! Extended (Indirect) Register Access
//!
//! Clause 22 frames carry a 5-bit register address. Registers beyond the
//! basic 32 are reached through the MMD access window: a device address and
//! offset are written through `MMD_CTRL` (0x0D) / `MMD_DATA` (0x0E), the
//! window is switched to data mode, and `MMD_DATA` then refers to the
//! selected register.
//!
//! # Register identifiers
//!
//! | Identifier          | Kind                | Reached through                    |
//! |---------------------|---------------------|------------------------------------|
//! | `0x0000..=0x001F`   | basic               | one direct transaction             |
//! | `0x0020..=0x0EFD`   | vendor window       | MMD 0x1F, offset = identifier      |
//! | `0x0EFE..=0x0FFF`   | reserved            | rejected, no bus activity          |
//! | `0x1000..=0xFFFF`   | standard window     | select `id >> 12`, offset `id & 0xFFF`, MMD 1 |
//!
//! # Paging sequence
//!
//! ```text
//! write MMD_CTRL <- select   (0x1F, or id >> 12)
//! write MMD_DATA <- offset   (id, or id & 0xFFF)
//! write MMD_CTRL <- commit   (0x401F, or 0x4001)
//! read/write MMD_DATA
//! ```
//!
//! Each step is a full basic transaction. The sequence leaves the PHY's
//! window state changed, so two sequences for the same device must not
//! interleave. [`MdioChannels`](crate::sync::MdioChannels) holds the channel
//! lock across the whole sequence; callers of a bare [`MdioBus`] are
//! responsible for their own serialization.

use crate::error::{ConfigError, Result};
use crate::internal::constants::{
    BASIC_REG_LIMIT, MMD_STANDARD_COMMIT, MMD_VENDOR_COMMIT, MMD_VENDOR_DEVAD,
    STANDARD_OFFSET_MASK, STANDARD_WINDOW_SHIFT, STANDARD_WINDOW_START, VENDOR_WINDOW_END,
};

use super::mdio::{MdioBus, phy_reg};

// =============================================================================
// Register Identifier
// =============================================================================

/// Classified register identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterId {
    /// Directly addressable register (0-31)
    Basic(u8),
    /// Vendor window register (MMD 0x1F)
    Vendor(u16),
    /// Standard window register (MMD 1)
    Standard {
        /// Window select (`id >> 12`)
        window: u16,
        /// Offset inside the window (`id & 0xFFF`)
        offset: u16,
    },
}

impl RegisterId {
    /// Classify a raw identifier
    ///
    /// Identifiers in `0x0EFE..=0x0FFF` are rejected.
    pub const fn classify(id: u16) -> Result<Self> {
        if id < BASIC_REG_LIMIT {
            Ok(Self::Basic(id as u8))
        } else if id <= VENDOR_WINDOW_END {
            Ok(Self::Vendor(id))
        } else if id >= STANDARD_WINDOW_START {
            Ok(Self::Standard {
                window: id >> STANDARD_WINDOW_SHIFT,
                offset: id & STANDARD_OFFSET_MASK,
            })
        } else {
            Err(crate::error::Error::Config(ConfigError::InvalidRegister))
        }
    }

    /// Paging writes needed to reach this register, `None` for basic ones
    pub const fn paging(self) -> Option<Paging> {
        match self {
            Self::Basic(_) => None,
            Self::Vendor(id) => Some(Paging {
                select: MMD_VENDOR_DEVAD,
                offset: id,
                commit: MMD_VENDOR_COMMIT,
            }),
            Self::Standard { window, offset } => Some(Paging {
                select: window,
                offset,
                commit: MMD_STANDARD_COMMIT,
            }),
        }
    }
}

/// The three values written to page in an extended register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paging {
    /// First `MMD_CTRL` value
    pub select: u16,
    /// `MMD_DATA` value (register offset)
    pub offset: u16,
    /// Second `MMD_CTRL` value, switching the window to data mode
    pub commit: u16,
}

impl Paging {
    /// Perform the three paging writes
    pub fn apply<M: MdioBus + ?Sized>(&self, mdio: &mut M, phy_addr: u8) -> Result<()> {
        mdio.write(phy_addr, phy_reg::MMD_CTRL, self.select)?;
        mdio.write(phy_addr, phy_reg::MMD_DATA, self.offset)?;
        mdio.write(phy_addr, phy_reg::MMD_CTRL, self.commit)
    }
}

// =============================================================================
// Extended Access
// =============================================================================

/// Read a register by extended identifier
///
/// Basic identifiers are read directly. Window identifiers are paged in and
/// read back through `MMD_DATA`. Reserved identifiers return
/// `ConfigError::InvalidRegister` without touching the bus.
pub fn read_extended<M: MdioBus + ?Sized>(mdio: &mut M, phy_addr: u8, reg_id: u16) -> Result<u16> {
    let id = classify_logged(reg_id)?;
    match id.paging() {
        None => mdio.read(phy_addr, reg_id as u8),
        Some(paging) => {
            paging.apply(mdio, phy_addr)?;
            mdio.read(phy_addr, phy_reg::MMD_DATA)
        }
    }
}

/// Write a register by extended identifier
///
/// Same identifier handling as [`read_extended`].
pub fn write_extended<M: MdioBus + ?Sized>(
    mdio: &mut M,
    phy_addr: u8,
    reg_id: u16,
    value: u16,
) -> Result<()> {
    let id = classify_logged(reg_id)?;
    match id.paging() {
        None => mdio.write(phy_addr, reg_id as u8, value),
        Some(paging) => {
            paging.apply(mdio, phy_addr)?;
            mdio.write(phy_addr, phy_reg::MMD_DATA, value)
        }
    }
}

pub(crate) fn classify_logged(reg_id: u16) -> Result<RegisterId> {
    let id = RegisterId::classify(reg_id);
    #[cfg(feature = "defmt")]
    if id.is_err() {
        defmt::warn!("MDIO: reserved register identifier {=u16:#x}", reg_id);
    }
    id
}

// =============================================================================
// Unit Tests
// =============================================================================
