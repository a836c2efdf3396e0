//! Shared MDIO channel table.
//!
//! Provides [`MdioChannels`], a fixed table of `N` independently locked
//! management buses, and [`ChannelHandle`], an [`MdioBus`] view of one of
//! them.
//!
//! # Lock scope
//!
//! | Operation                        | Lock acquisitions     |
//! |----------------------------------|-----------------------|
//! | `read` / `write`                 | one per frame         |
//! | `read_extended` / `write_extended` | one per call (whole paging sequence) |
//! | `with_channel`                   | one per closure       |
//!
//! Argument checks (channel index, device address, register identifier)
//! run before the lock is taken, so a rejected call never touches the bus.
//!
//! Each channel has its own [`ClaimCell`]. A frame on one channel never
//! waits for another channel, and interrupts stay enabled while the bits are
//! clocked; an interrupt only stretches the current MDC half period. A
//! caller contending for a busy channel spins until it is released.
//! Claiming the same channel again from inside
//! [`MdioChannels::with_channel`] never returns.

use super::primitives::{ClaimCell, ClaimError};
use crate::error::{ConfigError, Result};
use crate::hal::mdio::{MdioBus, check_addresses};
use crate::hal::mmd;
use crate::internal::constants::MAX_PHY_ADDR;

// =============================================================================
// Channel Table
// =============================================================================

/// Fixed table of `N` management buses, each behind its own lock.
///
/// # Example
///
/// ```ignore
/// static MDIO: MdioChannels<Bus, 2> = MdioChannels::new();
///
/// MDIO.init_channel(0, MdioBitbang::new(pins0, delay0))?;
/// MDIO.init_channel(1, MdioBitbang::new(pins1, delay1))?;
///
/// let id1 = MDIO.read(0, 0, 0x02)?;
/// MDIO.write_extended(1, 0, 0x1834, 0xC001)?;
/// ```
pub struct MdioChannels<B, const N: usize> {
    slots: [ClaimCell<B>; N],
}

impl<B: MdioBus, const N: usize> MdioChannels<B, N> {
    /// Create a table with every channel uninitialized (const, suitable for
    /// static initialization).
    pub const fn new() -> Self {
        Self {
            slots: [const { ClaimCell::new() }; N],
        }
    }

    /// Create a fully initialized table.
    pub fn from_buses(buses: [B; N]) -> Self {
        Self {
            slots: buses.map(ClaimCell::filled),
        }
    }

    /// Number of channels (fixed at build time).
    pub const fn channel_count(&self) -> usize {
        N
    }

    /// Install the bus for one channel.
    ///
    /// Returns `ConfigError::AlreadyInitialized` if the channel already has
    /// a bus; the installed bus is left untouched.
    pub fn init_channel(&self, index: usize, bus: B) -> Result<()> {
        self.slot(index)?
            .fill(bus)
            .map_err(|_| ConfigError::AlreadyInitialized)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("MDIO: channel {} initialized", index);
        Ok(())
    }

    /// Check whether a channel has a bus installed.
    pub fn is_initialized(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(ClaimCell::is_filled)
    }

    /// Run a sequence of transactions on one channel under a single lock
    /// acquisition, waiting while another caller holds the channel.
    pub fn with_channel<R, F>(&self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&mut B) -> Result<R>,
    {
        self.slot(index)?
            .with(f)
            .unwrap_or_else(|| Err(ConfigError::NotInitialized.into()))
    }

    /// Like [`with_channel`](Self::with_channel), but returns `None` instead
    /// of waiting when the channel is held by another caller.
    pub fn try_with_channel<R, F>(&self, index: usize, f: F) -> Option<Result<R>>
    where
        F: FnOnce(&mut B) -> Result<R>,
    {
        let slot = match self.slot(index) {
            Ok(slot) => slot,
            Err(e) => return Some(Err(e)),
        };
        match slot.try_with(f) {
            Ok(result) => Some(result),
            Err(ClaimError::Vacant) => Some(Err(ConfigError::NotInitialized.into())),
            Err(ClaimError::Taken) => None,
        }
    }

    /// Borrow one channel as an [`MdioBus`].
    pub fn handle(&self, index: usize) -> Result<ChannelHandle<'_, B, N>> {
        self.slot(index)?;
        Ok(ChannelHandle {
            channels: self,
            index,
        })
    }

    // =========================================================================
    // Register Access
    // =========================================================================

    /// Read a basic register on a channel.
    pub fn read(&self, channel: usize, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        self.slot(channel)?;
        check_addresses(phy_addr, reg_addr)?;
        self.with_channel(channel, |bus| bus.read(phy_addr, reg_addr))
    }

    /// Write a basic register on a channel.
    pub fn write(&self, channel: usize, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.slot(channel)?;
        check_addresses(phy_addr, reg_addr)?;
        self.with_channel(channel, |bus| bus.write(phy_addr, reg_addr, value))
    }

    /// Read a register by extended identifier, holding the lock across the
    /// paging sequence.
    pub fn read_extended(&self, channel: usize, phy_addr: u8, reg_id: u16) -> Result<u16> {
        self.check_extended(channel, phy_addr, reg_id)?;
        self.with_channel(channel, |bus| bus.read_extended(phy_addr, reg_id))
    }

    /// Write a register by extended identifier, holding the lock across the
    /// paging sequence.
    pub fn write_extended(
        &self,
        channel: usize,
        phy_addr: u8,
        reg_id: u16,
        value: u16,
    ) -> Result<()> {
        self.check_extended(channel, phy_addr, reg_id)?;
        self.with_channel(channel, |bus| bus.write_extended(phy_addr, reg_id, value))
    }

    fn check_extended(&self, channel: usize, phy_addr: u8, reg_id: u16) -> Result<()> {
        self.slot(channel)?;
        if phy_addr > MAX_PHY_ADDR {
            return Err(ConfigError::InvalidPhyAddress.into());
        }
        mmd::classify_logged(reg_id).map(|_| ())
    }

    fn slot(&self, index: usize) -> Result<&ClaimCell<B>> {
        match self.slots.get(index) {
            Some(slot) => Ok(slot),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("MDIO: channel {} out of range ({} configured)", index, N);
                Err(ConfigError::InvalidChannel.into())
            }
        }
    }
}

impl<B: MdioBus, const N: usize> Default for MdioChannels<B, N> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Channel Handle
// =============================================================================

/// [`MdioBus`] view of one channel of an [`MdioChannels`] table.
///
/// Basic transactions lock once per frame. Extended transactions lock once
/// for the whole paging sequence.
pub struct ChannelHandle<'a, B, const N: usize> {
    channels: &'a MdioChannels<B, N>,
    index: usize,
}

impl<B: MdioBus, const N: usize> ChannelHandle<'_, B, N> {
    /// Channel index this handle refers to.
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl<B: MdioBus, const N: usize> MdioBus for ChannelHandle<'_, B, N> {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        self.channels.read(self.index, phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.channels.write(self.index, phy_addr, reg_addr, value)
    }

    fn read_extended(&mut self, phy_addr: u8, reg_id: u16) -> Result<u16> {
        self.channels.read_extended(self.index, phy_addr, reg_id)
    }

    fn write_extended(&mut self, phy_addr: u8, reg_id: u16, value: u16) -> Result<()> {
        self.channels
            .write_extended(self.index, phy_addr, reg_id, value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
