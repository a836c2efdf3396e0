//! Centralized Constants
//!
//! This module provides a single source of truth for the magic numbers used
//! throughout the MDIO driver.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Frame layout**: Clause 22 frame fields and their widths
//! - **Indirect access**: MMD window registers and commit values
//! - **Timing**: Half-period, idle and settle delays
//! - **Status indicator**: DP83TC813 link LED task periods

// =============================================================================
// Frame Layout (IEEE 802.3 Clause 22)
// =============================================================================

/// Number of one-bits in the preamble
pub const PREAMBLE_BITS: u32 = 32;

/// Start-of-frame code (`01`)
pub const START_CODE: u16 = 0b01;

/// Opcode for a read frame (`10`)
pub const OPCODE_READ: u16 = 0b10;

/// Opcode for a write frame (`01`)
pub const OPCODE_WRITE: u16 = 0b01;

/// Turnaround bits driven by the host in a write frame (`10`)
pub const TURNAROUND_WRITE: u16 = 0b10;

/// Width of the start, opcode and turnaround fields
pub const FIELD2_BITS: u8 = 2;

/// Width of the device and register address fields
pub const ADDR_BITS: u8 = 5;

/// Width of the data field
pub const DATA_BITS: u8 = 16;

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid basic register address (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

// =============================================================================
// Indirect (MMD) Access
// =============================================================================

/// First register identifier outside the basic window
pub const BASIC_REG_LIMIT: u16 = 32;

/// Last register identifier of the vendor window (MMD 0x1F)
pub const VENDOR_WINDOW_END: u16 = 0x0EFD;

/// First register identifier of the standard window (MMD 1)
pub const STANDARD_WINDOW_START: u16 = 0x1000;

/// Device address of the vendor window
pub const MMD_VENDOR_DEVAD: u16 = 0x1F;

/// MMD_CTRL commit value for the vendor window (data function, MMD 0x1F)
pub const MMD_VENDOR_COMMIT: u16 = 0x401F;

/// MMD_CTRL commit value for the standard window (data function, MMD 1)
pub const MMD_STANDARD_COMMIT: u16 = 0x4001;

/// Shift selecting the window from a standard-window identifier
pub const STANDARD_WINDOW_SHIFT: u16 = 12;

/// Mask selecting the in-window offset from a standard-window identifier
pub const STANDARD_OFFSET_MASK: u16 = 0x0FFF;

// =============================================================================
// Timing
// =============================================================================

/// Default MDC half-period in nanoseconds (1 MHz MDC)
pub const DEFAULT_HALF_PERIOD_NS: u32 = 500;

/// Minimum MDC half-period in nanoseconds
///
/// IEEE 802.3 limits MDC to 2.5 MHz (400 ns period).
pub const MIN_HALF_PERIOD_NS: u32 = 200;

/// Idle time before each preamble in microseconds
pub const DEFAULT_IDLE_US: u32 = 100;

/// Settle time between preamble and start code in microseconds
pub const DEFAULT_PREAMBLE_SETTLE_US: u32 = 10;

// =============================================================================
// Status Indicator
// =============================================================================

/// Status task period in milliseconds
pub const LINK_POLL_PERIOD_MS: u32 = 20;

/// Consecutive pressed periods that trigger the button action
pub const BUTTON_HOLD_PERIODS: u32 = 50;

/// Number of acknowledge blinks
pub const ACK_BLINKS: u32 = 5;

/// Duration of each acknowledge blink phase in milliseconds
pub const ACK_BLINK_MS: u32 = 200;
