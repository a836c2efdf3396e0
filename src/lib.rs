//! Bit-Banged MDIO Driver
//!
//! A `no_std`, `no_alloc` IEEE 802.3 Clause 22 management bus master driven
//! over two GPIO lines, with indirect (MMD) access to the extended register
//! space of a PHY.
//!
//! # Architecture
//!
//! The driver is organized in layers, each talking only to the one below:
//!
//! 1. **Consumers** ([`phy`], [`shell`]): link indicator task, console commands
//! 2. **Channels** ([`sync`]): fixed table of independently locked buses
//! 3. **Extended access** ([`hal::mmd`]): paging through `MMD_CTRL`/`MMD_DATA`
//! 4. **Basic access** ([`hal::bitbang`]): frame builder and bit primitive
//! 5. **Lines** ([`hal::pins`]): MDC/MDIO over `embedded-hal` pins
//!
//! Consumers are written against the [`MdioBus`] trait, so they run the same
//! on a bare [`MdioBitbang`], on a [`ChannelHandle`], or on a test mock.
//!
//! ## Standard Compliance
//!
//! - **IEEE 802.3 Clause 22**: frame format, MDC limit of 2.5 MHz
//! - **IEEE 802.3 Clause 45 over 22**: MMD access registers 13/14
//!
//! # Error model
//!
//! The bus has no acknowledge: a read from an absent device returns the idle
//! level of the line (normally `0xFFFF`) and is not an error. Errors are
//! raised only for local preconditions (channel index, device address,
//! register identifier, channel not initialized) and for GPIO failures. A
//! rejected call never touches the bus. Callers that want the silent
//! behavior use `unwrap_or_default()`, which yields 0.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for public types and diagnostic logs
//!
//! # Example
//!
//! ```ignore
//! use ph_mdio_bitbang::{MdioBitbang, MdioChannels, OpenDrainPins};
//!
//! type Bus = MdioBitbang<OpenDrainPins<Mdc, Mdio>, Delay>;
//! static MDIO: MdioChannels<Bus, 2> = MdioChannels::new();
//!
//! MDIO.init_channel(0, MdioBitbang::new(OpenDrainPins::new(mdc0, mdio0), delay0))?;
//! MDIO.init_channel(1, MdioBitbang::new(OpenDrainPins::new(mdc1, mdio1), delay1))?;
//!
//! let id1 = MDIO.read(0, 0, 0x02)?;
//! MDIO.write_extended(1, 0, 0x1834, 0xC001)?;
//! ```

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod error;
pub mod hal;
pub mod phy;
pub mod shell;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub(crate) mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::MdioTiming;
pub use error::{ConfigError, Error, IoError, Result};
pub use hal::bitbang::MdioBitbang;
pub use hal::mdio::MdioBus;
pub use hal::mmd::RegisterId;
pub use hal::pins::{Direction, MdioPins, OpenDrainPins};
pub use phy::LinkIndicator;
pub use shell::{Session, Shell};
pub use sync::{ChannelHandle, MdioChannels};

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        // Indirect access
        BASIC_REG_LIMIT,
        // Timing
        DEFAULT_HALF_PERIOD_NS,
        DEFAULT_IDLE_US,
        DEFAULT_PREAMBLE_SETTLE_US,
        // Frame layout
        MAX_PHY_ADDR,
        MAX_REG_ADDR,
        MIN_HALF_PERIOD_NS,
        STANDARD_WINDOW_START,
        VENDOR_WINDOW_END,
    };
}
