//! Channel State and Mutual Exclusion
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`], ISR-safe
//!   interior mutability, and [`ClaimCell`], a per-value lock that holds
//!   the critical section only while the value changes hands
//! - **Channels** (`channels`): [`MdioChannels`], the fixed table of locked
//!   buses, and [`ChannelHandle`], an `MdioBus` view of one channel
//!
//! # Example
//!
//! ```ignore
//! use ph_mdio_bitbang::sync::MdioChannels;
//!
//! static MDIO: MdioChannels<Bus, 2> = MdioChannels::new();
//!
//! fn main() {
//!     MDIO.init_channel(0, bus0).unwrap();
//!     MDIO.init_channel(1, bus1).unwrap();
//!
//!     // Any thread or task
//!     let bmsr = MDIO.read(0, 0, 0x01).unwrap_or_default();
//! }
//! ```

mod channels;
mod primitives;

pub use channels::{ChannelHandle, MdioChannels};
pub use primitives::{ClaimCell, ClaimError, CriticalSectionCell};
