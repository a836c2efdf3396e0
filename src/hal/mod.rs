//! Hardware Abstraction Layer
//!
//! The management bus from the GPIO lines up to extended register access.
//!
//! # Modules
//!
//! - [`pins`]: MDC/MDIO line seam and an `embedded-hal` open-drain adapter
//! - [`bitbang`]: bit primitive, frame builder and basic register access
//! - [`mdio`]: [`MdioBus`] trait and the Clause 22 register map
//! - [`mmd`]: extended (indirect) register access through the MMD window
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL (e.g., `esp_hal::delay::Delay`).

pub mod bitbang;
pub mod mdio;
pub mod mmd;
pub mod pins;

// Re-export commonly used types
pub use bitbang::MdioBitbang;
pub use mdio::MdioBus;
pub use mmd::RegisterId;
pub use pins::{Direction, MdioPins, OpenDrainPins};
