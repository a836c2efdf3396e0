//! PHY-Level Consumers
//!
//! Code that talks to a specific PHY only through [`MdioBus`](crate::hal::mdio::MdioBus).
//!
//! # Supported PHYs
//!
//! - [`dp83tc813`]: TI DP83TC813 100BASE-T1, link LED and master/slave button
//!
//! Generic IEEE 802.3 helpers (`read_phy_id`, `is_link_up`) live in
//! [`hal::mdio`](crate::hal::mdio).

pub mod dp83tc813;

pub use dp83tc813::LinkIndicator;
