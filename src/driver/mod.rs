//! Driver configuration.
//!
//! - [`config`] - Bus timing and its builder methods
//!
//! # Example
//!
//! ```ignore
//! use ph_mdio_bitbang::driver::MdioTiming;
//!
//! let timing = MdioTiming::new()
//!     .with_mdc_hz(2_500_000)
//!     .with_idle_us(0);
//! ```

pub mod config;

pub use config::MdioTiming;
