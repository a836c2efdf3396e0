//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//!
//! # Contents
//!
//! - [`constants`]: Frame layout, paging values and timing defaults
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. Selected constants are
//! re-exported through [`crate::constants`].

pub(crate) mod constants;
