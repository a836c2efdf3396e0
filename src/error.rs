//! Error types for the bit-banged MDIO driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Rejected parameters and channel setup failures
//! - [`IoError`]: Failures of the underlying GPIO lines
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by every fallible driver method.
//!
//! # Indeterminate data
//!
//! MDIO has no acknowledge, parity or CRC. A read from an absent or
//! misbehaving device completes normally and returns whatever the pull-up
//! left on the line (commonly `0xFFFF`). None of the errors below can
//! report that condition; plausibility checks (e.g. comparing the PHY
//! identifier against an expected value) belong to the caller.
//!
//! # Non-strict callers
//!
//! Every rejection happens before any line is driven, so ignoring the error
//! reproduces the classic "silent" behavior of bit-banged MDIO code:
//!
//! ```ignore
//! let value = channels.read(0, 3, 0x0EFE).unwrap_or_default(); // 0, no bus activity
//! ```

// =============================================================================
// Configuration Errors
// =============================================================================

/// Parameter and channel configuration errors
///
/// These errors are raised at the driver boundary, before any bus activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Channel index is not below the configured channel count
    InvalidChannel,
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// Register address outside the basic window, or register identifier
    /// in the reserved gap `0x0EFE..=0x0FFF`
    InvalidRegister,
    /// Invalid timing configuration
    InvalidConfig,
    /// Channel already initialized
    AlreadyInitialized,
    /// Channel has not been initialized
    NotInitialized,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidChannel => "invalid MDIO channel",
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::InvalidRegister => "invalid register identifier",
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::AlreadyInitialized => "channel already initialized",
            ConfigError::NotInitialized => "channel not initialized",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime line errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// A GPIO operation on MDC or MDIO failed
    Gpio,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Gpio => "GPIO line error",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::InvalidRegister)) => { /* ... */ }
///     Err(Error::Io(IoError::Gpio)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for MDIO operations
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Unit Tests
// =============================================================================
