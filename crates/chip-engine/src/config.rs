//! Circuit configuration, validation, and error types.
//!
//! [`CircuitConfig`] is the constructor input for
//! [`Circuit`](crate::Circuit). [`validate()`](CircuitConfig::validate)
//! checks it once at construction; nothing is re-checked afterwards.

use std::error::Error;
use std::fmt;

/// Default cascade budget for writes that start a new cascade.
pub const DEFAULT_UPDATE_DEPTH: u32 = 512;

/// Largest accepted cascade budget.
///
/// Cascades recurse on the call stack, so the budget bounds stack depth.
/// A cascade that spends all of it fits the 2 MiB stack of a spawned
/// thread in a debug build.
pub const MAX_UPDATE_DEPTH: u32 = 1024;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`CircuitConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_update_depth` is zero.
    ZeroUpdateDepth,
    /// `max_update_depth` is above [`MAX_UPDATE_DEPTH`].
    UpdateDepthTooLarge {
        /// The configured budget.
        configured: u32,
        /// The largest accepted budget.
        max: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroUpdateDepth => write!(f, "max_update_depth must be at least 1"),
            Self::UpdateDepthTooLarge { configured, max } => {
                write!(f, "max_update_depth {configured} exceeds maximum of {max}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── CircuitConfig ──────────────────────────────────────────────────

/// Construction-time settings of a circuit.
///
/// # Examples
///
/// ```
/// use chip_engine::CircuitConfig;
///
/// let config = CircuitConfig {
///     max_update_depth: 64,
///     ..CircuitConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert!(!config.is_client);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitConfig {
    /// Client circuits skip the added/replaced hooks and the listener
    /// for writes flagged `NO_REDRAW`. Default: `false`.
    pub is_client: bool,
    /// Budget given to writes that start a new cascade. Default: 512.
    pub max_update_depth: u32,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            is_client: false,
            max_update_depth: DEFAULT_UPDATE_DEPTH,
        }
    }
}

impl CircuitConfig {
    /// A default client-mode configuration.
    pub fn client() -> Self {
        Self {
            is_client: true,
            ..Self::default()
        }
    }

    /// Check that the budget is in `1..=MAX_UPDATE_DEPTH`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_update_depth == 0 {
            return Err(ConfigError::ZeroUpdateDepth);
        }
        if self.max_update_depth > MAX_UPDATE_DEPTH {
            return Err(ConfigError::UpdateDepthTooLarge {
                configured: self.max_update_depth,
                max: MAX_UPDATE_DEPTH,
            });
        }
        Ok(())
    }
}
