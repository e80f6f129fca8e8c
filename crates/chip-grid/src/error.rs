//! Error types for grid storage.

use chip_core::{ComponentPos, ComponentState, FlatDirection};
use std::fmt;

/// Contract violations detected by [`ComponentGrid`](crate::ComponentGrid).
///
/// The panicking accessors format these as their panic message; the
/// `try_` variants return them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The position is neither an interior cell nor a port position.
    InvalidPosition {
        /// The offending position.
        pos: ComponentPos,
    },
    /// A non-Port state was offered to a port slot.
    NonPortInPortSlot {
        /// Side of the port slot.
        side: FlatDirection,
        /// The rejected state.
        state: ComponentState,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPosition { pos } => {
                write!(f, "position {pos} is not a valid component position")
            }
            Self::NonPortInPortSlot { side, state } => {
                write!(f, "cannot store {state} in the {side} port slot")
            }
        }
    }
}

impl std::error::Error for GridError {}
