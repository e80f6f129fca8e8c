//! [`UpdateFlags`]: the side-effect bitset passed to every state change.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Bitset controlling which side effects a state change triggers.
///
/// The bit values are stable; hosts may persist or transmit them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UpdateFlags(u32);

impl UpdateFlags {
    /// No side effects beyond the write and the cascade.
    pub const NONE: Self = Self(0);
    /// Run neighbor power reactions around the changed cell.
    pub const NOTIFY_NEIGHBORS: Self = Self(1);
    /// Report the change to the host listener.
    pub const NOTIFY_LISTENERS: Self = Self(2);
    /// `NOTIFY_NEIGHBORS | NOTIFY_LISTENERS`.
    pub const NOTIFY_ALL: Self = Self(3);
    /// Client circuits skip the listener when this is set.
    pub const NO_REDRAW: Self = Self(4);
    /// Hint for hosts that the redraw must happen immediately.
    pub const REDRAW_ON_MAIN_THREAD: Self = Self(8);
    /// Write without running the update cascade.
    pub const FORCE_STATE: Self = Self(16);
    /// Removal should not produce drops.
    pub const SKIP_DROPS: Self = Self(32);

    /// Construct from raw bits. Unknown bits are kept.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` if any bit of `other` is set in `self`.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// `self` with every bit of `other` cleared.
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Flags handed down the cascade: neighbor notification and drop
    /// suppression do not propagate past the first hop.
    pub const fn for_cascade(self) -> Self {
        self.without(Self(Self::NOTIFY_NEIGHBORS.0 | Self::SKIP_DROPS.0))
    }
}

impl BitOr for UpdateFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for UpdateFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for UpdateFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for UpdateFlags {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for UpdateFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
