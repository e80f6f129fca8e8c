//! Strongly-typed identifiers for host-side collaborators.

use std::fmt;

/// Opaque handle for the actor (player, automaton) behind an interaction.
///
/// The core never interprets the value; it only hands it back to the
/// host, e.g. as the `except` argument of a sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Sounds the core asks the host to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    /// A lever was flipped.
    LeverClick,
    /// A port switched between input and output.
    PortClick,
}

/// Mixer category a sound belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCategory {
    /// Sounds made by placed components.
    Blocks,
    /// Everything else.
    Master,
}

impl fmt::Display for SoundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeverClick => f.write_str("lever_click"),
            Self::PortClick => f.write_str("port_click"),
        }
    }
}
