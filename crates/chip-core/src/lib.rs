//! Core types and traits for the chip circuit simulation.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! grid geometry, the component state model and its 16-bit encoding,
//! the update flags, component behaviour, and the traits through which
//! components talk to the circuit that holds them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod component;
pub mod flags;
pub mod id;
pub mod pos;
pub mod state;
pub mod traits;

pub use component::{wire_input_power, CLICK_VOLUME, TORCH_DELAY};
pub use flags::UpdateFlags;
pub use id::{ActorId, SoundCategory, SoundEvent};
pub use pos::{ComponentPos, FlatDirection, CELL_COUNT, PORT_POSITIONS, SIZE};
pub use state::{ComponentKind, ComponentState, Sides, MAX_POWER};
pub use traits::{conducted_power, CircuitAccess, CircuitHost, CircuitView, NoopHost};
