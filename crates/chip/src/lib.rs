//! Chip: a sandbox simulation of small logic circuits.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! chip sub-crates. For most users, adding `chip` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use chip::prelude::*;
//!
//! let mut circuit = Circuit::default();
//!
//! // A lever, two wires and a lamp along row 3.
//! let lever = ComponentPos::new(1, 3);
//! let lamp = ComponentPos::new(4, 3);
//! circuit.place_component_state(lever, ComponentKind::Lever, FlatDirection::West);
//! circuit.place_component_state(ComponentPos::new(2, 3), ComponentKind::Wire, FlatDirection::North);
//! circuit.place_component_state(ComponentPos::new(3, 3), ComponentKind::Wire, FlatDirection::North);
//! circuit.place_component_state(lamp, ComponentKind::Lamp, FlatDirection::North);
//!
//! circuit.use_component(lever, None);
//! assert_eq!(circuit.component_state(ComponentPos::new(3, 3)).power(), Some(14));
//! assert_eq!(circuit.component_state(lamp), ComponentState::Lamp { lit: true });
//!
//! // Snapshots restore into a fresh circuit without running any hooks.
//! let mut copy = Circuit::default();
//! copy.read_snapshot(&circuit.write_snapshot()).unwrap();
//! assert_eq!(copy.state_hash(), circuit.state_hash());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `chip-core` | Positions, flags, component states, power rules, host traits |
//! | [`grid`] | `chip-grid` | Fixed-size cell and port storage |
//! | [`snapshot`] | `chip-snapshot` | Snapshot capture, byte framing and hashing |
//! | [`engine`] | `chip-engine` | The circuit and its update cascade |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits and component behaviour (`chip-core`).
///
/// Contains [`types::ComponentPos`], [`types::ComponentState`],
/// [`types::UpdateFlags`] and the circuit traits
/// ([`types::CircuitView`], [`types::CircuitAccess`], [`types::CircuitHost`]).
pub use chip_core as types;

/// Cell and port storage (`chip-grid`).
pub use chip_grid as grid;

/// Snapshots (`chip-snapshot`).
///
/// Capture with [`snapshot::write_snapshot`], frame with
/// [`snapshot::encode_snapshot`] / [`snapshot::decode_snapshot`], and
/// fingerprint with [`snapshot::circuit_hash`].
pub use chip_snapshot as snapshot;

/// The circuit engine (`chip-engine`).
///
/// [`engine::Circuit`] owns the grid and runs every state change.
pub use chip_engine as engine;

/// Common imports for typical chip usage.
///
/// ```rust
/// use chip::prelude::*;
/// ```
///
/// This imports the circuit, its configuration, positions, component
/// states, update flags and the host trait.
pub mod prelude {
    // Core types and traits
    pub use chip_core::{
        ActorId, CircuitAccess, CircuitHost, CircuitView, ComponentKind, ComponentPos,
        ComponentState, FlatDirection, NoopHost, Sides, SoundCategory, SoundEvent, UpdateFlags,
    };

    // Snapshots
    pub use chip_snapshot::{CircuitSnapshot, SnapshotError};

    // Engine
    pub use chip_engine::{CascadeMetrics, Circuit, CircuitConfig, ConfigError};
}
