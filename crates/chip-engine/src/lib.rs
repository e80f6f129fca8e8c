//! The chip circuit engine.
//!
//! Provides [`Circuit`], which owns a [`ComponentGrid`](chip_grid::ComponentGrid)
//! and implements the state-change path every write goes through: the
//! replace/add hooks, listener notification, neighbour power reactions
//! and the depth-bounded shape cascade, plus the scheduled ticks that
//! torches switch on. Component behaviour lives in `chip-core`; this
//! crate decides when it runs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod circuit;
pub mod config;
pub mod metrics;
mod scheduler;
mod updater;

pub use circuit::{Circuit, SOUND_PITCH_SCALE};
pub use config::{CircuitConfig, ConfigError, DEFAULT_UPDATE_DEPTH, MAX_UPDATE_DEPTH};
pub use metrics::CascadeMetrics;
