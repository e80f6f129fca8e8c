//! Component storage for chip circuits.
//!
//! [`ComponentGrid`] owns the 225 interior cells and the four boundary
//! port slots, resolves positions to storage, and enforces the port
//! invariant: a port slot only ever holds a Port-kind state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;

pub use error::GridError;
pub use grid::ComponentGrid;
