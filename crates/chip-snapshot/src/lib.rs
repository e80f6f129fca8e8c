//! Snapshots of chip circuits.
//!
//! A [`CircuitSnapshot`] captures a circuit's ports, interior cells and
//! logical time. Snapshots can be applied back onto a grid, framed as a
//! byte stream, and hashed for determinism checks.
//!
//! # Architecture
//!
//! - [`write_snapshot`] / [`apply_snapshot`] convert between a grid and a snapshot
//! - [`encode_snapshot`] / [`decode_snapshot`] frame a snapshot on any `Write` / `Read`
//! - [`circuit_hash`] fingerprints grid state with FNV-1a
//!
//! # Format
//!
//! ```text
//! [MAGIC "CHIP"] [VERSION u8]
//! [flag u8] [ports: u32 len, bytes]
//! [flag u8] [components: u32 len, u32 words]
//! [flag u8] [time: u64]
//! ```
//!
//! A flag of 0 means the field is absent and nothing follows it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hash;
pub mod types;

pub use codec::{
    apply_snapshot, decode_snapshot, encode_snapshot, pack_components, pack_ports, write_snapshot,
};
pub use error::SnapshotError;
pub use hash::circuit_hash;
pub use types::{CircuitSnapshot, COMPONENT_WORDS, PORTS_LEN};

/// Magic bytes at the start of every snapshot stream.
pub const MAGIC: [u8; 4] = *b"CHIP";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
