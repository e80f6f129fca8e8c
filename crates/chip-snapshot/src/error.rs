//! Error types for snapshot encoding and application.

use std::fmt;
use std::io;

/// Errors that can occur while reading or applying a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The stream does not start with the expected `b"CHIP"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the stream.
        found: u8,
    },
    /// A field could not be decoded (bad presence flag or oversize length).
    MalformedField {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The `ports` field does not hold exactly one byte per side.
    InvalidPortsLength {
        /// Length found in the snapshot.
        found: usize,
        /// Required length.
        expected: usize,
    },
    /// The `components` field does not hold the packed word count.
    InvalidComponentsLength {
        /// Length found in the snapshot.
        found: usize,
        /// Required length.
        expected: usize,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"CHIP\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::MalformedField { detail } => write!(f, "malformed field: {detail}"),
            Self::InvalidPortsLength { found, expected } => {
                write!(f, "ports field has {found} entries, expected {expected}")
            }
            Self::InvalidComponentsLength { found, expected } => {
                write!(f, "components field has {found} words, expected {expected}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SnapshotError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
