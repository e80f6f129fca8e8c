//! The [`CircuitSnapshot`] value exchanged with hosts.

use chip_core::CELL_COUNT;

/// Number of entries in the `ports` field, one per side.
pub const PORTS_LEN: usize = 4;

/// Number of `u32` words in the `components` field: two cells per word.
pub const COMPONENT_WORDS: usize = CELL_COUNT.div_ceil(2);

/// An external snapshot of a circuit.
///
/// Every field is optional. Applying a snapshot only touches the fields
/// that are present, so a partial snapshot leaves the rest of the
/// circuit as it was.
///
/// # Examples
///
/// ```
/// use chip_snapshot::{CircuitSnapshot, COMPONENT_WORDS};
///
/// let snap = CircuitSnapshot {
///     time: Some(40),
///     ..CircuitSnapshot::default()
/// };
/// assert!(snap.ports.is_none());
/// assert_eq!(COMPONENT_WORDS, 113);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CircuitSnapshot {
    /// Port property bytes, NORTH, EAST, SOUTH, WEST.
    pub ports: Option<Vec<u8>>,
    /// Interior cells packed two per word: even cell index in the high
    /// 16 bits, odd cell index in the low 16 bits.
    pub components: Option<Vec<u32>>,
    /// Logical time.
    pub time: Option<u64>,
}

impl CircuitSnapshot {
    /// `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        self.ports.is_none() && self.components.is_none() && self.time.is_none()
    }
}
