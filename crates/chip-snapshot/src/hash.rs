//! Hashing utilities for circuit state comparison.
//!
//! Uses FNV-1a for fast, deterministic hashing. These hashes are not
//! cryptographically secure; they are for equality checks between
//! runs, e.g. a cascade replayed on two circuits.

use chip_grid::ComponentGrid;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hash the ports, every interior cell and `time`.
///
/// Ports are folded in first (NORTH, EAST, SOUTH, WEST) as their 16-bit
/// encodings, then cells row-major, then the time. Two circuits with
/// equal grids and equal time always hash equal.
pub fn circuit_hash(grid: &ComponentGrid, time: u64) -> u64 {
    let mut hash = FNV_OFFSET;
    for (_, port) in grid.ports() {
        hash = fnv1a_bytes(hash, &port.encode().to_le_bytes());
    }
    for (_, cell) in grid.iter() {
        hash = fnv1a_bytes(hash, &cell.encode().to_le_bytes());
    }
    fnv1a_bytes(hash, &time.to_le_bytes())
}
