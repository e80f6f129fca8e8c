//! Snapshot packing, application, and the binary byte stream.
//!
//! Packing turns a [`ComponentGrid`] into a [`CircuitSnapshot`];
//! application writes a snapshot back into a grid, field by field. The
//! byte stream frames a snapshot for storage or transport. All integers
//! in the stream are little-endian.

use std::io::{Read, Write};

use chip_core::{ComponentKind, ComponentState, FlatDirection, CELL_COUNT};
use chip_grid::ComponentGrid;

use crate::error::SnapshotError;
use crate::types::{CircuitSnapshot, COMPONENT_WORDS, PORTS_LEN};
use crate::{FORMAT_VERSION, MAGIC};

/// Largest length prefix accepted for a field in the byte stream.
pub const MAX_FIELD_LEN: u32 = 1 << 16;

// ── Packing ─────────────────────────────────────────────────────

/// Port property bytes in NORTH, EAST, SOUTH, WEST order.
pub fn pack_ports(grid: &ComponentGrid) -> Vec<u8> {
    grid.ports().map(|(_, port)| port.encode_state_data()).collect()
}

/// Interior cells packed two per word, even index high.
pub fn pack_components(grid: &ComponentGrid) -> Vec<u32> {
    (0..COMPONENT_WORDS)
        .map(|word| {
            let even = 2 * word;
            let high = u32::from(grid.cell(even).encode());
            let low = if even + 1 < CELL_COUNT {
                u32::from(grid.cell(even + 1).encode())
            } else {
                0
            };
            (high << 16) | low
        })
        .collect()
}

/// A full snapshot of `grid` at `time`.
pub fn write_snapshot(grid: &ComponentGrid, time: u64) -> CircuitSnapshot {
    CircuitSnapshot {
        ports: Some(pack_ports(grid)),
        components: Some(pack_components(grid)),
        time: Some(time),
    }
}

// ── Application ─────────────────────────────────────────────────

/// Write the fields present in `snapshot` into `grid` and `time`.
///
/// Fields are applied in the order ports, components, time. Each field
/// is validated just before it is applied; a rejected field stops the
/// process but fields applied before it stay applied.
pub fn apply_snapshot(
    snapshot: &CircuitSnapshot,
    grid: &mut ComponentGrid,
    time: &mut u64,
) -> Result<(), SnapshotError> {
    if let Some(ports) = &snapshot.ports {
        if ports.len() != PORTS_LEN {
            tracing::warn!(found = ports.len(), expected = PORTS_LEN, "rejecting snapshot ports");
            return Err(SnapshotError::InvalidPortsLength {
                found: ports.len(),
                expected: PORTS_LEN,
            });
        }
        for (side, &data) in FlatDirection::VALUES.into_iter().zip(ports) {
            grid.set_port(side, ComponentKind::Port.state_from_data(data));
        }
        tracing::debug!("applied snapshot ports");
    }

    if let Some(words) = &snapshot.components {
        if words.len() != COMPONENT_WORDS {
            tracing::warn!(
                found = words.len(),
                expected = COMPONENT_WORDS,
                "rejecting snapshot components"
            );
            return Err(SnapshotError::InvalidComponentsLength {
                found: words.len(),
                expected: COMPONENT_WORDS,
            });
        }
        for index in 0..CELL_COUNT {
            let word = words[index / 2];
            let raw = if index % 2 == 0 { word >> 16 } else { word & 0xFFFF };
            grid.set_cell(index, ComponentState::decode(raw as u16));
        }
        tracing::debug!(occupied = grid.occupied(), "applied snapshot components");
    }

    if let Some(t) = snapshot.time {
        *time = t;
        tracing::debug!(time = t, "applied snapshot time");
    }

    Ok(())
}

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), SnapshotError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), SnapshotError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), SnapshotError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, SnapshotError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, SnapshotError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, SnapshotError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_presence(r: &mut dyn Read, field: &str) -> Result<bool, SnapshotError> {
    match read_u8(r)? {
        0 => Ok(false),
        1 => Ok(true),
        flag => Err(SnapshotError::MalformedField {
            detail: format!("invalid {field} presence flag: {flag}"),
        }),
    }
}

fn read_len(r: &mut dyn Read, field: &str) -> Result<usize, SnapshotError> {
    let len = read_u32_le(r)?;
    if len > MAX_FIELD_LEN {
        return Err(SnapshotError::MalformedField {
            detail: format!("{field} length {len} exceeds {MAX_FIELD_LEN}"),
        });
    }
    Ok(len as usize)
}

// ── Stream encode/decode ────────────────────────────────────────

/// Encode `snapshot` as magic, version, then each field behind a
/// presence byte.
pub fn encode_snapshot(w: &mut dyn Write, snapshot: &CircuitSnapshot) -> Result<(), SnapshotError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;

    match &snapshot.ports {
        Some(ports) => {
            write_u8(w, 1)?;
            write_u32_le(w, ports.len() as u32)?;
            w.write_all(ports)?;
        }
        None => write_u8(w, 0)?,
    }

    match &snapshot.components {
        Some(words) => {
            write_u8(w, 1)?;
            write_u32_le(w, words.len() as u32)?;
            for &word in words {
                write_u32_le(w, word)?;
            }
        }
        None => write_u8(w, 0)?,
    }

    match snapshot.time {
        Some(time) => {
            write_u8(w, 1)?;
            write_u64_le(w, time)?;
        }
        None => write_u8(w, 0)?,
    }

    Ok(())
}

/// Decode a snapshot written by [`encode_snapshot`].
///
/// Field lengths are not checked against the circuit geometry here;
/// that happens when the snapshot is applied.
pub fn decode_snapshot(r: &mut dyn Read) -> Result<CircuitSnapshot, SnapshotError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(SnapshotError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion { found: version });
    }

    let ports = if read_presence(r, "ports")? {
        let len = read_len(r, "ports")?;
        let mut buf = vec![0u8; len];
        r.read_exact(&mut buf)?;
        Some(buf)
    } else {
        None
    };

    let components = if read_presence(r, "components")? {
        let len = read_len(r, "components")?;
        let mut words = Vec::with_capacity(len);
        for _ in 0..len {
            words.push(read_u32_le(r)?);
        }
        Some(words)
    } else {
        None
    };

    let time = if read_presence(r, "time")? {
        Some(read_u64_le(r)?)
    } else {
        None
    };

    Ok(CircuitSnapshot {
        ports,
        components,
        time,
    })
}
