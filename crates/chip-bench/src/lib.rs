//! Benchmark layouts for the chip circuit engine.
//!
//! Provides deterministic circuit layouts for benchmarking:
//!
//! - [`bus_profile`]: eight lever-driven wire lanes spanning the grid
//! - [`scattered_profile`]: a seeded mix of every placeable component kind
//! - [`scatter_positions`]: deterministic distinct cell placement via seed
//! - [`build_circuit`]: write a layout into a fresh server circuit

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use chip_core::{
    ComponentKind, ComponentPos, ComponentState, FlatDirection, UpdateFlags, CELL_COUNT, SIZE,
};
use chip_engine::Circuit;

/// A component to write at a position.
pub type Placement = (ComponentPos, ComponentState);

/// Rows that carry a lane in [`bus_profile`].
pub fn bus_rows() -> impl Iterator<Item = i32> {
    (0..SIZE).step_by(2)
}

/// A lever on the west edge of every even row, each driving a wire run
/// to the east edge.
///
/// Odd rows stay empty so that lanes do not touch.
pub fn bus_profile() -> Vec<Placement> {
    let mut placements = Vec::new();
    for y in bus_rows() {
        placements.push((
            ComponentPos::new(0, y),
            ComponentKind::Lever.placement_state(FlatDirection::West),
        ));
        for x in 1..SIZE {
            placements.push((ComponentPos::new(x, y), ComponentKind::Wire.default_state()));
        }
    }
    placements
}

/// `n` components of mixed kinds at seeded positions.
pub fn scattered_profile(n: usize, seed: u64) -> Vec<Placement> {
    const KINDS: [ComponentKind; 6] = [
        ComponentKind::Wire,
        ComponentKind::Block,
        ComponentKind::Wire,
        ComponentKind::Torch,
        ComponentKind::Lever,
        ComponentKind::Lamp,
    ];
    scatter_positions(n, seed)
        .into_iter()
        .enumerate()
        .map(|(i, index)| {
            let kind = KINDS[i % KINDS.len()];
            let rotation = FlatDirection::from_index(index % 4);
            (ComponentPos::from_cell_index(index), kind.placement_state(rotation))
        })
        .collect()
}

/// Generate `n` distinct deterministic cell indices.
///
/// `n` is capped at [`CELL_COUNT`].
pub fn scatter_positions(n: usize, seed: u64) -> Vec<usize> {
    let n = n.min(CELL_COUNT);
    let mut positions = Vec::with_capacity(n);
    let mut taken = [false; CELL_COUNT];

    for i in 0..n {
        let mut index = (seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add((i as u64).wrapping_mul(1442695040888963407))
            % CELL_COUNT as u64) as usize;

        // Step past taken cells
        while taken[index] {
            index = (index + 1) % CELL_COUNT;
        }
        taken[index] = true;
        positions.push(index);
    }

    positions
}

/// A default server circuit with `placements` written in order.
pub fn build_circuit(placements: &[Placement]) -> Circuit {
    let mut circuit = Circuit::default();
    for &(pos, state) in placements {
        circuit.set_component_state(pos, state, UpdateFlags::NOTIFY_ALL);
    }
    circuit
}
