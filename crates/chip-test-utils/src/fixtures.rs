//! Reusable circuit layouts.
//!
//! Each fixture returns the placements in the order they should be
//! written. Layouts are plain data so they can be written with any
//! flags or depth a test needs.
//!
//! - [`wire_line`]: a straight run of unpowered wire.
//! - [`lever_wire_lamp`]: a lever driving a lamp through a wire run.
//! - [`torch_feedback_loop`]: a torch whose output feeds back into its input.

use chip_core::{ComponentKind, ComponentPos, ComponentState, FlatDirection, Sides};

/// A component to write at a position.
pub type Placement = (ComponentPos, ComponentState);

/// `len` unpowered wires starting at `start` and running toward `direction`.
pub fn wire_line(start: ComponentPos, direction: FlatDirection, len: usize) -> Vec<Placement> {
    let mut out = Vec::with_capacity(len);
    let mut pos = start;
    for _ in 0..len {
        out.push((pos, ComponentState::wire(0, Sides::EMPTY)));
        pos = pos.offset(direction);
    }
    out
}

/// Positions of the interesting cells in [`lever_wire_lamp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeverLampLayout {
    pub lever: ComponentPos,
    pub first_wire: ComponentPos,
    pub last_wire: ComponentPos,
    pub lamp: ComponentPos,
}

/// An unpowered lever at `(1, row)`, `wires` wires heading east, then a lamp.
///
/// The lever is attached to the cell west of it.
pub fn lever_wire_lamp(row: i32, wires: usize) -> (LeverLampLayout, Vec<Placement>) {
    let lever = ComponentPos::new(1, row);
    let first_wire = lever.east();
    let mut placements = vec![(lever, ComponentKind::Lever.placement_state(FlatDirection::West))];
    placements.extend(wire_line(first_wire, FlatDirection::East, wires));
    let last_wire = placements
        .last()
        .map(|(pos, _)| *pos)
        .unwrap_or(lever);
    let lamp = last_wire.east();
    placements.push((lamp, ComponentKind::Lamp.default_state()));
    (
        LeverLampLayout {
            lever,
            first_wire,
            last_wire,
            lamp,
        },
        placements,
    )
}

/// A lit torch at `origin` facing east with three wires looping from its
/// north side back round to its input on the west.
///
/// ```text
///   W W        (x-1, y-1) (x, y-1)
///   W T        (x-1, y)   torch
/// ```
pub fn torch_feedback_loop(origin: ComponentPos) -> Vec<Placement> {
    vec![
        (
            origin,
            ComponentState::Torch {
                facing: FlatDirection::East,
                lit: true,
            },
        ),
        (origin.north(), ComponentState::wire(0, Sides::EMPTY)),
        (origin.north().west(), ComponentState::wire(0, Sides::EMPTY)),
        (origin.west(), ComponentState::wire(0, Sides::EMPTY)),
    ]
}
