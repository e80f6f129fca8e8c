//! The state-change contract: validity, no-op suppression, port slots,
//! client mode and budget handling.

use std::panic::{catch_unwind, AssertUnwindSafe};

use chip_core::{
    CircuitAccess, CircuitView, ComponentKind, ComponentPos, ComponentState, FlatDirection, Sides,
    UpdateFlags,
};
use chip_engine::{Circuit, CircuitConfig};
use chip_test_utils::RecordingHost;
use proptest::prelude::*;

fn server() -> Circuit<RecordingHost> {
    Circuit::new(CircuitConfig::default(), RecordingHost::new()).unwrap()
}

fn client() -> Circuit<RecordingHost> {
    Circuit::new(CircuitConfig::client(), RecordingHost::new()).unwrap()
}

#[test]
fn fresh_circuit_is_empty_and_one_placement_is_not() {
    let mut circuit = server();
    assert!(circuit.is_empty());
    circuit.place_component_state(ComponentPos::new(0, 14), ComponentKind::Lamp, FlatDirection::North);
    assert!(!circuit.is_empty());
    circuit.remove_block(ComponentPos::new(0, 14));
    assert!(circuit.is_empty());
}

#[test]
fn rewriting_the_same_state_changes_nothing() {
    let mut circuit = server();
    let pos = ComponentPos::new(6, 6);
    assert!(circuit.set_component_state(pos, ComponentState::Block, UpdateFlags::NOTIFY_ALL));
    let events = circuit.host().events.len();
    let metrics = circuit.metrics().clone();

    assert!(!circuit.set_component_state(pos, ComponentState::Block, UpdateFlags::NOTIFY_ALL));
    assert_eq!(circuit.host().events.len(), events);
    assert_eq!(circuit.metrics().writes_applied, metrics.writes_applied);
    assert_eq!(circuit.metrics().neighbor_updates, metrics.neighbor_updates);
    assert_eq!(circuit.metrics().noop_writes, metrics.noop_writes + 1);
}

#[test]
fn break_block_is_idempotent() {
    let mut circuit = server();
    let pos = ComponentPos::new(10, 2);
    circuit.place_component_state(pos, ComponentKind::Block, FlatDirection::North);
    assert!(circuit.break_block(pos));
    let events = circuit.host().events.len();
    assert!(!circuit.break_block(pos));
    assert_eq!(circuit.host().events.len(), events);
    assert_eq!(circuit.component_state(pos), ComponentState::AIR);
}

#[test]
fn absent_state_writes_air() {
    let mut circuit = server();
    let pos = ComponentPos::new(3, 12);
    circuit.set_component_state(pos, ComponentState::Block, UpdateFlags::NOTIFY_ALL);
    assert!(circuit.set_component_state(pos, None, UpdateFlags::NOTIFY_ALL));
    assert!(circuit.component_state(pos).is_air());
}

#[test]
fn non_port_write_to_port_slot_panics_without_corruption() {
    let mut circuit = server();
    for side in FlatDirection::VALUES {
        let before = circuit.write_snapshot();
        let result = catch_unwind(AssertUnwindSafe(|| {
            circuit.set_component_state(side.port_pos(), ComponentState::Block, UpdateFlags::NOTIFY_ALL)
        }));
        assert!(result.is_err(), "{side} port accepted a block");
        assert_eq!(circuit.write_snapshot(), before);
        assert_eq!(circuit.port_state(side), ComponentState::port(side.opposite(), 0));
    }
    assert!(circuit.host().events.is_empty());
    assert!(circuit.is_empty());
}

#[test]
fn zero_budget_writes_exactly_the_target() {
    let mut circuit = server();
    let lever = ComponentPos::new(4, 4);
    circuit.set_component_state(
        lever,
        ComponentState::Lever {
            facing: FlatDirection::North,
            powered: true,
        },
        UpdateFlags::NOTIFY_ALL,
    );
    circuit.host_mut().clear();
    circuit.reset_metrics();

    let wire_pos = lever.east();
    let wire = ComponentState::wire(0, Sides::EMPTY);
    assert!(circuit.set_component_state_at_depth(wire_pos, Some(wire), UpdateFlags::NOTIFY_ALL, 0));

    assert_eq!(circuit.metrics().writes_applied, 1);
    assert_eq!(circuit.host().events.len(), 1);
    // The wire wanted to pick up the lever's power but had no budget left.
    assert_eq!(circuit.component_state(wire_pos), wire);
    assert!(circuit.metrics().depth_exhausted > 0);
}

#[test]
fn client_mode_skips_placement_hooks() {
    let powered_lever = ComponentState::Lever {
        facing: FlatDirection::South,
        powered: true,
    };
    let lever = ComponentPos::new(8, 8);
    let wire = lever.west();

    let mut on_server = server();
    on_server.set_component_state(lever, powered_lever, UpdateFlags::NOTIFY_ALL);
    on_server.set_component_state(wire, ComponentState::wire(0, Sides::EMPTY), UpdateFlags::NOTIFY_ALL);
    assert_eq!(on_server.component_state(wire).power(), Some(15));

    let mut on_client = client();
    on_client.set_component_state(lever, powered_lever, UpdateFlags::NOTIFY_ALL);
    on_client.set_component_state(wire, ComponentState::wire(0, Sides::EMPTY), UpdateFlags::NOTIFY_ALL);
    assert_eq!(on_client.component_state(wire).power(), Some(0));
}

#[test]
fn client_mode_honours_no_redraw() {
    let flags = UpdateFlags::NOTIFY_LISTENERS | UpdateFlags::NO_REDRAW;
    let pos = ComponentPos::new(1, 1);

    let mut on_client = client();
    on_client.set_component_state(pos, ComponentState::Block, flags);
    assert!(on_client.host().events.is_empty());

    let mut on_server = server();
    on_server.set_component_state(pos, ComponentState::Block, flags);
    assert_eq!(on_server.host().events.len(), 1);
}

#[test]
fn use_is_ignored_on_clients() {
    let mut circuit = client();
    let pos = ComponentPos::new(5, 5);
    circuit.place_component_state(pos, ComponentKind::Lever, FlatDirection::North);
    circuit.use_component(pos, None);
    assert_eq!(
        circuit.component_state(pos),
        ComponentKind::Lever.placement_state(FlatDirection::North)
    );
    assert!(circuit.host().sounds.is_empty());
}

#[test]
fn position_helpers_cover_cells_and_ports() {
    assert!(<Circuit>::is_inside(ComponentPos::new(14, 14)));
    assert!(!<Circuit>::is_inside(FlatDirection::West.port_pos()));
    assert!(<Circuit>::is_valid_pos(FlatDirection::West.port_pos()));
    assert!(!<Circuit>::is_valid_pos(ComponentPos::new(-1, 0)));
    assert_eq!(
        <Circuit>::port_side(ComponentPos::new(7, 15)),
        Some(FlatDirection::South)
    );
    assert_eq!(<Circuit>::port_side(ComponentPos::new(7, 14)), None);
}

#[test]
fn tick_order_and_time_are_independent() {
    let mut circuit = server();
    assert_eq!(circuit.next_tick_order(), 0);
    circuit.tick();
    assert_eq!(circuit.next_tick_order(), 1);
    assert_eq!(circuit.time(), 1);
}

fn arb_placements() -> impl Strategy<Value = Vec<((i32, i32), u16)>> {
    prop::collection::vec(((0i32..15, 0i32..15), any::<u16>()), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn writing_back_the_current_state_is_always_a_no_op(
        placements in arb_placements(),
        target in (0i32..15, 0i32..15),
    ) {
        let mut circuit = server();
        for ((x, y), raw) in placements {
            circuit.set_component_state(ComponentPos::new(x, y), ComponentState::decode(raw), UpdateFlags::NOTIFY_ALL);
        }
        circuit.host_mut().clear();

        let pos = ComponentPos::from(target);
        let current = circuit.component_state(pos);
        prop_assert!(!circuit.set_component_state(pos, current, UpdateFlags::NOTIFY_ALL));
        prop_assert!(circuit.host().events.is_empty());
    }
}
