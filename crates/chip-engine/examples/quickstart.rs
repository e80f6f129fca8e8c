//! Chip quickstart: build a small circuit, drive it, and snapshot it.
//!
//! Demonstrates:
//!   1. Creating a circuit with a host that prints listener callbacks
//!   2. Placing a lever, a wire run and a lamp
//!   3. Flipping the lever and reading power back
//!   4. Driving an input port
//!   5. Taking a snapshot, encoding it, and restoring it elsewhere
//!
//! Run with:
//!   cargo run --example quickstart

use chip_core::{
    ActorId, CircuitHost, CircuitView, ComponentKind, ComponentPos, ComponentState, FlatDirection,
    SoundCategory, SoundEvent, UpdateFlags,
};
use chip_engine::{Circuit, CircuitConfig};
use chip_snapshot::{decode_snapshot, encode_snapshot};

// ─── Host ───────────────────────────────────────────────────────

#[derive(Default)]
struct PrintingHost {
    changes: usize,
}

impl CircuitHost for PrintingHost {
    fn on_component_changed(
        &mut self,
        pos: ComponentPos,
        old: ComponentState,
        new: ComponentState,
        _flags: UpdateFlags,
    ) {
        self.changes += 1;
        println!("  {pos}: {old} -> {new}");
    }

    fn play_sound(
        &mut self,
        _except: Option<ActorId>,
        sound: SoundEvent,
        _category: SoundCategory,
        _volume: f32,
        pitch: f32,
    ) {
        println!("  *{sound}* (pitch {pitch:.2})");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut circuit = Circuit::new(CircuitConfig::default(), PrintingHost::default())?;

    // ─── Layout ─────────────────────────────────────────────────

    println!("placing components");
    let lever = ComponentPos::new(2, 7);
    let lamp = ComponentPos::new(9, 7);
    circuit.place_component_state(lever, ComponentKind::Lever, FlatDirection::West);
    for x in 3..9 {
        circuit.place_component_state(ComponentPos::new(x, 7), ComponentKind::Wire, FlatDirection::North);
    }
    circuit.place_component_state(lamp, ComponentKind::Lamp, FlatDirection::North);

    // ─── Interaction ────────────────────────────────────────────

    println!("flipping lever");
    circuit.use_component(lever, Some(ActorId(1)));
    println!(
        "lamp receives {} (lit: {})",
        circuit.received_redstone_power(lamp),
        circuit.component_state(lamp) == ComponentState::Lamp { lit: true }
    );

    println!("driving the north port");
    circuit.place_component_state(ComponentPos::new(7, 0), ComponentKind::Wire, FlatDirection::North);
    circuit.set_port_power(FlatDirection::North, 12);
    println!("north port power: {}", circuit.port_power(FlatDirection::North));

    circuit.tick();

    // ─── Snapshot ───────────────────────────────────────────────

    let mut bytes = Vec::new();
    encode_snapshot(&mut bytes, &circuit.write_snapshot())?;
    println!("snapshot: {} bytes", bytes.len());

    let mut copy = Circuit::default();
    copy.read_snapshot(&decode_snapshot(&mut bytes.as_slice())?)?;
    assert_eq!(copy.state_hash(), circuit.state_hash());
    println!(
        "restored copy matches (time {}), {} listener callbacks seen",
        copy.time(),
        circuit.host().changes
    );

    Ok(())
}
