//! Component behaviour: power emission rules and reaction hooks.
//!
//! Hooks fall in two groups with different budget conventions:
//!
//! - **Reactions** (`on_block_added`, `on_state_replaced`,
//!   `neighbor_update`) receive the budget of the write that triggered
//!   them and write through [`CircuitAccess::cascade_component_state`].
//! - **Shape hooks** (`update_neighbors`, `prepare`) receive an already
//!   decremented budget and write at it directly.
//!
//! `on_use` and `scheduled_tick` start a fresh cascade with the
//! circuit's configured budget. Torches never switch inside a cascade:
//! their reactions only schedule a tick [`TORCH_DELAY`] ticks ahead.

use crate::flags::UpdateFlags;
use crate::id::{ActorId, SoundCategory, SoundEvent};
use crate::pos::{ComponentPos, FlatDirection};
use crate::state::{ComponentKind, ComponentState, Sides, MAX_POWER};
use crate::traits::{CircuitAccess, CircuitView};

/// Volume of lever and port clicks.
pub const CLICK_VOLUME: f32 = 0.3;

/// Ticks between a torch seeing its input change and switching.
pub const TORCH_DELAY: u64 = 2;

impl ComponentState {
    // ── Power rules ──────────────────────────────────────────────

    /// Weak power emitted in `direction` (toward `pos.offset(direction.opposite())`).
    pub fn weak_power(self, direction: FlatDirection) -> u8 {
        match self {
            Self::Port { facing, power } if direction.opposite() == facing => power,
            Self::Wire { power, .. } => power,
            Self::Torch { facing, lit: true } if direction != facing => MAX_POWER,
            Self::Lever { powered: true, .. } => MAX_POWER,
            _ => 0,
        }
    }

    /// Strong power emitted in `direction`.
    pub fn strong_power(self, direction: FlatDirection) -> u8 {
        match self {
            // Torches strongly power the cell in front of them.
            Self::Torch { facing, lit: true } if direction == facing.opposite() => MAX_POWER,
            // Levers strongly power the cell they are attached to.
            Self::Lever {
                facing,
                powered: true,
            } if direction == facing => MAX_POWER,
            _ => 0,
        }
    }

    /// Whether this component conducts strong power.
    pub fn is_solid(self) -> bool {
        matches!(self, Self::Block | Self::Lamp { .. })
    }

    /// Whether a wire next to this component draws a connection to it.
    pub fn attracts_wire(self) -> bool {
        matches!(
            self,
            Self::Wire { .. } | Self::Torch { .. } | Self::Lever { .. } | Self::Port { .. }
        )
    }

    /// For ports: `true` while the port faces into the grid from `pos`.
    pub fn is_input_port_at(self, pos: ComponentPos) -> bool {
        match self {
            Self::Port { facing, .. } => pos.offset(facing).is_inside(),
            _ => false,
        }
    }

    // ── Reactions ────────────────────────────────────────────────

    /// `self` was just written at `pos`, replacing `old`.
    pub fn on_block_added(
        self,
        circuit: &mut dyn CircuitAccess,
        pos: ComponentPos,
        old: ComponentState,
        depth: u32,
    ) {
        let same_kind = old.kind() == self.kind();
        match self {
            Self::Wire { .. } if !same_kind => self.refresh_wire_power(circuit, pos, depth),
            Self::Torch { .. } if !same_kind => self.schedule_torch(circuit, pos),
            Self::Lamp { .. } if !same_kind => self.refresh_lamp(circuit, pos, depth),
            Self::Port { facing, .. } if !same_kind || old.facing() != Some(facing) => {
                self.refresh_output_port(circuit, pos, depth)
            }
            _ => {}
        }
    }

    /// `self` at `pos` is about to be replaced by `new`.
    pub fn on_state_replaced(
        self,
        circuit: &mut dyn CircuitAccess,
        pos: ComponentPos,
        new: ComponentState,
        depth: u32,
    ) {
        if new.kind() == self.kind() {
            return;
        }
        match self {
            Self::Lever {
                facing,
                powered: true,
            } => circuit.update_neighbors(pos.offset(facing.opposite()), self.kind(), depth),
            Self::Torch { facing, lit: true } => {
                circuit.update_neighbors(pos.offset(facing), self.kind(), depth)
            }
            _ => {}
        }
    }

    /// A neighbour of `pos` changed; re-evaluate power inputs.
    pub fn neighbor_update(
        self,
        circuit: &mut dyn CircuitAccess,
        pos: ComponentPos,
        source: ComponentKind,
        source_pos: ComponentPos,
        depth: u32,
    ) {
        let _ = (source, source_pos);
        match self {
            Self::Wire { .. } => self.refresh_wire_power(circuit, pos, depth),
            Self::Torch { .. } => self.schedule_torch(circuit, pos),
            Self::Lamp { .. } => self.refresh_lamp(circuit, pos, depth),
            Self::Port { .. } => self.refresh_output_port(circuit, pos, depth),
            _ => {}
        }
    }

    /// A tick scheduled for `self`'s kind at `pos` came due.
    pub fn scheduled_tick(self, circuit: &mut dyn CircuitAccess, pos: ComponentPos) {
        let Self::Torch { facing, lit } = self else {
            return;
        };
        if lit != torch_input_powered(&*circuit, pos, facing) {
            return;
        }
        let depth = circuit.max_update_depth();
        let toggled = self.with_active(!lit);
        if circuit.set_component_state_at_depth(pos, Some(toggled), UpdateFlags::NOTIFY_ALL, depth) {
            circuit.update_neighbors(pos.offset(facing), self.kind(), depth);
        }
    }

    /// Interaction by an actor. Server-side only.
    pub fn on_use(self, circuit: &mut dyn CircuitAccess, pos: ComponentPos, actor: Option<ActorId>) {
        if circuit.is_client() {
            return;
        }
        let depth = circuit.max_update_depth();
        match self {
            Self::Lever { facing, powered } => {
                let toggled = self.with_active(!powered);
                circuit.set_component_state_at_depth(pos, Some(toggled), UpdateFlags::NOTIFY_ALL, depth);
                let pitch = if powered { 0.5 } else { 0.6 };
                circuit.play_sound(
                    actor,
                    SoundEvent::LeverClick,
                    SoundCategory::Blocks,
                    CLICK_VOLUME,
                    pitch,
                );
                circuit.update_neighbors(pos.offset(facing.opposite()), self.kind(), depth);
            }
            Self::Port { facing, .. } => {
                let was_input = self.is_input_port_at(pos);
                let flipped = ComponentState::port(facing.opposite(), 0);
                circuit.set_component_state_at_depth(pos, Some(flipped), UpdateFlags::NOTIFY_ALL, depth);
                let pitch = if was_input { 0.5 } else { 0.6 };
                circuit.play_sound(
                    actor,
                    SoundEvent::PortClick,
                    SoundCategory::Blocks,
                    CLICK_VOLUME,
                    pitch,
                );
            }
            _ => {}
        }
    }

    // ── Shape hooks ──────────────────────────────────────────────

    /// The state `self` takes when its neighbour in `direction` becomes
    /// `neighbor_state`.
    pub fn state_for_neighbor_update(
        self,
        direction: FlatDirection,
        neighbor_state: ComponentState,
    ) -> ComponentState {
        match self {
            Self::Wire { .. } => self.with_connection(direction, neighbor_state.attracts_wire()),
            other => other,
        }
    }

    /// Broadcast `self`'s shape to the four neighbours of `pos`.
    pub fn update_neighbors(
        self,
        circuit: &mut dyn CircuitAccess,
        pos: ComponentPos,
        flags: UpdateFlags,
        depth: u32,
    ) {
        for direction in FlatDirection::UPDATE_ORDER {
            circuit.replace_with_state_for_neighbor_update(
                direction.opposite(),
                self,
                pos.offset(direction),
                pos,
                flags,
                depth,
            );
        }
    }

    /// Bring `self`'s own shape in line with its neighbours.
    pub fn prepare(self, circuit: &mut dyn CircuitAccess, pos: ComponentPos, flags: UpdateFlags, depth: u32) {
        let Self::Wire { power, .. } = self else {
            return;
        };
        if circuit.component_state(pos) != self {
            return;
        }
        let connections: Sides = pos
            .neighbours()
            .into_iter()
            .filter(|(_, neighbor)| circuit.component_state(*neighbor).attracts_wire())
            .map(|(direction, _)| direction)
            .collect();
        let shaped = ComponentState::wire(power, connections);
        if shaped != self {
            circuit.set_component_state_at_depth(pos, Some(shaped), flags, depth);
        }
    }

    // ── Refresh helpers ──────────────────────────────────────────

    fn refresh_wire_power(self, circuit: &mut dyn CircuitAccess, pos: ComponentPos, depth: u32) {
        let target = wire_input_power(&*circuit, pos);
        if self.power() != Some(target) {
            circuit.cascade_component_state(pos, self.with_power(target), UpdateFlags::NOTIFY_ALL, depth);
        }
    }

    fn schedule_torch(self, circuit: &mut dyn CircuitAccess, pos: ComponentPos) {
        let Self::Torch { facing, lit } = self else {
            return;
        };
        if lit == torch_input_powered(&*circuit, pos, facing) {
            circuit.schedule_tick(pos, self.kind(), TORCH_DELAY);
        }
    }

    fn refresh_lamp(self, circuit: &mut dyn CircuitAccess, pos: ComponentPos, depth: u32) {
        let Self::Lamp { lit } = self else {
            return;
        };
        let receiving = circuit.is_receiving_redstone_power(pos);
        if receiving != lit {
            circuit.cascade_component_state(
                pos,
                self.with_active(receiving),
                UpdateFlags::NOTIFY_LISTENERS,
                depth,
            );
        }
    }

    fn refresh_output_port(self, circuit: &mut dyn CircuitAccess, pos: ComponentPos, depth: u32) {
        let Self::Port { facing, power } = self else {
            return;
        };
        if self.is_input_port_at(pos) {
            return;
        }
        let inward = facing.opposite();
        let mirrored = circuit.emitted_redstone_power(pos.offset(inward), inward);
        if mirrored != power {
            circuit.cascade_component_state(
                pos,
                self.with_power(mirrored),
                UpdateFlags::NOTIFY_LISTENERS,
                depth,
            );
        }
    }
}

/// Power a wire at `pos` should carry given its neighbours.
///
/// Neighbouring wires contribute their power minus one; everything else
/// contributes what it emits toward `pos`.
pub fn wire_input_power<C: CircuitView + ?Sized>(circuit: &C, pos: ComponentPos) -> u8 {
    let mut power = 0;
    for (direction, neighbor) in pos.neighbours() {
        let contribution = match circuit.component_state(neighbor) {
            ComponentState::Wire { power, .. } => power.saturating_sub(1),
            _ => circuit.emitted_redstone_power(neighbor, direction),
        };
        power = power.max(contribution);
        if power >= MAX_POWER {
            break;
        }
    }
    power
}

/// Whether the torch at `pos` facing `facing` is powered from behind.
fn torch_input_powered<C: CircuitView + ?Sized>(
    circuit: &C,
    pos: ComponentPos,
    facing: FlatDirection,
) -> bool {
    let back = facing.opposite();
    circuit.is_emitting_redstone_power(pos.offset(back), back)
}
