//! Core abstraction traits between component behaviour and the circuit.
//!
//! Component hooks never see the concrete circuit type. They read
//! through [`CircuitView`] and write through [`CircuitAccess`], which
//! keeps this crate free of any dependency on grid storage or the
//! cascade engine.

use crate::flags::UpdateFlags;
use crate::id::{ActorId, SoundCategory, SoundEvent};
use crate::pos::{ComponentPos, FlatDirection};
use crate::state::{ComponentKind, ComponentState, MAX_POWER};

/// Neighbour order used by the strong-power and receiving scans.
const SCAN_ORDER: [FlatDirection; 4] = [
    FlatDirection::North,
    FlatDirection::South,
    FlatDirection::West,
    FlatDirection::East,
];

/// Power a component emits once conduction through solids is accounted for.
///
/// Solid components re-emit the strongest strong power they receive on
/// top of their own weak power.
pub fn conducted_power(weak: u8, is_solid: bool, received_strong: u8) -> u8 {
    if is_solid {
        weak.max(received_strong)
    } else {
        weak
    }
}

/// Read-only access to circuit state.
///
/// `direction` arguments of the power queries always point from the
/// receiving cell toward the queried (emitting) cell: the receiver sits
/// at `pos.offset(direction.opposite())`. All power queries are pure.
pub trait CircuitView {
    /// State at `pos`; Air for positions that hold nothing.
    fn component_state(&self, pos: ComponentPos) -> ComponentState;

    /// Current logical time.
    fn time(&self) -> u64;

    /// Whether this circuit runs in client mode.
    fn is_client(&self) -> bool;

    /// Update budget given to writes that start a new cascade.
    fn max_update_depth(&self) -> u32;

    /// Strong power the component at `pos` sends in `direction`.
    fn strong_redstone_power(&self, pos: ComponentPos, direction: FlatDirection) -> u8 {
        self.component_state(pos).strong_power(direction)
    }

    /// Power the component at `pos` emits in `direction`, including
    /// strong power conducted through solids.
    fn emitted_redstone_power(&self, pos: ComponentPos, direction: FlatDirection) -> u8 {
        let state = self.component_state(pos);
        let weak = state.weak_power(direction);
        if state.is_solid() {
            conducted_power(weak, true, self.received_strong_redstone_power(pos))
        } else {
            weak
        }
    }

    /// `true` iff [`emitted_redstone_power`](Self::emitted_redstone_power) is non-zero.
    fn is_emitting_redstone_power(&self, pos: ComponentPos, direction: FlatDirection) -> bool {
        self.emitted_redstone_power(pos, direction) > 0
    }

    /// Strongest strong power arriving at `pos` from its four neighbours.
    fn received_strong_redstone_power(&self, pos: ComponentPos) -> u8 {
        let mut power = 0;
        for direction in SCAN_ORDER {
            power = power.max(self.strong_redstone_power(pos.offset(direction), direction));
            if power >= MAX_POWER {
                return power;
            }
        }
        power
    }

    /// Strongest emitted power arriving at `pos` from its four neighbours.
    fn received_redstone_power(&self, pos: ComponentPos) -> u8 {
        let mut power = 0;
        for direction in FlatDirection::VALUES {
            let emitted = self.emitted_redstone_power(pos.offset(direction), direction);
            if emitted >= MAX_POWER {
                return MAX_POWER;
            }
            power = power.max(emitted);
        }
        power
    }

    /// `true` as soon as any neighbour emits power toward `pos`.
    fn is_receiving_redstone_power(&self, pos: ComponentPos) -> bool {
        SCAN_ORDER
            .into_iter()
            .any(|direction| self.is_emitting_redstone_power(pos.offset(direction), direction))
    }
}

/// Mutating access used by component hooks.
///
/// Every write carries an update budget (`depth`). Implementations must
/// make each hop of a cascade spend at least one unit of budget so that
/// feedback loops terminate.
pub trait CircuitAccess: CircuitView {
    /// Write `state` (Air when `None`) at `pos` with the full side-effect
    /// sequence, using `depth` as the cascade budget.
    ///
    /// Returns `true` iff the cell changed.
    fn set_component_state_at_depth(
        &mut self,
        pos: ComponentPos,
        state: Option<ComponentState>,
        flags: UpdateFlags,
        depth: u32,
    ) -> bool;

    /// Write on behalf of a reaction hook that was handed `depth`.
    ///
    /// Refuses at `depth == 0`, otherwise writes with `depth - 1`.
    fn cascade_component_state(
        &mut self,
        pos: ComponentPos,
        state: ComponentState,
        flags: UpdateFlags,
        depth: u32,
    ) -> bool;

    /// Replace a non-Air cell with Air. Returns `false` if it was already Air.
    fn break_block_at_depth(&mut self, pos: ComponentPos, depth: u32) -> bool;

    /// Run the neighbour power reactions around `pos`.
    fn update_neighbors(&mut self, pos: ComponentPos, source: ComponentKind, depth: u32);

    /// Tell the cell at `pos` that its neighbour in `direction`, at
    /// `neighbor_pos`, became `neighbor_state`, and write the resulting
    /// shape change if any.
    fn replace_with_state_for_neighbor_update(
        &mut self,
        direction: FlatDirection,
        neighbor_state: ComponentState,
        pos: ComponentPos,
        neighbor_pos: ComponentPos,
        flags: UpdateFlags,
        depth: u32,
    );

    /// Ask the host to play a sound.
    fn play_sound(
        &mut self,
        except: Option<ActorId>,
        sound: SoundEvent,
        category: SoundCategory,
        volume: f32,
        pitch: f32,
    );

    /// Allocate the next scheduling tie-breaker (first call returns 0).
    fn next_tick_order(&mut self) -> u64;

    /// Ask for [`ComponentState::scheduled_tick`] to run at `pos` once
    /// `delay` ticks have passed, provided the cell still holds `kind`.
    ///
    /// A delay of 0 counts as 1. Returns `false` if the same tick is
    /// already pending or the circuit is a client.
    fn schedule_tick(&mut self, pos: ComponentPos, kind: ComponentKind, delay: u64) -> bool;
}

/// Callbacks from a circuit to whatever embeds it.
///
/// Both methods default to doing nothing.
pub trait CircuitHost {
    /// A cell changed and the write asked for listener notification.
    fn on_component_changed(
        &mut self,
        pos: ComponentPos,
        old: ComponentState,
        new: ComponentState,
        flags: UpdateFlags,
    ) {
        let _ = (pos, old, new, flags);
    }

    /// Play a sound. `except` is the actor that caused it, if any.
    fn play_sound(
        &mut self,
        except: Option<ActorId>,
        sound: SoundEvent,
        category: SoundCategory,
        volume: f32,
        pitch: f32,
    ) {
        let _ = (except, sound, category, volume, pitch);
    }
}

/// A host that ignores every callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopHost;

impl CircuitHost for NoopHost {}
