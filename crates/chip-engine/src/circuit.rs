//! The [`Circuit`]: grid ownership, the state-change path, and the
//! host-facing operations built on it.
//!
//! # Ownership model
//!
//! A circuit exclusively owns its grid and its host. All mutating
//! methods take `&mut self`; component hooks receive the circuit as
//! `&mut dyn CircuitAccess` and re-enter it synchronously, so a cascade
//! is ordinary bounded recursion on the caller's stack. No threads or
//! interior mutability are involved.
//!
//! Torches switch only from [`Circuit::tick`]. Their reactions queue a
//! scheduled tick, so within one cascade every power source stays fixed
//! and wire levels settle instead of oscillating.

use chip_core::{
    ActorId, CircuitAccess, CircuitHost, CircuitView, ComponentKind, ComponentPos, ComponentState,
    FlatDirection, NoopHost, SoundCategory, SoundEvent, UpdateFlags,
};
use chip_grid::ComponentGrid;
use chip_snapshot::{CircuitSnapshot, SnapshotError};

use crate::config::{CircuitConfig, ConfigError};
use crate::metrics::CascadeMetrics;
use crate::scheduler::{ScheduledTick, TickScheduler};

/// Factor applied to every sound pitch before it reaches the host.
pub const SOUND_PITCH_SCALE: f32 = 1.6;

// Compile-time assertion: a circuit with a Send host is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Circuit<NoopHost>>();
    }
};

/// A 15×15 logic circuit with four boundary ports.
///
/// # Examples
///
/// ```
/// use chip_core::{CircuitView, ComponentKind, ComponentPos, FlatDirection};
/// use chip_engine::{Circuit, CircuitConfig};
///
/// let mut circuit = Circuit::default();
/// let lever = ComponentPos::new(3, 3);
/// let lamp = ComponentPos::new(4, 3);
/// circuit.place_component_state(lever, ComponentKind::Lever, FlatDirection::North);
/// circuit.place_component_state(lamp, ComponentKind::Lamp, FlatDirection::North);
///
/// circuit.use_component(lever, None);
/// assert!(circuit.is_receiving_redstone_power(lamp));
/// ```
pub struct Circuit<H: CircuitHost = NoopHost> {
    pub(crate) grid: ComponentGrid,
    pub(crate) time: u64,
    pub(crate) tick_order: u64,
    pub(crate) config: CircuitConfig,
    pub(crate) host: H,
    pub(crate) metrics: CascadeMetrics,
    pub(crate) scheduler: TickScheduler,
}

impl Default for Circuit<NoopHost> {
    fn default() -> Self {
        Self::from_parts(CircuitConfig::default(), NoopHost)
    }
}

impl<H: CircuitHost> Circuit<H> {
    /// Build an empty circuit after validating `config`.
    pub fn new(config: CircuitConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, host))
    }

    fn from_parts(config: CircuitConfig, host: H) -> Self {
        tracing::debug!(
            is_client = config.is_client,
            max_update_depth = config.max_update_depth,
            "creating circuit"
        );
        Self {
            grid: ComponentGrid::new(),
            time: 0,
            tick_order: 0,
            config,
            host,
            metrics: CascadeMetrics::default(),
            scheduler: TickScheduler::default(),
        }
    }

    // ── Clock ───────────────────────────────────────────────────

    /// Advance the logical clock by one tick, then run every scheduled
    /// tick that has come due, earliest first.
    ///
    /// Each scheduled tick starts its own cascade with the configured
    /// budget. Ticks scheduled while draining are due no earlier than
    /// the next call.
    pub fn tick(&mut self) {
        self.time = self.time.wrapping_add(1);
        while let Some(ScheduledTick { pos, kind }) = self.scheduler.pop_due(self.time) {
            let state = self.grid.get(pos);
            if state.kind() != kind {
                tracing::trace!(%pos, %kind, "scheduled tick dropped, cell changed kind");
                continue;
            }
            self.metrics.scheduled_ticks += 1;
            state.scheduled_tick(self, pos);
        }
    }

    /// Number of scheduled ticks waiting to come due.
    pub fn pending_ticks(&self) -> usize {
        self.scheduler.len()
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The grid, read-only.
    pub fn grid(&self) -> &ComponentGrid {
        &self.grid
    }

    /// The configuration this circuit was built with.
    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the circuit and return its host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Cumulative cascade counters.
    pub fn metrics(&self) -> &CascadeMetrics {
        &self.metrics
    }

    /// Zero all cascade counters.
    pub fn reset_metrics(&mut self) {
        self.metrics = CascadeMetrics::default();
    }

    // ── Writes ──────────────────────────────────────────────────

    /// Write `state` (Air when `None`) at `pos` with the configured
    /// update budget. Returns `true` iff the cell changed.
    ///
    /// # Panics
    ///
    /// If `pos` is a port position and `state` is not a Port state.
    pub fn set_component_state(
        &mut self,
        pos: ComponentPos,
        state: impl Into<Option<ComponentState>>,
        flags: UpdateFlags,
    ) -> bool {
        let depth = self.config.max_update_depth;
        self.set_component_state_at_depth(pos, state.into(), flags, depth)
    }

    /// Place `kind` at `pos` as a host would, oriented by `rotation`.
    pub fn place_component_state(
        &mut self,
        pos: ComponentPos,
        kind: ComponentKind,
        rotation: FlatDirection,
    ) -> bool {
        self.set_component_state(pos, kind.placement_state(rotation), UpdateFlags::NOTIFY_ALL)
    }

    /// Replace whatever is at `pos` with Air.
    pub fn remove_block(&mut self, pos: ComponentPos) -> bool {
        self.set_component_state(pos, None, UpdateFlags::NOTIFY_ALL)
    }

    /// Replace a non-Air cell with Air. Returns `false` for Air cells.
    pub fn break_block(&mut self, pos: ComponentPos) -> bool {
        let depth = self.config.max_update_depth;
        self.break_block_at_depth(pos, depth)
    }

    /// Interact with the component at `pos` on behalf of `actor`.
    pub fn use_component(&mut self, pos: ComponentPos, actor: Option<ActorId>) {
        let state = self.component_state(pos);
        state.on_use(self, pos, actor);
    }

    // ── Ports ───────────────────────────────────────────────────

    /// State of the port on `side`.
    pub fn port_state(&self, side: FlatDirection) -> ComponentState {
        self.grid.port(side)
    }

    /// Power held by the port on `side`.
    pub fn port_power(&self, side: FlatDirection) -> u8 {
        self.grid.port(side).power().unwrap_or(0)
    }

    /// Drive an input port. Returns `false` for output ports and for
    /// writes that change nothing.
    pub fn set_port_power(&mut self, side: FlatDirection, power: u8) -> bool {
        let pos = side.port_pos();
        let port = self.grid.port(side);
        if !port.is_input_port_at(pos) {
            return false;
        }
        self.set_component_state(pos, port.with_power(power), UpdateFlags::NOTIFY_ALL)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// `true` iff every port faces inward and every cell is Air.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// `true` iff `pos` is an interior cell.
    pub fn is_inside(pos: ComponentPos) -> bool {
        pos.is_inside()
    }

    /// `true` iff `pos` is an interior cell or a port position.
    pub fn is_valid_pos(pos: ComponentPos) -> bool {
        pos.is_valid()
    }

    /// The side whose port is at `pos`.
    pub fn port_side(pos: ComponentPos) -> Option<FlatDirection> {
        pos.port_side()
    }

    // ── Snapshots ───────────────────────────────────────────────

    /// A full snapshot of ports, cells and time.
    pub fn write_snapshot(&self) -> CircuitSnapshot {
        chip_snapshot::write_snapshot(&self.grid, self.time)
    }

    /// Overwrite the fields present in `snapshot`, without running any
    /// hooks or notifying the host.
    ///
    /// Fields applied before a rejected one stay applied. Snapshots do
    /// not carry scheduled ticks: restoring components or time drops
    /// the pending ones.
    pub fn read_snapshot(&mut self, snapshot: &CircuitSnapshot) -> Result<(), SnapshotError> {
        if snapshot.components.is_some() || snapshot.time.is_some() {
            self.scheduler.clear();
        }
        chip_snapshot::apply_snapshot(snapshot, &mut self.grid, &mut self.time)
    }

    /// FNV-1a fingerprint of grid and time.
    pub fn state_hash(&self) -> u64 {
        chip_snapshot::circuit_hash(&self.grid, self.time)
    }
}

impl<H: CircuitHost> CircuitView for Circuit<H> {
    fn component_state(&self, pos: ComponentPos) -> ComponentState {
        self.grid.get(pos)
    }

    fn time(&self) -> u64 {
        self.time
    }

    fn is_client(&self) -> bool {
        self.config.is_client
    }

    fn max_update_depth(&self) -> u32 {
        self.config.max_update_depth
    }
}

impl<H: CircuitHost> CircuitAccess for Circuit<H> {
    fn set_component_state_at_depth(
        &mut self,
        pos: ComponentPos,
        state: Option<ComponentState>,
        flags: UpdateFlags,
        depth: u32,
    ) -> bool {
        if !pos.is_valid() {
            self.metrics.invalid_position_writes += 1;
            return false;
        }
        let new = state.unwrap_or_default();
        let old = self.grid.assign(pos, new);
        if old == new {
            self.metrics.noop_writes += 1;
            return false;
        }
        self.metrics.writes_applied += 1;

        let client = self.config.is_client;
        if !client {
            old.on_state_replaced(self, pos, new, depth);
            new.on_block_added(self, pos, old, depth);
        }

        // A hook may already have replaced the new state.
        if self.grid.get(pos) != new {
            return true;
        }

        if flags.contains(UpdateFlags::NOTIFY_LISTENERS)
            && (!client || !flags.contains(UpdateFlags::NO_REDRAW))
        {
            self.metrics.listener_notifications += 1;
            self.host.on_component_changed(pos, old, new, flags);
        }

        if flags.contains(UpdateFlags::NOTIFY_NEIGHBORS) {
            self.update_neighbors(pos, old.kind(), depth);
        }

        if !flags.contains(UpdateFlags::FORCE_STATE) && depth > 0 {
            let cascade_flags = flags.for_cascade();
            let next = depth - 1;
            old.prepare(self, pos, cascade_flags, next);
            new.update_neighbors(self, pos, cascade_flags, next);
            new.prepare(self, pos, cascade_flags, next);
        }

        true
    }

    fn cascade_component_state(
        &mut self,
        pos: ComponentPos,
        state: ComponentState,
        flags: UpdateFlags,
        depth: u32,
    ) -> bool {
        if depth == 0 {
            self.metrics.depth_exhausted += 1;
            tracing::trace!(%pos, %state, "update budget exhausted, write dropped");
            return false;
        }
        self.set_component_state_at_depth(pos, Some(state), flags, depth - 1)
    }

    fn break_block_at_depth(&mut self, pos: ComponentPos, depth: u32) -> bool {
        if self.component_state(pos).is_air() {
            return false;
        }
        self.set_component_state_at_depth(pos, None, UpdateFlags::NOTIFY_ALL, depth)
    }

    fn update_neighbors(&mut self, pos: ComponentPos, source: ComponentKind, depth: u32) {
        self.run_neighbor_updates(pos, source, depth);
    }

    fn replace_with_state_for_neighbor_update(
        &mut self,
        direction: FlatDirection,
        neighbor_state: ComponentState,
        pos: ComponentPos,
        neighbor_pos: ComponentPos,
        flags: UpdateFlags,
        depth: u32,
    ) {
        self.run_shape_update(direction, neighbor_state, pos, neighbor_pos, flags, depth);
    }

    fn play_sound(
        &mut self,
        except: Option<ActorId>,
        sound: SoundEvent,
        category: SoundCategory,
        volume: f32,
        pitch: f32,
    ) {
        self.host
            .play_sound(except, sound, category, volume, pitch * SOUND_PITCH_SCALE);
    }

    fn next_tick_order(&mut self) -> u64 {
        let order = self.tick_order;
        self.tick_order += 1;
        order
    }

    fn schedule_tick(&mut self, pos: ComponentPos, kind: ComponentKind, delay: u64) -> bool {
        if self.config.is_client {
            return false;
        }
        let tick = ScheduledTick { pos, kind };
        if self.scheduler.contains(tick) {
            return false;
        }
        let due = self.time.saturating_add(delay.max(1));
        let order = self.next_tick_order();
        tracing::trace!(%pos, %kind, due, order, "tick scheduled");
        self.scheduler.insert(tick, due, order)
    }
}

impl<H: CircuitHost> std::fmt::Debug for Circuit<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Circuit")
            .field("time", &self.time)
            .field("tick_order", &self.tick_order)
            .field("occupied", &self.grid.occupied())
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .field("pending_ticks", &self.scheduler.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip_core::Sides;
    use chip_test_utils::{ListenerEvent, RecordingHost};

    fn recording() -> Circuit<RecordingHost> {
        Circuit::new(CircuitConfig::default(), RecordingHost::default()).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = CircuitConfig {
            max_update_depth: 0,
            ..CircuitConfig::default()
        };
        assert_eq!(
            Circuit::new(config, NoopHost).unwrap_err(),
            ConfigError::ZeroUpdateDepth
        );
    }

    #[test]
    fn fresh_circuit_is_empty_until_placement() {
        let mut circuit = Circuit::default();
        assert!(circuit.is_empty());
        circuit.place_component_state(ComponentPos::new(7, 7), ComponentKind::Block, FlatDirection::North);
        assert!(!circuit.is_empty());
    }

    #[test]
    fn invalid_positions_degrade_quietly() {
        let mut circuit = recording();
        let outside = ComponentPos::new(-3, 40);
        assert!(!circuit.set_component_state(outside, ComponentState::Block, UpdateFlags::NOTIFY_ALL));
        assert_eq!(circuit.component_state(outside), ComponentState::AIR);
        assert_eq!(circuit.metrics().invalid_position_writes, 1);
        assert!(circuit.host().events.is_empty());
    }

    #[test]
    fn noop_write_has_no_effects() {
        let mut circuit = recording();
        let pos = ComponentPos::new(1, 1);
        assert!(circuit.set_component_state(pos, ComponentState::Block, UpdateFlags::NOTIFY_ALL));
        circuit.host_mut().clear();
        circuit.reset_metrics();

        assert!(!circuit.set_component_state(pos, ComponentState::Block, UpdateFlags::NOTIFY_ALL));
        assert!(circuit.host().events.is_empty());
        assert_eq!(circuit.metrics().noop_writes, 1);
        assert_eq!(circuit.metrics().writes_applied, 0);
    }

    #[test]
    fn listener_sees_old_and_new() {
        let mut circuit = recording();
        let pos = ComponentPos::new(2, 9);
        circuit.set_component_state(pos, ComponentState::Block, UpdateFlags::NOTIFY_LISTENERS);
        assert_eq!(
            circuit.host().events,
            vec![ListenerEvent {
                pos,
                old: ComponentState::AIR,
                new: ComponentState::Block,
                flags: UpdateFlags::NOTIFY_LISTENERS,
            }]
        );
    }

    #[test]
    fn writes_without_listener_flag_stay_silent() {
        let mut circuit = recording();
        circuit.set_component_state(ComponentPos::new(0, 0), ComponentState::Block, UpdateFlags::NOTIFY_NEIGHBORS);
        assert!(circuit.host().events.is_empty());
        assert_eq!(circuit.metrics().writes_applied, 1);
    }

    #[test]
    fn tick_order_starts_at_zero() {
        let mut circuit = Circuit::default();
        assert_eq!(circuit.next_tick_order(), 0);
        assert_eq!(circuit.next_tick_order(), 1);
        assert_eq!(circuit.next_tick_order(), 2);
    }

    #[test]
    fn tick_advances_time_only() {
        let mut circuit = Circuit::default();
        circuit.tick();
        circuit.tick();
        assert_eq!(circuit.time(), 2);
        assert!(circuit.is_empty());
        assert_eq!(circuit.metrics(), &CascadeMetrics::default());
    }

    #[test]
    fn schedule_tick_dedups_and_takes_an_order() {
        let mut circuit = Circuit::default();
        let pos = ComponentPos::new(3, 3);
        assert!(circuit.schedule_tick(pos, ComponentKind::Torch, 2));
        assert!(!circuit.schedule_tick(pos, ComponentKind::Torch, 5));
        assert_eq!(circuit.pending_ticks(), 1);
        // Only the accepted tick used an order.
        assert_eq!(circuit.next_tick_order(), 1);
    }

    #[test]
    fn clients_do_not_schedule() {
        let mut circuit = Circuit::new(CircuitConfig::client(), NoopHost).unwrap();
        assert!(!circuit.schedule_tick(ComponentPos::new(3, 3), ComponentKind::Torch, 2));
        assert_eq!(circuit.pending_ticks(), 0);
    }

    #[test]
    fn tick_skips_cells_that_changed_kind() {
        let mut circuit = recording();
        let pos = ComponentPos::new(8, 8);
        circuit.schedule_tick(pos, ComponentKind::Torch, 0);
        circuit.set_component_state(pos, ComponentState::Block, UpdateFlags::NOTIFY_ALL);
        circuit.reset_metrics();
        circuit.host_mut().clear();

        circuit.tick();
        assert_eq!(circuit.pending_ticks(), 0);
        assert_eq!(circuit.metrics().scheduled_ticks, 0);
        assert!(circuit.host().events.is_empty());
    }

    #[test]
    fn zero_delay_waits_for_the_next_tick() {
        let mut circuit = Circuit::default();
        let pos = ComponentPos::new(1, 2);
        circuit.set_component_state(pos, ComponentKind::Torch.default_state(), UpdateFlags::FORCE_STATE);
        circuit.schedule_tick(pos, ComponentKind::Torch, 0);
        circuit.tick();
        assert_eq!(circuit.metrics().scheduled_ticks, 1);
        assert_eq!(circuit.pending_ticks(), 0);
    }

    #[test]
    fn restoring_time_drops_pending_ticks() {
        let mut circuit = Circuit::default();
        circuit.schedule_tick(ComponentPos::new(4, 4), ComponentKind::Torch, 3);
        circuit
            .read_snapshot(&CircuitSnapshot {
                time: Some(10),
                ..CircuitSnapshot::default()
            })
            .unwrap();
        assert_eq!(circuit.pending_ticks(), 0);
    }

    #[test]
    fn sound_pitch_is_scaled() {
        let mut circuit = recording();
        circuit.play_sound(Some(ActorId(3)), SoundEvent::PortClick, SoundCategory::Master, 1.0, 0.5);
        let sound = circuit.host().sounds[0];
        assert_eq!(sound.except, Some(ActorId(3)));
        assert!((sound.pitch - 0.8).abs() < 1e-6);
    }

    #[test]
    fn break_block_on_air_is_false() {
        let mut circuit = recording();
        assert!(!circuit.break_block(ComponentPos::new(4, 4)));
        assert!(circuit.host().events.is_empty());
        assert_eq!(circuit.metrics().writes_applied, 0);
    }

    #[test]
    fn force_state_skips_shape_updates() {
        let mut circuit = recording();
        let left = ComponentPos::new(5, 5);
        let right = ComponentPos::new(6, 5);
        circuit.set_component_state(left, ComponentState::wire(0, Sides::EMPTY), UpdateFlags::FORCE_STATE);
        circuit.set_component_state(right, ComponentState::wire(0, Sides::EMPTY), UpdateFlags::FORCE_STATE);
        // Neither wire learned about the other.
        assert_eq!(circuit.component_state(left), ComponentState::wire(0, Sides::EMPTY));
        assert_eq!(circuit.metrics().shape_updates, 0);

        // A normal write connects them.
        circuit.remove_block(right);
        circuit.set_component_state(right, ComponentState::wire(0, Sides::EMPTY), UpdateFlags::NOTIFY_ALL);
        let east = Sides::EMPTY.with(FlatDirection::East, true);
        assert_eq!(circuit.component_state(left), ComponentState::wire(0, east));
    }

    #[test]
    fn debug_impl_doesnt_panic() {
        let circuit = Circuit::default();
        let text = format!("{circuit:?}");
        assert!(text.contains("Circuit"));
    }
}
