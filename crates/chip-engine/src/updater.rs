//! The neighbour updater: how a change at one cell reaches the cells
//! around it.
//!
//! Two kinds of propagation run after a write:
//!
//! - **Power reactions**: each neighbour re-reads its inputs via its `neighbor_update` hook.
//! - **Shape updates**: a neighbour recomputes its own state from the changed cell's new
//!   state and is rewritten if that differs.
//!
//! Neighbours are visited WEST, EAST, NORTH, SOUTH.

use chip_core::{
    CircuitAccess, CircuitHost, CircuitView, ComponentKind, ComponentPos, ComponentState,
    FlatDirection, UpdateFlags,
};

use crate::circuit::Circuit;

impl<H: CircuitHost> Circuit<H> {
    /// Run the power reactions of the four neighbours of `pos`.
    ///
    /// Stops silently when `depth` is 0.
    pub(crate) fn run_neighbor_updates(
        &mut self,
        pos: ComponentPos,
        source: ComponentKind,
        depth: u32,
    ) {
        if depth == 0 {
            self.metrics.depth_exhausted += 1;
            tracing::trace!(%pos, %source, "update budget exhausted, neighbours not notified");
            return;
        }
        for (_, neighbor) in pos.neighbours() {
            let state = self.grid.get(neighbor);
            self.metrics.neighbor_updates += 1;
            state.neighbor_update(self, neighbor, source, pos, depth);
        }
    }

    /// Re-shape the cell at `pos` after its neighbour in `direction`
    /// (at `neighbor_pos`) became `neighbor_state`.
    ///
    /// The rewrite uses the same budget it was handed.
    pub(crate) fn run_shape_update(
        &mut self,
        direction: FlatDirection,
        neighbor_state: ComponentState,
        pos: ComponentPos,
        neighbor_pos: ComponentPos,
        flags: UpdateFlags,
        depth: u32,
    ) {
        let current = self.component_state(pos);
        let replaced = current.state_for_neighbor_update(direction, neighbor_state);
        if replaced == current {
            return;
        }
        self.metrics.shape_updates += 1;
        tracing::trace!(%pos, %neighbor_pos, %replaced, "shape update");
        if replaced.is_air() {
            self.break_block_at_depth(pos, depth);
        } else {
            self.set_component_state_at_depth(
                pos,
                Some(replaced),
                flags.without(UpdateFlags::SKIP_DROPS),
                depth,
            );
        }
    }
}
