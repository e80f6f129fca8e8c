//! [`ComponentGrid`]: the 15×15 interior plus the four boundary ports.

use crate::error::GridError;
use chip_core::{ComponentKind, ComponentPos, ComponentState, FlatDirection, CELL_COUNT};

/// Fixed-size storage for a circuit's components.
///
/// Interior cells are stored row-major (`index = y * SIZE + x`). Port
/// slots are indexed by [`FlatDirection::index`] and always hold a
/// Port-kind state.
///
/// # Examples
///
/// ```
/// use chip_core::{ComponentPos, ComponentState, FlatDirection};
/// use chip_grid::ComponentGrid;
///
/// let mut grid = ComponentGrid::new();
/// assert!(grid.is_empty());
///
/// grid.assign(ComponentPos::new(3, 4), ComponentState::Block);
/// assert_eq!(grid.get(ComponentPos::new(3, 4)), ComponentState::Block);
/// assert!(!grid.is_empty());
///
/// // Ports start out facing into the grid.
/// let north = grid.port(FlatDirection::North);
/// assert_eq!(north.facing(), Some(FlatDirection::South));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentGrid {
    cells: [ComponentState; CELL_COUNT],
    ports: [ComponentState; 4],
}

impl Default for ComponentGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentGrid {
    /// An all-Air grid with every port facing inward.
    pub fn new() -> Self {
        Self {
            cells: [ComponentState::AIR; CELL_COUNT],
            ports: FlatDirection::VALUES.map(Self::default_port),
        }
    }

    /// The initial state of the port on `side`: unpowered, facing inward.
    pub fn default_port(side: FlatDirection) -> ComponentState {
        ComponentState::port(side.opposite(), 0)
    }

    /// State at `pos`. Positions that hold nothing read as Air.
    pub fn get(&self, pos: ComponentPos) -> ComponentState {
        if let Some(index) = pos.cell_index() {
            return self.cells[index];
        }
        match pos.port_side() {
            Some(side) => self.ports[side.index()],
            None => ComponentState::AIR,
        }
    }

    /// Store `state` at `pos`, returning the previous state.
    ///
    /// # Panics
    ///
    /// If `pos` is not a valid position, or if a non-Port state is
    /// written to a port position. Nothing is written in either case.
    pub fn assign(&mut self, pos: ComponentPos, state: ComponentState) -> ComponentState {
        match self.try_assign(pos, state) {
            Ok(old) => old,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`assign`](Self::assign).
    pub fn try_assign(
        &mut self,
        pos: ComponentPos,
        state: ComponentState,
    ) -> Result<ComponentState, GridError> {
        if let Some(index) = pos.cell_index() {
            return Ok(std::mem::replace(&mut self.cells[index], state));
        }
        match pos.port_side() {
            Some(side) => self.try_set_port(side, state),
            None => Err(GridError::InvalidPosition { pos }),
        }
    }

    /// Interior cell by row-major index.
    ///
    /// # Panics
    ///
    /// If `index >= CELL_COUNT`.
    pub fn cell(&self, index: usize) -> ComponentState {
        self.cells[index]
    }

    /// Overwrite an interior cell by row-major index.
    ///
    /// # Panics
    ///
    /// If `index >= CELL_COUNT`.
    pub fn set_cell(&mut self, index: usize, state: ComponentState) {
        self.cells[index] = state;
    }

    /// State of the port on `side`.
    pub fn port(&self, side: FlatDirection) -> ComponentState {
        self.ports[side.index()]
    }

    /// Overwrite the port on `side`, returning the previous state.
    ///
    /// # Panics
    ///
    /// If `state` is not a Port state.
    pub fn set_port(&mut self, side: FlatDirection, state: ComponentState) -> ComponentState {
        match self.try_set_port(side, state) {
            Ok(old) => old,
            Err(err) => panic!("{err}"),
        }
    }

    fn try_set_port(
        &mut self,
        side: FlatDirection,
        state: ComponentState,
    ) -> Result<ComponentState, GridError> {
        if !state.is_of(ComponentKind::Port) {
            return Err(GridError::NonPortInPortSlot { side, state });
        }
        Ok(std::mem::replace(&mut self.ports[side.index()], state))
    }

    /// `true` iff every port faces inward and every cell is Air.
    ///
    /// Port power is ignored; only orientation counts.
    pub fn is_empty(&self) -> bool {
        let ports_inward = FlatDirection::VALUES
            .into_iter()
            .all(|side| self.port(side).facing() == Some(side.opposite()));
        ports_inward && self.cells.iter().all(|cell| cell.is_air())
    }

    /// Interior cells with their positions, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentPos, ComponentState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, state)| (ComponentPos::from_cell_index(index), *state))
    }

    /// Port slots with their sides, in [`FlatDirection::VALUES`] order.
    pub fn ports(&self) -> impl Iterator<Item = (FlatDirection, ComponentState)> + '_ {
        FlatDirection::VALUES
            .into_iter()
            .map(|side| (side, self.port(side)))
    }

    /// Number of non-Air interior cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_air()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip_core::{Sides, SIZE};

    #[test]
    fn fresh_grid_is_empty() {
        let grid = ComponentGrid::new();
        assert!(grid.is_empty());
        assert_eq!(grid.occupied(), 0);
        for (side, port) in grid.ports() {
            assert_eq!(port, ComponentState::port(side.opposite(), 0));
        }
    }

    #[test]
    fn invalid_positions_read_as_air() {
        let grid = ComponentGrid::new();
        assert_eq!(grid.get(ComponentPos::new(-1, -1)), ComponentState::AIR);
        assert_eq!(grid.get(ComponentPos::new(SIZE, 0)), ComponentState::AIR);
    }

    #[test]
    fn port_positions_resolve_to_port_slots() {
        let mut grid = ComponentGrid::new();
        let powered = ComponentState::port(FlatDirection::West, 5);
        let old = grid.assign(FlatDirection::East.port_pos(), powered);
        assert_eq!(old, ComponentGrid::default_port(FlatDirection::East));
        assert_eq!(grid.port(FlatDirection::East), powered);
        assert_eq!(grid.get(ComponentPos::new(15, 7)), powered);
    }

    #[test]
    fn port_power_does_not_break_emptiness() {
        let mut grid = ComponentGrid::new();
        grid.set_port(FlatDirection::South, ComponentState::port(FlatDirection::North, 15));
        assert!(grid.is_empty());
        grid.set_port(FlatDirection::South, ComponentState::port(FlatDirection::South, 0));
        assert!(!grid.is_empty());
    }

    #[test]
    fn non_port_into_port_slot_is_rejected_without_writing() {
        let mut grid = ComponentGrid::new();
        let err = grid
            .try_assign(FlatDirection::North.port_pos(), ComponentState::Block)
            .unwrap_err();
        assert_eq!(
            err,
            GridError::NonPortInPortSlot {
                side: FlatDirection::North,
                state: ComponentState::Block,
            }
        );
        assert_eq!(grid, ComponentGrid::new());
    }

    #[test]
    #[should_panic(expected = "port slot")]
    fn assign_panics_on_non_port_in_port_slot() {
        let mut grid = ComponentGrid::new();
        grid.assign(FlatDirection::West.port_pos(), ComponentState::wire(0, Sides::EMPTY));
    }

    #[test]
    #[should_panic(expected = "not a valid component position")]
    fn assign_panics_on_invalid_position() {
        let mut grid = ComponentGrid::new();
        grid.assign(ComponentPos::new(20, 20), ComponentState::Block);
    }

    #[test]
    fn iteration_is_row_major() {
        let mut grid = ComponentGrid::new();
        grid.assign(ComponentPos::new(1, 0), ComponentState::Block);
        grid.assign(ComponentPos::new(0, 1), ComponentState::Lamp { lit: false });
        let occupied: Vec<_> = grid.iter().filter(|(_, s)| !s.is_air()).collect();
        assert_eq!(
            occupied,
            vec![
                (ComponentPos::new(1, 0), ComponentState::Block),
                (ComponentPos::new(0, 1), ComponentState::Lamp { lit: false }),
            ]
        );
        assert_eq!(grid.cell(1), ComponentState::Block);
        assert_eq!(grid.cell(SIZE as usize), ComponentState::Lamp { lit: false });
    }
}
