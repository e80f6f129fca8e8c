//! Grid geometry: [`ComponentPos`], [`FlatDirection`] and the fixed port ring.
//!
//! The interior of a circuit is a `SIZE × SIZE` square. Each side has
//! exactly one port cell sitting just outside the square, centred on
//! that side. `NORTH` is `-y`, `EAST` is `+x`.

use smallvec::SmallVec;
use std::fmt;

/// Side length of the interior grid.
pub const SIZE: i32 = 15;

/// Number of interior cells (`SIZE * SIZE`).
pub const CELL_COUNT: usize = (SIZE * SIZE) as usize;

/// One of the four in-plane cardinal directions.
///
/// The discriminant order (`North`, `East`, `South`, `West`) is the
/// cyclic order used for port slots and for serialized port bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlatDirection {
    /// Toward `-y`.
    North,
    /// Toward `+x`.
    East,
    /// Toward `+y`.
    South,
    /// Toward `-x`.
    West,
}

impl FlatDirection {
    /// All directions in cyclic order.
    pub const VALUES: [FlatDirection; 4] = [
        FlatDirection::North,
        FlatDirection::East,
        FlatDirection::South,
        FlatDirection::West,
    ];

    /// Order in which neighbours are visited by update cascades.
    pub const UPDATE_ORDER: [FlatDirection; 4] = [
        FlatDirection::West,
        FlatDirection::East,
        FlatDirection::North,
        FlatDirection::South,
    ];

    /// Index of this direction in [`FlatDirection::VALUES`].
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction at `index % 4` in cyclic order.
    pub const fn from_index(index: usize) -> Self {
        Self::VALUES[index % 4]
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Next direction clockwise.
    pub const fn rotate_clockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Unit step `(dx, dy)` for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// The fixed port coordinate on this side of the grid.
    pub const fn port_pos(self) -> ComponentPos {
        PORT_POSITIONS[self.index()]
    }
}

impl fmt::Display for FlatDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}

/// Port coordinates indexed by [`FlatDirection::index`].
pub const PORT_POSITIONS: [ComponentPos; 4] = [
    ComponentPos::new(SIZE / 2, -1),
    ComponentPos::new(SIZE, SIZE / 2),
    ComponentPos::new(SIZE / 2, SIZE),
    ComponentPos::new(-1, SIZE / 2),
];

/// An integer cell coordinate.
///
/// Not bounded by construction: neighbours of edge cells and port cells
/// lie outside `[0, SIZE)`. Use [`is_inside`](Self::is_inside) and
/// [`port_side`](Self::port_side) to classify a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentPos {
    /// Column, growing east.
    pub x: i32,
    /// Row, growing south.
    pub y: i32,
}

impl ComponentPos {
    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent position in `direction`.
    pub const fn offset(self, direction: FlatDirection) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Adjacent position to the north.
    pub const fn north(self) -> Self {
        self.offset(FlatDirection::North)
    }

    /// Adjacent position to the east.
    pub const fn east(self) -> Self {
        self.offset(FlatDirection::East)
    }

    /// Adjacent position to the south.
    pub const fn south(self) -> Self {
        self.offset(FlatDirection::South)
    }

    /// Adjacent position to the west.
    pub const fn west(self) -> Self {
        self.offset(FlatDirection::West)
    }

    /// `true` iff `0 <= x < SIZE` and `0 <= y < SIZE`.
    pub const fn is_inside(self) -> bool {
        self.x >= 0 && self.x < SIZE && self.y >= 0 && self.y < SIZE
    }

    /// The side whose port sits exactly at this position, if any.
    ///
    /// An exact lookup against the four fixed port coordinates.
    pub fn port_side(self) -> Option<FlatDirection> {
        FlatDirection::VALUES
            .into_iter()
            .find(|side| PORT_POSITIONS[side.index()] == self)
    }

    /// `true` iff this is one of the four port positions.
    pub fn is_port_pos(self) -> bool {
        self.port_side().is_some()
    }

    /// `true` iff this position can hold a component.
    pub fn is_valid(self) -> bool {
        self.is_inside() || self.is_port_pos()
    }

    /// Row-major cell index (`y * SIZE + x`), or `None` outside the interior.
    pub fn cell_index(self) -> Option<usize> {
        if self.is_inside() {
            Some((self.y * SIZE + self.x) as usize)
        } else {
            None
        }
    }

    /// Inverse of [`cell_index`](Self::cell_index).
    pub const fn from_cell_index(index: usize) -> Self {
        let i = index as i32;
        Self::new(i % SIZE, i / SIZE)
    }

    /// The neighbours that can hold a component, paired with the
    /// direction leading to each, in [`FlatDirection::UPDATE_ORDER`].
    ///
    /// Off-grid cells that are not ports are skipped, so a corner has two
    /// neighbours and a port has one.
    pub fn neighbours(self) -> SmallVec<[(FlatDirection, ComponentPos); 4]> {
        FlatDirection::UPDATE_ORDER
            .into_iter()
            .map(|direction| (direction, self.offset(direction)))
            .filter(|(_, pos)| pos.is_valid())
            .collect()
    }
}

impl fmt::Display for ComponentPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for ComponentPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn port_positions_match_sides() {
        assert_eq!(FlatDirection::North.port_pos(), ComponentPos::new(7, -1));
        assert_eq!(FlatDirection::East.port_pos(), ComponentPos::new(15, 7));
        assert_eq!(FlatDirection::South.port_pos(), ComponentPos::new(7, 15));
        assert_eq!(FlatDirection::West.port_pos(), ComponentPos::new(-1, 7));
    }

    #[test]
    fn port_side_is_exact_lookup() {
        assert_eq!(ComponentPos::new(7, -1).port_side(), Some(FlatDirection::North));
        assert_eq!(ComponentPos::new(15, 7).port_side(), Some(FlatDirection::East));
        assert_eq!(ComponentPos::new(7, 15).port_side(), Some(FlatDirection::South));
        assert_eq!(ComponentPos::new(-1, 7).port_side(), Some(FlatDirection::West));
        assert_eq!(ComponentPos::new(0, 0).port_side(), None);
        // Out of bounds but not a port.
        assert_eq!(ComponentPos::new(6, -1).port_side(), None);
        assert_eq!(ComponentPos::new(-1, -1).port_side(), None);
    }

    #[test]
    fn port_is_adjacent_to_interior_centre_of_side() {
        for side in FlatDirection::VALUES {
            let inner = side.port_pos().offset(side.opposite());
            assert!(inner.is_inside(), "{side}: {inner} should be inside");
            assert!(!side.port_pos().is_inside());
        }
    }

    #[test]
    fn opposite_is_two_steps_clockwise() {
        for d in FlatDirection::VALUES {
            assert_eq!(d.rotate_clockwise().rotate_clockwise(), d.opposite());
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn is_inside_bounds() {
        assert!(ComponentPos::new(0, 0).is_inside());
        assert!(ComponentPos::new(14, 14).is_inside());
        assert!(!ComponentPos::new(15, 0).is_inside());
        assert!(!ComponentPos::new(0, -1).is_inside());
    }

    #[test]
    fn validity_covers_interior_and_ports_only() {
        assert!(ComponentPos::new(3, 4).is_valid());
        assert!(ComponentPos::new(7, 15).is_valid());
        assert!(!ComponentPos::new(8, 15).is_valid());
        assert!(!ComponentPos::new(100, 100).is_valid());
    }

    #[test]
    fn neighbours_follow_update_order_and_skip_off_grid() {
        let centre: Vec<_> = ComponentPos::new(5, 5).neighbours().into_iter().collect();
        assert_eq!(
            centre,
            vec![
                (FlatDirection::West, ComponentPos::new(4, 5)),
                (FlatDirection::East, ComponentPos::new(6, 5)),
                (FlatDirection::North, ComponentPos::new(5, 4)),
                (FlatDirection::South, ComponentPos::new(5, 6)),
            ]
        );
        assert_eq!(ComponentPos::new(0, 0).neighbours().len(), 2);
        // The west port borders exactly one interior cell.
        let port: Vec<_> = FlatDirection::West.port_pos().neighbours().into_iter().collect();
        assert_eq!(port, vec![(FlatDirection::East, ComponentPos::new(0, 7))]);
        // The cell inside the west port sees the port as a neighbour.
        assert_eq!(ComponentPos::new(0, 7).neighbours().len(), 4);
    }

    proptest! {
        #[test]
        fn cell_index_roundtrip(x in 0i32..SIZE, y in 0i32..SIZE) {
            let pos = ComponentPos::new(x, y);
            let index = pos.cell_index().unwrap();
            prop_assert!(index < CELL_COUNT);
            prop_assert_eq!(ComponentPos::from_cell_index(index), pos);
        }

        #[test]
        fn offset_then_opposite_returns(x in -20i32..20, y in -20i32..20, d in 0usize..4) {
            let pos = ComponentPos::new(x, y);
            let dir = FlatDirection::from_index(d);
            prop_assert_eq!(pos.offset(dir).offset(dir.opposite()), pos);
        }
    }
}
