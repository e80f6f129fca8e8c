//! [`ComponentKind`], [`ComponentState`] and the 16-bit state codec.
//!
//! # Encoding
//!
//! ```text
//! 15            8 7             0
//! [ property byte ][   kind id   ]
//! ```
//!
//! The kind id selects a [`ComponentKind`]; the property byte is laid
//! out per kind (see [`ComponentKind::property_mask`]). Decoding never
//! fails: unknown kind ids decode to [`ComponentState::Air`] and
//! property bits a kind does not use are dropped.

use std::fmt;

use crate::pos::FlatDirection;

/// Highest power level a component can emit or hold.
pub const MAX_POWER: u8 = 15;

/// The closed set of placeable component kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Empty cell.
    Air,
    /// Boundary connection point; only valid at the four port positions.
    Port,
    /// Signal carrier with a decaying power level.
    Wire,
    /// Solid cell that conducts strong power.
    Block,
    /// Inverter: lit while its input is unpowered.
    Torch,
    /// Manual switch toggled by use.
    Lever,
    /// Solid output indicator, lit while receiving power.
    Lamp,
}

impl ComponentKind {
    /// All kinds in id order.
    pub const VALUES: [ComponentKind; 7] = [
        ComponentKind::Air,
        ComponentKind::Port,
        ComponentKind::Wire,
        ComponentKind::Block,
        ComponentKind::Torch,
        ComponentKind::Lever,
        ComponentKind::Lamp,
    ];

    /// Stable numeric id stored in the low byte of an encoded state.
    pub const fn id(self) -> u8 {
        match self {
            Self::Air => 0,
            Self::Port => 1,
            Self::Wire => 2,
            Self::Block => 3,
            Self::Torch => 4,
            Self::Lever => 5,
            Self::Lamp => 6,
        }
    }

    /// Look up a kind by id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::VALUES.get(id as usize).copied()
    }

    /// Property bits this kind uses in the high byte.
    pub const fn property_mask(self) -> u8 {
        match self {
            Self::Air | Self::Block => 0x00,
            // facing: bits 0-1, power: bits 2-5
            Self::Port => 0x3F,
            // power: bits 0-3, connections: bits 4-7
            Self::Wire => 0xFF,
            // facing: bits 0-1, lit/powered: bit 2
            Self::Torch | Self::Lever => 0x07,
            // lit: bit 0
            Self::Lamp => 0x01,
        }
    }

    /// Human-readable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Port => "port",
            Self::Wire => "wire",
            Self::Block => "block",
            Self::Torch => "torch",
            Self::Lever => "lever",
            Self::Lamp => "lamp",
        }
    }

    /// The state this kind takes when nothing else is known.
    pub const fn default_state(self) -> ComponentState {
        match self {
            Self::Air => ComponentState::Air,
            Self::Port => ComponentState::Port {
                facing: FlatDirection::North,
                power: 0,
            },
            Self::Wire => ComponentState::Wire {
                power: 0,
                connections: Sides::EMPTY,
            },
            Self::Block => ComponentState::Block,
            Self::Torch => ComponentState::Torch {
                facing: FlatDirection::North,
                lit: true,
            },
            Self::Lever => ComponentState::Lever {
                facing: FlatDirection::North,
                powered: false,
            },
            Self::Lamp => ComponentState::Lamp { lit: false },
        }
    }

    /// The state placed when a host puts this kind down facing `rotation`.
    ///
    /// Torches point along the rotation; levers point back at the
    /// placer so that they attach to the cell in front of them.
    pub const fn placement_state(self, rotation: FlatDirection) -> ComponentState {
        match self {
            Self::Port => ComponentState::Port {
                facing: rotation,
                power: 0,
            },
            Self::Torch => ComponentState::Torch {
                facing: rotation,
                lit: true,
            },
            Self::Lever => ComponentState::Lever {
                facing: rotation.opposite(),
                powered: false,
            },
            Self::Air | Self::Wire | Self::Block | Self::Lamp => self.default_state(),
        }
    }

    /// Build a state of this kind from a property byte.
    ///
    /// Bits outside [`property_mask`](Self::property_mask) are ignored,
    /// so every byte yields a state of this kind.
    pub const fn state_from_data(self, data: u8) -> ComponentState {
        let data = data & self.property_mask();
        let facing = FlatDirection::from_index((data & 0x03) as usize);
        match self {
            Self::Air => ComponentState::Air,
            Self::Port => ComponentState::Port {
                facing,
                power: (data >> 2) & 0x0F,
            },
            Self::Wire => ComponentState::Wire {
                power: data & 0x0F,
                connections: Sides(data >> 4),
            },
            Self::Block => ComponentState::Block,
            Self::Torch => ComponentState::Torch {
                facing,
                lit: data & 0x04 != 0,
            },
            Self::Lever => ComponentState::Lever {
                facing,
                powered: data & 0x04 != 0,
            },
            Self::Lamp => ComponentState::Lamp { lit: data & 0x01 != 0 },
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`FlatDirection`]s packed into the low four bits of a byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sides(u8);

impl Sides {
    /// No sides.
    pub const EMPTY: Self = Self(0);
    /// All four sides.
    pub const ALL: Self = Self(0x0F);

    /// Construct from the low four bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    /// Raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `true` if `side` is in the set.
    pub const fn contains(self, side: FlatDirection) -> bool {
        self.0 & (1 << side.index()) != 0
    }

    /// The set with `side` added or removed.
    pub const fn with(self, side: FlatDirection, present: bool) -> Self {
        if present {
            Self(self.0 | (1 << side.index()))
        } else {
            Self(self.0 & !(1 << side.index()))
        }
    }

    /// Number of sides in the set.
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// `true` if the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The single member, if the set has exactly one.
    pub fn single(self) -> Option<FlatDirection> {
        if self.len() == 1 {
            FlatDirection::VALUES.into_iter().find(|d| self.contains(*d))
        } else {
            None
        }
    }
}

impl FromIterator<FlatDirection> for Sides {
    fn from_iter<I: IntoIterator<Item = FlatDirection>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::EMPTY, |sides, side| sides.with(side, true))
    }
}

/// An immutable component value: a kind plus its properties.
///
/// Equality is structural; the circuit uses it to recognise no-op
/// writes. Property setters return a new state.
///
/// Power fields hold `0..=15`. The variants are public for matching;
/// build powered states with [`port`](Self::port), [`wire`](Self::wire)
/// or [`with_power`](Self::with_power), which clamp. Encoding a state
/// whose power is out of range panics in debug builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentState {
    /// Empty cell.
    Air,
    /// A boundary port. Faces into the grid while acting as an input.
    Port {
        /// Direction the port points.
        facing: FlatDirection,
        /// Input power set by the host, or mirrored output power, `0..=15`.
        power: u8,
    },
    /// A wire segment.
    Wire {
        /// Current power, `0..=15`.
        power: u8,
        /// Sides the wire visually connects to.
        connections: Sides,
    },
    /// A solid block.
    Block,
    /// An inverting torch reading the cell behind it.
    Torch {
        /// Direction the torch points; its input is on the opposite side.
        facing: FlatDirection,
        /// Whether the torch is emitting.
        lit: bool,
    },
    /// A lever attached to the cell behind it.
    Lever {
        /// Direction the lever points; it is attached on the opposite side.
        facing: FlatDirection,
        /// Whether the lever is on.
        powered: bool,
    },
    /// A lamp.
    Lamp {
        /// Whether the lamp is lit.
        lit: bool,
    },
}

impl Default for ComponentState {
    fn default() -> Self {
        Self::AIR
    }
}

impl ComponentState {
    /// The Air default state.
    pub const AIR: ComponentState = ComponentState::Air;

    /// The kind of this state.
    pub const fn kind(self) -> ComponentKind {
        match self {
            Self::Air => ComponentKind::Air,
            Self::Port { .. } => ComponentKind::Port,
            Self::Wire { .. } => ComponentKind::Wire,
            Self::Block => ComponentKind::Block,
            Self::Torch { .. } => ComponentKind::Torch,
            Self::Lever { .. } => ComponentKind::Lever,
            Self::Lamp { .. } => ComponentKind::Lamp,
        }
    }

    /// `true` if this state is of `kind`.
    pub fn is_of(self, kind: ComponentKind) -> bool {
        self.kind() == kind
    }

    /// `true` for the Air state.
    pub fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Build a port state, clamping `power` to `0..=15`.
    pub fn port(facing: FlatDirection, power: u8) -> Self {
        Self::Port {
            facing,
            power: power.min(MAX_POWER),
        }
    }

    /// Build a wire state, clamping `power` to `0..=15`.
    pub fn wire(power: u8, connections: Sides) -> Self {
        Self::Wire {
            power: power.min(MAX_POWER),
            connections,
        }
    }

    /// Facing of directional kinds.
    pub fn facing(self) -> Option<FlatDirection> {
        match self {
            Self::Port { facing, .. } | Self::Torch { facing, .. } | Self::Lever { facing, .. } => {
                Some(facing)
            }
            _ => None,
        }
    }

    /// Stored power level of ports and wires.
    pub fn power(self) -> Option<u8> {
        match self {
            Self::Port { power, .. } | Self::Wire { power, .. } => Some(power),
            _ => None,
        }
    }

    /// Copy with a new facing. Non-directional kinds are returned unchanged.
    pub fn with_facing(self, facing: FlatDirection) -> Self {
        match self {
            Self::Port { power, .. } => Self::Port { facing, power },
            Self::Torch { lit, .. } => Self::Torch { facing, lit },
            Self::Lever { powered, .. } => Self::Lever { facing, powered },
            other => other,
        }
    }

    /// Copy with a new power level (clamped). Only ports and wires hold power.
    pub fn with_power(self, power: u8) -> Self {
        let power = power.min(MAX_POWER);
        match self {
            Self::Port { facing, .. } => Self::Port { facing, power },
            Self::Wire { connections, .. } => Self::Wire { power, connections },
            other => other,
        }
    }

    /// Copy with the on/off property set (torch and lamp `lit`, lever `powered`).
    pub fn with_active(self, active: bool) -> Self {
        match self {
            Self::Torch { facing, .. } => Self::Torch { facing, lit: active },
            Self::Lever { facing, .. } => Self::Lever {
                facing,
                powered: active,
            },
            Self::Lamp { .. } => Self::Lamp { lit: active },
            other => other,
        }
    }

    /// Copy with a wire connection toggled. Other kinds are returned unchanged.
    pub fn with_connection(self, side: FlatDirection, connected: bool) -> Self {
        match self {
            Self::Wire { power, connections } => Self::Wire {
                power,
                connections: connections.with(side, connected),
            },
            other => other,
        }
    }

    /// The property byte of this state.
    ///
    /// For ports this is the 8-bit form stored in snapshot port slots;
    /// [`ComponentKind::Port`]`.state_from_data` reverses it.
    pub fn encode_state_data(self) -> u8 {
        debug_assert!(
            self.power().map_or(true, |power| power <= MAX_POWER),
            "power above {MAX_POWER} in {self:?}"
        );
        match self {
            Self::Air | Self::Block => 0,
            Self::Port { facing, power } => facing.index() as u8 | ((power & 0x0F) << 2),
            Self::Wire { power, connections } => (power & 0x0F) | (connections.bits() << 4),
            Self::Torch { facing, lit: on } | Self::Lever { facing, powered: on } => {
                facing.index() as u8 | (u8::from(on) << 2)
            }
            Self::Lamp { lit } => u8::from(lit),
        }
    }

    /// Encode to 16 bits: property byte high, kind id low.
    pub fn encode(self) -> u16 {
        (u16::from(self.encode_state_data()) << 8) | u16::from(self.kind().id())
    }

    /// Decode any 16-bit value. Unknown kind ids yield Air.
    pub fn decode(raw: u16) -> Self {
        let [data, id] = raw.to_be_bytes();
        match ComponentKind::from_id(id) {
            Some(kind) => kind.state_from_data(data),
            None => Self::AIR,
        }
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Air | Self::Block => write!(f, "{}", self.kind()),
            Self::Port { facing, power } => write!(f, "port[facing={facing},power={power}]"),
            Self::Wire { power, connections } => {
                write!(f, "wire[power={power},connections={:#03x}]", connections.bits())
            }
            Self::Torch { facing, lit } => write!(f, "torch[facing={facing},lit={lit}]"),
            Self::Lever { facing, powered } => {
                write!(f, "lever[facing={facing},powered={powered}]")
            }
            Self::Lamp { lit } => write!(f, "lamp[lit={lit}]"),
        }
    }
}
