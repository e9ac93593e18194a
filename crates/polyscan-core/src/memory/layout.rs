//! Memory layout constants for the Polytopia IL2CPP build
//!
//! This module centralizes every offset used to read game state. Field
//! offsets are relative to the start of the managed object they belong to,
//! the same numbers a class dump shows. Constants are organized by structure
//! type.

/// Width of a fixed-layout field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
    U64,
    /// One byte, non-zero is true
    Bool,
}

impl Width {
    pub const fn size(self) -> usize {
        match self {
            Width::U8 | Width::Bool => 1,
            Width::U16 => 2,
            Width::U64 => 8,
        }
    }
}

/// A scalar field inside a managed object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: u64,
    pub width: Width,
}

impl Field {
    pub const fn u8(offset: u64) -> Self {
        Self {
            offset,
            width: Width::U8,
        }
    }

    pub const fn u16(offset: u64) -> Self {
        Self {
            offset,
            width: Width::U16,
        }
    }

    pub const fn u64(offset: u64) -> Self {
        Self {
            offset,
            width: Width::U64,
        }
    }

    pub const fn bool(offset: u64) -> Self {
        Self {
            offset,
            width: Width::Bool,
        }
    }
}

/// Contiguous window of an object that is fetched with a single read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: &'static str,
    /// Object offset of the first byte read
    pub start: u64,
    /// Number of bytes read
    pub size: usize,
}

impl RecordLayout {
    /// Check whether `field` lies entirely inside this window
    pub const fn contains(&self, field: Field) -> bool {
        field.offset >= self.start
            && field.offset + field.width.size() as u64 <= self.start + self.size as u64
    }
}

/// Module-relative static plus the chain leading to a section object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPath {
    pub module_offset: u64,
    pub chain: &'static [u64],
}

/// Entry points of the four top-level sections
pub mod sections {
    use super::SectionPath;

    /// Turn counter (u16 at the resolved address)
    pub const TURN: SectionPath = SectionPath {
        module_offset: 0x02BE_5F28,
        chain: &[0xB8, 0x10, 0xE0],
    };

    /// Tile array holder
    pub const MAP: SectionPath = SectionPath {
        module_offset: 0x02BD_52B8,
        chain: &[0x20, 0xB8, 0x0, 0x38],
    };

    /// Unit list holder
    pub const UNITS: SectionPath = SectionPath {
        module_offset: 0x02C1_8258,
        chain: &[0xB8, 0x0, 0x40],
    };

    /// Player state list holder
    pub const TRIBES: SectionPath = SectionPath {
        module_offset: 0x02BE_3158,
        chain: &[0xB8, 0x0, 0x78, 0x38, 0x38, 0x10],
    };
}

/// Managed `List<T>` and array plumbing
pub mod collection {
    /// Size of a pointer slot in managed arrays
    pub const POINTER: u64 = 8;
    /// `List<T>._items`
    pub const ITEMS_FIELD: u64 = 0x10;
    /// First element of a managed array
    pub const ARRAY_DATA: u64 = 0x20;

    /// From a list handle to `List<T>._size`
    pub const COUNT: &[u64] = &[0x18];
    /// From a list handle to the first element
    pub const ITEMS: &[u64] = &[ITEMS_FIELD, ARRAY_DATA];

    /// Offset of slot `index` in a managed pointer array
    pub const fn slot(index: u64) -> u64 {
        ARRAY_DATA + index * POINTER
    }
}

/// Managed `System.String`
pub mod string {
    pub const LENGTH: &[u64] = &[0x10];
    pub const CHARS: &[u64] = &[0x14];
}

/// `PlayerState`
pub mod tribe {
    use super::{Field, RecordLayout};

    pub const RECORD: RecordLayout = RecordLayout {
        name: "tribe",
        start: 0x10,
        size: 176,
    };

    pub const OWNER: Field = Field::u16(0x10);
    pub const AUTOPLAY: Field = Field::bool(0x34);
    pub const TRIBE_ID: Field = Field::u16(0x40);
    pub const RESIGNED_TURN: Field = Field::u16(0x50);
    pub const CURRENCY: Field = Field::u16(0x9C);
    pub const SCORE: Field = Field::u16(0xA0);
    pub const KILLS: Field = Field::u16(0xAC);
    pub const KILLER_ID: Field = Field::u16(0xB8);
    pub const KILLED_TURN: Field = Field::u16(0xBC);

    // Handles (fields holding a pointer)
    pub const USERNAME: u64 = 0x18;
    pub const TECH: u64 = 0x60;
    pub const TASKS: u64 = 0x68;
    pub const KNOWN_PLAYERS: u64 = 0x78;
    pub const BUILT_UNIQUE_IMPROVEMENTS: u64 = 0x80;
    pub const RELATIONS: u64 = 0x88;

    pub const MAX_TASKS: usize = 5;
    pub const MAX_KNOWN_PLAYERS: usize = 16;
}

/// `TaskBase`
pub mod task {
    use super::{Field, RecordLayout};

    pub const RECORD: RecordLayout = RecordLayout {
        name: "task",
        start: 0x10,
        size: 12,
    };

    pub const STARTED: Field = Field::u8(0x10);
    pub const COMPLETED: Field = Field::u8(0x11);
    pub const TURNS: Field = Field::u8(0x18);
}

/// `Dictionary<byte, DiplomacyRelation>` entries
pub mod relation {
    use super::{Field, RecordLayout};

    /// From the dictionary handle to the entries array
    pub const ENTRIES: &[u64] = &[0x18];
    pub const SLOT_STRIDE: u64 = 0x18;
    pub const KEY: u64 = 0x20;
    pub const VALUE: u64 = 0x30;

    pub const RECORD: RecordLayout = RecordLayout {
        name: "relation",
        start: 0x10,
        size: 28,
    };

    pub const STATE: Field = Field::bool(0x10);
    pub const LAST_ATTACK_TURN: Field = Field::u16(0x14);
    pub const EMBASSY_LEVEL: Field = Field::u16(0x18);
    pub const LAST_PEACE_BROKEN_TURN: Field = Field::u16(0x1C);
    pub const FIRST_MEET: Field = Field::u16(0x20);
    pub const EMBASSY_BUILD_TURN: Field = Field::u16(0x24);
    pub const PREVIOUS_ATTACK_TURN: Field = Field::u16(0x28);
}

/// `TileData`
pub mod tile {
    use super::{Field, RecordLayout};

    /// Field of the array element that holds the tile data pointer
    pub const HANDLE: u64 = 0x90;

    pub const RECORD: RecordLayout = RecordLayout {
        name: "tile",
        start: 0x10,
        size: 100,
    };

    pub const X: Field = Field::u16(0x10);
    pub const Y: Field = Field::u16(0x12);
    pub const TERRAIN: Field = Field::u16(0x18);
    pub const CLIMATE: Field = Field::u16(0x1C);
    pub const SKIN_TYPE: Field = Field::u16(0x20);
    pub const OWNER: Field = Field::u8(0x28);
    pub const CAPITAL_OF: Field = Field::u8(0x29);
    pub const RULING_CITY_X: Field = Field::u16(0x3C);
    pub const RULING_CITY_Y: Field = Field::u16(0x40);
    pub const HAS_ROAD: Field = Field::bool(0x60);
    pub const HAS_ROUTE: Field = Field::bool(0x61);
    pub const HAD_ROUTE: Field = Field::bool(0x70);

    pub const EXPLORERS: u64 = 0x30;
    pub const IMPROVEMENT: u64 = 0x48;
    pub const RESOURCE: u64 = 0x50;
}

/// `ImprovementState` (structures and cities)
pub mod structure {
    use super::{Field, RecordLayout};

    pub const ID: u64 = 0x10;

    pub const RECORD: RecordLayout = RecordLayout {
        name: "structure",
        start: 0x14,
        size: 22,
    };

    /// Packed level (low word) and progress (high word)
    pub const LEVEL_RAW: Field = Field::u64(0x14);
    pub const LEVEL: Field = Field::u16(0x16);
    pub const FOUNDED: Field = Field::u16(0x18);
    pub const POPULATION: Field = Field::u16(0x1C);
    pub const PRODUCTION: Field = Field::u16(0x1E);
    pub const REWARD: Field = Field::u16(0x20);
    pub const BORDER_SIZE: Field = Field::u16(0x22);
    pub const CONNECTED_TO_CAPITAL: Field = Field::u16(0x26);

    pub const NAME: u64 = 0x28;
    pub const REWARDS: u64 = 0x30;
}

/// `ResourceState`
pub mod resource {
    pub const ID: u64 = 0x10;
}

/// `UnitState`
pub mod unit {
    use super::{Field, RecordLayout};

    /// Field of the list element that holds the unit state pointer
    pub const HANDLE: u64 = 0x40;

    pub const RECORD: RecordLayout = RecordLayout {
        name: "unit",
        start: 0x1C,
        size: 62,
    };

    pub const OWNER: Field = Field::u16(0x1C);
    pub const TYPE: Field = Field::u16(0x24);
    pub const PREV_X: Field = Field::u16(0x28);
    pub const PREV_Y: Field = Field::u16(0x2C);
    pub const X: Field = Field::u16(0x30);
    pub const Y: Field = Field::u16(0x34);
    pub const HOME_X: Field = Field::u16(0x38);
    pub const HOME_Y: Field = Field::u16(0x3C);
    pub const HP: Field = Field::u16(0x48);
    pub const PROMOTED: Field = Field::bool(0x4A);
    pub const KILLS: Field = Field::u16(0x4C);
    pub const MOVED: Field = Field::bool(0x4E);
    pub const ATTACKED: Field = Field::bool(0x4F);
    pub const DIRECTION: Field = Field::u16(0x50);
    pub const FLIPPED: Field = Field::bool(0x54);
    pub const CREATED_TURN: Field = Field::u16(0x56);

    pub const EFFECTS: u64 = 0x60;
    /// Transported unit id
    pub const PASSENGER: &[u64] = &[0x40, 0x24];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_windows_cover_their_fields() {
        let checks: &[(RecordLayout, &[Field])] = &[
            (
                tribe::RECORD,
                &[
                    tribe::OWNER,
                    tribe::AUTOPLAY,
                    tribe::TRIBE_ID,
                    tribe::RESIGNED_TURN,
                    tribe::CURRENCY,
                    tribe::SCORE,
                    tribe::KILLS,
                    tribe::KILLER_ID,
                    tribe::KILLED_TURN,
                ],
            ),
            (task::RECORD, &[task::STARTED, task::COMPLETED, task::TURNS]),
            (
                relation::RECORD,
                &[
                    relation::STATE,
                    relation::LAST_ATTACK_TURN,
                    relation::EMBASSY_LEVEL,
                    relation::LAST_PEACE_BROKEN_TURN,
                    relation::FIRST_MEET,
                    relation::EMBASSY_BUILD_TURN,
                    relation::PREVIOUS_ATTACK_TURN,
                ],
            ),
            (
                tile::RECORD,
                &[
                    tile::X,
                    tile::Y,
                    tile::TERRAIN,
                    tile::CLIMATE,
                    tile::SKIN_TYPE,
                    tile::OWNER,
                    tile::CAPITAL_OF,
                    tile::RULING_CITY_X,
                    tile::RULING_CITY_Y,
                    tile::HAS_ROAD,
                    tile::HAS_ROUTE,
                    tile::HAD_ROUTE,
                ],
            ),
            (
                structure::RECORD,
                &[
                    structure::LEVEL_RAW,
                    structure::LEVEL,
                    structure::FOUNDED,
                    structure::POPULATION,
                    structure::PRODUCTION,
                    structure::REWARD,
                    structure::BORDER_SIZE,
                    structure::CONNECTED_TO_CAPITAL,
                ],
            ),
            (
                unit::RECORD,
                &[
                    unit::OWNER,
                    unit::TYPE,
                    unit::PREV_X,
                    unit::PREV_Y,
                    unit::X,
                    unit::Y,
                    unit::HOME_X,
                    unit::HOME_Y,
                    unit::HP,
                    unit::PROMOTED,
                    unit::KILLS,
                    unit::MOVED,
                    unit::ATTACKED,
                    unit::DIRECTION,
                    unit::FLIPPED,
                    unit::CREATED_TURN,
                ],
            ),
        ];

        for (layout, fields) in checks {
            for field in *fields {
                assert!(
                    layout.contains(*field),
                    "{} window misses field at 0x{:X}",
                    layout.name,
                    field.offset
                );
            }
        }
    }

    #[test]
    fn test_collection_slot() {
        assert_eq!(collection::slot(0), 0x20);
        assert_eq!(collection::slot(3), 0x38);
    }
}
