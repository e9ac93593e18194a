//! Snapshot extraction.
//!
//! An [`Extractor`] makes one pass over the target: it resolves the four
//! section bases, reads the turn counter, then walks tribes, tiles and units
//! in that order (tiles need the tribe count, units need the map size).
//!
//! Reads are not atomic with respect to the running game. A snapshot is
//! assembled from hundreds of independent reads while the target keeps
//! mutating its state, so fields of one snapshot may come from slightly
//! different moments. That skew is accepted.

mod tiles;
mod tribes;
mod units;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::{debug, info};

use crate::decode::{RawRecord, read_record};
use crate::error::{Error, Result};
use crate::game::{City, Resource, Structure, Tile, Tribe, Unit};
use crate::memory::ReadMemory;
use crate::memory::layout::{RecordLayout, SectionPath, collection, sections};

/// Top-level sections every pass starts from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Turn,
    Map,
    Units,
    Tribes,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Turn, Section::Map, Section::Units, Section::Tribes];

    pub fn path(self) -> SectionPath {
        match self {
            Section::Turn => sections::TURN,
            Section::Map => sections::MAP,
            Section::Units => sections::UNITS,
            Section::Tribes => sections::TRIBES,
        }
    }
}

/// Resolved section addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBases {
    /// Address of the turn counter
    pub turn: u64,
    /// Address of the tile array pointer
    pub map: u64,
    /// Address of the unit list pointer
    pub units: u64,
    /// Address of the player list pointer
    pub tribes: u64,
}

/// What to do when an element of a collection resolves to address 0.
///
/// Only a failed read along the element chain produces 0. A null element
/// pointer still has the final offset added, so it resolves to a small
/// non-zero address and yields a zero-filled record instead of a hole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolePolicy {
    /// Treat the hole as the end of the collection
    #[default]
    Terminate,
    /// Skip the hole and keep iterating
    Skip,
}

impl HolePolicy {
    pub fn stops_iteration(self) -> bool {
        matches!(self, HolePolicy::Terminate)
    }
}

/// One extraction pass
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    pub turn: u16,
    /// Side length of the square map
    pub map_size: u16,
    /// Counts as reported by the target
    pub tile_count: u16,
    pub unit_count: u16,
    pub tribe_count: u16,
    pub tribes: BTreeMap<u16, Tribe>,
    pub tiles: BTreeMap<u32, Tile>,
    pub structures: BTreeMap<u32, Structure>,
    pub cities: BTreeMap<u32, City>,
    pub resources: BTreeMap<u32, Resource>,
    /// Keyed by the tile the unit stands on; the last unit read wins
    pub units: BTreeMap<u32, Unit>,
}

impl Snapshot {
    pub fn new(turn: u16) -> Self {
        Self {
            captured_at: Utc::now(),
            turn,
            map_size: 0,
            tile_count: 0,
            unit_count: 0,
            tribe_count: 0,
            tribes: BTreeMap::new(),
            tiles: BTreeMap::new(),
            structures: BTreeMap::new(),
            cities: BTreeMap::new(),
            resources: BTreeMap::new(),
            units: BTreeMap::new(),
        }
    }
}

/// Walks the target's memory and builds a [`Snapshot`]
pub struct Extractor<'a, R: ReadMemory> {
    reader: &'a R,
    hole_policy: HolePolicy,
}

impl<'a, R: ReadMemory> Extractor<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self {
            reader,
            hole_policy: HolePolicy::default(),
        }
    }

    pub fn with_hole_policy(mut self, hole_policy: HolePolicy) -> Self {
        self.hole_policy = hole_policy;
        self
    }

    /// Resolve one section from the module base
    pub fn resolve_section(&self, section: Section) -> u64 {
        let path = section.path();
        let base = self.reader.base_address().wrapping_add(path.module_offset);
        self.reader.resolve(base, path.chain)
    }

    /// Resolve all four sections, failing on the first that is 0
    pub fn resolve_sections(&self) -> Result<SectionBases> {
        let mut resolved = [0u64; 4];
        for (slot, section) in resolved.iter_mut().zip(Section::ALL) {
            *slot = self.resolve_section(section);
            debug!("section {}: 0x{:X}", section, *slot);
        }

        if let Some(i) = resolved.iter().position(|&address| address == 0) {
            return Err(Error::SectionUnresolved(Section::ALL[i]));
        }

        let [turn, map, units, tribes] = resolved;
        Ok(SectionBases {
            turn,
            map,
            units,
            tribes,
        })
    }

    /// Run a full pass
    pub fn extract(&self) -> Result<Snapshot> {
        let bases = self.resolve_sections()?;

        let turn = self.reader.read_u16(bases.turn).unwrap_or_else(|e| {
            debug!("turn counter unreadable: {}", e);
            0
        });

        let mut snapshot = Snapshot::new(turn);
        self.extract_tribes(bases.tribes, &mut snapshot);
        self.extract_tiles(bases.map, &mut snapshot);
        self.extract_units(bases.units, &mut snapshot);

        info!(
            "Extracted turn {}: {} tribes, {} tiles, {} units",
            snapshot.turn,
            snapshot.tribes.len(),
            snapshot.tiles.len(),
            snapshot.units.len()
        );

        Ok(snapshot)
    }

    /// Element count of the list whose pointer lives at `holder`
    fn read_count(&self, holder: u64, section: Section) -> u16 {
        let address = self.reader.resolve(holder, collection::COUNT);
        self.reader.read_u16(address).unwrap_or_else(|e| {
            debug!("{} count unreadable: {}", section, e);
            0
        })
    }

    /// Whether to stop iterating after a hole at `index`
    fn stop_at_hole(&self, section: Section, index: u64) -> bool {
        let stop = self.hole_policy.stops_iteration();
        debug!(
            "{} element {} resolved to 0, {}",
            section,
            index,
            if stop { "stopping" } else { "skipping" }
        );
        stop
    }

    fn record_or_zeroed(&self, address: u64, layout: RecordLayout) -> RawRecord {
        read_record(self.reader, address, layout).unwrap_or_else(|e| {
            debug!(
                "{} record at 0x{:X} unreadable, using zeros: {}",
                layout.name, address, e
            );
            RawRecord::zeroed(layout)
        })
    }
}
