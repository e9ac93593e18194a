use crate::decode::{ListLayout, VALUE_LIST, read_list, read_string};
use crate::extract::{Extractor, Section, Snapshot};
use crate::game::{City, Resource, Structure, Tile, map_side, unpack_level_progress};
use crate::memory::ReadMemory;
use crate::memory::layout::{collection, resource, structure, tile};

impl<R: ReadMemory> Extractor<'_, R> {
    pub(super) fn extract_tiles(&self, holder: u64, snapshot: &mut Snapshot) {
        let count = self.read_count(holder, Section::Map);
        snapshot.tile_count = count;
        snapshot.map_size = map_side(count);

        let explorers = ListLayout::bytes(snapshot.tribe_count as usize);

        for index in 0..count as u32 {
            let handle = self
                .reader
                .resolve(holder, &[collection::slot(index as u64), tile::HANDLE]);
            if handle == 0 {
                if self.stop_at_hole(Section::Map, index as u64) {
                    break;
                }
                continue;
            }

            let tile = self.read_tile(handle, index, explorers);
            self.read_improvement(handle, index, snapshot);
            if let Some(resource) = self.read_resource(handle) {
                snapshot.resources.insert(index, resource);
            }
            snapshot.tiles.insert(index, tile);
        }
    }

    /// `handle` is the field holding the tile data pointer
    fn read_tile(&self, handle: u64, index: u32, explorers: ListLayout) -> Tile {
        let record = self.record_or_zeroed(
            self.reader.resolve(handle, &[tile::RECORD.start]),
            tile::RECORD,
        );

        Tile {
            index,
            x: record.u16(tile::X),
            y: record.u16(tile::Y),
            terrain: record.u16(tile::TERRAIN),
            owner: record.u8(tile::OWNER) as u16,
            explorers: read_list(
                self.reader,
                self.reader.resolve(handle, &[tile::EXPLORERS]),
                explorers,
            ),
            has_road: record.flag(tile::HAS_ROAD),
            has_route: record.flag(tile::HAS_ROUTE),
            had_route: record.flag(tile::HAD_ROUTE),
            capital_of: record.u8(tile::CAPITAL_OF) as u16,
            ruling_city_x: record.u16(tile::RULING_CITY_X),
            ruling_city_y: record.u16(tile::RULING_CITY_Y),
            climate: record.u16(tile::CLIMATE),
            skin_type: record.u16(tile::SKIN_TYPE),
        }
    }

    /// Structure on the tile, plus its city if the structure is a named city
    fn read_improvement(&self, handle: u64, index: u32, snapshot: &mut Snapshot) {
        let reader = self.reader;
        let improvement = reader.resolve(handle, &[tile::IMPROVEMENT]);

        let id = match reader.read_u16(reader.resolve(improvement, &[structure::ID])) {
            Ok(id) if id > 0 => id,
            _ => return,
        };

        let record = self.record_or_zeroed(
            reader.resolve(improvement, &[structure::RECORD.start]),
            structure::RECORD,
        );
        let mut level = record.u16(structure::LEVEL);

        let name = read_string(reader, reader.resolve(improvement, &[structure::NAME]));
        if !name.is_empty() {
            let (city_level, progress) = unpack_level_progress(record.u64(structure::LEVEL_RAW));
            level = city_level;

            snapshot.cities.insert(
                index,
                City {
                    name,
                    population: record.u16(structure::POPULATION),
                    progress,
                    rewards: read_list(
                        reader,
                        reader.resolve(improvement, &[structure::REWARDS]),
                        VALUE_LIST,
                    ),
                    production: record.u16(structure::PRODUCTION),
                    border_size: record.u16(structure::BORDER_SIZE),
                    connected_to_capital: record.flag(structure::CONNECTED_TO_CAPITAL),
                    level,
                },
            );
        }

        snapshot.structures.insert(
            index,
            Structure {
                id,
                level,
                founded_turn: record.u16(structure::FOUNDED),
                reward: record.u16(structure::REWARD),
            },
        );
    }

    fn read_resource(&self, handle: u64) -> Option<Resource> {
        let address = self
            .reader
            .resolve(handle, &[tile::RESOURCE, resource::ID]);
        match self.reader.read_u16(address) {
            Ok(id) if id > 0 => Some(Resource { id }),
            _ => None,
        }
    }
}
