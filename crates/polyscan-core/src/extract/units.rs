use crate::decode::{VALUE_LIST, read_list};
use crate::extract::{Extractor, Section, Snapshot};
use crate::game::{Unit, tile_index};
use crate::memory::ReadMemory;
use crate::memory::layout::{collection, unit};

impl<R: ReadMemory> Extractor<'_, R> {
    pub(super) fn extract_units(&self, holder: u64, snapshot: &mut Snapshot) {
        let count = self.read_count(holder, Section::Units);
        snapshot.unit_count = count;

        for index in 0..count as u64 {
            let handle = self.reader.resolve(
                holder,
                &[
                    collection::ITEMS_FIELD,
                    collection::slot(index),
                    unit::HANDLE,
                ],
            );
            if handle == 0 {
                if self.stop_at_hole(Section::Units, index) {
                    break;
                }
                continue;
            }

            let unit = self.read_unit(handle);
            let key = tile_index(unit.x, unit.y, snapshot.map_size);
            snapshot.units.insert(key, unit);
        }
    }

    /// `handle` is the field holding the unit state pointer
    fn read_unit(&self, handle: u64) -> Unit {
        let reader = self.reader;
        let record = self.record_or_zeroed(
            reader.resolve(handle, &[unit::RECORD.start]),
            unit::RECORD,
        );

        // The transport sub-object is optional; only read through it when present
        let passenger = reader.resolve(handle, unit::PASSENGER);
        let passenger_id = if passenger != 0 {
            reader.read_u16(passenger).unwrap_or(0)
        } else {
            0
        };

        Unit {
            owner: record.u16(unit::OWNER),
            unit_type: record.u16(unit::TYPE),
            x: record.u16(unit::X),
            y: record.u16(unit::Y),
            prev_x: record.u16(unit::PREV_X),
            prev_y: record.u16(unit::PREV_Y),
            home_x: record.u16(unit::HOME_X),
            home_y: record.u16(unit::HOME_Y),
            hp: record.u16(unit::HP),
            kills: record.u16(unit::KILLS),
            promoted: record.flag(unit::PROMOTED),
            moved: record.flag(unit::MOVED),
            attacked: record.flag(unit::ATTACKED),
            flipped: record.flag(unit::FLIPPED),
            direction: record.u16(unit::DIRECTION),
            created_turn: record.u16(unit::CREATED_TURN),
            passenger_id,
            effects: read_list(reader, reader.resolve(handle, &[unit::EFFECTS]), VALUE_LIST),
        }
    }
}
