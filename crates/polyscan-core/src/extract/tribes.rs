use tracing::debug;

use crate::decode::{
    ListLayout, VALUE_LIST, read_list, read_record, read_relation_slots, read_string,
};
use crate::extract::{Extractor, Section, Snapshot};
use crate::game::{Task, Tribe};
use crate::memory::ReadMemory;
use crate::memory::layout::{collection, task, tribe};

impl<R: ReadMemory> Extractor<'_, R> {
    pub(super) fn extract_tribes(&self, holder: u64, snapshot: &mut Snapshot) {
        let count = self.read_count(holder, Section::Tribes);
        snapshot.tribe_count = count;

        for index in 0..count as u64 {
            let slot = self.reader.resolve(holder, &[collection::slot(index)]);
            if slot == 0 {
                if self.stop_at_hole(Section::Tribes, index) {
                    break;
                }
                continue;
            }

            let tribe = self.read_tribe(slot, snapshot.turn, count);
            snapshot.tribes.insert(tribe.owner, tribe);
        }
    }

    /// `slot` is the array slot holding the player state pointer
    fn read_tribe(&self, slot: u64, turn: u16, tribe_count: u16) -> Tribe {
        let reader = self.reader;
        let handle = |field: u64| reader.resolve(slot, &[field]);

        let record = self.record_or_zeroed(handle(tribe::RECORD.start), tribe::RECORD);

        Tribe {
            owner: record.u16(tribe::OWNER),
            username: read_string(reader, handle(tribe::USERNAME)),
            autoplay: record.flag(tribe::AUTOPLAY),
            score: record.u16(tribe::SCORE),
            currency: record.u16(tribe::CURRENCY),
            tech: read_list(reader, handle(tribe::TECH), VALUE_LIST),
            tribe_id: record.u16(tribe::TRIBE_ID),
            killer_id: record.u16(tribe::KILLER_ID),
            kills: record.u16(tribe::KILLS),
            tasks: self.read_tasks(handle(tribe::TASKS), turn),
            built_unique_improvements: read_list(
                reader,
                handle(tribe::BUILT_UNIQUE_IMPROVEMENTS),
                VALUE_LIST,
            ),
            known_players: read_list(
                reader,
                handle(tribe::KNOWN_PLAYERS),
                ListLayout::bytes(tribe::MAX_KNOWN_PLAYERS),
            ),
            relations: read_relation_slots(
                reader,
                handle(tribe::RELATIONS),
                tribe_count as usize,
            ),
            killed_turn: record.u16(tribe::KILLED_TURN),
            resigned_turn: record.u16(tribe::RESIGNED_TURN),
        }
    }

    /// Started tasks of the task list at `handle`
    fn read_tasks(&self, handle: u64, turn: u16) -> Vec<Task> {
        let reader = self.reader;

        let count = match reader.read_u16(reader.resolve(handle, collection::COUNT)) {
            Ok(count) if count > 0 => count as usize,
            _ => return Vec::new(),
        };
        if count > tribe::MAX_TASKS {
            debug!("task list clamped from {} to {}", count, tribe::MAX_TASKS);
        }

        let items = reader.resolve(handle, &[collection::ITEMS_FIELD]);
        (0..count.min(tribe::MAX_TASKS) as u64)
            .filter_map(|i| {
                let address = reader.resolve(items, &[collection::slot(i), task::RECORD.start]);
                let record = read_record(reader, address, task::RECORD).ok()?;
                Task::from_raw(
                    record.u8(task::STARTED),
                    record.u8(task::COMPLETED),
                    record.u8(task::TURNS),
                    turn,
                )
            })
            .collect()
    }
}
