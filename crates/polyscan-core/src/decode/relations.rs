use tracing::debug;

use crate::decode::read_record;
use crate::game::{Relation, RelationSlot};
use crate::memory::ReadMemory;
use crate::memory::layout::relation;

/// Decode a relations dictionary as a fixed-stride slot table.
///
/// Exactly `slot_count` slots are visited (the tribe count, not the
/// dictionary's own size). A slot whose value record cannot be read is
/// dropped; an unreadable key reads as 0.
pub fn read_relation_slots<R: ReadMemory>(
    reader: &R,
    handle: u64,
    slot_count: usize,
) -> Vec<RelationSlot> {
    let entries = reader.resolve(handle, relation::ENTRIES);
    let mut slots = Vec::new();

    for i in 0..slot_count as u64 {
        let stride = i * relation::SLOT_STRIDE;

        let key = reader
            .read_u8(reader.resolve(entries, &[relation::KEY + stride]))
            .unwrap_or(0);

        let value = reader.resolve(
            entries,
            &[relation::VALUE + stride, relation::RECORD.start],
        );
        let record = match read_record(reader, value, relation::RECORD) {
            Ok(record) => record,
            Err(e) => {
                debug!("relation slot {} skipped: {}", i, e);
                continue;
            }
        };

        slots.push(RelationSlot {
            key,
            relation: Relation {
                state: record.flag(relation::STATE),
                last_attack_turn: record.u16(relation::LAST_ATTACK_TURN),
                embassy_level: record.u16(relation::EMBASSY_LEVEL),
                last_peace_broken_turn: record.u16(relation::LAST_PEACE_BROKEN_TURN),
                first_meet: record.u16(relation::FIRST_MEET),
                embassy_build_turn: record.u16(relation::EMBASSY_BUILD_TURN),
                previous_attack_turn: record.u16(relation::PREVIOUS_ATTACK_TURN),
            },
        });
    }

    slots
}
