//! Delimited text format consumed by the AI driver.
//!
//! ```text
//! mapSize,turn
//! tribe;tribe;...;
//! index;tile;structure;resource;unit;city+index;...+
//! ```
//!
//! Fields are separated by `,`, list items by `&`. Booleans are `1`/`0`.
//! Optional per-tile sub-records are left empty but their `;` is always
//! written.
//!
//! Records carry no trailing `,` before their closing `;`, `+` or newline.
//! The older reader wrote one there (`11,5,`); consumers read fields by
//! position and accept both.

use crate::decode::join_values;
use crate::error::Result;
use crate::export::SnapshotFormat;
use crate::extract::Snapshot;
use crate::game::{City, RelationSlot, Structure, Task, Tile, Tribe, Unit};

/// Text exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl SnapshotFormat for TextExporter {
    fn render(&self, snapshot: &Snapshot) -> Result<String> {
        Ok(format_snapshot(snapshot))
    }
}

/// Serialize a snapshot
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut out = format!("{},{}\n", snapshot.map_size, snapshot.turn);

    for tribe in snapshot.tribes.values() {
        out.push_str(&format_tribe(tribe));
        out.push(';');
    }
    out.push('\n');

    for (index, tile) in &snapshot.tiles {
        out.push_str(&index.to_string());
        out.push(';');
        out.push_str(&format_tile(tile));
        out.push(';');
        if let Some(structure) = snapshot.structures.get(index) {
            out.push_str(&format_structure(structure));
        }
        out.push(';');
        if let Some(resource) = snapshot.resources.get(index) {
            out.push_str(&resource.id.to_string());
        }
        out.push(';');
        if let Some(unit) = snapshot.units.get(index).filter(|u| u.is_present()) {
            out.push_str(&format_unit(unit));
        }
        out.push(';');
        if let Some(city) = snapshot.cities.get(index) {
            out.push_str(&format_city(city));
        }
        out.push('+');
    }

    out
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

pub fn format_tribe(tribe: &Tribe) -> String {
    [
        tribe.owner.to_string(),
        tribe.username.clone(),
        flag(tribe.autoplay),
        tribe.score.to_string(),
        tribe.currency.to_string(),
        join_values(&tribe.tech),
        tribe.tribe_id.to_string(),
        tribe.killer_id.to_string(),
        tribe.kills.to_string(),
        format_tasks(&tribe.tasks),
        join_values(&tribe.built_unique_improvements),
        join_values(&tribe.known_players),
        format_relations(&tribe.relations),
        tribe.killed_turn.to_string(),
        tribe.resigned_turn.to_string(),
    ]
    .join(",")
}

/// `started-completed[-turns]` items joined by `&`
fn format_tasks(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|task| match task.turns {
            Some(turns) => format!("{}-{}-{}", task.started, task.completed, turns),
            None => format!("{}-{}", task.started, task.completed),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// `key_state-a-b-c-d-e-f` items joined by `&`
fn format_relations(slots: &[RelationSlot]) -> String {
    slots
        .iter()
        .map(|slot| {
            let r = &slot.relation;
            format!(
                "{}_{}-{}-{}-{}-{}-{}-{}",
                slot.key,
                flag(r.state),
                r.last_attack_turn,
                r.embassy_level,
                r.last_peace_broken_turn,
                r.first_meet,
                r.embassy_build_turn,
                r.previous_attack_turn
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub fn format_tile(tile: &Tile) -> String {
    [
        tile.terrain.to_string(),
        tile.owner.to_string(),
        join_values(&tile.explorers),
        flag(tile.has_road),
        flag(tile.has_route),
        flag(tile.had_route),
        tile.capital_of.to_string(),
        tile.ruling_city_x.to_string(),
        tile.ruling_city_y.to_string(),
        tile.climate.to_string(),
        tile.skin_type.to_string(),
        tile.x.to_string(),
        tile.y.to_string(),
    ]
    .join(",")
}

pub fn format_structure(structure: &Structure) -> String {
    format!(
        "{},{},{},{}",
        structure.id, structure.level, structure.founded_turn, structure.reward
    )
}

pub fn format_unit(unit: &Unit) -> String {
    [
        unit.owner.to_string(),
        unit.x.to_string(),
        unit.y.to_string(),
        unit.unit_type.to_string(),
        unit.hp.to_string(),
        flag(unit.promoted),
        unit.kills.to_string(),
        unit.prev_x.to_string(),
        unit.prev_y.to_string(),
        unit.home_x.to_string(),
        unit.home_y.to_string(),
        unit.direction.to_string(),
        flag(unit.flipped),
        unit.created_turn.to_string(),
        flag(unit.moved),
        flag(unit.attacked),
        unit.passenger_id.to_string(),
        join_values(&unit.effects),
    ]
    .join(",")
}

pub fn format_city(city: &City) -> String {
    [
        city.name.clone(),
        city.population.to_string(),
        city.progress.to_string(),
        join_values(&city.rewards),
        city.production.to_string(),
        city.border_size.to_string(),
        flag(city.connected_to_capital),
        city.level.to_string(),
    ]
    .join(",")
}
