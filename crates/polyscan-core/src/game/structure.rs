use serde::Serialize;

/// Improvement standing on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Structure {
    pub id: u16,
    pub level: u16,
    pub founded_turn: u16,
    pub reward: u16,
}

/// A named (owned) city
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub name: String,
    pub population: u16,
    pub progress: u16,
    pub rewards: Vec<u16>,
    pub production: u16,
    pub border_size: u16,
    pub connected_to_capital: bool,
    pub level: u16,
}

/// Split the packed city word into `(level, progress)`.
///
/// The level is the high half of the low 32 bits; progress is the high 32
/// bits divided by 65536.
pub fn unpack_level_progress(raw: u64) -> (u16, u16) {
    let level = ((raw & 0xFFFF_FFFF) >> 16) as u16;
    let progress = ((raw >> 32) / 65536) as u16;
    (level, progress)
}
