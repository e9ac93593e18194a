use serde::Serialize;

/// One map cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub index: u32,
    pub x: u16,
    pub y: u16,
    pub terrain: u16,
    pub owner: u16,
    pub explorers: Vec<u16>,
    pub has_road: bool,
    pub has_route: bool,
    pub had_route: bool,
    pub capital_of: u16,
    pub ruling_city_x: u16,
    pub ruling_city_y: u16,
    pub climate: u16,
    pub skin_type: u16,
}

/// Resource lying on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub id: u16,
}

/// Side length of a square map holding `tile_count` tiles
pub fn map_side(tile_count: u16) -> u16 {
    (tile_count as u32).isqrt() as u16
}

/// Positional index of the cell at (`x`, `y`)
pub fn tile_index(x: u16, y: u16, side: u16) -> u32 {
    y as u32 * side as u32 + x as u32
}
