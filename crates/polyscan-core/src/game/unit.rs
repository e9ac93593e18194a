use serde::Serialize;

/// A unit on the board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub owner: u16,
    pub unit_type: u16,
    pub x: u16,
    pub y: u16,
    pub prev_x: u16,
    pub prev_y: u16,
    pub home_x: u16,
    pub home_y: u16,
    pub hp: u16,
    pub kills: u16,
    pub promoted: bool,
    pub moved: bool,
    pub attacked: bool,
    pub flipped: bool,
    pub direction: u16,
    pub created_turn: u16,
    /// Id of the carried unit, 0 when not transporting
    pub passenger_id: u16,
    pub effects: Vec<u16>,
}

impl Unit {
    /// Type 0 marks an empty unit slot
    pub fn is_present(&self) -> bool {
        self.unit_type != 0
    }
}
