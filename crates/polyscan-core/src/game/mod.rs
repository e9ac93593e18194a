mod structure;
mod tile;
mod tribe;
mod unit;

pub use structure::*;
pub use tile::*;
pub use tribe::*;
pub use unit::*;
