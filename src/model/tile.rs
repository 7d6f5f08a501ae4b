use serde::{Deserialize, Serialize};

use super::TileTypeId;

/// One grid cell: its slot coordinates and current type. Owned exclusively
/// by `GridState`; `x`/`y` always equal the owning slot's indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub type_id: TileTypeId,
}

impl Tile {
    pub fn new(x: usize, y: usize, type_id: TileTypeId) -> Self {
        Self { x, y, type_id }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}):{}", self.x, self.y, self.type_id)
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}):{}", self.x, self.y, self.type_id)
    }
}
