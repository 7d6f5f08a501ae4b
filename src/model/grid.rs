use log::trace;
use rand::Rng;

use super::{Tile, TileTypeCatalog, TileTypeId};

/// Live board state: a `width x height` matrix of tiles. Every cell always
/// holds a valid type; refill and shuffle replace types in place, so no cell
/// is ever observed empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl GridState {
    /// Builds a fully-populated grid with uniform-random types.
    pub fn new<R: Rng>(
        width: usize,
        height: usize,
        catalog: &TileTypeCatalog,
        rng: &mut R,
    ) -> Self {
        let mut grid = Self {
            width,
            height,
            tiles: vec![Tile::new(0, 0, TileTypeId(0)); width * height],
        };
        grid.randomize(catalog, rng);
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> TileTypeId {
        self.tiles[self.index(x, y)].type_id
    }

    pub fn set(&mut self, x: usize, y: usize, type_id: TileTypeId) {
        let index = self.index(x, y);
        self.tiles[index].type_id = type_id;
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    pub fn swap_types(&mut self, a: (usize, usize), b: (usize, usize)) {
        let type_a = self.get(a.0, a.1);
        let type_b = self.get(b.0, b.1);
        self.set(a.0, a.1, type_b);
        self.set(b.0, b.1, type_a);
    }

    /// Re-types every tile from a uniform draw, re-asserting the coordinate
    /// invariant on each slot.
    pub fn randomize<R: Rng>(&mut self, catalog: &TileTypeCatalog, rng: &mut R) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.index(x, y);
                self.tiles[index] = Tile::new(x, y, catalog.random_id(rng));
            }
        }
        trace!(target: "grid", "Randomized {}x{} grid", self.width, self.height);
    }

    /// Immutable snapshot handed to the match finder, so the finder cannot
    /// mutate live state.
    pub fn snapshot(&self) -> TileMatrix {
        TileMatrix {
            width: self.width,
            height: self.height,
            types: self.tiles.iter().map(|tile| tile.type_id).collect(),
        }
    }
}

/// Read-only matrix of tile types keyed by coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMatrix {
    width: usize,
    height: usize,
    types: Vec<TileTypeId>,
}

impl TileMatrix {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> TileTypeId {
        self.types[y * self.width + x]
    }

    #[cfg(test)]
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        let types = rows
            .iter()
            .flat_map(|row| row.iter().map(|&id| TileTypeId(id)))
            .collect();
        Self {
            width,
            height,
            types,
        }
    }
}
