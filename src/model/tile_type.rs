use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a tile type. Tiles reference types by id; the
/// catalog owns the type definitions.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
pub struct TileTypeId(pub u8);

impl std::fmt::Display for TileTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl std::fmt::Debug for TileTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TileType {
    pub id: TileTypeId,
    /// Name of the visual asset the rendering collaborator resolves.
    pub asset: String,
}

impl TileType {
    pub fn new(id: u8, asset: &str) -> Self {
        Self {
            id: TileTypeId(id),
            asset: asset.to_string(),
        }
    }
}

/// Ordered set of tile types with uniform-random selection.
#[derive(Debug, Clone)]
pub struct TileTypeCatalog {
    types: Vec<TileType>,
}

impl TileTypeCatalog {
    pub fn new(types: Vec<TileType>) -> Self {
        Self { types }
    }

    /// Catalog with `n` generically-named types, asset names `tile-0`..`tile-n`.
    pub fn with_n_types(n: u8) -> Self {
        let types = (0..n)
            .map(|id| TileType::new(id, &format!("tile-{}", id)))
            .collect();
        Self { types }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> &[TileType] {
        &self.types
    }

    pub fn get(&self, id: TileTypeId) -> Option<&TileType> {
        self.types.iter().find(|tile_type| tile_type.id == id)
    }

    /// Uniform draw over the catalog. Panics on an empty catalog; engine
    /// construction rejects catalogs below the minimum run length.
    pub fn random_id<R: Rng>(&self, rng: &mut R) -> TileTypeId {
        self.types
            .choose(rng)
            .map(|tile_type| tile_type.id)
            .expect("catalog is never empty after setup validation")
    }
}
