mod grid;

pub use grid::{GridError, TILE_SIZE, Tile, TileGrid, TileKind};
