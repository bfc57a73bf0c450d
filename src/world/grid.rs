use glam::Vec2;
use thiserror::Error;

/// Edge length of one grid cell in world units.
pub const TILE_SIZE: f32 = 50.0;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("tile ({col}, {row}) outside {width}x{height} grid")]
    OutOfRange {
        col: usize,
        row: usize,
        width: usize,
        height: usize,
    },

    #[error("map must contain at least one row with at least one tile")]
    EmptyGrid,

    #[error("row {row} has {found} tiles, expected {expected}")]
    UnevenRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Closed set of tile kinds.  The map loader owns the mapping from the
/// on-disk integer codes; nothing else in the crate sees raw codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Empty,
    Wall,
    Window,
    Solid,
}

impl TileKind {
    /// Does this kind block the player?  `Window` does not - it only
    /// terminates rays.
    #[inline]
    pub fn blocks_movement(self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Solid)
    }

    /// Does a marching ray stop here?  Everything except `Empty`.
    #[inline]
    pub fn stops_ray(self) -> bool {
        !matches!(self, TileKind::Empty)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    /// Vertical shift of the projected column, in height-offset units
    /// (sills, parapets).  Zero for ordinary tiles.
    pub height_offset: i32,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        kind: TileKind::Empty,
        height_offset: 0,
    };

    #[inline]
    pub fn new(kind: TileKind, height_offset: i32) -> Self {
        Self {
            kind,
            height_offset,
        }
    }
}

/// Rectangular, row-major tile map.  Immutable after construction; a map
/// switch replaces the whole grid (see `SimulationState::swap_grid`).
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Build a grid from row-major tile rows.  Fails fast on an empty map
    /// or unequal row lengths; a grid that constructs is trusted from
    /// then on.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::EmptyGrid);
        }
        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(GridError::UnevenRows {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
        }

        let height = rows.len();
        let tiles = rows.into_iter().flatten().collect();
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid footprint in world units.
    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    /// Checked tile lookup by index.  The engine itself never calls this
    /// without an in-range index; the error exists for external misuse.
    pub fn tile_at(&self, col: usize, row: usize) -> Result<Tile, GridError> {
        if col >= self.width || row >= self.height {
            return Err(GridError::OutOfRange {
                col,
                row,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.tiles[row * self.width + col])
    }

    /// World point -> tile indices, `None` outside the grid.  Uses an
    /// explicit floor so slightly-negative coordinates do not alias
    /// column/row zero.
    pub fn world_to_tile(&self, p: Vec2) -> Option<(usize, usize)> {
        let col = (p.x / TILE_SIZE).floor();
        let row = (p.y / TILE_SIZE).floor();
        if col >= 0.0 && row >= 0.0 && col < self.width as f32 && row < self.height as f32 {
            Some((col as usize, row as usize))
        } else {
            None
        }
    }

    /// Tile under a world point, `None` outside the grid.
    #[inline]
    pub fn tile_at_world(&self, p: Vec2) -> Option<Tile> {
        self.world_to_tile(p)
            .map(|(col, row)| self.tiles[row * self.width + col])
    }

    /// The one solidity predicate shared by the physics integrator and
    /// the ray marcher's stopping rule.  The void beyond the map counts
    /// as solid, so the player can never leave the grid.
    #[inline]
    pub fn is_solid_world_point(&self, p: Vec2) -> bool {
        match self.tile_at_world(p) {
            Some(tile) => tile.kind.blocks_movement(),
            None => true,
        }
    }

    /// Row-major view of the tiles, one slice per row.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks_exact(self.width)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn open_box(width: usize, height: usize) -> TileGrid {
        let rows = (0..height)
            .map(|row| {
                (0..width)
                    .map(|col| {
                        let edge =
                            row == 0 || col == 0 || row == height - 1 || col == width - 1;
                        if edge {
                            Tile::new(TileKind::Wall, 0)
                        } else {
                            Tile::EMPTY
                        }
                    })
                    .collect()
            })
            .collect();
        TileGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn empty_map_is_rejected() {
        assert!(matches!(
            TileGrid::from_rows(Vec::new()),
            Err(GridError::EmptyGrid)
        ));
        assert!(matches!(
            TileGrid::from_rows(vec![Vec::new()]),
            Err(GridError::EmptyGrid)
        ));
    }

    #[test]
    fn uneven_rows_are_rejected() {
        let rows = vec![vec![Tile::EMPTY, Tile::EMPTY], vec![Tile::EMPTY]];
        assert!(matches!(
            TileGrid::from_rows(rows),
            Err(GridError::UnevenRows {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn tile_at_checks_bounds() {
        let grid = open_box(3, 3);
        assert_eq!(grid.tile_at(1, 1).unwrap(), Tile::EMPTY);
        assert!(matches!(
            grid.tile_at(3, 0),
            Err(GridError::OutOfRange { .. })
        ));
        assert!(matches!(
            grid.tile_at(0, 3),
            Err(GridError::OutOfRange { .. })
        ));
    }

    #[test]
    fn void_beyond_the_map_is_solid() {
        let grid = open_box(3, 3);
        let max = 3.0 * TILE_SIZE;
        assert!(grid.is_solid_world_point(Vec2::new(-1.0, 75.0)));
        assert!(grid.is_solid_world_point(Vec2::new(75.0, -1.0)));
        assert!(grid.is_solid_world_point(Vec2::new(max + 1.0, 75.0)));
        assert!(grid.is_solid_world_point(Vec2::new(75.0, max + 1.0)));
        // fractionally negative coordinates must not alias column 0
        assert!(grid.is_solid_world_point(Vec2::new(-0.5, -0.5)));
    }

    #[test]
    fn solidity_by_kind() {
        let rows = vec![vec![
            Tile::EMPTY,
            Tile::new(TileKind::Wall, 0),
            Tile::new(TileKind::Window, 0),
            Tile::new(TileKind::Solid, 0),
        ]];
        let grid = TileGrid::from_rows(rows).unwrap();
        let mid = TILE_SIZE / 2.0;
        assert!(!grid.is_solid_world_point(Vec2::new(0.0 * TILE_SIZE + mid, mid)));
        assert!(grid.is_solid_world_point(Vec2::new(1.0 * TILE_SIZE + mid, mid)));
        assert!(!grid.is_solid_world_point(Vec2::new(2.0 * TILE_SIZE + mid, mid)));
        assert!(grid.is_solid_world_point(Vec2::new(3.0 * TILE_SIZE + mid, mid)));
    }

    #[test]
    fn world_lookup_maps_to_indices() {
        let grid = open_box(4, 3);
        assert_eq!(grid.world_to_tile(Vec2::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(grid.world_to_tile(Vec2::new(199.9, 149.9)), Some((3, 2)));
        assert_eq!(grid.world_to_tile(Vec2::new(200.0, 75.0)), None);
        assert_eq!(grid.world_to_tile(Vec2::new(75.0, 150.0)), None);
    }
}
