//! Map files: a JSON array of rows, each cell a `[kind, height]` pair.
//!
//! Kind codes are 0 = empty, 1 = wall, 2 = window, 3 = solid.  A cell may
//! carry the string `"P"` instead of a code: the spawn marker.  It is a
//! load-time artifact only - the cell is rewritten to empty and the spawn
//! position recorded; physics and rendering never see it, and `save` does
//! not re-emit it.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::world::{GridError, TILE_SIZE, Tile, TileGrid, TileKind};

const SPAWN_MARKER: &str = "P";

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("unknown tile code {code} at ({col}, {row})")]
    UnknownTileCode { code: i64, col: usize, row: usize },

    #[error("unknown tile marker {marker:?} at ({col}, {row})")]
    UnknownMarker {
        marker: String,
        col: usize,
        row: usize,
    },
}

/*──────────────────────────── Raw format ───────────────────────────*/

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKind {
    Code(i64),
    Marker(String),
}

type RawCell = (RawKind, i64);

fn kind_from_code(code: i64, col: usize, row: usize) -> Result<TileKind, MapError> {
    match code {
        0 => Ok(TileKind::Empty),
        1 => Ok(TileKind::Wall),
        2 => Ok(TileKind::Window),
        3 => Ok(TileKind::Solid),
        _ => Err(MapError::UnknownTileCode { code, col, row }),
    }
}

fn code_from_kind(kind: TileKind) -> i64 {
    match kind {
        TileKind::Empty => 0,
        TileKind::Wall => 1,
        TileKind::Window => 2,
        TileKind::Solid => 3,
    }
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// A parsed map: the grid, plus the spawn position if the file carried a
/// marker (the last marker wins).
#[derive(Debug)]
pub struct LoadedMap {
    pub grid: TileGrid,
    pub spawn: Option<Vec2>,
}

/// Parse map JSON.  Grid invariants (non-empty, even rows) are enforced
/// by `TileGrid::from_rows` and surface as `MapError::Grid`.
pub fn parse(text: &str) -> Result<LoadedMap, MapError> {
    let raw: Vec<Vec<RawCell>> = serde_json::from_str(text)?;

    let mut spawn = None;
    let mut rows = Vec::with_capacity(raw.len());
    for (row, raw_row) in raw.into_iter().enumerate() {
        let mut tiles = Vec::with_capacity(raw_row.len());
        for (col, (kind, height)) in raw_row.into_iter().enumerate() {
            let tile = match kind {
                RawKind::Code(code) => {
                    Tile::new(kind_from_code(code, col, row)?, height as i32)
                }
                RawKind::Marker(m) if m == SPAWN_MARKER => {
                    spawn = Some(tile_centre(col, row));
                    Tile::EMPTY
                }
                RawKind::Marker(marker) => {
                    return Err(MapError::UnknownMarker { marker, col, row });
                }
            };
            tiles.push(tile);
        }
        rows.push(tiles);
    }

    Ok(LoadedMap {
        grid: TileGrid::from_rows(rows)?,
        spawn,
    })
}

pub fn load(path: impl AsRef<Path>) -> Result<LoadedMap, MapError> {
    parse(&fs::read_to_string(path)?)
}

/// Write the grid back in the on-disk format.  Spawn markers are not
/// re-emitted.
pub fn save(path: impl AsRef<Path>, grid: &TileGrid) -> Result<(), MapError> {
    Ok(fs::write(path, encode(grid)?)?)
}

/// First-run behaviour: create `path` with the built-in map when it does
/// not exist yet, then load it.
pub fn load_or_create(path: impl AsRef<Path>) -> Result<LoadedMap, MapError> {
    let path = path.as_ref();
    if !path.exists() {
        fs::write(path, default_map_json())?;
    }
    load(path)
}

/// The built-in level (the shipped `map.json` content).
pub fn default_map() -> LoadedMap {
    parse(&default_map_json()).expect("built-in map is well-formed")
}

/*====================================================================*/
/*                  Encoding / built-in layout                        */
/*====================================================================*/

fn encode(grid: &TileGrid) -> Result<String, MapError> {
    let rows: Vec<Vec<(i64, i32)>> = grid
        .rows()
        .map(|row| {
            row.iter()
                .map(|t| (code_from_kind(t.kind), t.height_offset))
                .collect()
        })
        .collect();
    Ok(serde_json::to_string(&rows)?)
}

fn tile_centre(col: usize, row: usize) -> Vec2 {
    Vec2::new(
        (col as f32 + 0.5) * TILE_SIZE,
        (row as f32 + 0.5) * TILE_SIZE,
    )
}

/// `#` wall, `.` empty, `w` window with a height-1 sill, `P` spawn.
const DEFAULT_LAYOUT: [&str; 9] = [
    "####################",
    "#P..#w.#..w#..w#...#",
    "#.#.##.##.##.###.#.#",
    "#.#............#.#.#",
    "#.###.######.#.#.#.#",
    "#...#w.w.w.w.#.....#",
    "#.##############.#.#",
    "#..................#",
    "####################",
];

fn default_map_json() -> String {
    let rows: Vec<Vec<serde_json::Value>> = DEFAULT_LAYOUT
        .iter()
        .map(|line| {
            line.chars()
                .map(|c| match c {
                    '#' => serde_json::json!([1, 0]),
                    'w' => serde_json::json!([2, 1]),
                    'P' => serde_json::json!(["P", 0]),
                    _ => serde_json::json!([0, 0]),
                })
                .collect()
        })
        .collect();
    serde_json::Value::from(rows).to_string()
}

/*====================================================================*/
/*                               Tests                                */
/*====================================================================*/
