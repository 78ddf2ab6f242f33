//! Text stage layouts.
//!
//! One character per tile, first line at the top of the stage:
//!
//! | glyph | meaning |
//! |-------|---------|
//! | `#` | solid wall |
//! | `.` or space | empty |
//! | `P` | player start (exactly one) |
//! | `^` / `v` | floor / ceiling spike |
//! | `s` | spring |
//! | `g` | gravity flipper |
//! | `D` | exit door |

use std::fmt;
use glam::Vec2;
use leap_engine::{Tile, TileMap};

/// Atlas cell of the wall tile.
const WALL_TILE: (f32, f32) = (0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    FloorSpike,
    CeilingSpike,
    Spring,
    Flipper,
    Door,
}

/// A non-tile glyph, placed at its tile's centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub center: Vec2,
}

#[derive(Debug, Clone)]
pub struct StageLayout {
    pub map: TileMap,
    /// Centre of the player start tile.
    pub player_start: Vec2,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    Empty,
    RaggedRow { line: usize, expected: usize, found: usize },
    UnknownGlyph { line: usize, column: usize, glyph: char },
    MissingPlayer,
    DuplicatePlayer { line: usize, column: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "layout has no rows"),
            LayoutError::RaggedRow { line, expected, found } => {
                write!(f, "line {} is {} tiles wide, expected {}", line, found, expected)
            }
            LayoutError::UnknownGlyph { line, column, glyph } => {
                write!(f, "unknown glyph {:?} at line {}, column {}", glyph, line, column)
            }
            LayoutError::MissingPlayer => write!(f, "layout has no player start"),
            LayoutError::DuplicatePlayer { line, column } => {
                write!(f, "second player start at line {}, column {}", line, column)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Parse a layout. Line and column numbers in errors are 1-based.
pub fn parse_layout<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Result<StageLayout, LayoutError> {
    let width = rows.first().ok_or(LayoutError::Empty)?.as_ref().chars().count();
    let height = rows.len();
    let mut map = TileMap::new(width as u32, height as u32, tile_size);
    let mut player_start = None;
    let mut markers = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let found = row.chars().count();
        if found != width {
            return Err(LayoutError::RaggedRow { line: i + 1, expected: width, found });
        }

        let ty = (height - 1 - i) as i32;
        for (tx, glyph) in row.chars().enumerate() {
            let tx = tx as i32;
            let center = map.tile_to_world(tx, ty);
            let kind = match glyph {
                '#' => {
                    map.set(tx, ty, Some(Tile::solid(WALL_TILE.0, WALL_TILE.1)));
                    continue;
                }
                '.' | ' ' => continue,
                'P' => {
                    if player_start.is_some() {
                        return Err(LayoutError::DuplicatePlayer { line: i + 1, column: tx as usize + 1 });
                    }
                    player_start = Some(center);
                    continue;
                }
                '^' => MarkerKind::FloorSpike,
                'v' => MarkerKind::CeilingSpike,
                's' => MarkerKind::Spring,
                'g' => MarkerKind::Flipper,
                'D' => MarkerKind::Door,
                other => {
                    return Err(LayoutError::UnknownGlyph { line: i + 1, column: tx as usize + 1, glyph: other })
                }
            };
            markers.push(Marker { kind, center });
        }
    }

    let player_start = player_start.ok_or(LayoutError::MissingPlayer)?;
    if !markers.iter().any(|m| m.kind == MarkerKind::Door) {
        log::warn!("layout has no exit door");
    }

    Ok(StageLayout { map, player_start, markers })
}
