//! Tile map: the level geometry entities collide against.
//!
//! Tiles are stored in row-major order with row 0 at the bottom (y grows up).
//! Coordinates outside the map are treated as solid so entities can never
//! leave the stage through its edges.

use crate::renderer::instance::RenderInstance;
use glam::{IVec2, Vec2};
use std::ops::RangeInclusive;

/// Boxes whose edge lies within this distance of a tile boundary do not
/// count as reaching into the neighbouring tile.
pub const EDGE_EPSILON: f32 = 1e-3;

/// A single tile in the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Column in the tileset atlas.
    pub col: f32,
    /// Row in the tileset atlas.
    pub row: f32,
    /// Whether entities collide with this tile.
    pub solid: bool,
}

impl Tile {
    /// A solid tile drawn from the given atlas cell.
    pub fn solid(col: f32, row: f32) -> Self {
        Self { col, row, solid: true }
    }

    /// A background tile entities pass through.
    pub fn decor(col: f32, row: f32) -> Self {
        Self { col, row, solid: false }
    }
}

#[derive(Debug, Clone)]
pub struct TileMap {
    /// Width of the map in tiles.
    pub width: u32,
    /// Height of the map in tiles.
    pub height: u32,
    /// Size of each tile in world units.
    pub tile_size: f32,
    /// World position of the bottom-left corner of tile (0, 0).
    pub origin: Vec2,
    tiles: Vec<Option<Tile>>,
}

impl TileMap {
    /// Create an empty map.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        let count = (width * height) as usize;
        Self {
            width,
            height,
            tile_size,
            origin: Vec2::ZERO,
            tiles: vec![None; count],
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }

    /// Tile at grid position (x, y). `None` for empty cells and out-of-map queries.
    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).and_then(|i| self.tiles[i].as_ref())
    }

    /// Set a tile. Writes outside the map are ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: Option<Tile>) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Fill a rectangular region with a tile.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, tile: Option<Tile>) {
        for ty in y..y + h {
            for tx in x..x + w {
                self.set(tx, ty, tile);
            }
        }
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        self.index(tile.x, tile.y).is_some()
    }

    /// Whether the tile blocks movement. Everything outside the map is solid.
    pub fn is_solid(&self, tile: IVec2) -> bool {
        match self.index(tile.x, tile.y) {
            Some(i) => self.tiles[i].map_or(false, |t| t.solid),
            None => true,
        }
    }

    /// World x coordinate to tile column.
    pub fn to_map_x(&self, x: f32) -> i32 {
        ((x - self.origin.x) / self.tile_size).floor() as i32
    }

    /// World y coordinate to tile row.
    pub fn to_map_y(&self, y: f32) -> i32 {
        ((y - self.origin.y) / self.tile_size).floor() as i32
    }

    pub fn to_map_pos(&self, pos: Vec2) -> IVec2 {
        IVec2::new(self.to_map_x(pos.x), self.to_map_y(pos.y))
    }

    /// Inclusive range of columns covered by the span [min_x, max_x].
    pub fn columns_between(&self, min_x: f32, max_x: f32) -> RangeInclusive<i32> {
        self.to_map_x(min_x + EDGE_EPSILON)..=self.to_map_x(max_x - EDGE_EPSILON)
    }

    /// Inclusive range of rows covered by the span [min_y, max_y].
    pub fn rows_between(&self, min_y: f32, max_y: f32) -> RangeInclusive<i32> {
        self.to_map_y(min_y + EDGE_EPSILON)..=self.to_map_y(max_y - EDGE_EPSILON)
    }

    /// Whether any solid tile lies under the given ranges.
    pub fn any_solid(&self, columns: RangeInclusive<i32>, rows: RangeInclusive<i32>) -> bool {
        rows.into_iter().any(|ty| {
            columns.clone().any(|tx| self.is_solid(IVec2::new(tx, ty)))
        })
    }

    /// World x of a column's left edge.
    pub fn column_left(&self, tx: i32) -> f32 {
        self.origin.x + tx as f32 * self.tile_size
    }

    /// World y of a row's bottom edge.
    pub fn row_bottom(&self, ty: i32) -> f32 {
        self.origin.y + ty as f32 * self.tile_size
    }

    /// World-space centre of a tile.
    pub fn tile_to_world(&self, x: i32, y: i32) -> Vec2 {
        let half = self.tile_size / 2.0;
        Vec2::new(self.column_left(x) + half, self.row_bottom(y) + half)
    }

    /// World-space bounds of the map.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let max = self.origin
            + Vec2::new(
                self.width as f32 * self.tile_size,
                self.height as f32 * self.tile_size,
            );
        (self.origin, max)
    }

    /// Render instances for every non-empty tile.
    pub fn build_instances(&self) -> Vec<RenderInstance> {
        let mut instances = Vec::with_capacity(self.tile_count());
        for ty in 0..self.height as i32 {
            for tx in 0..self.width as i32 {
                if let Some(tile) = self.get(tx, ty) {
                    let centre = self.tile_to_world(tx, ty);
                    instances.push(RenderInstance {
                        x: centre.x,
                        y: centre.y,
                        scale_x: self.tile_size,
                        scale_y: self.tile_size,
                        sprite_col: tile.col,
                        atlas_row: tile.row,
                        alpha: 1.0,
                        atlas: 0.0,
                    });
                }
            }
        }
        instances
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}
