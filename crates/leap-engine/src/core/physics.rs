//! Gravity-affected bodies and axis-separated tile collision.
//!
//! Coordinates are y-up. A positive `gravity` pulls toward -y; flipping its
//! sign flips which way is "down" for the body.

use glam::Vec2;
use crate::components::tilemap::{TileMap, EDGE_EPSILON};
use crate::math::sign;

/// Default gravity magnitude, in world units per frame squared.
pub const DEFAULT_GRAVITY: f32 = 0.2;

/// Physics state for an entity that falls and stands on tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    /// Signed gravity; the sign is the "down" direction along -y.
    pub gravity: f32,
    /// Whether the last collision pass found ground along gravity.
    pub on_ground: bool,
}

impl PhysicsBody {
    pub fn new(gravity: f32) -> Self {
        Self { gravity, on_ground: false }
    }

    pub fn grounded(mut self) -> Self {
        self.on_ground = true;
        self
    }

    /// -1, 0 or 1.
    pub fn gravity_sign(&self) -> f32 {
        sign(self.gravity)
    }

    pub fn flip_gravity(&mut self) {
        self.gravity = -self.gravity;
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

/// Resolve a translation against solid tiles.
///
/// `next_h` is the position after moving along x only and `next_v` after
/// moving along y only; the current position is recovered from the two.
/// Each blocked axis is shortened so the box ends flush with the tile it
/// hit. Sets `body.on_ground` when the vertical move was blocked along
/// gravity, or when a box at vertical rest sits flush on a tile, and
/// clears it otherwise.
pub fn resolve_tile_collisions(
    map: &TileMap,
    extents: Vec2,
    body: &mut PhysicsBody,
    next_h: Vec2,
    next_v: Vec2,
    translation: Vec2,
) -> Vec2 {
    let pos = Vec2::new(next_v.x, next_h.y);
    let mut result = translation;

    if translation.x != 0.0 {
        let rows = map.rows_between(pos.y - extents.y, pos.y + extents.y);
        let blocked = if translation.x > 0.0 {
            let from = map.to_map_x(pos.x + extents.x - EDGE_EPSILON);
            let to = map.to_map_x(next_h.x + extents.x - EDGE_EPSILON);
            (from..=to).find(|&tx| map.any_solid(tx..=tx, rows.clone()))
                .map(|tx| (map.column_left(tx) - (pos.x + extents.x)).clamp(0.0, translation.x))
        } else {
            let from = map.to_map_x(pos.x - extents.x + EDGE_EPSILON);
            let to = map.to_map_x(next_h.x - extents.x + EDGE_EPSILON);
            (to..=from).rev().find(|&tx| map.any_solid(tx..=tx, rows.clone()))
                .map(|tx| (map.column_left(tx + 1) - (pos.x - extents.x)).clamp(translation.x, 0.0))
        };
        if let Some(x) = blocked {
            result.x = x;
        }
    }

    body.on_ground = false;
    if translation.y != 0.0 {
        let columns = map.columns_between(pos.x - extents.x, pos.x + extents.x);
        let blocked = if translation.y > 0.0 {
            let from = map.to_map_y(pos.y + extents.y - EDGE_EPSILON);
            let to = map.to_map_y(next_v.y + extents.y - EDGE_EPSILON);
            (from..=to).find(|&ty| map.any_solid(columns.clone(), ty..=ty))
                .map(|ty| (map.row_bottom(ty) - (pos.y + extents.y)).clamp(0.0, translation.y))
        } else {
            let from = map.to_map_y(pos.y - extents.y + EDGE_EPSILON);
            let to = map.to_map_y(next_v.y - extents.y + EDGE_EPSILON);
            (to..=from).rev().find(|&ty| map.any_solid(columns.clone(), ty..=ty))
                .map(|ty| (map.row_bottom(ty + 1) - (pos.y - extents.y)).clamp(translation.y, 0.0))
        };
        if let Some(y) = blocked {
            result.y = y;
            body.on_ground = translation.y * body.gravity_sign() < 0.0;
        }
    } else {
        body.on_ground = resting_contact(map, extents, body, pos);
    }

    // Both axes clear on their own but the diagonal clips a tile corner:
    // give up the horizontal part and let the next frame's wall check handle it.
    if result.x != 0.0 && result.y != 0.0 {
        let target = pos + result;
        let columns = map.columns_between(target.x - extents.x, target.x + extents.x);
        let rows = map.rows_between(target.y - extents.y, target.y + extents.y);
        if map.any_solid(columns, rows) {
            result.x = 0.0;
        }
    }

    result
}

/// Whether a box that is not moving vertically touches a solid row
/// just past its edge along gravity.
fn resting_contact(map: &TileMap, extents: Vec2, body: &PhysicsBody, pos: Vec2) -> bool {
    let down = body.gravity_sign();
    if down == 0.0 {
        return false;
    }
    let edge = pos.y - down * (extents.y + EDGE_EPSILON);
    let row = map.to_map_y(edge);
    let columns = map.columns_between(pos.x - extents.x, pos.x + extents.x);
    map.any_solid(columns, row..=row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::tilemap::Tile;

    const EXTENTS: Vec2 = Vec2::new(5.0, 9.5);

    /// 20x20 map of 12-unit tiles with a solid floor row and a solid left column.
    fn room() -> TileMap {
        let mut map = TileMap::new(20, 20, 12.0);
        map.fill_rect(0, 0, 20, 1, Some(Tile::solid(0.0, 0.0)));
        map.fill_rect(0, 0, 1, 20, Some(Tile::solid(0.0, 0.0)));
        map
    }

    fn resolve(map: &TileMap, body: &mut PhysicsBody, pos: Vec2, vel: Vec2) -> Vec2 {
        resolve_tile_collisions(
            map,
            EXTENTS,
            body,
            Vec2::new(pos.x + vel.x, pos.y),
            Vec2::new(pos.x, pos.y + vel.y),
            vel,
        )
    }

    #[test]
    fn free_movement_is_untouched() {
        let map = room();
        let mut body = PhysicsBody::default();
        let out = resolve(&map, &mut body, Vec2::new(100.0, 100.0), Vec2::new(1.5, -2.0));
        assert_eq!(out, Vec2::new(1.5, -2.0));
        assert!(!body.on_ground);
    }

    #[test]
    fn falling_onto_floor_lands_flush() {
        let map = room();
        let mut body = PhysicsBody::default();
        // Feet at 23.0, floor top at 12.0.
        let pos = Vec2::new(100.0, 32.5);
        let out = resolve(&map, &mut body, pos, Vec2::new(0.0, -15.0));
        assert!((pos.y + out.y - EXTENTS.y - 12.0).abs() < 1e-4);
        assert!(body.on_ground);
    }

    #[test]
    fn standing_on_floor_stays_grounded() {
        let map = room();
        let mut body = PhysicsBody::default();
        let pos = Vec2::new(100.0, 12.0 + EXTENTS.y);
        let out = resolve(&map, &mut body, pos, Vec2::new(0.0, -0.2));
        assert!(out.y.abs() < 1e-4);
        assert!(body.on_ground);
    }

    #[test]
    fn resting_flush_on_floor_is_grounded() {
        let map = room();
        let mut body = PhysicsBody::default();
        let pos = Vec2::new(100.0, 12.0 + EXTENTS.y);
        let out = resolve(&map, &mut body, pos, Vec2::ZERO);
        assert_eq!(out, Vec2::ZERO);
        assert!(body.on_ground);

        // A hair above the floor is still airborne.
        let mut body = PhysicsBody::default();
        resolve(&map, &mut body, pos + Vec2::new(0.0, 0.5), Vec2::ZERO);
        assert!(!body.on_ground);
    }

    #[test]
    fn resting_under_ceiling_counts_only_with_inverted_gravity() {
        let mut map = room();
        map.fill_rect(0, 10, 20, 1, Some(Tile::solid(0.0, 0.0)));
        let pos = Vec2::new(100.0, 120.0 - EXTENTS.y);

        let mut body = PhysicsBody::default();
        resolve(&map, &mut body, pos, Vec2::new(1.0, 0.0));
        assert!(!body.on_ground);

        let mut body = PhysicsBody::new(-DEFAULT_GRAVITY);
        resolve(&map, &mut body, pos, Vec2::new(1.0, 0.0));
        assert!(body.on_ground);
    }

    #[test]
    fn inverted_gravity_lands_on_ceiling() {
        let mut map = room();
        map.fill_rect(0, 10, 20, 1, Some(Tile::solid(0.0, 0.0)));
        let mut body = PhysicsBody::new(-DEFAULT_GRAVITY);
        // Head at 119.0, ceiling bottom at 120.0.
        let pos = Vec2::new(100.0, 120.0 - EXTENTS.y - 1.0);
        let out = resolve(&map, &mut body, pos, Vec2::new(0.0, 3.0));
        assert!((out.y - 1.0).abs() < 1e-4);
        assert!(body.on_ground);
    }

    #[test]
    fn head_bump_is_not_ground() {
        let mut map = room();
        map.fill_rect(0, 10, 20, 1, Some(Tile::solid(0.0, 0.0)));
        let mut body = PhysicsBody::default();
        let pos = Vec2::new(100.0, 120.0 - EXTENTS.y - 1.0);
        let out = resolve(&map, &mut body, pos, Vec2::new(0.0, 4.5));
        assert!((out.y - 1.0).abs() < 1e-4);
        assert!(!body.on_ground);
    }

    #[test]
    fn wall_stops_horizontal_motion() {
        let map = room();
        let mut body = PhysicsBody::default();
        // Left edge at 14.0, wall's right face at 12.0.
        let pos = Vec2::new(19.0, 100.0);
        let out = resolve(&map, &mut body, pos, Vec2::new(-3.0, -1.0));
        assert!((out.x + 2.0).abs() < 1e-4);
        assert_eq!(out.y, -1.0);
    }

    #[test]
    fn sliding_along_wall_keeps_falling() {
        let map = room();
        let mut body = PhysicsBody::default();
        // Flush against the wall.
        let pos = Vec2::new(12.0 + EXTENTS.x, 100.0);
        let out = resolve(&map, &mut body, pos, Vec2::new(-0.2, -1.5));
        assert!(out.x.abs() < 1e-4);
        assert_eq!(out.y, -1.5);
        assert!(!body.on_ground);
    }

    #[test]
    fn leaving_the_map_is_blocked() {
        let map = TileMap::new(10, 10, 12.0);
        let mut body = PhysicsBody::default();
        let pos = Vec2::new(120.0 - EXTENTS.x - 0.5, 60.0);
        let out = resolve(&map, &mut body, pos, Vec2::new(3.0, 0.0));
        assert!((out.x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn corner_clip_drops_horizontal() {
        let mut map = TileMap::new(20, 20, 12.0);
        map.set(10, 5, Some(Tile::solid(0.0, 0.0)));
        let mut body = PhysicsBody::default();
        // Box just up-left of tile (10, 5), whose corner is at (120, 72).
        let pos = Vec2::new(120.0 - EXTENTS.x - 0.5, 72.0 + EXTENTS.y + 0.5);
        let out = resolve(&map, &mut body, pos, Vec2::new(1.0, -1.0));
        assert_eq!(out.x, 0.0);
        assert_eq!(out.y, -1.0);
    }

    #[test]
    fn flip_gravity_changes_sign() {
        let mut body = PhysicsBody::default();
        assert_eq!(body.gravity_sign(), 1.0);
        body.flip_gravity();
        assert_eq!(body.gravity_sign(), -1.0);
    }
}
