use glam::Vec2;
use std::ops::RangeInclusive;
use crate::actors::particle::{Particle, PARTICLE_LIFETIME, PARTICLE_SIZE, PARTICLE_TEXTURE};
use crate::actors::player::{Player, PLAYER_ANIMATION, PLAYER_SIZE};
use crate::actors::trigger::{Trigger, TriggerEffect};
use crate::api::types::EntityId;
use crate::assets::registry::{AssetRegistry, AssetStore};
use crate::components::tilemap::TileMap;
use crate::core::frame::FrameContext;
use crate::core::physics::{resolve_tile_collisions, PhysicsBody};
use crate::math::{polar, Angle};
use crate::movement::modifiers::ModifierSet;
use crate::movement::playable::Motion;
use crate::renderer::instance::RenderInstance;

/// What an entity is, and the state only that kind carries.
#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(Box<Player>),
    Particle(Particle),
    Trigger(Trigger),
    /// Static decoration drawn from a sprite.
    Prop { sprite: String },
}

/// Fat Entity: one struct with optional physics and a kind tag.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Assigned by the world on admission.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Centre position in world space.
    pub pos: Vec2,
    /// World units per frame.
    pub velocity: Vec2,
    size: Vec2,
    extents: Vec2,
    retired: bool,
    /// Entities without a body move freely through tiles.
    pub body: Option<PhysicsBody>,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(size: Vec2, kind: EntityKind) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            tag: String::new(),
            pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size,
            extents: size / 2.0,
            retired: false,
            body: None,
            kind,
        }
    }

    /// A player standing at `pos`, with gravity from its modifiers.
    pub fn player(pos: Vec2, modifiers: ModifierSet) -> Self {
        let player = Player::new(modifiers);
        let body = player.playable.initial_body();
        Self::new(PLAYER_SIZE, EntityKind::Player(Box::new(player)))
            .with_tag("player")
            .with_pos(pos)
            .with_body(body)
    }

    /// A dust particle flying off at `speed` along `angle`.
    pub fn particle(pos: Vec2, speed: f32, angle: Angle) -> Self {
        Self::new(PARTICLE_SIZE, EntityKind::Particle(Particle::new(PARTICLE_LIFETIME)))
            .with_pos(pos)
            .with_velocity(polar(speed, angle))
    }

    pub fn trigger(pos: Vec2, size: Vec2, trigger: Trigger) -> Self {
        Self::new(size, EntityKind::Trigger(trigger)).with_pos(pos)
    }

    pub fn prop(pos: Vec2, size: Vec2, sprite: impl Into<String>) -> Self {
        Self::new(size, EntityKind::Prop { sprite: sprite.into() }).with_pos(pos)
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Half the size.
    pub fn extents(&self) -> Vec2 {
        self.extents
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Mark for removal at the world's next sweep. Idempotent.
    pub fn retire(&mut self) {
        self.retired = true;
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.kind {
            EntityKind::Player(p) => Some(&**p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.kind {
            EntityKind::Player(p) => Some(&mut **p),
            _ => None,
        }
    }

    pub fn trigger_effect(&self) -> Option<TriggerEffect> {
        match &self.kind {
            EntityKind::Trigger(t) => Some(t.effect),
            _ => None,
        }
    }

    pub fn on_ground(&self) -> bool {
        self.body.map_or(false, |b| b.on_ground)
    }

    /// One frame: early hook, collision-resolved translation, late hook.
    pub fn update(&mut self, frame: &mut FrameContext<'_>, delta: f32) {
        self.update_early();

        let next_h = Vec2::new(self.pos.x + self.velocity.x, self.pos.y);
        let next_v = Vec2::new(self.pos.x, self.pos.y + self.velocity.y);
        self.velocity = self.handle_collisions(frame.map, next_h, next_v, self.velocity);
        self.pos += self.velocity;

        self.update_late(frame, delta);
    }

    fn update_early(&mut self) {
        if let EntityKind::Player(player) = &mut self.kind {
            player.update_early();
        }
    }

    fn update_late(&mut self, frame: &mut FrameContext<'_>, delta: f32) {
        match &mut self.kind {
            EntityKind::Player(player) => {
                let Some(body) = self.body.as_mut() else {
                    log::warn!("player {:?} has no physics body", self.id);
                    return;
                };
                let motion = Motion {
                    pos: self.pos,
                    extents: self.extents,
                    velocity: &mut self.velocity,
                    body,
                };
                player.update_late(motion, frame, delta);
            }
            EntityKind::Particle(particle) => {
                if particle.tick() {
                    self.retired = true;
                }
            }
            EntityKind::Trigger(_) | EntityKind::Prop { .. } => {}
        }
    }

    /// Translation actually applied this frame. Identity without a body.
    pub fn handle_collisions(&mut self, map: &TileMap, next_h: Vec2, next_v: Vec2, translation: Vec2) -> Vec2 {
        match self.body.as_mut() {
            Some(body) => resolve_tile_collisions(map, self.extents, body, next_h, next_v, translation),
            None => translation,
        }
    }

    /// Strict bounding-box overlap at the current position.
    pub fn intersects(&self, other: &Entity) -> bool {
        self.intersects_at(other, self.pos)
    }

    /// Strict bounding-box overlap if this entity were at `future_pos`.
    pub fn intersects_at(&self, other: &Entity, future_pos: Vec2) -> bool {
        future_pos.x - self.extents.x < other.pos.x + other.extents.x
            && future_pos.x + self.extents.x > other.pos.x - other.extents.x
            && future_pos.y - self.extents.y < other.pos.y + other.extents.y
            && future_pos.y + self.extents.y > other.pos.y - other.extents.y
    }

    /// Tile columns the box covers at `future_pos`.
    pub fn occupying_tiles_h(&self, map: &TileMap, future_pos: Vec2) -> RangeInclusive<i32> {
        map.columns_between(future_pos.x - self.extents.x, future_pos.x + self.extents.x)
    }

    /// Tile rows the box covers at `future_pos`.
    pub fn occupying_tiles_v(&self, map: &TileMap, future_pos: Vec2) -> RangeInclusive<i32> {
        map.rows_between(future_pos.y - self.extents.y, future_pos.y + self.extents.y)
    }

    /// Asset this entity holds a reference to while it is in the world.
    pub fn asset_path(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Player(_) => Some(PLAYER_ANIMATION),
            EntityKind::Particle(_) => Some(PARTICLE_TEXTURE),
            EntityKind::Trigger(t) => t.sprite.as_deref(),
            EntityKind::Prop { sprite } => Some(sprite),
        }
    }

    pub fn on_spawn(&mut self, assets: &mut dyn AssetStore) {
        if let Some(path) = self.asset_path() {
            assets.load(path);
        }
    }

    pub fn on_removed(&mut self, assets: &mut dyn AssetStore) {
        if let Some(path) = self.asset_path() {
            assets.unload(path);
        }
    }

    /// Sprite for this frame, or `None` if it has nothing registered to draw.
    pub fn render_instance(&self, assets: &AssetRegistry) -> Option<RenderInstance> {
        if let EntityKind::Player(player) = &self.kind {
            let body = self.body.unwrap_or_default();
            return player.render_instance(self.pos, self.size, &body, assets);
        }

        let alpha = match &self.kind {
            EntityKind::Particle(p) => p.alpha(),
            _ => 1.0,
        };
        let sprite = assets.sprite(self.asset_path()?)?;
        Some(RenderInstance {
            x: self.pos.x,
            y: self.pos.y,
            scale_x: self.size.x,
            scale_y: self.size.y,
            sprite_col: sprite.col as f32,
            atlas_row: sprite.row as f32,
            alpha,
            atlas: sprite.atlas as f32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::{AssetManifest, SpriteDescriptor};
    use crate::components::tilemap::Tile;
    use crate::input::keyboard::Controls;
    use crate::rng::Rng;
    use crate::services::audio::SoundQueue;
    use crate::services::settings::Settings;

    fn floor_map() -> TileMap {
        let mut map = TileMap::new(20, 20, 12.0);
        map.fill_rect(0, 0, 20, 1, Some(Tile::solid(0.0, 0.0)));
        map
    }

    fn run(entity: &mut Entity, map: &TileMap, frames: usize) -> Vec<Entity> {
        let mut audio = SoundQueue::new();
        let mut rng = Rng::new(1);
        let settings = Settings::default();
        let mut spawns = Vec::new();
        for _ in 0..frames {
            let mut frame = FrameContext {
                map,
                controls: Controls::default(),
                audio: &mut audio,
                rng: &mut rng,
                settings: &settings,
                spawns: &mut spawns,
            };
            entity.update(&mut frame, 1.0 / 60.0);
        }
        spawns
    }

    #[test]
    fn bodiless_entities_ignore_tiles() {
        let map = floor_map();
        let mut e = Entity::prop(Vec2::new(50.0, 20.0), Vec2::splat(4.0), "rock.png")
            .with_velocity(Vec2::new(1.0, -30.0));
        run(&mut e, &map, 1);
        assert_eq!(e.pos, Vec2::new(51.0, -10.0));
    }

    #[test]
    fn player_falls_and_lands_on_floor() {
        let map = floor_map();
        let mut e = Entity::player(Vec2::new(100.0, 60.0), ModifierSet::none());
        run(&mut e, &map, 60);
        assert!(e.on_ground());
        assert!((e.pos.y - (12.0 + 9.5)).abs() < 1e-3, "y = {}", e.pos.y);
    }

    #[test]
    fn landing_queues_dust() {
        let map = floor_map();
        let mut e = Entity::player(Vec2::new(100.0, 40.0), ModifierSet::none());
        // Starts airborne, so the first grounded frame is a landing.
        let spawns = run(&mut e, &map, 40);
        assert_eq!(spawns.len(), 10);
        assert!(spawns.iter().all(|p| matches!(p.kind, EntityKind::Particle(_))));
    }

    #[test]
    fn particle_retires_after_lifetime() {
        let map = floor_map();
        let mut e = Entity::particle(Vec2::new(100.0, 100.0), 1.0, Angle::ZERO);
        assert_eq!(e.velocity, Vec2::new(1.0, 0.0));
        run(&mut e, &map, 29);
        assert!(!e.is_retired());
        run(&mut e, &map, 1);
        assert!(e.is_retired());
        e.retire();
        assert!(e.is_retired());
    }

    #[test]
    fn intersection_is_strict() {
        let a = Entity::prop(Vec2::new(0.0, 0.0), Vec2::splat(2.0), "a");
        let b = Entity::prop(Vec2::new(2.0, 0.0), Vec2::splat(2.0), "b");
        assert!(!a.intersects(&b));
        assert!(a.intersects_at(&b, Vec2::new(0.5, 0.0)));
        assert!(!a.intersects_at(&b, Vec2::new(0.5, 2.0)));
    }

    #[test]
    fn occupied_tiles_respect_boundaries() {
        let map = floor_map();
        let e = Entity::prop(Vec2::ZERO, Vec2::new(12.0, 24.0), "block");
        assert_eq!(e.occupying_tiles_h(&map, Vec2::new(18.0, 0.0)), 1..=1);
        assert_eq!(e.occupying_tiles_h(&map, Vec2::new(20.0, 0.0)), 1..=2);
        assert_eq!(e.occupying_tiles_v(&map, Vec2::new(0.0, 36.0)), 2..=3);
    }

    #[test]
    fn assets_load_and_unload_by_kind() {
        let mut assets = AssetRegistry::new();
        let mut player = Entity::player(Vec2::ZERO, ModifierSet::none());
        let mut dust = Entity::particle(Vec2::ZERO, 1.0, Angle::HALF);
        let mut spike = Entity::trigger(Vec2::ZERO, Vec2::splat(12.0), Trigger::new(TriggerEffect::Kill));

        player.on_spawn(&mut assets);
        dust.on_spawn(&mut assets);
        spike.on_spawn(&mut assets);
        assert_eq!(assets.ref_count("player"), 1);
        assert_eq!(assets.ref_count("particle.png"), 1);
        assert_eq!(spike.asset_path(), None);

        player.on_removed(&mut assets);
        dust.on_removed(&mut assets);
        assert_eq!(assets.ref_count("player"), 0);
        assert_eq!(assets.ref_count("particle.png"), 0);
    }

    #[test]
    fn particle_renders_with_fading_alpha() {
        let mut manifest = AssetManifest::default();
        manifest.sprites.insert(
            "particle.png".to_string(),
            SpriteDescriptor { atlas: 1, col: 7, row: 2 },
        );
        let assets = AssetRegistry::from_manifest(&manifest);
        let map = floor_map();
        let mut e = Entity::particle(Vec2::new(50.0, 50.0), 0.0, Angle::ZERO);
        run(&mut e, &map, 15);

        let inst = e.render_instance(&assets).unwrap();
        assert_eq!((inst.sprite_col, inst.atlas_row, inst.atlas), (7.0, 2.0, 1.0));
        assert_eq!((inst.scale_x, inst.scale_y), (2.0, 2.0));
        assert!((inst.alpha - 0.5).abs() < 1e-6);

        let unknown = Entity::prop(Vec2::ZERO, Vec2::ONE, "missing.png");
        assert!(unknown.render_instance(&assets).is_none());
    }
}
