use glam::Vec2;

/// Texture every particle draws with.
pub const PARTICLE_TEXTURE: &str = "particle.png";
pub const PARTICLE_SIZE: Vec2 = Vec2::new(2.0, 2.0);
/// Default lifetime in ticks.
pub const PARTICLE_LIFETIME: u32 = 30;

/// Short-lived cosmetic dust. Moves in a straight line and fades out.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub lifetime: u32,
    ticks_left: u32,
}

impl Particle {
    pub fn new(lifetime: u32) -> Self {
        Self { lifetime, ticks_left: lifetime }
    }

    pub fn ticks_left(&self) -> u32 {
        self.ticks_left
    }

    /// Count down one tick. Returns true once the particle has expired.
    pub fn tick(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left == 0
    }

    pub fn alpha(&self) -> f32 {
        if self.lifetime == 0 {
            return 0.0;
        }
        self.ticks_left as f32 / self.lifetime as f32
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::new(PARTICLE_LIFETIME)
    }
}
