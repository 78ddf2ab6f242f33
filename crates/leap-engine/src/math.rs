//! Small 2D math helpers on top of `glam`.

use glam::Vec2;
use std::f32::consts::PI;
use std::ops::{Add, Neg, Sub};

/// An angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Angle(pub f32);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    /// Half a turn (pointing along -x).
    pub const HALF: Angle = Angle(PI);

    pub fn radians(self) -> f32 {
        self.0
    }

    /// Unit vector pointing along this angle.
    pub fn direction(self) -> Vec2 {
        Vec2::new(self.0.cos(), self.0.sin())
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

/// Build a vector from a magnitude and a direction.
pub fn polar(length: f32, angle: Angle) -> Vec2 {
    angle.direction() * length
}

/// Sign of `x` as -1, 0 or 1. Unlike `f32::signum`, zero maps to zero.
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
