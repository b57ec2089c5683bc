//! Positional/kinematic record shared by the player and obstacle segments
//!
//! World frame is y-up with the origin at the scene's bottom-left corner.
//! `pos` is the minimum (bottom-left) corner of the entity's box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    /// Player uses `vel.y`; obstacles scroll with `vel.x`
    pub vel: Vec2,
    pub size: Vec2,
    /// Presentation tilt (radians), derived from velocity
    pub angle: f32,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            angle: 0.0,
        }
    }

    /// Snap to a position with zero velocity and angle
    pub fn reset(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
        self.vel = Vec2::ZERO;
        self.angle = 0.0;
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_min_size(self.pos, self.size)
    }
}
