//! Axis-aligned collision detection
//!
//! The player is tested against every live obstacle segment each tick. The
//! same sweep marks bottom segments the player has overtaken so the caller
//! can award exactly one point per gate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::obstacle::{ObstaclePool, ObstacleRole, SegmentId};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    /// Positive-area overlap. Boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Result of sweeping the player against the obstacle field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// The player overlaps at least one live segment
    pub hit: bool,
    /// Bottom segments marked passed during this sweep, in active order
    pub newly_passed: Vec<SegmentId>,
}

/// Test the player against every active segment and mark overtaken gates.
///
/// Scoring and overlap are independent: a bottom segment may be passed and
/// hit in the same sweep.
pub fn sweep_obstacles(player: &Entity, pool: &mut ObstaclePool) -> SweepResult {
    let player_box = player.aabb();
    let mut result = SweepResult::default();

    pool.for_each_active_mut(|segment| {
        if segment.role == ObstacleRole::Bottom
            && !segment.passed
            && segment.entity.pos.x < player.pos.x
        {
            segment.passed = true;
            result.newly_passed.push(segment.id);
        }

        if segment.entity.aabb().overlaps(&player_box) {
            result.hit = true;
        }
    });

    result
}

/// Player has reached or sunk below the ground line
#[inline]
pub fn ground_contact(player: &Entity, ground_top_y: f32) -> bool {
    player.pos.y <= ground_top_y
}
