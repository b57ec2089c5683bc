//! Gate spawning
//!
//! A gate is not stored: it is two segment spawns placed around one shared
//! opening center. The `Top` segment sits at
//! `center - opening/2 - segment_height` and the `Bottom` segment at
//! `center + opening/2`, so the two boxes bound an opening of exactly
//! `opening_height`.

use glam::Vec2;
use rand::Rng;

use super::obstacle::{ObstaclePool, ObstacleRole, SegmentId};

/// Where the two segments of a gate go
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateLayout {
    pub x: f32,
    pub opening_center_y: f32,
    pub top_y: f32,
    pub bottom_y: f32,
}

impl GateLayout {
    pub fn around(opening_center_y: f32, x: f32, opening_height: f32, segment_height: f32) -> Self {
        Self {
            x,
            opening_center_y,
            top_y: opening_center_y - opening_height / 2.0 - segment_height,
            bottom_y: opening_center_y + opening_height / 2.0,
        }
    }
}

/// Mid-screen plus a uniform offset of up to `jitter * scene_height` either way
pub fn opening_center<R: Rng>(rng: &mut R, scene_height: f32, jitter: f32) -> f32 {
    let offset = (rng.random::<f32>() - 0.5) * 2.0 * jitter;
    scene_height / 2.0 + offset * scene_height
}

/// The pair handed out for one gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedGate {
    pub top: SegmentId,
    pub bottom: SegmentId,
}

/// Acquire both segments of a gate and start them scrolling left
pub fn spawn_gate(pool: &mut ObstaclePool, layout: &GateLayout, scroll_speed: f32) -> SpawnedGate {
    let vel = Vec2::new(-scroll_speed, 0.0);
    let top = pool.acquire(ObstacleRole::Top, Vec2::new(layout.x, layout.top_y), vel);
    let bottom = pool.acquire(ObstacleRole::Bottom, Vec2::new(layout.x, layout.bottom_y), vel);
    log::debug!(
        "Gate spawned at x={:.1} opening center {:.1} (segments {:?}/{:?})",
        layout.x,
        layout.opening_center_y,
        top,
        bottom
    );
    SpawnedGate { top, bottom }
}
