//! Player kinematics
//!
//! Semi-implicit Euler under constant gravity, a velocity override for flaps,
//! and the deterministic hover bob used before a run starts.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use super::entity::Entity;

/// Nose-down terminal tilt, also forced on ground contact
pub const TILT_MIN: f32 = -FRAC_PI_2;
/// Nose-up limit after a flap
pub const TILT_MAX: f32 = FRAC_PI_4;

/// Advance vertical velocity, then position with the updated velocity
pub fn integrate(player: &mut Entity, gravity: f32, dt: f32) {
    player.vel.y -= gravity * dt;
    player.pos.y += player.vel.y * dt;
}

/// Instantaneous upward impulse. Overrides the current velocity, never adds to it.
#[inline]
pub fn flap(player: &mut Entity, impulse: f32) {
    player.vel.y = impulse;
}

/// Presentation tilt derived from vertical velocity
#[inline]
pub fn tilt(vel_y: f32, impulse: f32) -> f32 {
    ((impulse + vel_y) / impulse).clamp(TILT_MIN, TILT_MAX)
}

/// Idle bob around `base_y`. Not physics: position is a pure function of time.
pub fn hover(player: &mut Entity, base_y: f32, amplitude: f32, period: f32, elapsed: f32) {
    player.pos.y = base_y + amplitude * (elapsed / period).cos();
    player.vel.y = 0.0;
    player.angle = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn player(y: f32) -> Entity {
        Entity::new(Vec2::new(57.6, y), Vec2::new(36.0, 26.0))
    }

    #[test]
    fn test_integrate_one_frame_from_rest() {
        let mut p = player(256.0);
        integrate(&mut p, 1100.0, 1.0 / 60.0);
        assert!((p.vel.y - (-18.333_334)).abs() < 1e-3);
        assert!((p.pos.y - (256.0 - 0.305_555_6)).abs() < 1e-3);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut p = player(100.0);
        p.vel.y = -500.0;
        flap(&mut p, 320.0);
        assert_eq!(p.vel.y, 320.0);
        flap(&mut p, 320.0);
        assert_eq!(p.vel.y, 320.0);
    }

    #[test]
    fn test_tilt_range() {
        // Right after a flap: (320 + 320) / 320 = 2, clamped to the nose-up limit
        assert_eq!(tilt(320.0, 320.0), TILT_MAX);
        // Free fall far below the impulse pins nose-down
        assert_eq!(tilt(-1000.0, 320.0), TILT_MIN);
        // Zero velocity: 1.0 rad exceeds π/4 so it clamps too
        assert_eq!(tilt(0.0, 320.0), TILT_MAX);
        // In range
        let mid = tilt(-320.0, 320.0);
        assert_eq!(mid, 0.0);
    }

    #[test]
    fn test_hover_is_cosine_of_time() {
        let mut p = player(0.0);
        p.vel.y = 42.0;
        p.angle = 0.3;
        hover(&mut p, 256.0, 8.0, 0.2, 0.0);
        assert_eq!(p.pos.y, 264.0);
        assert_eq!(p.angle, 0.0);
        assert_eq!(p.vel.y, 0.0);

        hover(&mut p, 256.0, 8.0, 0.2, 0.2 * std::f32::consts::PI);
        assert!((p.pos.y - 248.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_integrate_matches_closed_form(
            v0 in -600.0f32..600.0,
            y0 in 0.0f32..1000.0,
            dt in 0.0f32..0.1,
        ) {
            let mut p = player(y0);
            p.vel.y = v0;
            integrate(&mut p, 1100.0, dt);
            let v1 = v0 - 1100.0 * dt;
            prop_assert!((p.vel.y - v1).abs() < 1e-3);
            prop_assert!((p.pos.y - (y0 + v1 * dt)).abs() < 1e-3);
        }

        #[test]
        fn prop_tilt_stays_in_bounds(v in -5000.0f32..5000.0) {
            let angle = tilt(v, 320.0);
            prop_assert!((TILT_MIN..=TILT_MAX).contains(&angle));
        }
    }
}
