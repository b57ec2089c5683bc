//! Per-frame simulation tick and input handling
//!
//! Phase transitions:
//! - `Idle --tap--> Running` (the starting tap is also the first flap)
//! - `Running --tap--> Running` (flap)
//! - `Running --collision--> Over`
//! - `Over --tap--> Idle` (full round reset)
//!
//! A running tick runs in a fixed order: due spawns, obstacle scroll and
//! retirement, player integration, the obstacle sweep (scoring and hits),
//! then the ground check. The ground check runs last so its clamp of
//! position and angle wins when both collisions land on the same tick.

use super::collision;
use super::gate::{self, GateLayout};
use super::obstacle::ObstacleRole;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by `dt` seconds.
///
/// Negative or non-finite deltas are treated as zero so position state can
/// never be poisoned; hosts are expected to sanitize first.
pub fn tick(state: &mut GameState, dt: f32) {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    match state.phase() {
        GamePhase::Over => return,
        GamePhase::Idle => tick_idle(state, dt),
        GamePhase::Running => tick_running(state, dt),
    }
    state.time_ticks += 1;
}

fn tick_idle(state: &mut GameState, dt: f32) {
    state.hover_time += dt;
    let base_y = state.player_start().y;
    let tuning = &state.tuning;
    physics::hover(
        &mut state.player,
        base_y,
        tuning.hover_amplitude,
        tuning.hover_period,
        state.hover_time,
    );
    state.emit_player_transform();
}

fn tick_running(state: &mut GameState, dt: f32) {
    // Spawns first so a new gate never appears halfway through a sweep
    let due = state.spawn_timer.advance(dt);
    for _ in 0..due {
        spawn_gate(state);
    }

    state.pool.advance(dt);
    for id in state.pool.retire_offscreen(state.scene.left_bound()) {
        if let Some(segment) = state.pool.get(id).cloned() {
            log::debug!("Segment {:?} ({:?}) retired", id, segment.role);
            state.push_event(GameEvent::ObstacleRetired(segment));
        }
    }
    state.ground.advance(state.tuning.scroll_speed * dt);

    physics::integrate(&mut state.player, state.tuning.gravity, dt);
    state.player.angle = physics::tilt(state.player.vel.y, state.tuning.flap_impulse);

    let sweep = collision::sweep_obstacles(&state.player, &mut state.pool);
    for _ in &sweep.newly_passed {
        state.session.score += 1;
        state.push_event(GameEvent::Scored);
        state.push_event(GameEvent::ScoreChanged(state.session.score));
    }

    let ground_top = state.scene.ground_top_y;
    let grounded = collision::ground_contact(&state.player, ground_top);
    if grounded {
        state.player.pos.y = ground_top;
        state.player.vel.y = 0.0;
        state.player.angle = physics::TILT_MIN;
    }

    if sweep.hit || grounded {
        set_game_over(state, sweep.hit, grounded);
    }
    state.emit_player_transform();
}

fn spawn_gate(state: &mut GameState) {
    let tuning = &state.tuning;
    let center = gate::opening_center(&mut state.rng, state.scene.height, tuning.opening_jitter);
    let layout = GateLayout::around(
        center,
        state.scene.right_bound() + tuning.spawn_margin,
        tuning.opening_height,
        tuning.segment_height,
    );
    let spawned = gate::spawn_gate(&mut state.pool, &layout, tuning.scroll_speed);
    state.gates_spawned += 1;

    for id in [spawned.top, spawned.bottom] {
        if let Some(segment) = state.pool.get(id).cloned() {
            state.push_event(GameEvent::ObstacleSpawned(segment));
        }
    }
}

fn set_game_over(state: &mut GameState, hit_obstacle: bool, hit_ground: bool) {
    if state.session.over {
        return;
    }
    state.session.over = true;
    state.spawn_timer.stop();
    state.push_event(GameEvent::GameOver);
    log::info!(
        "Game over: score {} after {} gates (obstacle: {}, ground: {})",
        state.session.score,
        state.gates_spawned,
        hit_obstacle,
        hit_ground
    );
}

/// Handle a discrete activation (touch/click/key)
pub fn tap(state: &mut GameState) {
    match state.phase() {
        GamePhase::Idle => {
            begin_run(state);
            flap(state);
        }
        GamePhase::Running => flap(state),
        GamePhase::Over => reset(state),
    }
}

/// Start a run without the opening flap. Returns false unless idle.
pub fn start(state: &mut GameState) -> bool {
    if state.phase() != GamePhase::Idle {
        return false;
    }
    begin_run(state);
    true
}

fn begin_run(state: &mut GameState) {
    state.session.started = true;
    state.spawn_timer.start();
    log::info!("Run started (seed {})", state.seed);
}

fn flap(state: &mut GameState) {
    physics::flap(&mut state.player, state.tuning.flap_impulse);
    state.push_event(GameEvent::Flapped);
}

/// Return to idle: score cleared, player back at the start, every live
/// segment bulk-retired to the dead pools.
pub fn reset(state: &mut GameState) {
    let final_score = state.session.score;
    state.session = Default::default();
    state.spawn_timer.stop();

    let start = state.player_start();
    state.player.reset(start.x, start.y);

    for id in state.pool.retire_all() {
        if let Some(segment) = state.pool.get(id).cloned() {
            state.push_event(GameEvent::ObstacleRetired(segment));
        }
    }
    state.ground.reset();
    state.hover_time = 0.0;
    state.gates_spawned = 0;

    state.push_event(GameEvent::Reset);
    state.push_event(GameEvent::ScoreChanged(0));
    state.emit_player_transform();
    log::info!("Round reset (previous score {})", final_score);
}

/// Simple demo autopilot: tap to start, then flap whenever the player sinks
/// below the opening of the next gate ahead.
pub fn autopilot_wants_tap(state: &GameState) -> bool {
    match state.phase() {
        GamePhase::Idle => true,
        GamePhase::Over => false,
        GamePhase::Running => {
            let player = &state.player;
            let opening = state.tuning.opening_height;

            let target = state
                .pool
                .iter_active()
                .filter(|s| s.role == ObstacleRole::Bottom && s.entity.right_edge() >= player.pos.x)
                .min_by(|a, b| a.entity.pos.x.total_cmp(&b.entity.pos.x))
                .map(|s| s.entity.pos.y - opening / 2.0)
                .unwrap_or(state.scene.height / 2.0);

            let falling = player.vel.y <= 0.0;
            let low = player.pos.y + player.size.y / 2.0 < target - opening / 4.0;
            falling && low
        }
    }
}
