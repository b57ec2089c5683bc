//! Whole-session scenarios
//!
//! Every scenario builds its world through `Host::on_scene_ready`. The ground
//! contact and reset scenarios then drive frames and taps through the host;
//! the rest clone the prepared state and call `tick` directly so they can
//! place gates or pin the player by hand.

use skyhop::consts::SIM_DT;
use skyhop::sim::{GameEvent, GamePhase, GateLayout, ObstacleRole, ObstacleSegment, spawn_gate, start, tick};
use skyhop::{EventSink, Host, Tuning};

#[derive(Debug, Default)]
struct Recorder {
    log: Vec<String>,
    ys: Vec<f32>,
    spawned: Vec<ObstacleSegment>,
}

impl EventSink for Recorder {
    fn score_changed(&mut self, score: u32) {
        self.log.push(format!("score:{score}"));
    }
    fn player_transform_changed(&mut self, _x: f32, y: f32, _angle: f32) {
        self.ys.push(y);
    }
    fn obstacle_spawned(&mut self, segment: &ObstacleSegment) {
        self.spawned.push(segment.clone());
    }
    fn game_over(&mut self) {
        self.log.push("over".into());
    }
    fn flapped(&mut self) {
        self.log.push("flap".into());
    }
    fn scored(&mut self) {
        self.log.push("scored".into());
    }
    fn reset(&mut self) {
        self.log.push("reset".into());
    }
}

fn count(log: &[String], what: &str) -> usize {
    log.iter().filter(|s| *s == what).count()
}

#[test]
fn free_fall_hits_ground_exactly_once() {
    // Low scene: the player starts 16 units above the ground line
    let mut host = Host::new(Tuning::default(), 1, Recorder::default());
    host.on_scene_ready(288.0, 160.0, 64.0).unwrap();

    // Start without the opening flap, then feed frames with no taps
    let mut state = host.state().unwrap().clone();
    assert!(start(&mut state));
    assert_eq!(state.player.pos.y, 80.0);

    let mut ys = vec![state.player.pos.y];
    for _ in 0..10 {
        tick(&mut state, SIM_DT);
        ys.push(state.player.pos.y);
    }
    for pair in ys.windows(2) {
        assert!(pair[1] < pair[0], "{} then {}", pair[0], pair[1]);
    }
    assert_eq!(state.phase(), GamePhase::Over);
    assert_eq!(state.player.pos.y, 64.0);

    for _ in 0..5 {
        tick(&mut state, SIM_DT);
        assert_eq!(state.player.pos.y, 64.0);
    }
    let game_overs = state
        .drain_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver))
        .count();
    assert_eq!(game_overs, 1);
}

#[test]
fn ground_contact_freezes_player_and_reports_once() {
    let mut host = Host::new(Tuning::default(), 1, Recorder::default());
    host.on_scene_ready(288.0, 512.0, 64.0).unwrap();
    host.on_tap_input();

    for _ in 0..(60 * 3) {
        host.on_frame_tick(SIM_DT);
    }
    let state = host.state().unwrap();
    assert_eq!(state.phase(), GamePhase::Over);
    assert_eq!(state.player.pos.y, 64.0);
    assert_eq!(count(&host.sink().log, "over"), 1);

    let frozen_len = host.sink().ys.len();
    for _ in 0..30 {
        host.on_frame_tick(SIM_DT);
    }
    // No transform updates once over
    assert_eq!(host.sink().ys.len(), frozen_len);
    assert_eq!(host.state().unwrap().player.pos.y, 64.0);
}

#[test]
fn one_point_per_gate() {
    let tuning = Tuning::default();
    let mut host = Host::new(tuning, 9, Recorder::default());
    host.on_scene_ready(288.0, 512.0, 64.0).unwrap();

    let mut state = host.state().unwrap().clone();
    start(&mut state);
    let player_x = state.player.pos.x;

    // Three wide gates queued up ahead of the player
    for i in 0..3 {
        let layout = GateLayout::around(270.0, player_x + 10.0 + 60.0 * i as f32, 400.0, 320.0);
        spawn_gate(&mut state.pool, &layout, state.tuning.scroll_speed);
    }

    for _ in 0..(60 * 3) {
        state.player.vel.y = 0.0;
        state.player.pos.y = 256.0;
        tick(&mut state, SIM_DT);
    }

    let events = state.drain_events();
    let scored = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Scored))
        .count();
    assert_eq!(scored, 3);
    assert_eq!(state.session.score, 3);
    // Top segments are never marked passed
    assert!(
        state
            .pool
            .iter_active()
            .filter(|s| s.role == ObstacleRole::Top)
            .all(|s| !s.passed)
    );
}

#[test]
fn reset_returns_obstacles_to_pool() {
    let mut host = Host::new(Tuning::default(), 3, Recorder::default());
    host.on_scene_ready(288.0, 512.0, 64.0).unwrap();
    host.on_tap_input();

    // Hover until the first gate has spawned, then stop flapping and drop
    for frame in 0..(60 * 4) {
        if frame % 18 == 0 && host.state().unwrap().player.pos.y < 300.0 {
            host.on_tap_input();
        }
        host.on_frame_tick(SIM_DT);
    }
    assert_eq!(host.state().unwrap().phase(), GamePhase::Running);
    for _ in 0..(60 * 5) {
        host.on_frame_tick(SIM_DT);
    }
    assert_eq!(host.state().unwrap().phase(), GamePhase::Over);

    let spawned = host.sink().spawned.len();
    assert_eq!(spawned, 2, "expected exactly one gate");

    host.on_tap_input();
    let state = host.state().unwrap();
    assert_eq!(state.phase(), GamePhase::Idle);
    assert_eq!(state.session.score, 0);
    assert!(state.pool.active_ids().is_empty());
    for role in [ObstacleRole::Top, ObstacleRole::Bottom] {
        assert_eq!(state.pool.dead_count(role), state.pool.constructed(role));
    }
    assert_eq!(count(&host.sink().log, "reset"), 1);

    // Next round revives instead of allocating
    let constructed = state.pool.constructed(ObstacleRole::Top);
    host.on_tap_input();
    for frame in 0..(60 * 3) {
        if frame % 18 == 0 && host.state().unwrap().player.pos.y < 300.0 {
            host.on_tap_input();
        }
        host.on_frame_tick(SIM_DT);
    }
    assert_eq!(host.state().unwrap().pool.constructed(ObstacleRole::Top), constructed);
}

#[test]
fn spawned_gates_stay_within_jitter_band() {
    let mut host = Host::new(Tuning::default(), 77, Recorder::default());
    host.on_scene_ready(288.0, 512.0, 64.0).unwrap();
    let mut state = host.state().unwrap().clone();
    start(&mut state);

    for _ in 0..(60 * 30) {
        // Keep the player away from the obstacle lane
        state.player.pos = glam::Vec2::new(-1000.0, 300.0);
        state.player.vel.y = 0.0;
        tick(&mut state, SIM_DT);
    }
    assert!(state.gates_spawned >= 10);

    for segment in state.pool.iter_active() {
        let center = match segment.role {
            ObstacleRole::Top => segment.entity.pos.y + 320.0 + 60.0,
            ObstacleRole::Bottom => segment.entity.pos.y - 60.0,
        };
        assert!((256.0 - 51.2 - 1e-3..=256.0 + 51.2 + 1e-3).contains(&center));
        assert_eq!(segment.entity.vel.x, -96.0);
    }
}
