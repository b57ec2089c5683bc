//! Skyhop headless runner
//!
//! Drives the simulation through the host boundary with the demo autopilot
//! and logs the round summaries. Usage: `skyhop [seed] [tuning.json]`

use std::process::ExitCode;

use skyhop::consts::GROUND_HEIGHT;
use skyhop::sim::{GamePhase, ObstacleSegment, autopilot_wants_tap};
use skyhop::{EventSink, Host, Tuning};

/// Default portrait scene (288x512)
const SCENE_WIDTH: f32 = 288.0;
const SCENE_HEIGHT: f32 = 512.0;
/// Rounds to play before exiting
const ROUNDS: u32 = 3;
/// Give up on a round after this many simulated seconds
const MAX_ROUND_SECS: u32 = 120;

#[derive(Debug, Default)]
struct RoundStats {
    flaps: u32,
    score: u32,
    spawned: u32,
    retired: u32,
    hit: bool,
}

impl EventSink for RoundStats {
    fn flapped(&mut self) {
        self.flaps += 1;
    }

    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn scored(&mut self) {
        log::debug!("Scored ({})", self.score + 1);
    }

    fn obstacle_spawned(&mut self, _segment: &ObstacleSegment) {
        self.spawned += 1;
    }

    fn obstacle_retired(&mut self, _segment: &ObstacleSegment) {
        self.retired += 1;
    }

    fn game_over(&mut self) {
        self.hit = true;
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Skyhop (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        None => 0x5EED,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Seed must be an unsigned integer: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let mut host = Host::new(tuning, seed, RoundStats::default());
    let frame_dt = host.tuning().sim_dt;
    if let Err(e) = host.on_scene_ready(SCENE_WIDTH, SCENE_HEIGHT, GROUND_HEIGHT) {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    let frames_per_round = (MAX_ROUND_SECS as f32 / frame_dt) as u32;
    let mut best = 0;

    for round in 1..=ROUNDS {
        for _ in 0..frames_per_round {
            if host.state().is_some_and(autopilot_wants_tap) {
                host.on_tap_input();
            }
            host.on_frame_tick(frame_dt);
            if host.state().is_some_and(|s| s.phase() == GamePhase::Over) {
                break;
            }
        }

        let stats = std::mem::take(host.sink_mut());
        best = best.max(stats.score);
        log::info!(
            "Round {}: score {}, {} flaps, {} segments spawned, {} retired{}",
            round,
            stats.score,
            stats.flaps,
            stats.spawned,
            stats.retired,
            if stats.hit { "" } else { " (time limit)" }
        );
        println!("round {round}: score {}", stats.score);

        // Tap once from Over to reset; a round cut short by the time limit is reset directly
        match host.state().map(|s| s.phase()) {
            Some(GamePhase::Over) => host.on_tap_input(),
            Some(GamePhase::Running) => {
                if let Err(e) = host.on_scene_ready(SCENE_WIDTH, SCENE_HEIGHT, GROUND_HEIGHT) {
                    log::error!("{}", e);
                    return ExitCode::FAILURE;
                }
            }
            _ => {}
        }
        // Reset notifications are not part of the next round's stats
        *host.sink_mut() = RoundStats::default();
    }

    println!("best: {best}");
    ExitCode::SUCCESS
}
