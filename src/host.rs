//! Host boundary
//!
//! The render/input/audio collaborator talks to the simulation only through
//! [`Host`]: it reports scene bounds once, forwards taps, and drives frames.
//! Outbound notifications are drained from the simulation after every call
//! and handed to an [`EventSink`]. Sink methods return nothing, so a failing
//! collaborator cannot stall or corrupt the simulation.

use thiserror::Error;

use crate::is_positive_finite;
use crate::sim::{self, FrameClock, GameEvent, GameState, ObstacleSegment, Scene};
use crate::tuning::Tuning;

/// Receiver for simulation notifications. Every method defaults to a no-op.
pub trait EventSink {
    fn score_changed(&mut self, _score: u32) {}
    fn player_transform_changed(&mut self, _x: f32, _y: f32, _angle: f32) {}
    fn obstacle_spawned(&mut self, _segment: &ObstacleSegment) {}
    fn obstacle_retired(&mut self, _segment: &ObstacleSegment) {}
    fn game_over(&mut self) {}
    fn flapped(&mut self) {}
    fn scored(&mut self) {}
    fn reset(&mut self) {}
}

/// Sink that only logs the notifications worth seeing in a console
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn score_changed(&mut self, score: u32) {
        log::debug!("Score: {}", score);
    }

    fn obstacle_spawned(&mut self, segment: &ObstacleSegment) {
        log::trace!("Spawned {:?} {:?} at {}", segment.role, segment.id, segment.entity.pos);
    }

    fn game_over(&mut self) {
        log::info!("Hit!");
    }
}

/// How host frame deltas become simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMode {
    /// Accumulate into fixed `sim_dt` steps
    #[default]
    Fixed,
    /// One tick per frame with the (clamped) frame delta
    Variable,
}

/// Rejected `on_scene_ready` arguments
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("scene {name} must be finite and positive, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
    #[error("ground top {ground_top_y} must lie within the scene height {height}")]
    GroundOutOfRange { ground_top_y: f32, height: f32 },
}

pub struct Host<S: EventSink> {
    tuning: Tuning,
    seed: u64,
    mode: StepMode,
    clock: FrameClock,
    state: Option<GameState>,
    sink: S,
    warned_bad_dt: bool,
}

impl<S: EventSink> Host<S> {
    pub fn new(tuning: Tuning, seed: u64, sink: S) -> Self {
        let clock = FrameClock::new(tuning.sim_dt, tuning.max_substeps, tuning.max_frame_dt);
        Self {
            tuning,
            seed,
            mode: StepMode::default(),
            clock,
            state: None,
            sink,
            warned_bad_dt: false,
        }
    }

    pub fn with_step_mode(mut self, mode: StepMode) -> Self {
        self.mode = mode;
        self
    }

    /// One-time setup with the world bounds. Calling it again rebuilds the world.
    pub fn on_scene_ready(
        &mut self,
        width: f32,
        height: f32,
        ground_top_y: f32,
    ) -> Result<(), SceneError> {
        let scene = validate_scene(width, height, ground_top_y).inspect_err(|e| {
            log::error!("Rejected scene: {}", e);
        })?;

        if self.state.is_some() {
            log::info!("Scene rebuilt: {}x{}", width, height);
        } else {
            log::info!(
                "Scene ready: {}x{}, ground at {} (seed {})",
                width,
                height,
                ground_top_y,
                self.seed
            );
        }

        let mut state = GameState::new(self.seed, self.tuning.clone(), scene);
        state.emit_player_transform();
        self.state = Some(state);
        self.clock.reset();
        self.dispatch();
        Ok(())
    }

    /// Forward a discrete activation event
    pub fn on_tap_input(&mut self) {
        let Some(state) = self.state.as_mut() else {
            log::debug!("Tap ignored: scene not ready");
            return;
        };
        sim::tap(state);
        self.dispatch();
    }

    /// Drive the simulation forward by a host frame delta (seconds).
    ///
    /// Returns the number of simulation ticks that ran.
    pub fn on_frame_tick(&mut self, dt: f32) -> u32 {
        let dt = self.sanitize_dt(dt);
        let Some(state) = self.state.as_mut() else {
            return 0;
        };

        let ticks = match self.mode {
            StepMode::Fixed => {
                let steps = self.clock.advance(dt);
                for _ in 0..steps {
                    sim::tick(state, self.clock.step);
                }
                steps
            }
            StepMode::Variable => {
                sim::tick(state, dt.min(self.tuning.max_frame_dt));
                1
            }
        };

        self.dispatch();
        ticks
    }

    /// Clamp bad deltas to zero, warning the first time only
    fn sanitize_dt(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt >= 0.0 {
            return dt;
        }
        if !self.warned_bad_dt {
            log::warn!("Frame delta {} is not a finite non-negative value; using 0", dt);
            self.warned_bad_dt = true;
        }
        0.0
    }

    fn dispatch(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        for event in state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => self.sink.score_changed(score),
                GameEvent::PlayerTransformChanged { x, y, angle } => {
                    self.sink.player_transform_changed(x, y, angle)
                }
                GameEvent::ObstacleSpawned(segment) => self.sink.obstacle_spawned(&segment),
                GameEvent::ObstacleRetired(segment) => self.sink.obstacle_retired(&segment),
                GameEvent::GameOver => self.sink.game_over(),
                GameEvent::Flapped => self.sink.flapped(),
                GameEvent::Scored => self.sink.scored(),
                GameEvent::Reset => self.sink.reset(),
            }
        }
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

fn validate_scene(width: f32, height: f32, ground_top_y: f32) -> Result<Scene, SceneError> {
    for (name, value) in [("width", width), ("height", height)] {
        if !is_positive_finite(value) {
            return Err(SceneError::InvalidDimension { name, value });
        }
    }
    if !(ground_top_y.is_finite() && (0.0..height).contains(&ground_top_y)) {
        return Err(SceneError::GroundOutOfRange {
            ground_top_y,
            height,
        });
    }
    Ok(Scene::new(width, height, ground_top_y))
}
