//! Game state and core simulation types
//!
//! Everything the state machine mutates lives in [`GameState`]: the session
//! flags, the player, the obstacle pool, the ground strip, the spawn timer
//! and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SpawnTimer;
use super::entity::Entity;
use super::ground::GroundStrip;
use super::obstacle::{ObstaclePool, ObstacleSegment};
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player hovers in place, waiting for the first tap
    Idle,
    /// Gravity, obstacles and scoring are live
    Running,
    /// Player hit something; everything is frozen until the next tap
    Over,
}

/// Score and lifecycle flags for one round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u32,
    pub started: bool,
    pub over: bool,
}

impl GameSession {
    pub fn phase(&self) -> GamePhase {
        match (self.started, self.over) {
            (_, true) => GamePhase::Over,
            (true, false) => GamePhase::Running,
            (false, false) => GamePhase::Idle,
        }
    }
}

/// World bounds supplied by the host once at setup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    /// Player contacts the ground when its bottom edge is at or below this line
    pub ground_top_y: f32,
}

impl Scene {
    pub fn new(width: f32, height: f32, ground_top_y: f32) -> Self {
        Self {
            width,
            height,
            ground_top_y,
        }
    }

    #[inline]
    pub fn left_bound(&self) -> f32 {
        0.0
    }

    #[inline]
    pub fn right_bound(&self) -> f32 {
        self.width
    }
}

/// Outbound notifications for the render and audio collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u32),
    PlayerTransformChanged { x: f32, y: f32, angle: f32 },
    ObstacleSpawned(ObstacleSegment),
    ObstacleRetired(ObstacleSegment),
    /// Player hit an obstacle or the ground ("hit" sound cue)
    GameOver,
    Flapped,
    Scored,
    /// Round was reset back to idle
    Reset,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub scene: Scene,
    pub session: GameSession,
    pub player: Entity,
    pub pool: ObstaclePool,
    pub ground: GroundStrip,
    pub spawn_timer: SpawnTimer,
    /// Seconds spent idle since the last reset (drives the hover bob)
    pub hover_time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Gates spawned this round
    pub gates_spawned: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state for `scene`, with the player at its start position
    pub fn new(seed: u64, tuning: Tuning, scene: Scene) -> Self {
        let player_size = tuning.player_size();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            pool: ObstaclePool::new(tuning.segment_size()),
            ground: GroundStrip::new(scene.width, tuning.ground_seam_overlap),
            spawn_timer: SpawnTimer::new(tuning.spawn_interval),
            player: Entity::new(Vec2::ZERO, player_size),
            tuning,
            scene,
            session: GameSession::default(),
            hover_time: 0.0,
            time_ticks: 0,
            gates_spawned: 0,
            events: Vec::new(),
        };

        let start = state.player_start();
        state.player.reset(start.x, start.y);
        state
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    /// Fixed start position; also the center line of the idle hover
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.scene.width * self.tuning.start_x_fraction,
            self.scene.height * self.tuning.start_y_fraction,
        )
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every event queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit_player_transform(&mut self) {
        let Entity { pos, angle, .. } = self.player;
        self.events.push(GameEvent::PlayerTransformChanged {
            x: pos.x,
            y: pos.y,
            angle,
        });
    }
}
