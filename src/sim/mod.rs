//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - Spawns scheduled inside the tick, never from a concurrent timer
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod entity;
pub mod gate;
pub mod ground;
pub mod obstacle;
pub mod physics;
pub mod state;
pub mod tick;

pub use clock::{FrameClock, SpawnTimer};
pub use collision::{Aabb, SweepResult, ground_contact, sweep_obstacles};
pub use entity::Entity;
pub use gate::{GateLayout, SpawnedGate, opening_center, spawn_gate};
pub use ground::GroundStrip;
pub use obstacle::{ObstaclePool, ObstacleRole, ObstacleSegment, SegmentId};
pub use state::{GameEvent, GamePhase, GameSession, GameState, Scene};
pub use tick::{autopilot_wants_tap, reset, start, tap, tick};
