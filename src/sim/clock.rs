//! Simulation clock and spawn scheduling
//!
//! `FrameClock` turns variable host frame deltas into a whole number of fixed
//! steps. `SpawnTimer` is the periodic gate trigger; it is advanced from inside
//! the tick so spawns are ordered before the collision pass of the same step.

use serde::{Deserialize, Serialize};

/// Fixed-step accumulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    pub step: f32,
    pub max_substeps: u32,
    pub max_frame_dt: f32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32, max_frame_dt: f32) -> Self {
        Self {
            step,
            max_substeps,
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    /// Add a frame delta; returns how many fixed steps to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.min(self.max_frame_dt);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Time carried over to the next frame
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Periodic spawn trigger measured in simulated seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval: f32,
    elapsed: f32,
    running: bool,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            running: false,
        }
    }

    /// Start counting from zero. The first spawn comes one full interval later.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Stop and clear progress. Safe to call any number of times.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt`; returns the number of spawns that fell due
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed += dt;

        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_accumulates_partial_steps() {
        let mut clock = FrameClock::new(0.01, 8, 0.1);
        assert_eq!(clock.advance(0.005), 0);
        assert_eq!(clock.advance(0.005), 1);
        assert_eq!(clock.advance(0.035), 3);
        assert!((clock.remainder() - 0.005).abs() < 1e-5);
    }

    #[test]
    fn test_frame_clock_clamps_long_frames() {
        let mut clock = FrameClock::new(0.0625, 8, 0.25);
        // A 5 second hitch is treated as a quarter second: 4 steps, not 80
        assert_eq!(clock.advance(5.0), 4);
    }

    #[test]
    fn test_frame_clock_caps_substeps() {
        let mut clock = FrameClock::new(0.01, 4, 1.0);
        assert_eq!(clock.advance(0.1), 4);
        clock.reset();
        assert_eq!(clock.remainder(), 0.0);
    }

    #[test]
    fn test_spawn_timer_fires_once_per_interval() {
        let mut timer = SpawnTimer::new(2.6);
        assert_eq!(timer.advance(10.0), 0, "stopped timer never fires");

        timer.start();
        let mut fired = 0;
        for _ in 0..(60 * 6) {
            fired += timer.advance(1.0 / 60.0);
        }
        // 6 seconds: spawns at 2.6 and 5.2
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_spawn_timer_stop_is_idempotent() {
        let mut timer = SpawnTimer::new(1.0);
        timer.start();
        timer.advance(0.5);
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.advance(5.0), 0);

        // Restart begins a fresh interval
        timer.start();
        assert_eq!(timer.advance(0.5), 0);
        assert_eq!(timer.advance(0.5), 1);
    }
}
