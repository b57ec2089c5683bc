//! Scrolling ground strip
//!
//! Two scene-wide tiles scroll left with the obstacles. When a tile has fully
//! left the screen it leap-frogs to sit just behind the other one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundStrip {
    /// Left edge of each tile
    pub tiles: [f32; 2],
    pub tile_width: f32,
    /// Tiles overlap by this much after a wrap so no seam shows
    pub seam_overlap: f32,
}

impl GroundStrip {
    pub fn new(tile_width: f32, seam_overlap: f32) -> Self {
        Self {
            tiles: [0.0, tile_width],
            tile_width,
            seam_overlap,
        }
    }

    /// Scroll left by `dx` world units
    pub fn advance(&mut self, dx: f32) {
        for tile in &mut self.tiles {
            *tile -= dx;
        }
        for i in 0..self.tiles.len() {
            if self.tiles[i] < -self.tile_width {
                let next = self.tiles[(i + 1) % self.tiles.len()];
                self.tiles[i] = next + self.tile_width - self.seam_overlap;
            }
        }
    }

    pub fn reset(&mut self) {
        self.tiles = [0.0, self.tile_width];
    }
}
