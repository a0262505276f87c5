//! Bubble motion and click resolution
//!
//! A bubble is a square bounding box (top-left `pos`, side `size`) drifting at
//! constant velocity and bouncing off the playfield edges. The header zone at
//! the top of the playfield is off limits.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::WordEntry;
use crate::consts::*;

/// Bubble entity ID
pub type BubbleId = u32;

/// The area bubbles move in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Reserved header zone; bubbles stay at or below this y
    pub top_inset: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32, top_inset: f32) -> Self {
        Self {
            width,
            height,
            top_inset,
        }
    }

    /// Largest x a bubble of `size` may take (never below 0)
    pub fn max_x(&self, size: f32) -> f32 {
        (self.width - size).max(0.0)
    }

    /// Largest y a bubble of `size` may take (never above the inset)
    pub fn max_y(&self, size: f32) -> f32 {
        (self.height - size).max(self.top_inset)
    }
}

/// Result of clicking a bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    Correct,
    Incorrect,
}

/// One word in play
#[derive(Debug, Clone)]
pub struct Bubble {
    pub id: BubbleId,
    /// Shared with the catalog and the round's remaining words
    pub word: Rc<WordEntry>,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Diameter, fixed at creation
    pub size: f32,
}

impl Bubble {
    /// Create a bubble with random size, position and velocity inside `field`
    pub fn spawn<R: Rng>(id: BubbleId, word: Rc<WordEntry>, field: &Playfield, rng: &mut R) -> Self {
        let size = rng.random_range(BUBBLE_MIN_SIZE..BUBBLE_MAX_SIZE);
        let x = rng.random_range(0.0..=field.max_x(size));
        let y = rng.random_range(field.top_inset..=field.max_y(size));
        let vel = Vec2::new(
            rng.random_range(BUBBLE_MIN_SPEED..BUBBLE_MAX_SPEED),
            rng.random_range(BUBBLE_MIN_SPEED..BUBBLE_MAX_SPEED),
        );
        Self {
            id,
            word,
            pos: Vec2::new(x, y),
            vel,
            size,
        }
    }

    /// Move one tick, reflecting off the four edges
    pub fn advance(&mut self, field: &Playfield) {
        self.pos += self.vel;

        let max_x = field.max_x(self.size);
        if self.pos.x <= 0.0 {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x >= max_x {
            self.vel.x = -self.vel.x.abs();
        }

        let max_y = field.max_y(self.size);
        if self.pos.y <= field.top_inset {
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y >= max_y {
            self.vel.y = -self.vel.y.abs();
        }

        self.clamp_to(field);
    }

    /// Pull the bounding box fully inside `field`
    pub fn clamp_to(&mut self, field: &Playfield) {
        self.pos.x = self.pos.x.clamp(0.0, field.max_x(self.size));
        self.pos.y = self.pos.y.clamp(field.top_inset, field.max_y(self.size));
    }

    /// Whether this bubble shows the target word
    pub fn resolve_click(&self, target: Option<&WordEntry>) -> ClickOutcome {
        match target {
            Some(target) if self.word.same_word(target) => ClickOutcome::Correct,
            _ => ClickOutcome::Incorrect,
        }
    }
}
