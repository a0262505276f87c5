//! Bubble Words - a vocabulary listening game
//!
//! A word is spoken aloud; the player pops the floating bubble that shows it.
//!
//! Core modules:
//! - `catalog`: Vocabulary entries tagged with a difficulty level
//! - `sim`: Deterministic simulation (bubble motion, round state machine, timers)
//! - `platform`: Presentation layer (DOM, speech, logging presenter)
//! - `settings`: Runtime configuration

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod catalog;
pub mod platform;
pub mod settings;
pub mod sim;

pub use catalog::{Catalog, WordEntry};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one bubble step per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Bubble diameter range (px), half-open
    pub const BUBBLE_MIN_SIZE: f32 = 80.0;
    pub const BUBBLE_MAX_SIZE: f32 = 120.0;
    /// Per-axis speed range (px per tick), half-open
    pub const BUBBLE_MIN_SPEED: f32 = -1.0;
    pub const BUBBLE_MAX_SPEED: f32 = 1.0;

    /// Words drawn into a round (inclusive)
    pub const ROUND_MIN_WORDS: usize = 10;
    pub const ROUND_MAX_WORDS: usize = 15;

    /// Header zone reserved above the playfield (px)
    pub const HEADER_INSET: f32 = 96.0;

    /// Delay before the target is spoken after a transition (0.5 s at 60 Hz)
    pub const SPEAK_DELAY_TICKS: u32 = 30;
    /// Pop animation length before a solved bubble's view is dropped
    pub const POP_DELAY_TICKS: u32 = 18;
}
