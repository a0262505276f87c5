//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio, speech or platform dependencies

pub mod bubble;
pub mod commands;
pub mod state;
pub mod tick;
pub mod timer;

pub use bubble::{Bubble, BubbleId, ClickOutcome, Playfield};
pub use commands::{Command, CommandLog, Presenter, Screen, Tone, UserInput};
pub use state::{RoundPhase, Session};
pub use tick::{handle_input, tick};
pub use timer::{Scheduler, TimerTask};
